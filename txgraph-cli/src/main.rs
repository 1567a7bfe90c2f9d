use std::process;
use tracing::error;
use txgraph_cli::{cli, execute, Config};

fn main() {
    let args = cli::parse_args();

    let mut config = match &args.config_path {
        Some(path) => Config::load(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(2);
        }),
        None => Config::default(),
    };
    if let Err(e) = config.apply_cli_overrides(&args) {
        eprintln!("{}", e);
        process::exit(2);
    }

    init_logging(&config.log_level);

    match execute(&args, &config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn init_logging(log_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}
