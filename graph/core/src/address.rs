//! Address rendering of locking scripts.
//!
//! The graph only compares resolved address strings against a caller supplied
//! watch list, so any [`AddressResolver`] works. [`StandardAddressResolver`]
//! covers the two templates with a base58check form (P2PKH and P2SH).

use txgraph_hashes::double_sha256;

use crate::errors::{CoreError, CoreResult};
use crate::network::NetworkType;
use crate::tx::{ScriptClass, ScriptPublicKey};

/// Maps a locking script to a comparable address string
pub trait AddressResolver {
    /// Returns `None` for scripts with no address form under `network`
    fn resolve(&self, script: &ScriptPublicKey, network: NetworkType) -> Option<String>;
}

impl<F> AddressResolver for F
where
    F: Fn(&ScriptPublicKey, NetworkType) -> Option<String>,
{
    fn resolve(&self, script: &ScriptPublicKey, network: NetworkType) -> Option<String> {
        self(script, network)
    }
}

/// Base58check rendering of P2PKH and P2SH scripts
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardAddressResolver;

impl AddressResolver for StandardAddressResolver {
    fn resolve(&self, script: &ScriptPublicKey, network: NetworkType) -> Option<String> {
        match script.class() {
            ScriptClass::PubKeyHash(hash) => Some(encode_base58check(network.pubkey_hash_prefix(), hash)),
            ScriptClass::ScriptHash(hash) => Some(encode_base58check(network.script_hash_prefix(), hash)),
            ScriptClass::NonStandard => None,
        }
    }
}

/// version byte || payload || first 4 bytes of double SHA256, base58 encoded
pub fn encode_base58check(version: u8, payload: &[u8]) -> String {
    let mut versioned_payload = Vec::with_capacity(payload.len() + 5);
    versioned_payload.push(version);
    versioned_payload.extend_from_slice(payload);

    let checksum = double_sha256(&versioned_payload);
    versioned_payload.extend_from_slice(&checksum[0..4]);

    bs58::encode(&versioned_payload).into_string()
}

/// Returns the version byte and payload of a base58check string
pub fn decode_base58check(address: &str) -> CoreResult<(u8, Vec<u8>)> {
    let decoded = bs58::decode(address).into_vec().map_err(|_| CoreError::InvalidAddress(address.to_string()))?;
    if decoded.len() < 5 {
        return Err(CoreError::InvalidAddress(address.to_string()));
    }

    let (body, checksum) = decoded.split_at(decoded.len() - 4);
    if double_sha256(body)[0..4] != *checksum {
        return Err(CoreError::ChecksumMismatch(address.to_string()));
    }

    Ok((body[0], body[1..].to_vec()))
}

/// Builds the locking script an address pays to
pub fn address_to_script(address: &str, network: NetworkType) -> CoreResult<ScriptPublicKey> {
    let (version, payload) = decode_base58check(address)?;
    let hash: [u8; 20] = payload.as_slice().try_into().map_err(|_| CoreError::InvalidAddress(address.to_string()))?;

    if version == network.pubkey_hash_prefix() {
        Ok(ScriptPublicKey::p2pkh(&hash))
    } else if version == network.script_hash_prefix() {
        Ok(ScriptPublicKey::p2sh(&hash))
    } else {
        Err(CoreError::WrongNetwork { address: address.to_string(), network: network.to_string() })
    }
}
