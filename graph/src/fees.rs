//! Fee and value propagation over the graph.
//!
//! Amounts of spent outputs are read from the predecessor transactions held by
//! the graph, so a transaction's fee is only known when every transaction it
//! spends from has been inserted. Anything spending from a stub reports
//! [`FeeAndValue::Unknown`] instead of a guessed number.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use txgraph_core::address::{AddressResolver, StandardAddressResolver};
use txgraph_core::tx::{ScriptPublicKey, TransactionId, TransactionView};

use crate::config::FeeConfig;
use crate::dag::TxGraph;
use crate::errors::{GraphError, GraphResult};

/// Fee and watched-address value of one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FeeAndValue {
    /// `fee` = spent amounts minus own outputs, `value` = watched outputs minus watched spent outputs
    Known { fee: i64, value: i64 },
    /// Some spent output lives in a transaction the graph does not hold
    Unknown,
}

impl FeeAndValue {
    pub fn fee(&self) -> Option<i64> {
        match self {
            FeeAndValue::Known { fee, .. } => Some(*fee),
            FeeAndValue::Unknown => None,
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            FeeAndValue::Known { value, .. } => Some(*value),
            FeeAndValue::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, FeeAndValue::Known { .. })
    }
}

struct WatchedOutputs<'a, R: ?Sized> {
    resolver: &'a R,
    config: &'a FeeConfig,
}

impl<R: AddressResolver + ?Sized> WatchedOutputs<'_, R> {
    fn pays(&self, script: &ScriptPublicKey) -> bool {
        if self.config.watched_addresses.is_empty() {
            return false;
        }
        self.resolver.resolve(script, self.config.network).is_some_and(|address| self.config.is_watched(&address))
    }
}

impl<T: TransactionView> TxGraph<T> {
    /// Fee and value of every transaction that spends from at least one node,
    /// rendering addresses with [`StandardAddressResolver`].
    pub fn calculate_fees_and_values(&self, config: &FeeConfig) -> GraphResult<HashMap<TransactionId, FeeAndValue>> {
        self.calculate_fees_and_values_with(&StandardAddressResolver, config)
    }

    /// Like [`calculate_fees_and_values`](Self::calculate_fees_and_values) with a caller supplied resolver.
    ///
    /// Fails without partial results when the funding boundary holds a full
    /// transaction, or when a transaction spending directly from the boundary
    /// pays a watched address.
    pub fn calculate_fees_and_values_with<R: AddressResolver + ?Sized>(
        &self,
        resolver: &R,
        config: &FeeConfig,
    ) -> GraphResult<HashMap<TransactionId, FeeAndValue>> {
        let watched = WatchedOutputs { resolver, config };
        self.check_funding_boundary(&watched)?;

        let mut results = HashMap::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<TransactionId> = self.head_ids().to_vec();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = self.find_node(&id) else {
                continue;
            };
            stack.extend(node.predecessors().iter().filter(|p| !visited.contains(*p)));

            if node.is_tail() {
                continue;
            }
            if let Some(tx) = node.tx() {
                results.insert(id, self.fee_and_value(tx, &watched));
            }
        }

        Ok(results)
    }

    /// Fee-only projection of [`calculate_fees_and_values`](Self::calculate_fees_and_values)
    pub fn calculate_fees(&self, config: &FeeConfig) -> GraphResult<HashMap<TransactionId, Option<i64>>> {
        Ok(self.calculate_fees_and_values(config)?.into_iter().map(|(id, outcome)| (id, outcome.fee())).collect())
    }

    /// Fee and value of a single transaction, which does not have to be part of the graph.
    /// Its spent outputs are looked up among the graph's transactions.
    pub fn calculate_fee(&self, tx: &T, config: &FeeConfig) -> FeeAndValue {
        self.calculate_fee_with(&StandardAddressResolver, tx, config)
    }

    pub fn calculate_fee_with<R: AddressResolver + ?Sized>(&self, resolver: &R, tx: &T, config: &FeeConfig) -> FeeAndValue {
        self.fee_and_value(tx, &WatchedOutputs { resolver, config })
    }

    fn check_funding_boundary<R: AddressResolver + ?Sized>(&self, watched: &WatchedOutputs<'_, R>) -> GraphResult<()> {
        let tails = self.tails();
        if let Some(funded) = tails.iter().find(|tail| !tail.is_stub()) {
            return Err(GraphError::FundedTail(funded.id()));
        }

        for tail in &tails {
            for successor in tail.successor_ids() {
                let Some(tx) = self.find_tx(&successor) else {
                    continue;
                };
                if let Some(index) = tx.outputs().iter().position(|output| watched.pays(&output.script_public_key)) {
                    return Err(GraphError::WatchedFundingOutput { tx: successor, index: index as u32 });
                }
            }
        }

        Ok(())
    }

    fn fee_and_value<R: AddressResolver + ?Sized>(&self, tx: &T, watched: &WatchedOutputs<'_, R>) -> FeeAndValue {
        // i128 holds any sum of u64 amounts
        let mut spent_total: i128 = 0;
        let mut spent_watched: i128 = 0;
        let mut inputs = 0usize;

        for outpoint in tx.outpoints() {
            inputs += 1;
            let spent = self.find_tx(&outpoint.transaction_id).and_then(|prev| prev.output(outpoint.index));
            let Some(spent) = spent else {
                debug!("fee of {} is unknown: {} is not available", tx.id(), outpoint);
                return FeeAndValue::Unknown;
            };
            spent_total += i128::from(spent.value);
            if watched.pays(&spent.script_public_key) {
                spent_watched += i128::from(spent.value);
            }
        }
        if inputs == 0 {
            return FeeAndValue::Unknown;
        }

        let mut output_total: i128 = 0;
        let mut output_watched: i128 = 0;
        for output in tx.outputs() {
            output_total += i128::from(output.value);
            if watched.pays(&output.script_public_key) {
                output_watched += i128::from(output.value);
            }
        }

        match (i64::try_from(spent_total - output_total), i64::try_from(output_watched - spent_watched)) {
            (Ok(fee), Ok(value)) => FeeAndValue::Known { fee, value },
            _ => {
                warn!(
                    "fee of {} is unknown: fee {} or value {} does not fit in 64 bits",
                    tx.id(),
                    spent_total - output_total,
                    output_watched - spent_watched
                );
                FeeAndValue::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{fake_tx_id, p2pkh_output, TestTx};
    use txgraph_core::NetworkType;

    const W: u8 = 0xaa;
    const X: u8 = 0x01;
    const Y: u8 = 0x02;

    fn watched_config() -> FeeConfig {
        let script = ScriptPublicKey::p2pkh(&[W; 20]);
        let address = StandardAddressResolver.resolve(&script, NetworkType::Testnet).unwrap();
        FeeConfig::new(NetworkType::Testnet).watch(address)
    }

    /// stub 0 <- 1 <- 2 <- 3, with 2 paying a watched address that 3 spends
    fn value_chain() -> TxGraph<TestTx> {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::paying(3, &[(2, 0)], vec![p2pkh_output(2500, Y), p2pkh_output(400, W)]));
        graph.insert(TestTx::paying(1, &[(0, 0)], vec![p2pkh_output(5000, X)]));
        graph.insert(TestTx::paying(2, &[(1, 0)], vec![p2pkh_output(3000, W), p2pkh_output(1900, Y)]));
        graph
    }

    #[test]
    fn test_two_input_fee() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::paying(10, &[(1, 0)], vec![p2pkh_output(1000, X)]));
        graph.insert(TestTx::paying(11, &[(2, 0)], vec![p2pkh_output(2000, X)]));
        graph.insert(TestTx::paying(20, &[(10, 0), (11, 0)], vec![p2pkh_output(2500, Y)]));

        let results = graph.calculate_fees_and_values(&FeeConfig::default()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[&fake_tx_id(20)], FeeAndValue::Known { fee: 500, value: 0 });
        assert_eq!(results[&fake_tx_id(10)], FeeAndValue::Unknown);
        assert_eq!(results[&fake_tx_id(11)], FeeAndValue::Unknown);
        assert!(!results.contains_key(&fake_tx_id(1)));
    }

    #[test]
    fn test_amounts_beyond_i64_are_unknown() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::paying(10, &[(1, 0)], vec![p2pkh_output(u64::MAX, X), p2pkh_output(10, X)]));
        graph.insert(TestTx::paying(20, &[(10, 0), (10, 1)], vec![p2pkh_output(u64::MAX, Y)]));
        graph.insert(TestTx::paying(11, &[(2, 0)], vec![p2pkh_output(1 << 63, X)]));
        graph.insert(TestTx::paying(21, &[(11, 0)], vec![p2pkh_output(0, Y)]));

        let results = graph.calculate_fees_and_values(&FeeConfig::default()).unwrap();
        // Spent total exceeds u64, but the fee itself fits
        assert_eq!(results[&fake_tx_id(20)], FeeAndValue::Known { fee: 10, value: 0 });
        // 2^63 is one past i64::MAX and must not come out negative
        assert_eq!(results[&fake_tx_id(21)], FeeAndValue::Unknown);
    }

    #[test]
    fn test_watched_value_beyond_i64_is_unknown() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::paying(10, &[(1, 0)], vec![p2pkh_output(u64::MAX, X)]));
        graph.insert(TestTx::paying(20, &[(10, 0)], vec![p2pkh_output(u64::MAX, W)]));

        let results = graph.calculate_fees_and_values(&watched_config()).unwrap();
        assert_eq!(results[&fake_tx_id(20)], FeeAndValue::Unknown);
    }

    #[test]
    fn test_funded_tail_is_rejected() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::paying(2, &[(1, 0)], vec![p2pkh_output(900, X)]));
        graph.insert(TestTx::paying(3, &[(2, 0)], vec![p2pkh_output(800, X)]));
        graph.insert(TestTx::paying(1, &[], vec![p2pkh_output(1000, X)]));

        assert_eq!(graph.calculate_fees_and_values(&FeeConfig::default()), Err(GraphError::FundedTail(fake_tx_id(1))));
        assert!(graph.calculate_fees(&FeeConfig::default()).is_err());
    }

    #[test]
    fn test_watched_funding_output_is_rejected() {
        let mut graph = TxGraph::new();
        graph.insert(TestTx::paying(1, &[(0, 0)], vec![p2pkh_output(5000, X), p2pkh_output(100, W)]));

        assert_eq!(
            graph.calculate_fees_and_values(&watched_config()),
            Err(GraphError::WatchedFundingOutput { tx: fake_tx_id(1), index: 1 })
        );
        // unwatched, the same graph is fine
        assert!(graph.calculate_fees_and_values(&FeeConfig::new(NetworkType::Testnet)).is_ok());
    }

    #[test]
    fn test_values_follow_watched_addresses() {
        let graph = value_chain();
        let results = graph.calculate_fees_and_values(&watched_config()).unwrap();

        assert_eq!(results[&fake_tx_id(1)], FeeAndValue::Unknown);
        assert_eq!(results[&fake_tx_id(2)], FeeAndValue::Known { fee: 100, value: 3000 });
        assert_eq!(results[&fake_tx_id(3)], FeeAndValue::Known { fee: 100, value: -2600 });
    }

    #[test]
    fn test_address_rendering_depends_on_network() {
        let graph = value_chain();
        let mut config = watched_config();
        config.network = NetworkType::Mainnet;

        let results = graph.calculate_fees_and_values(&config).unwrap();
        assert_eq!(results[&fake_tx_id(2)], FeeAndValue::Known { fee: 100, value: 0 });
    }

    #[test]
    fn test_fees_projection() {
        let graph = value_chain();
        let fees = graph.calculate_fees(&FeeConfig::default()).unwrap();
        assert_eq!(fees[&fake_tx_id(1)], None);
        assert_eq!(fees[&fake_tx_id(2)], Some(100));
        assert_eq!(fees[&fake_tx_id(3)], Some(100));
    }

    #[test]
    fn test_fee_of_transaction_outside_graph() {
        let graph = value_chain();
        let tx = TestTx::paying(4, &[(3, 0)], vec![p2pkh_output(2000, X)]);

        assert_eq!(graph.calculate_fee(&tx, &FeeConfig::default()), FeeAndValue::Known { fee: 500, value: 0 });
        assert!(!graph.contains(&fake_tx_id(4)));
    }

    #[test]
    fn test_missing_output_index_is_unknown() {
        let graph = value_chain();
        let tx = TestTx::paying(4, &[(3, 7)], vec![p2pkh_output(10, X)]);
        assert_eq!(graph.calculate_fee(&tx, &FeeConfig::default()), FeeAndValue::Unknown);

        let coinbase = TestTx::paying(5, &[], vec![p2pkh_output(10, X)]);
        assert_eq!(graph.calculate_fee(&coinbase, &FeeConfig::default()), FeeAndValue::Unknown);
    }

    #[test]
    fn test_custom_resolver() {
        let graph = value_chain();
        let config = FeeConfig::default().watch("ours");
        let resolver = |script: &ScriptPublicKey, _: NetworkType| {
            (script == &ScriptPublicKey::p2pkh(&[Y; 20])).then(|| "ours".to_string())
        };

        let results = graph.calculate_fees_and_values_with(&resolver, &config).unwrap();
        assert_eq!(results[&fake_tx_id(2)], FeeAndValue::Known { fee: 100, value: 1900 });
        assert_eq!(results[&fake_tx_id(3)], FeeAndValue::Known { fee: 100, value: 2500 });
    }

    #[test]
    fn test_accessors() {
        let known = FeeAndValue::Known { fee: 5, value: -3 };
        assert_eq!(known.fee(), Some(5));
        assert_eq!(known.value(), Some(-3));
        assert!(known.is_known());
        assert_eq!(FeeAndValue::Unknown.fee(), None);
        assert!(!FeeAndValue::Unknown.is_known());
    }
}
