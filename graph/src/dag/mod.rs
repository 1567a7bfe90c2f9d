//! Transaction dependency graph
//!
//! This module provides:
//! - Node storage with mirrored predecessor/successor edges ([`node`])
//! - Order independent insertion and lookups ([`graph`])
//! - Ancestor checks ([`reachability`]) and topological layering ([`topology`])

pub mod graph;
pub mod node;
pub mod reachability;
pub mod topology;

pub use graph::TxGraph;
pub use node::{Node, NodeArena};
