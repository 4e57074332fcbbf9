//! Ledger read/write latency measurement bot.
//!
//! This crate synthesizes a three-tier test graph (licenses ⊇ datasets ⊇
//! models) per simulated party, replays it into a remote ledger over its
//! HTTP JSON API, and then re-derives the same relationships by querying the
//! ledger while timing each read-path traversal. It reports mean, population
//! standard deviation, and latency percentiles per traversal kind.

pub mod auth;
pub mod bench;
pub mod config;
pub mod graph;
pub mod ledger;
pub mod replay;
pub mod stats;
pub mod traversal;
pub mod types;

pub use crate::bench::{run_benchmarks, BenchReport};
pub use crate::config::{Dimensions, ErrorPolicy, WriteMode};
