#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Results store implementations for valuation reports.
//!
//! This crate provides implementations of the [`ResultsStore`] trait from `valuation-core`:
//!
//! - [`InMemoryResultsStore`] - Append-only store scoped to one analysis session

/// In-memory store implementation.
pub mod memory;

// Re-export the trait for convenience
pub use valuation_core::ResultsStore;

pub use memory::InMemoryResultsStore;
