//! Concurrent implementations of core components
//!
//! This module provides thread-safe variants of the scoring components using
//! DashMap for fine-grained locking.
//!
//! # Architecture
//!
//! - **AsyncTransactionStore**: claimed IDs and per-account histories in DashMaps
//! - **AsyncScoringEngine**: runs the scoring heuristics over the shared store
//! - **BatchProcessor**: scores batches with one task per account
//!
//! # Thread Safety
//!
//! - Duplicate detection is atomic over the whole store
//! - Different accounts are scored in parallel
//! - One account's transactions are scored and appended one at a time

pub mod batch_processor;
pub mod engine;
pub mod transaction_store;

pub use batch_processor::BatchProcessor;
pub use engine::AsyncScoringEngine;
pub use transaction_store::AsyncTransactionStore;
