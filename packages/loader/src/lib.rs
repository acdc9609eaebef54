//! Batched, deduplicating load coordination for one request
//!
//! Resolvers that walk a query graph tend to fetch related rows one parent at
//! a time. A [`LoadCoordinator`] collects those lookups while a short window
//! is open, hands the unique keys to a [`BatchFn`] in one call, and routes the
//! results back to every caller that asked for each key.
//!
//! Coordinators are cheap to build and must be scoped to a single external
//! request. Nothing is shared between coordinators, and by default nothing is
//! remembered between windows of the same coordinator.
//!
//! ```no_run
//! use bookstore_loader::{ok_map, BatchFn, BatchResult, LoadCoordinator};
//!
//! struct Squares;
//!
//! impl BatchFn<u64> for Squares {
//!     type Value = u64;
//!     type Error = String;
//!
//!     async fn load(&self, keys: &[u64]) -> Result<BatchResult<u64, u64, String>, String> {
//!         Ok(ok_map(keys.iter().map(|k| (*k, k * k))))
//!     }
//! }
//!
//! # async fn run() {
//! let loader = LoadCoordinator::new(Squares);
//! let (a, b) = tokio::join!(loader.load(3), loader.load(4));
//! assert_eq!(a, Ok(9));
//! assert_eq!(b, Ok(16));
//! # }
//! ```

mod batch_fn;
mod buffer;
mod config;
mod coordinator;
mod distribute;
mod error;

pub use batch_fn::{ok_map, BatchFn, BatchResult, Key};
pub use config::{LoaderConfig, DEFAULT_DELAY, DEFAULT_MAX_BATCH_SIZE};
pub use coordinator::{LoadCoordinator, LoaderStats};
pub use error::{LoadError, LoadResult};

pub use tokio_util::sync::CancellationToken;
