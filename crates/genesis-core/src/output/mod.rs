//! Output Module
//!
//! World snapshots and the JSONL snapshot writer.

pub mod snapshot;

pub use snapshot::{snapshot, OutputError, SnapshotWriter};
