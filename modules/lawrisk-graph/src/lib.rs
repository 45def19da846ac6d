pub mod analyzer;
pub mod assembler;
pub mod client;
pub mod error;
pub mod port;
pub mod reader;
pub mod snapshot;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use analyzer::Analyzer;
pub use assembler::assemble_rows;
pub use client::GraphClient;
pub use error::GraphError;
pub use neo4rs::query;
pub use port::{LawGraph, NeighborRecord, NeighborhoodRow};
pub use reader::GraphReader;
pub use snapshot::SnapshotGraph;
