//! Station graph construction.
//!
//! Turns flat connection records into the adjacency lists, connection
//! table, alias index and display table that route search reads.

mod aliases;
mod network;
mod record;

pub use aliases::{AliasIndex, normalize};
pub use network::{Connection, Edge, GraphStats, LineEntry, StationEntry, StationGraph};
pub use record::{ConnectionRecord, retain_named};
