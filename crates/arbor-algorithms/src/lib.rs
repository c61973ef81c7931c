//! Arbor Algorithms
//!
//! Pure functions that turn a read-only structure into an ordered list of
//! [`Visit`]s. Nothing here sleeps, renders or mutates: playback is layered
//! on top by `arbor-vis`.
//!
//! # Algorithms
//!
//! - **Tree traversal**: in-order, pre-order, post-order, level-order
//! - **Graph traversal**: breadth-first and depth-first search, each visit
//!   carrying the edge it was reached through
//! - **Shortest path**: Dijkstra over non-negative weights
//!
//! Every function allocates its own working sets on each call, so running
//! the same algorithm twice over an unchanged structure yields the same
//! sequence.

mod algorithm;
mod error;
pub mod search;
pub mod shortest_path;
pub mod traversal;
mod visit;

pub use algorithm::{Algorithm, StructureKind};
pub use error::{Error, Result};
pub use search::{bfs, dfs};
pub use shortest_path::{dijkstra, ShortestPath};
pub use traversal::{in_order, level_order, post_order, pre_order};
pub use visit::{node_ids, Visit};
