//! Arbor Visualization
//!
//! Step-by-step playback of tree and graph algorithms.
//!
//! # Architecture
//!
//! - **Frames**: An algorithm's visit order becomes a [`Sequence`] of
//!   highlight snapshots
//! - **Playback**: A [`Sequencer`] delivers frames one interval apart and can
//!   be cancelled at any point
//! - **Session**: Pairs a structure with its sequencer and refuses mutations
//!   while a run is in flight
//!
//! # Usage
//!
//! ```ignore
//! let mut session = Session::new(BinarySearchTree::new());
//! for value in [5, 3, 8, 1, 4] {
//!     session.insert(value)?;
//! }
//!
//! let run = session.run(Algorithm::InOrder, None, None, |delivery| {
//!     println!("{delivery:?}");
//! })?;
//! run.play().await;
//! ```

mod config;
mod error;
mod frames;
mod playback;
mod session;

pub use config::{HighlightMode, PlaybackConfig, SHORTEST_PATH_INTERVAL, TRAVERSAL_INTERVAL};
pub use error::{Error, Result};
pub use frames::{Frame, Highlight, Sequence};
pub use playback::{Delivery, Outcome, PlaybackState, PlaybackStatus, Run, Sequencer};
pub use session::{Session, Visualize};

pub use arbor_algorithms::{Algorithm, StructureKind, Visit};
pub use arbor_structures::{
    BinarySearchTree, BinaryTree, EdgeId, Graph, NodeId, Position, TreeLayout,
};
