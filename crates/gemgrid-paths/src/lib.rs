//! Connectivity checks and item-collecting path searches for gemgrid boards.
//!
//! - **Connectivity**: BFS distance maps, shortest paths and reachability
//!   ([`PathRange::bfs_map`], [`PathRange::shortest_path`], [`reachable`])
//! - **Max collection**: the shortest start-to-finish path that collects the
//!   most items ([`max_collection_path`])
//! - **Exact count**: the shortest path collecting exactly `T` items
//!   ([`exact_count_path`])
//! - **Greedy**: nearest-item-first approximation ([`greedy_path`])
//!
//! Connectivity queries go through [`PathRange`], which owns and reuses its
//! caches so that repeated queries incur no allocations after warm-up. The
//! item-collecting searches build their own state maps per call and drop
//! them on return.
//!
//! All searches expand neighbors in the order up, right, down, left; every
//! tie-break between equal-length paths follows from that order.

mod bfs;
mod collect;
mod distance;
mod error;
mod greedy;
mod pathrange;
mod traits;

pub use bfs::{reachable, shortest_path};
pub use collect::{exact_count_path, items_on_path, max_collection_path};
pub use distance::manhattan;
pub use error::{PlanError, check_target};
pub use greedy::greedy_path;
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use traits::Pather;
