//! **gemgrid-core**: the grid model shared by every gemgrid crate.
//!
//! This crate provides geometry primitives, the [`Board`] of open, wall and
//! item cells, the ordered [`ItemList`] and the [`ItemMask`] family used to
//! track collected items during a search.

pub mod board;
pub mod geom;
pub mod items;

pub use board::{Board, BoardError, CellState};
pub use geom::{Point, Range};
pub use items::{ItemList, ItemMask, ItemSet, MaskWidth};
