//! **quadrille-core** — coordinate and grid container types for puzzle
//! solving.
//!
//! This crate provides the foundational types shared by grid puzzles: the
//! [`Position`] coordinate/direction vector with its named direction
//! constants, and the [`Grid`] container, a sparse-or-dense mapping from
//! positions to cell values with text parsing, offsets, origin
//! conventions, and dynamically expanding bounds.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::*;
pub use grid::{Grid, GridBuilder, Origin, blank};
