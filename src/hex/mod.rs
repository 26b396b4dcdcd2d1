//! Hexagonal tile vocabulary: the fixed direction table and the per-edge
//! connection map that the pipeline produces.

pub mod connections;
pub mod direction;

pub use connections::{EdgeConnection, TileConnections};
pub use direction::HexDirection;
