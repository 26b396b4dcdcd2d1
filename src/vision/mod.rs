//! Edge-connection vision pipeline: prompt construction, remote inference,
//! and validation of the model's untrusted answer into a connection map.

pub mod client;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod sanitize;

pub use client::VisionClient;
pub use pipeline::{classify_tile_edges, classify_views};
pub use prompt::TileContext;
pub use report::parse_connections;
