//! Hex edge direction table.
//!
//! Tiles are modeled with north at the top of the rendered frame, so the
//! `northwest` and `northeast` edges are the two adjacent to north even
//! though their table angles are 240° and 300°. Rendering geometry and
//! prompt text must both keep this mapping.

use serde::{Deserialize, Serialize};

/// One of the six edges of a hexagonal tile.
///
/// Declaration order is the canonical order used everywhere: image capture,
/// prompt text, and response validation all iterate [`HexDirection::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexDirection {
    East,
    Southeast,
    Southwest,
    West,
    Northwest,
    Northeast,
}

impl HexDirection {
    /// All six directions in canonical order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::Southeast,
        HexDirection::Southwest,
        HexDirection::West,
        HexDirection::Northwest,
        HexDirection::Northeast,
    ];

    /// Camera orbit angle for this edge, in degrees.
    pub const fn angle_degrees(&self) -> f32 {
        match self {
            HexDirection::East => 0.0,
            HexDirection::Southeast => 60.0,
            HexDirection::Southwest => 120.0,
            HexDirection::West => 180.0,
            HexDirection::Northwest => 240.0,
            HexDirection::Northeast => 300.0,
        }
    }

    pub fn angle_radians(&self) -> f32 {
        self.angle_degrees().to_radians()
    }

    /// Lowercase name, used as the JSON key domain in prompts and responses.
    pub const fn label(&self) -> &'static str {
        match self {
            HexDirection::East => "east",
            HexDirection::Southeast => "southeast",
            HexDirection::Southwest => "southwest",
            HexDirection::West => "west",
            HexDirection::Northwest => "northwest",
            HexDirection::Northeast => "northeast",
        }
    }

    /// Look up a direction by its lowercase label.
    pub fn from_label(label: &str) -> Option<HexDirection> {
        HexDirection::ALL.iter().copied().find(|d| d.label() == label)
    }
}
