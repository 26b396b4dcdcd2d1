//! Per-edge connection map produced by the vision pipeline.

use crate::hex::direction::HexDirection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Terrain category assigned to one tile edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeConnection {
    Grass,
    Water,
    Coast,
    Road,
}

impl EdgeConnection {
    /// Lenient mapping from raw model output to a connection value.
    ///
    /// The `"unknown"` sentinel and every unrecognized string map to `None`,
    /// which callers treat the same as an absent key: no connection.
    pub fn parse_lenient(raw: &str) -> Option<EdgeConnection> {
        match raw {
            "grass" => Some(EdgeConnection::Grass),
            "water" => Some(EdgeConnection::Water),
            "coast" => Some(EdgeConnection::Coast),
            "road" => Some(EdgeConnection::Road),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            EdgeConnection::Grass => "grass",
            EdgeConnection::Water => "water",
            EdgeConnection::Coast => "coast",
            EdgeConnection::Road => "road",
        }
    }
}

/// Mapping from direction to connection type.
///
/// Directions with no connection are simply absent. Built once per pipeline
/// invocation and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TileConnections {
    #[serde(flatten)]
    edges: BTreeMap<HexDirection, EdgeConnection>,
}

impl TileConnections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, direction: HexDirection, connection: EdgeConnection) {
        self.edges.insert(direction, connection);
    }

    pub fn get(&self, direction: HexDirection) -> Option<EdgeConnection> {
        self.edges.get(&direction).copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate connected edges in canonical direction order.
    pub fn iter(&self) -> impl Iterator<Item = (HexDirection, EdgeConnection)> + '_ {
        HexDirection::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|c| (d, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_known_values() {
        assert_eq!(EdgeConnection::parse_lenient("grass"), Some(EdgeConnection::Grass));
        assert_eq!(EdgeConnection::parse_lenient("water"), Some(EdgeConnection::Water));
        assert_eq!(EdgeConnection::parse_lenient("coast"), Some(EdgeConnection::Coast));
        assert_eq!(EdgeConnection::parse_lenient("road"), Some(EdgeConnection::Road));
    }

    #[test]
    fn test_parse_lenient_rejects_sentinel_and_noise() {
        assert_eq!(EdgeConnection::parse_lenient("unknown"), None);
        assert_eq!(EdgeConnection::parse_lenient("lava"), None);
        assert_eq!(EdgeConnection::parse_lenient("Grass"), None);
        assert_eq!(EdgeConnection::parse_lenient(""), None);
    }

    #[test]
    fn test_absent_means_no_connection() {
        let mut conns = TileConnections::new();
        conns.insert(HexDirection::West, EdgeConnection::Road);

        assert_eq!(conns.get(HexDirection::West), Some(EdgeConnection::Road));
        assert_eq!(conns.get(HexDirection::East), None);
        assert_eq!(conns.len(), 1);
    }

    #[test]
    fn test_iter_follows_canonical_order() {
        let mut conns = TileConnections::new();
        conns.insert(HexDirection::Northeast, EdgeConnection::Water);
        conns.insert(HexDirection::East, EdgeConnection::Grass);

        let order: Vec<HexDirection> = conns.iter().map(|(d, _)| d).collect();
        assert_eq!(order, vec![HexDirection::East, HexDirection::Northeast]);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut conns = TileConnections::new();
        conns.insert(HexDirection::East, EdgeConnection::Water);
        conns.insert(HexDirection::West, EdgeConnection::Road);

        let json = serde_json::to_value(&conns).unwrap();
        assert_eq!(json["east"], "water");
        assert_eq!(json["west"], "road");
        assert!(json.get("southeast").is_none());
    }
}
