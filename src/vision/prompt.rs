//! Prompt construction for edge classification.
//!
//! Identical inputs must yield byte-identical prompt text; tests and any
//! caller-side caching rely on that. The orientation convention and the
//! image order both come from the direction table, never restated by hand.

use crate::hex::HexDirection;

/// Tile metadata hints passed through from the asset layer.
#[derive(Debug, Clone, Default)]
pub struct TileContext {
    pub tile_type: Option<String>,
    pub biome: Option<String>,
}

/// The two text blocks sent with every classification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgePrompt {
    pub system: String,
    pub user: String,
}

/// Build the system and user instructions for one tile.
pub fn build_edge_prompt(ctx: &TileContext) -> EdgePrompt {
    EdgePrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: build_user_prompt(ctx),
    }
}

/// System prompt: orientation convention, connection vocabulary, and the
/// exact response schema.
const SYSTEM_PROMPT: &str = r#"You are analyzing renders of a single hexagonal terrain tile for a map editor.

ORIENTATION CONVENTION:
- The tile is modeled with north at the top of the frame.
- The six edges are named east (0 deg), southeast (60 deg), southwest (120 deg), west (180 deg), northwest (240 deg), northeast (300 deg).
- northwest and northeast are the two edges adjacent to north.

CONNECTION TYPES (closed set):
- grass: open land continuing across the edge
- water: open water crossing the edge
- coast: a shoreline running along the edge
- road: a road or path crossing the edge

OUTPUT FORMAT (JSON only, no explanation):
{
  "connections": {
    "east": "grass" | "water" | "coast" | "road" | null,
    "southeast": "grass" | "water" | "coast" | "road" | null,
    "southwest": "grass" | "water" | "coast" | "road" | null,
    "west": "grass" | "water" | "coast" | "road" | null,
    "northwest": "grass" | "water" | "coast" | "road" | null,
    "northeast": "grass" | "water" | "coast" | "road" | null
  }
}

Use null for an edge with no connection. Answer by edge name, never by image number."#;

fn build_user_prompt(ctx: &TileContext) -> String {
    let tile_type = ctx.tile_type.as_deref().unwrap_or("unknown");
    let biome = ctx.biome.as_deref().unwrap_or("unknown");

    let mut prompt = format!(
        "Tile type: {}\nBiome: {}\n\nYou are given {} renders of the same hexagonal tile, one per edge, in this order:\n",
        tile_type,
        biome,
        HexDirection::ALL.len()
    );

    for (i, direction) in HexDirection::ALL.iter().enumerate() {
        prompt.push_str(&format!(
            "Image {}: camera at the {} edge ({} deg orbit), looking at the tile center.\n",
            i + 1,
            direction.label(),
            direction.angle_degrees() as i32
        ));
    }

    prompt.push_str(
        "\nNorth is at the top of every frame. Classify what crosses each edge and reply with the JSON object described in the system instructions.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let ctx = TileContext {
            tile_type: Some("river_bend".into()),
            biome: Some("grassland".into()),
        };
        assert_eq!(build_edge_prompt(&ctx), build_edge_prompt(&ctx));
    }

    #[test]
    fn test_missing_metadata_defaults_to_unknown() {
        let prompt = build_edge_prompt(&TileContext::default());
        assert!(prompt.user.contains("Tile type: unknown"));
        assert!(prompt.user.contains("Biome: unknown"));
    }

    #[test]
    fn test_user_prompt_lists_directions_in_canonical_order() {
        let prompt = build_edge_prompt(&TileContext::default());
        let positions: Vec<usize> = HexDirection::ALL
            .iter()
            .map(|d| {
                prompt
                    .user
                    .find(&format!("the {} edge", d.label()))
                    .unwrap_or_else(|| panic!("{} missing from user prompt", d.label()))
            })
            .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "directions listed out of canonical order");
    }

    #[test]
    fn test_system_prompt_states_contract() {
        let prompt = build_edge_prompt(&TileContext::default());
        assert!(prompt.system.contains("north at the top"));
        assert!(prompt.system.contains("\"connections\""));
        for name in ["grass", "water", "coast", "road"] {
            assert!(prompt.system.contains(name));
        }
        for dir in HexDirection::ALL {
            assert!(prompt.system.contains(dir.label()));
        }
    }

    #[test]
    fn test_metadata_flows_into_user_prompt() {
        let ctx = TileContext {
            tile_type: Some("crossroads".into()),
            biome: Some("desert".into()),
        };
        let prompt = build_edge_prompt(&ctx);
        assert!(prompt.user.contains("Tile type: crossroads"));
        assert!(prompt.user.contains("Biome: desert"));
    }
}
