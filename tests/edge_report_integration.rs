//! Integration tests for the response sanitizer/validator contract.

use hexedge::core::error::VisionError;
use hexedge::hex::{EdgeConnection, HexDirection, TileConnections};
use hexedge::vision::parse_connections;

use proptest::prelude::*;

#[test]
fn reasoning_model_response_parses_like_plain_response() {
    let plain = parse_connections(r#"{"connections":{"east":"water","west":"road"}}"#).unwrap();
    let decorated = parse_connections(
        "<think>\nThe first image shows water lapping at the eastern edge.\n\
         The fourth image clearly shows a paved road heading west.\n</think>\n\
         ```json\n{\"connections\":{\"east\":\"water\",\"west\":\"road\"}}\n```",
    )
    .unwrap();
    assert_eq!(plain, decorated);
}

#[test]
fn chatty_response_with_prose_and_trailing_notes() {
    let response = r#"Looking at the six renders, here is my assessment.

{"connections": {
    "east": "grass",
    "southeast": "grass",
    "southwest": null,
    "west": "coast",
    "northwest": "water",
    "northeast": "water"
}}

Note: the southwest edge was too shadowed to judge."#;

    let conns = parse_connections(response).unwrap();
    assert_eq!(conns.len(), 5);
    assert_eq!(conns.get(HexDirection::West), Some(EdgeConnection::Coast));
    assert_eq!(conns.get(HexDirection::Southwest), None);
}

#[test]
fn per_field_anomalies_never_fail_a_parseable_object() {
    let response = r#"{"connections":{
        "east": "lava",
        "southeast": 42,
        "southwest": ["water"],
        "west": "road",
        "northwest": "unknown",
        "northeast": null
    }}"#;

    let conns = parse_connections(response).unwrap();
    assert_eq!(conns.len(), 1);
    assert_eq!(conns.get(HexDirection::West), Some(EdgeConnection::Road));
}

#[test]
fn truncated_response_is_a_parse_error_with_diagnostics() {
    let err = parse_connections(r#"{"connections":{"east":"water""#).unwrap_err();
    match err {
        VisionError::Parse { message, excerpt } => {
            assert!(!message.is_empty());
            assert!(excerpt.contains("east"));
        }
        other => panic!("expected Parse, got {:?}", other),
    }
    // Upstream fault for the API boundary, not a client-input fault
    let err = parse_connections("no braces at all").unwrap_err();
    assert_eq!(err.status_code(), 502);
}

#[test]
fn revalidating_serialized_output_is_identity() {
    let first = parse_connections(
        r#"{"connections":{"east":"grass","west":"road","northeast":"coast"}}"#,
    )
    .unwrap();

    let reserialized = format!(
        r#"{{"connections":{}}}"#,
        serde_json::to_string(&first).unwrap()
    );
    let second = parse_connections(&reserialized).unwrap();
    assert_eq!(first, second);

    // and a third pass stays fixed
    let reserialized_again = format!(
        r#"{{"connections":{}}}"#,
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(parse_connections(&reserialized_again).unwrap(), second);
}

fn expected_map(fields: &[(HexDirection, &str)]) -> TileConnections {
    let mut map = TileConnections::new();
    for (dir, value) in fields {
        if let Some(conn) = EdgeConnection::parse_lenient(value) {
            map.insert(*dir, conn);
        }
    }
    map
}

fn payload_json(fields: &[(HexDirection, &str)]) -> String {
    let entries: Vec<String> = fields
        .iter()
        .map(|(dir, value)| {
            if *value == "null" {
                format!(r#""{}":null"#, dir.label())
            } else {
                format!(r#""{}":"{}""#, dir.label(), value)
            }
        })
        .collect();
    format!(r#"{{"connections":{{{}}}}}"#, entries.join(","))
}

proptest! {
    /// Decorating a payload with reasoning blocks, fences, and prose never
    /// changes what a successful validation produces.
    #[test]
    fn decoration_never_changes_the_result(
        picks in proptest::collection::vec((0usize..6, 0usize..6), 0..6),
        prose_before in "[a-zA-Z ,.\n]{0,40}",
        prose_after in "[a-zA-Z ,.\n]{0,40}",
        reasoning in "[a-zA-Z ,.\n]{0,60}",
    ) {
        let values = ["grass", "water", "coast", "road", "unknown", "null"];
        let mut fields: Vec<(HexDirection, &str)> = Vec::new();
        for (dir_idx, value_idx) in picks {
            let dir = HexDirection::ALL[dir_idx];
            if fields.iter().all(|(d, _)| *d != dir) {
                fields.push((dir, values[value_idx]));
            }
        }

        let payload = payload_json(&fields);
        let decorated = format!(
            "<think>{}</think>{}```json\n{}\n```{}",
            reasoning, prose_before, payload, prose_after
        );

        let bare = parse_connections(&payload).unwrap();
        let wrapped = parse_connections(&decorated).unwrap();
        prop_assert_eq!(&bare, &wrapped);
        prop_assert_eq!(bare, expected_map(&fields));
    }
}
