//! End-to-end tests: config document -> server -> events -> views

use mudskipper::config::parse_server_config;
use mudskipper::line::{Chunk, Line};
use mudskipper::server::{ConnectionState, Encoding, Server, ServerEvent};
use mudskipper::{ConfigError, FilterMode};

const MARKUP: &str = r#"aliases:
  "f": feed self
  "c *": |
    cast $1
  "c fire": |
    cast fireball
  "gr *": |
    get $1
    wear $1
"#;

fn build_server() -> Server {
    let config = parse_server_config(MARKUP).expect("markup should parse");
    Server::new(
        "mud.example.org:4000",
        "Example",
        "mud.example.org",
        4000,
        Encoding::Auto,
        config,
    )
}

#[test]
fn session_receives_filters_and_submits() {
    let mut server = build_server();
    server.apply(ServerEvent::StatusChanged(ConnectionState::Connected));

    // Decoder delivers a flush: one complete line, one left open
    server.apply(ServerEvent::NewLine {
        chunks: vec![Chunk::plain("Gamedriver: reboot in 5")],
        terminate: true,
    });
    server.apply(ServerEvent::AppendChunk(Chunk::plain("You see a ")));
    server.apply(ServerEvent::AppendChunk(Chunk::plain("rusty sword here.")));

    assert_eq!(server.lines().len(), 2);

    // Hide the driver chatter
    server.apply(ServerEvent::SetFilterMode(FilterMode::Exclude));
    server.apply(ServerEvent::UpdateLineFilter {
        mode: FilterMode::Exclude,
        index: 0,
        fragment: "^Gamedriver:".to_string(),
    });

    let visible = server.filtered_lines();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].text(), "You see a rusty sword here.");

    // The literal pattern outranks the wildcard one
    assert_eq!(server.submit("c fire"), vec!["cast fireball"]);
    assert_eq!(server.submit("c ice"), vec!["cast ice"]);

    // Multi-line expansion becomes several outgoing commands
    assert_eq!(server.submit("gr cloak"), vec!["get cloak", "wear cloak"]);

    // Raw drafts recorded newest first, unexpanded
    assert_eq!(server.command_history(), &["gr cloak", "c ice", "c fire"]);
}

#[test]
fn config_replacement_swaps_matcher_atomically() {
    let mut server = build_server();
    assert!(server.alias_hint("f").is_some());

    let replacement = parse_server_config("aliases:\n  \"n\": north\n").expect("parses");
    server.apply(ServerEvent::SetConfig(replacement));

    assert!(server.alias_hint("f").is_none());
    assert_eq!(server.submit("n"), vec!["north"]);
}

#[test]
fn invalid_documents_never_reach_the_server() {
    let err = parse_server_config("aliases:\n  \"*\": boom\n").expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidAliases(_)));

    let err = parse_server_config("not yaml: [").expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidDocument(_)));
}

#[test]
fn snapshot_is_valid_json() {
    let mut server = build_server();
    server.apply(ServerEvent::AppendLines(vec![Line::from_text("hello")]));

    let json = server.snapshot().expect("should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("snapshot parses");
    assert_eq!(value["id"], "mud.example.org:4000");
    assert_eq!(value["status"], "disconnected");
}
