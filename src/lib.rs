//! Mudskipper Core
//!
//! This crate provides the engine behind a MUD client:
//! - Command-alias compilation and matching with positional wildcards
//! - Fixed-capacity scrollback ring buffer
//! - Regex include/exclude filtering over buffered lines
//! - Server-config document parsing (YAML alias definitions)
//! - Server entity with an event reducer, command history, and snapshots
//!
//! Network transport, ANSI decoding, and rendering are external
//! collaborators. This crate has NO UI dependencies and can be driven
//! headlessly for testing.

pub mod alias;
pub mod color;
pub mod config;
pub mod filter;
pub mod history;
pub mod line;
pub mod ring;
pub mod server;

pub use alias::{AliasMatch, AliasMatcher, PatternError, PatternErrorKind};
pub use color::{Color, NamedColor, Rgb};
pub use config::{parse_server_config, ConfigError, ServerConfig};
pub use filter::{FilterMode, LineFilter};
pub use history::{CommandHistory, HistoryDirection};
pub use line::{Chunk, Decorations, Line};
pub use ring::{RingBuffer, MAX_SCROLLBACK_LINES};
pub use server::{ConnectionState, Encoding, Server, ServerEvent};
