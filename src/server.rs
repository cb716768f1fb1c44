//! Server entity and event reducer
//!
//! A `Server` owns everything the client tracks for one connection:
//! identity, connection status, scrollback, command history, the parsed
//! config and its compiled alias matcher, and the line-filter settings.
//! All mutation goes through [`Server::apply`], a reducer over the closed
//! [`ServerEvent`] set; each event is one atomic synchronous step, so no
//! partially-applied state is ever observable between callbacks.

use serde::{Deserialize, Serialize};

use crate::alias::{AliasMatch, AliasMatcher};
use crate::config::ServerConfig;
use crate::filter::{FilterMode, LineFilter};
use crate::line::{Chunk, Line};
use crate::ring::{RingBuffer, MAX_SCROLLBACK_LINES};

/// Connection lifecycle, driven by the transport collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Character encoding requested from the telnet proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Auto,
    Utf8,
    Latin1,
}

/// The closed set of state transitions a server can undergo
#[derive(Debug, Clone)]
pub enum ServerEvent {
    StatusChanged(ConnectionState),
    /// Append complete lines to scrollback
    AppendLines(Vec<Line>),
    /// Append a decoded chunk to the line currently being received
    AppendChunk(Chunk),
    /// Start a new scrollback line; `terminate` opens another empty line
    /// right after it (the decoder saw a line break at the end of a flush)
    NewLine { chunks: Vec<Chunk>, terminate: bool },
    PushCommandHistory(String),
    /// Replace the config and recompile the alias matcher
    SetConfig(ServerConfig),
    SetFilterMode(FilterMode),
    /// Set the fragment at `index`, appending when the index is one past
    /// the end
    UpdateLineFilter {
        mode: FilterMode,
        index: usize,
        fragment: String,
    },
    DeleteLineFilter { mode: FilterMode, index: usize },
    /// Rename / repoint the server; the id is re-derived from host:port
    UpdateIdentity {
        name: String,
        host: String,
        port: u16,
        encoding: Encoding,
    },
}

/// State for one configured game server
#[derive(Debug, Clone, Serialize)]
pub struct Server {
    id: String,
    name: String,
    host: String,
    port: u16,
    encoding: Encoding,
    status: ConnectionState,
    /// Newest first
    command_history: Vec<String>,
    config: ServerConfig,
    #[serde(skip)]
    matcher: AliasMatcher,
    lines: RingBuffer<Line>,
    filter_mode: FilterMode,
    line_filters_include: Vec<String>,
    line_filters_exclude: Vec<String>,
}

impl Server {
    /// Create a server with an empty scrollback.
    ///
    /// The id is supplied by the caller; this crate does not mint
    /// identifiers. A config whose aliases somehow fail to compile (they
    /// cannot when it came from `parse_server_config`) leaves the server
    /// with an empty matcher rather than failing construction.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        encoding: Encoding,
        config: ServerConfig,
    ) -> Self {
        let matcher = compile_or_empty(&config);
        Server {
            id: id.into(),
            name: name.into(),
            host: host.into(),
            port,
            encoding,
            status: ConnectionState::Disconnected,
            command_history: Vec::new(),
            config,
            matcher,
            lines: RingBuffer::new(MAX_SCROLLBACK_LINES),
            filter_mode: FilterMode::Off,
            line_filters_include: vec![String::new()],
            line_filters_exclude: vec![String::new()],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn status(&self) -> ConnectionState {
        self.status
    }

    /// Newest-first submitted commands
    pub fn command_history(&self) -> &[String] {
        &self.command_history
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn matcher(&self) -> &AliasMatcher {
        &self.matcher
    }

    pub fn lines(&self) -> &RingBuffer<Line> {
        &self.lines
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn line_filters(&self, mode: FilterMode) -> &[String] {
        match mode {
            FilterMode::Exclude => &self.line_filters_exclude,
            _ => &self.line_filters_include,
        }
    }

    /// Apply one state transition.
    pub fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::StatusChanged(status) => {
                self.status = status;
            }
            ServerEvent::AppendLines(lines) => {
                self.lines.extend(lines);
            }
            ServerEvent::AppendChunk(chunk) => {
                if self.lines.is_empty() {
                    self.lines.push(Line::new());
                }
                if let Some(last) = self.lines.back_mut() {
                    last.push_chunk(chunk);
                }
            }
            ServerEvent::NewLine { chunks, terminate } => {
                self.lines.push(Line::from_chunks(chunks));
                if terminate {
                    self.lines.push(Line::new());
                }
            }
            ServerEvent::PushCommandHistory(command) => {
                self.command_history.insert(0, command);
            }
            ServerEvent::SetConfig(config) => {
                self.matcher = compile_or_empty(&config);
                self.config = config;
            }
            ServerEvent::SetFilterMode(mode) => {
                self.filter_mode = mode;
            }
            ServerEvent::UpdateLineFilter {
                mode,
                index,
                fragment,
            } => {
                let Some(filters) = self.filters_mut(mode) else {
                    return;
                };
                if index < filters.len() {
                    filters[index] = fragment;
                } else {
                    filters.push(fragment);
                }
            }
            ServerEvent::DeleteLineFilter { mode, index } => {
                let Some(filters) = self.filters_mut(mode) else {
                    return;
                };
                if index >= filters.len() {
                    tracing::warn!("line filter index {} out of range", index);
                    return;
                }
                filters.remove(index);
                // The editor always shows a trailing empty slot
                if filters.last().map(String::as_str) != Some("") {
                    filters.push(String::new());
                }
            }
            ServerEvent::UpdateIdentity {
                name,
                host,
                port,
                encoding,
            } => {
                self.name = name;
                self.host = host;
                self.port = port;
                self.encoding = encoding;
                self.id = format!("{}:{}", self.host, self.port);
            }
        }
    }

    fn filters_mut(&mut self, mode: FilterMode) -> Option<&mut Vec<String>> {
        match mode {
            FilterMode::Off => None,
            FilterMode::Include => Some(&mut self.line_filters_include),
            FilterMode::Exclude => Some(&mut self.line_filters_exclude),
        }
    }

    /// The scrollback view after the active line filter
    pub fn filtered_lines(&self) -> Vec<&Line> {
        let filter = LineFilter::new(
            self.filter_mode,
            &self.line_filters_include,
            &self.line_filters_exclude,
        );
        filter.filter(self.lines.iter())
    }

    /// Per-keystroke alias lookup for the input-box hint
    pub fn alias_hint(&self, draft: &str) -> Option<AliasMatch> {
        self.matcher.find_match(draft)
    }

    /// Resolve a submitted draft into the command lines to send.
    ///
    /// The raw draft (not its expansion) is recorded in command history.
    /// A draft matching an alias expands to that alias's output lines;
    /// anything else is sent verbatim. Empty drafts send nothing.
    pub fn submit(&mut self, input: &str) -> Vec<String> {
        if input.trim().is_empty() {
            return Vec::new();
        }

        self.command_history.insert(0, input.to_string());

        match self.matcher.find_match(input) {
            Some(m) => m.output,
            None => vec![input.to_string()],
        }
    }

    /// Serialize the observable state for the debug surface
    pub fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn compile_or_empty(config: &ServerConfig) -> AliasMatcher {
    match config.compile_aliases() {
        Ok(matcher) => matcher,
        Err(errors) => {
            tracing::warn!(
                "config aliases failed to compile ({} errors); aliases disabled",
                errors.len()
            );
            AliasMatcher::default()
        }
    }
}
