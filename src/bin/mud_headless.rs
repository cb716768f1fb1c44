//! Mudskipper Headless Runner
//!
//! Drives the client engine without a UI: loads a server-config document,
//! compiles the alias set, and treats each input line (stdin or a file)
//! as a submitted draft. The expanded command lines go to stdout and into
//! the command history, and the would-be scrollback can be dumped at the
//! end, optionally as a JSON snapshot.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mudskipper::config::{parse_server_config, DEFAULT_CONFIG_MARKUP};
use mudskipper::line::Chunk;
use mudskipper::server::{Encoding, Server, ServerEvent};
use mudskipper::FilterMode;

/// CLI arguments for the headless runner
#[derive(Parser, Debug)]
#[command(name = "mud-headless")]
#[command(version)]
#[command(about = "Run drafts through the alias engine without a UI", long_about = None)]
struct CliArgs {
    /// Path to a YAML server-config document (defaults to the built-in
    /// starter aliases)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read drafts from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Server name used in the session banner
    #[arg(long, default_value = "headless")]
    name: String,

    /// Host the session pretends to target
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port the session pretends to target
    #[arg(long, default_value_t = 23)]
    port: u16,

    /// Filter mode applied when dumping scrollback
    #[arg(long, value_enum, default_value = "off")]
    filter_mode: FilterModeArg,

    /// Regex fragment for the active filter mode (repeatable)
    #[arg(long = "filter", value_name = "REGEX")]
    filters: Vec<String>,

    /// Dump the final server state as JSON instead of text
    #[arg(short, long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FilterModeArg {
    Off,
    Include,
    Exclude,
}

impl From<FilterModeArg> for FilterMode {
    fn from(arg: FilterModeArg) -> Self {
        match arg {
            FilterModeArg::Off => FilterMode::Off,
            FilterModeArg::Include => FilterMode::Include,
            FilterModeArg::Exclude => FilterMode::Exclude,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    let markup = match &args.config {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Error reading config '{}': {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => DEFAULT_CONFIG_MARKUP.to_string(),
    };

    let config = match parse_server_config(&markup) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let id = format!("{}:{}", args.host, args.port);
    let mut server = Server::new(id, &args.name, &args.host, args.port, Encoding::Auto, config);

    let mode = FilterMode::from(args.filter_mode);
    server.apply(ServerEvent::SetFilterMode(mode));
    for (index, fragment) in args.filters.iter().enumerate() {
        server.apply(ServerEvent::UpdateLineFilter {
            mode,
            index,
            fragment: fragment.clone(),
        });
    }

    println!(
        "# {} ({}): {} alias pattern(s)",
        server.name(),
        server.id(),
        server.matcher().len()
    );

    let drafts = match read_drafts(&args.file) {
        Ok(drafts) => drafts,
        Err(err) => {
            eprintln!("Error reading input: {}", err);
            return ExitCode::FAILURE;
        }
    };

    for draft in drafts {
        if draft.trim().is_empty() {
            continue;
        }

        let matched = server.alias_hint(&draft).is_some();
        let sent = server.submit(&draft);
        for command in &sent {
            if matched {
                println!("> {}  [alias]", command);
            } else {
                println!("> {}", command);
            }
            server.apply(ServerEvent::NewLine {
                chunks: vec![Chunk::plain(command.clone())],
                terminate: false,
            });
        }
    }

    if args.json {
        match server.snapshot() {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Error serializing snapshot: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("---");
        for line in server.filtered_lines() {
            println!("{}", line.text());
        }
        println!("---");
    }

    ExitCode::SUCCESS
}

fn read_drafts(file: &Option<PathBuf>) -> io::Result<Vec<String>> {
    match file {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(text.lines().map(str::to_string).collect())
        }
        None => io::stdin().lock().lines().collect(),
    }
}
