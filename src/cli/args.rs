//! Startup arguments and runtime configuration.

use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a card file to load at startup.
pub const IMPORT_ENV: &str = "FLASHCARDS_IMPORT";
/// Environment variable naming the card file written on exit.
pub const EXPORT_ENV: &str = "FLASHCARDS_EXPORT";

/// Single-dash spellings accepted for compatibility with older launch scripts.
const LEGACY_FLAGS: [(&str, &str); 2] = [("-import", "--import"), ("-export", "--export")];

/// Terminal flashcard trainer
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Card file to load before the first prompt
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Card file to write when the session exits
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// Parses the process arguments, accepting `-import` / `-export` as well.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_flags(env::args_os()))
    }
}

/// Rewrites `-import` / `-export` into their `--` forms so clap can parse them.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            LEGACY_FLAGS
                .iter()
                .find(|(legacy, _)| arg.as_os_str() == *legacy)
                .map(|(_, modern)| OsString::from(modern))
                .unwrap_or(arg)
        })
        .collect()
}

/// Resolved configuration for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub import: Option<PathBuf>,
    pub export: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` (if any) and merges it with the command line.
    pub fn load(cli: Cli) -> Self {
        dotenv::dotenv().ok();
        Self::from_cli(cli)
    }

    /// Command line values win; unset ones fall back to the environment.
    pub fn from_cli(cli: Cli) -> Self {
        let config = Self {
            import: cli.import.or_else(|| path_from_env(IMPORT_ENV)),
            export: cli.export.or_else(|| path_from_env(EXPORT_ENV)),
        };
        debug!("Resolved configuration: {:?}", config);
        config
    }

    /// Target of the export performed on exit. Without a configured path this
    /// is the empty path, which is still attempted (and fails).
    pub fn exit_export_path(&self) -> &Path {
        self.export.as_deref().unwrap_or(Path::new(""))
    }
}

fn path_from_env(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
