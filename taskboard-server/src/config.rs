//! Where the server listens, which task directory it seeds from, and which
//! asset directory it serves.
//!
//! Each setting is taken from the first source that sets it: a command-line
//! flag (or its `TASKBOARD_*` environment variable), then the `[server]`
//! table of `config.toml`, then the built-in default.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Why the config file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists (or was named explicitly) but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for the `[server]` table.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// On-disk `config.toml`. Every key is optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerTable,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerTable {
    bind_addr: Option<String>,
    tasks_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
}

/// Command-line flags for the `taskboard` binary.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Taskboard task list server")]
pub struct ServerCliArgs {
    /// Listen address, e.g. `127.0.0.1:3000`.
    #[arg(short, long, env = "TASKBOARD_ADDR")]
    pub bind: Option<String>,

    /// Config file to use instead of `~/.config/taskboard/config.toml`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of JSON task files loaded at start-up.
    #[arg(long, env = "TASKBOARD_TASKS_DIR")]
    pub tasks_dir: Option<PathBuf>,

    /// Directory of static assets served under `/`.
    #[arg(long, env = "TASKBOARD_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// `tracing` filter directive, e.g. `debug` or `taskboard_server=trace`.
    #[arg(long, default_value = "info", env = "TASKBOARD_LOG")]
    pub log_level: String,
}

/// Settings the server starts with.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Seeded into the store once at start-up.
    pub tasks_dir: PathBuf,
    pub static_dir: PathBuf,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            tasks_dir: PathBuf::from("saved-tasks"),
            static_dir: PathBuf::from("public"),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads the config file and applies `cli` on top of it.
    ///
    /// A missing file at the default location is the same as an empty one.
    /// A file named with `--config` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(cli: &ServerCliArgs) -> Result<Self, ConfigError> {
        let file = read_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    fn resolve(cli: &ServerCliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();
        let table = &file.server;

        Self {
            bind_addr: pick(cli.bind.as_ref(), table.bind_addr.as_ref(), defaults.bind_addr),
            tasks_dir: pick(cli.tasks_dir.as_ref(), table.tasks_dir.as_ref(), defaults.tasks_dir),
            static_dir: pick(cli.static_dir.as_ref(), table.static_dir.as_ref(), defaults.static_dir),
            log_level: cli.log_level.clone(),
        }
    }
}

fn pick<T: Clone>(flag: Option<&T>, file: Option<&T>, default: T) -> T {
    flag.or(file).cloned().unwrap_or(default)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskboard").join("config.toml"))
}

fn read_config_file(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(ConfigFile::default()),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if !required && e.kind() == ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
