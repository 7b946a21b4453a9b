// Configuration loading and parsing (config/santa.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::roster::Group;

/// Name of the config file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "santa.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub pairing: PairingConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    /// Participants added to the roster at startup, in file order.
    pub roster: Vec<PresetParticipant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairingConfig {
    /// Fixed RNG seed. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_clear_roster")]
    pub clear_roster_on_start_over: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            clear_roster_on_start_over: default_clear_roster(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            file: default_log_file(),
        }
    }
}

/// A validated preset roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetParticipant {
    pub name: String,
    pub group: Group,
}

fn default_clear_roster() -> bool {
    true
}

fn default_log_filter() -> String {
    "santa=info,santa_core=info,santa_tui=info,warn".to_string()
}

fn default_log_file() -> String {
    "logs/santa.log".to_string()
}

// ---------------------------------------------------------------------------
// santa.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole santa.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SantaFile {
    #[serde(default)]
    pairing: PairingConfig,
    #[serde(default)]
    session: SessionConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    roster: Vec<RosterEntry>,
}

/// Preset entry before its group text is checked.
#[derive(Debug, Clone, Deserialize)]
struct RosterEntry {
    name: String,
    group: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/santa.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: SantaFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let roster = file
        .roster
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| preset_from_entry(idx, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let config = Config {
        pairing: file.pairing,
        session: file.session,
        logging: file.logging,
        roster,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/santa.toml` exists by copying it from `defaults/`.
/// Returns the copied paths (empty when nothing needed copying).
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    let source = defaults_dir.join(CONFIG_FILE);
    if !source.is_file() {
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let target = config_dir.join(CONFIG_FILE);
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            let content = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
                message: format!("failed to read {}: {e}", source.display()),
            })?;
            std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(vec![target])
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(vec![]),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Load config relative to the current working directory, copying the
/// default file into place first if needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn preset_from_entry(idx: usize, entry: RosterEntry) -> Result<PresetParticipant, ConfigError> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(ConfigError::ValidationError {
            field: format!("roster[{idx}].name"),
            message: "must not be empty".into(),
        });
    }
    let group: Group = entry.group.parse().map_err(|e| ConfigError::ValidationError {
        field: format!("roster[{idx}].group"),
        message: format!("{e}"),
    })?;
    Ok(PresetParticipant {
        name: name.to_string(),
        group,
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }
    if config.logging.file.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.file".into(),
            message: "must not be empty".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project_root() -> PathBuf {
        // CARGO_MANIFEST_DIR is crates/santa-core; the defaults live two up.
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap()
    }

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new("santa.toml"))
    }

    #[test]
    fn load_shipped_defaults() {
        let text = fs::read_to_string(project_root().join("defaults/santa.toml")).unwrap();
        let config = parse(&text).expect("defaults should be valid");
        assert!(config.pairing.seed.is_none());
        assert!(config.session.clear_roster_on_start_over);
        assert_eq!(config.logging.file, "logs/santa.log");
        assert!(config.roster.is_empty());
    }

    #[test]
    fn load_example_with_preset_roster() {
        let text =
            fs::read_to_string(project_root().join("config/santa.toml.example")).unwrap();
        let config = parse(&text).expect("example should be valid");
        assert_eq!(config.pairing.seed, Some(2024));
        assert!(!config.session.clear_roster_on_start_over);
        assert_eq!(config.roster.len(), 5);
        assert_eq!(
            config.roster[3],
            PresetParticipant {
                name: "Tim".into(),
                group: Group::Kid
            }
        );
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert!(config.pairing.seed.is_none());
        assert!(config.session.clear_roster_on_start_over);
        assert_eq!(config.logging.filter, default_log_filter());
    }

    #[test]
    fn rejects_blank_roster_name() {
        let err = parse("[[roster]]\nname = \"  \"\ngroup = \"Adult\"\n").unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "roster[0].name"),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_roster_group() {
        let text = "[[roster]]\nname = \"Alice\"\ngroup = \"Adult\"\n\n\
                    [[roster]]\nname = \"Rex\"\ngroup = \"Dog\"\n";
        let err = parse(text).unwrap_err();
        match err {
            ConfigError::ValidationError { field, message } => {
                assert_eq!(field, "roster[1].group");
                assert!(message.contains("Dog"));
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_empty_log_filter() {
        let err = parse("[logging]\nfilter = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logging.filter"));
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let err = parse("this is not valid [[[ toml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("santa_config_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("santa.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_then_skips() {
        let tmp = std::env::temp_dir().join("santa_config_test_ensure");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            project_root().join("defaults/santa.toml"),
            defaults_dir.join("santa.toml"),
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/santa.toml").exists());
        assert!(load_config_from(&tmp).is_ok());

        // Existing file is left alone.
        fs::write(tmp.join("config/santa.toml"), "# custom\n").unwrap();
        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(tmp.join("config/santa.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("santa_config_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
