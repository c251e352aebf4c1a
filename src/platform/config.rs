// actchat - platform/config.rs
//
// Platform configuration directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolved platform paths for actchat configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/actchat/ or %APPDATA%\actchat\config\)
    pub config_dir: PathBuf,

    /// True when platform directories could not be determined and the
    /// current directory is used instead.
    pub is_fallback: bool,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined. Runs before logging is initialised, so it does not log;
    /// the caller reports `is_fallback` once a subscriber exists.
    pub fn resolve() -> Self {
        match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
                is_fallback: false,
            },
            None => Self {
                config_dir: PathBuf::from("."),
                is_fallback: true,
            },
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub filter: FilterSection,
    pub output: OutputSection,
    pub format: FormatSection,
    pub logging: LoggingSection,
    /// `[groups.<key>]` tables.
    pub groups: BTreeMap<String, GroupSection>,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Group key selected when `--group` is not given.
    pub group: Option<String>,
    /// Keep emote lines.
    pub include_emotes: Option<bool>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Transcript extension, with or without the leading dot.
    pub extension: Option<String>,
    /// Directory for transcripts (default: next to each input).
    pub directory: Option<String>,
    /// Overwrite existing transcripts.
    pub force_replace: Option<bool>,
}

/// `[format]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FormatSection {
    pub say_codes: Option<Vec<String>>,
    pub emote_codes: Option<Vec<String>>,
    /// Say-channel prefixes treated as emotes (e.g. "*").
    pub emote_markers: Option<Vec<String>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// One `[groups.<key>]` table.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct GroupSection {
    /// Display label (defaults to the key).
    pub label: Option<String>,
    /// Full character names, `First Last`.
    pub members: Vec<String>,
}

/// A validated group definition from config.toml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    pub label: String,
    pub members: Vec<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Filter --
    /// Group key used when none is given on the command line.
    pub default_group: String,
    pub include_emotes: bool,

    // -- Output --
    /// Transcript extension without the leading dot.
    pub extension: String,
    pub output_dir: Option<PathBuf>,
    pub force_replace: bool,

    // -- Format --
    /// Upper-cased four-digit hex chat codes.
    pub say_codes: Vec<String>,
    pub emote_codes: Vec<String>,
    pub emote_markers: Vec<String>,

    // -- Groups --
    /// User-defined groups by key. The reserved everyone group is not stored
    /// here; it always exists.
    pub groups: BTreeMap<String, GroupConfig>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_group: constants::EVERYONE_GROUP_KEY.to_string(),
            include_emotes: false,
            extension: constants::DEFAULT_TRANSCRIPT_EXTENSION.to_string(),
            output_dir: None,
            force_replace: false,
            say_codes: owned(constants::DEFAULT_SAY_CODES),
            emote_codes: owned(constants::DEFAULT_EMOTE_CODES),
            emote_markers: Vec::new(),
            groups: BTreeMap::new(),
            log_level: None,
            log_file: None,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Normalise a transcript extension: strip one leading dot and reject
/// anything that is empty or could escape the file name.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().strip_prefix('.').unwrap_or(raw.trim());
    let valid = !ext.is_empty()
        && ext
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| ext.to_string())
}

/// A chat code is exactly four hex digits.
fn normalize_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    (code.len() == 4 && code.chars().all(|c| c.is_ascii_hexdigit()))
        .then(|| code.to_ascii_uppercase())
}

/// Validate a configured code list. Invalid entries are dropped with a
/// warning; a list that ends up empty falls back to `default`.
fn validate_codes(
    field: &str,
    raw: &[String],
    default: &[&str],
    warnings: &mut Vec<String>,
) -> Vec<String> {
    let mut codes = Vec::with_capacity(raw.len());
    for entry in raw {
        match normalize_code(entry) {
            Some(code) => codes.push(code),
            None => warnings.push(format!(
                "[format] {field} entry \"{entry}\" is not a four-digit hex chat code. Ignoring it."
            )),
        }
    }
    if codes.is_empty() {
        warnings.push(format!(
            "[format] {field} has no valid codes. Using default ({}).",
            default.join(", ")
        ));
        return owned(default);
    }
    codes
}

/// Parse and validate config.toml content.
///
/// Returns the validated config and the list of non-fatal warnings.
pub fn parse_config(content: &str, path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Filter --
    if let Some(group) = raw.filter.group {
        let group = group.trim();
        if group.is_empty() {
            warnings.push(format!(
                "[filter] group is empty. Using default ({}).",
                constants::EVERYONE_GROUP_KEY
            ));
        } else {
            config.default_group = group.to_string();
        }
    }
    if let Some(include) = raw.filter.include_emotes {
        config.include_emotes = include;
    }

    // -- Output --
    if let Some(ref ext) = raw.output.extension {
        match normalize_extension(ext) {
            Some(ext) => config.extension = ext,
            None => warnings.push(format!(
                "[output] extension = \"{ext}\" is not a valid file extension. Using default ({}).",
                constants::DEFAULT_TRANSCRIPT_EXTENSION
            )),
        }
    }
    if let Some(ref dir) = raw.output.directory {
        if !dir.trim().is_empty() {
            config.output_dir = Some(PathBuf::from(dir.trim()));
        }
    }
    if let Some(force) = raw.output.force_replace {
        config.force_replace = force;
    }

    // -- Format --
    if let Some(ref codes) = raw.format.say_codes {
        config.say_codes =
            validate_codes("say_codes", codes, constants::DEFAULT_SAY_CODES, &mut warnings);
    }
    if let Some(ref codes) = raw.format.emote_codes {
        config.emote_codes = validate_codes(
            "emote_codes",
            codes,
            constants::DEFAULT_EMOTE_CODES,
            &mut warnings,
        );
    }
    if let Some(markers) = raw.format.emote_markers {
        config.emote_markers = markers.into_iter().filter(|m| !m.is_empty()).collect();
    }

    // -- Groups --
    for (key, section) in raw.groups {
        if key == constants::EVERYONE_GROUP_KEY {
            warnings.push(format!(
                "[groups.{key}] uses a reserved name and is ignored; \
                 the '{key}' group always matches every speaker."
            ));
            continue;
        }
        if section.members.is_empty() {
            warnings.push(format!("[groups.{key}] has no members."));
        }
        let label = section
            .label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| key.clone());
        config.groups.insert(
            key,
            GroupConfig {
                label,
                members: section.members,
            },
        );
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(PathBuf::from(file));
        }
    }

    Ok((config, warnings))
}

/// Load and validate config.toml from `path`.
///
/// A missing file yields defaults unless `required` is set (the path was
/// given explicitly). Unreadable or unparseable files are errors: groups
/// come from this file, so silently falling back would produce transcripts
/// for the wrong people.
pub fn load_config(path: &Path, required: bool) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if !required && !path.exists() {
        return Ok((AppConfig::default(), Vec::new()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        parse_config(content, Path::new("config.toml")).unwrap()
    }

    #[test]
    fn test_empty_config_yields_defaults() {
        let (config, warnings) = parse("");
        assert!(warnings.is_empty());
        assert_eq!(config.default_group, "everyone");
        assert_eq!(config.extension, "txt");
        assert!(!config.include_emotes);
        assert!(config.groups.is_empty());
    }

    #[test]
    fn test_full_config() {
        let (config, warnings) = parse(
            r#"
[filter]
group = "party"
include_emotes = true

[output]
extension = ".log.txt"
directory = "/tmp/transcripts"
force_replace = true

[format]
say_codes = ["000a"]
emote_markers = ["*", ""]

[logging]
level = "DEBUG"

[groups.party]
label = "Static Party"
members = ["Jane Doe", "John Smith"]

[groups.duo]
members = ["Jane Doe"]
"#,
        );

        // ".log.txt" contains a dot after stripping, so it is rejected.
        assert_eq!(warnings.len(), 1, "warnings: {warnings:?}");
        assert_eq!(config.extension, "txt");
        assert_eq!(config.default_group, "party");
        assert!(config.include_emotes);
        assert!(config.force_replace);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/transcripts")));
        assert_eq!(config.say_codes, vec!["000A".to_string()]);
        assert_eq!(config.emote_markers, vec!["*".to_string()]);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.groups["party"].label, "Static Party");
        assert_eq!(config.groups["duo"].label, "duo");
        assert_eq!(config.groups["duo"].members, vec!["Jane Doe".to_string()]);
    }

    #[test]
    fn test_invalid_codes_fall_back() {
        let (config, warnings) = parse(
            r#"
[format]
emote_codes = ["emote", "1C"]
"#,
        );
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.emote_codes, owned(constants::DEFAULT_EMOTE_CODES));
    }

    #[test]
    fn test_reserved_group_name_ignored() {
        let (config, warnings) = parse(
            r#"
[groups.everyone]
members = ["Jane Doe"]
"#,
        );
        assert!(config.groups.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unknown_log_level_warns() {
        let (config, warnings) = parse("[logging]\nlevel = \"loud\"\n");
        assert!(config.log_level.is_none());
        assert!(warnings[0].contains("loud"));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = parse_config("[filter\ngroup = ", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[test]
    fn test_load_missing_optional_config() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"), false).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.default_group, "everyone");
    }

    #[test]
    fn test_load_missing_required_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("config.toml"), true);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_platform_paths_config_file() {
        let paths = PlatformPaths::resolve();
        assert!(paths.config_file().ends_with(constants::CONFIG_FILE_NAME));
        if paths.is_fallback {
            assert_eq!(paths.config_dir, PathBuf::from("."));
        }
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("txt").as_deref(), Some("txt"));
        assert_eq!(normalize_extension(".md").as_deref(), Some("md"));
        assert_eq!(normalize_extension(""), None);
        assert_eq!(normalize_extension("../x"), None);
    }
}
