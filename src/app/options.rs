// actchat - app/options.rs
//
// Resolves validated config plus command-line overrides into the read-only
// `ParseOptions` a batch runs with. Group selection is validated here, once,
// before any file is opened.

use crate::core::model::{ChatCodes, Group, OutputSettings, ParseOptions};
use crate::core::parser::normalize_name;
use crate::platform::config::{normalize_extension, AppConfig};
use crate::util::constants;
use crate::util::error::ConfigError;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Values supplied by the command line (or any other front end).
/// `None` leaves the config value in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub group: Option<String>,
    pub include_emotes: Option<bool>,
    pub dry_run: bool,
    /// Only ever turns force-replace on; config may already enable it.
    pub force_replace: bool,
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub files: Vec<PathBuf>,
}

/// Every group available for selection, keyed by short name, including the
/// sentinel everyone group. Member names are normalised the same way the
/// classifier normalises speakers.
pub fn available_groups(config: &AppConfig) -> BTreeMap<String, Group> {
    let mut groups = BTreeMap::new();
    groups.insert(constants::EVERYONE_GROUP_KEY.to_string(), Group::everyone());
    for (key, def) in &config.groups {
        let members = def
            .members
            .iter()
            .map(|m| normalize_name(m))
            .filter(|m| !m.is_empty());
        groups.insert(key.clone(), Group::with_members(key, &def.label, members));
    }
    groups
}

/// Build the options for one run.
///
/// Fails with a `ConfigError` when there are no input files, the selected
/// group does not exist or has no members, or an override value is unusable.
pub fn resolve(config: &AppConfig, overrides: Overrides) -> Result<ParseOptions, ConfigError> {
    if overrides.files.is_empty() {
        return Err(ConfigError::NoInputFiles);
    }

    let extension = match overrides.extension {
        Some(raw) => normalize_extension(&raw).ok_or_else(|| ConfigError::InvalidValue {
            field: "--extension".to_string(),
            value: raw.clone(),
            expected: "a file extension of letters, digits, '-' or '_'".to_string(),
        })?,
        None => config.extension.clone(),
    };

    let key = overrides
        .group
        .as_deref()
        .map(str::trim)
        .unwrap_or(config.default_group.as_str())
        .to_string();
    let mut groups = available_groups(config);
    let group = match groups.remove(&key) {
        Some(group) => group,
        None => {
            let available = groups.into_keys().collect();
            return Err(ConfigError::UnknownGroup { key, available });
        }
    };
    if group.member_count() == Some(0) {
        return Err(ConfigError::EmptyGroup { key });
    }

    let codes = ChatCodes {
        say: config.say_codes.iter().cloned().collect(),
        emote: config.emote_codes.iter().cloned().collect(),
        emote_markers: config.emote_markers.clone(),
    };

    let options = ParseOptions {
        dry_run: overrides.dry_run,
        force_replace: overrides.force_replace || config.force_replace,
        include_emotes: overrides.include_emotes.unwrap_or(config.include_emotes),
        group,
        codes,
        output: OutputSettings {
            extension,
            directory: overrides.output_dir.or_else(|| config.output_dir.clone()),
        },
        files: overrides.files,
    };

    tracing::debug!(
        group = %options.group.key,
        include_emotes = options.include_emotes,
        dry_run = options.dry_run,
        force_replace = options.force_replace,
        files = options.files.len(),
        "Run options resolved"
    );

    Ok(options)
}
