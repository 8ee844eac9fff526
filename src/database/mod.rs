//! Rule database
//!
//! The database is a JSON document with a `rules` table and a `meta` table.
//! Each table maps document ids to documents:
//!
//! ```json
//! {
//!   "rules": { "1": { "id": "...", "content": "...", "source": "...", "languages": ["go"] } },
//!   "meta":  { "1": { "created_on": "...", "version": "1.2.0", "commit": "abc123" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DatabaseError, SgsError};

/// Database file name inside the cache directory
pub const DB_FILENAME: &str = "db.json";

/// Default database location: `<cache dir>/semgrep-search/db.json`
pub fn default_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("semgrep-search")
        .join(DB_FILENAME)
}

/// A single rule document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier
    pub id: String,
    /// Rule definition as YAML text
    pub content: String,
    /// Origin of the rule
    #[serde(default)]
    pub source: String,
    /// Languages the rule applies to
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    /// Rule category, if set
    #[serde(default)]
    pub category: Option<String>,
    /// Rule severity, if set
    #[serde(default)]
    pub severity: Option<String>,
}

/// Build information stored alongside the rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub created_on: DateTime<Utc>,
    pub version: Version,
    pub commit: String,
    /// Oldest semgrep-search release able to read this database
    pub min_version: Option<Version>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    created_on: Option<String>,
    version: Option<String>,
    commit: Option<String>,
    min_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDatabase {
    #[serde(default)]
    rules: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    meta: BTreeMap<String, serde_json::Value>,
}

/// Loaded rule database
#[derive(Debug, Clone)]
pub struct Database {
    rules: Vec<Rule>,
    metadata: Option<Metadata>,
}

impl Database {
    /// Load the database from `path`
    pub fn load(path: &Path) -> Result<Self, SgsError> {
        if !path.is_file() {
            return Err(DatabaseError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|e| DatabaseError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let database = Self::from_json(&content)?;
        debug!(
            "Loaded {} rules from {}",
            database.rules.len(),
            path.display()
        );
        Ok(database)
    }

    /// Parse a database from its JSON text
    pub fn from_json(content: &str) -> Result<Self, SgsError> {
        let raw: RawDatabase = serde_json::from_str(content)?;

        let mut rules: Vec<(String, Rule)> = raw
            .rules
            .into_iter()
            .filter_map(|(doc_id, document)| match serde_json::from_value::<Rule>(document) {
                Ok(rule) => Some((doc_id, rule)),
                Err(e) => {
                    warn!("Skipping invalid rule document {}: {}", doc_id, e);
                    None
                }
            })
            .collect();
        rules.sort_by_key(|(doc_id, _)| {
            (doc_id.parse::<u64>().unwrap_or(u64::MAX), doc_id.clone())
        });

        let metadata = raw.meta.into_values().next().and_then(parse_metadata);

        Ok(Self {
            rules: rules.into_iter().map(|(_, rule)| rule).collect(),
            metadata,
        })
    }

    /// All rules in document order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Database metadata, if present and valid
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Warn about missing metadata or a database newer than this release
    pub fn check_compatibility(&self, current_version: &Version) {
        let Some(meta) = &self.metadata else {
            warn!(
                "Database did not contain valid metadata. This could mean that your database is very old. \
                 If errors occur, consider updating the database."
            );
            return;
        };

        match &meta.min_version {
            None => warn!(
                "Database metadata does not specify a minimum semgrep-search version. \
                 Please consider updating the database."
            ),
            Some(min_version) if is_newer(min_version, current_version) => warn!(
                "Database requires a newer version ({}) of semgrep-search than the installed one ({}). \
                 Please consider updating your semgrep-search installation.",
                min_version, current_version
            ),
            Some(_) => {}
        }
    }
}

fn parse_metadata(value: serde_json::Value) -> Option<Metadata> {
    let raw: RawMetadata = serde_json::from_value(value).ok()?;
    let min_version = match raw.min_version.as_deref() {
        None | Some("") => None,
        Some(v) => Some(Version::parse(v).ok()?),
    };
    Some(Metadata {
        created_on: parse_timestamp(raw.created_on.as_deref()?)?,
        version: Version::parse(raw.version.as_deref()?).ok()?,
        commit: raw.commit?,
        min_version,
    })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

/// True if `required` is a strictly newer release than `current`
pub fn is_newer(required: &Version, current: &Version) -> bool {
    required > current
}
