//! Rule filtering
//!
//! A [`FilterConfig`] describes which rules of the database are selected.
//! Every field is optional; `None` means the field is not filtered at all.

pub mod languages;

use std::collections::BTreeSet;

use tracing::debug;

use crate::database::Rule;
use crate::runconfig::token::RunSelection;

/// Category names accepted on the command line
pub const CATEGORY_CHOICES: &[&str] = &[
    "best-practice",
    "correctness",
    "maintainability",
    "performance",
    "portability",
    "security",
];

/// Severity names accepted on the command line
pub const SEVERITY_CHOICES: &[&str] = &["ERROR", "INFO", "WARNING"];

/// Which rules to select from the database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Languages (base names) to select
    pub languages: Option<BTreeSet<String>>,
    /// Categories to select
    pub categories: Option<BTreeSet<String>>,
    /// Severities to select
    pub severities: Option<BTreeSet<String>>,
    /// Rule origins to select
    pub origins: Option<BTreeSet<String>>,
    /// Also select rules that do not set a filtered field
    pub include_empty: bool,
}

/// Collect repeated, comma separated list arguments into a set.
///
/// Returns `None` when no value was given.
///
/// ```rust
/// use semgrep_search::filters::set_from_args;
///
/// let set = set_from_args(&["python, go".to_string(), "rust".to_string()]).unwrap();
/// assert_eq!(set.len(), 3);
/// assert!(set_from_args(&[]).is_none());
/// ```
pub fn set_from_args(args: &[String]) -> Option<BTreeSet<String>> {
    if args.is_empty() {
        return None;
    }
    Some(
        args.iter()
            .flat_map(|arg| arg.split(','))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
    )
}

fn non_empty(set: &BTreeSet<String>) -> Option<BTreeSet<String>> {
    (!set.is_empty()).then(|| set.clone())
}

impl FilterConfig {
    /// Build a filter from command line lists
    pub fn from_args(
        languages: &[String],
        categories: &[String],
        severities: &[String],
        origins: &[String],
        include_empty: bool,
    ) -> Self {
        Self {
            languages: set_from_args(languages).map(languages::normalize),
            categories: set_from_args(categories),
            severities: set_from_args(severities),
            origins: set_from_args(origins),
            include_empty,
        }
    }

    /// Build a filter from a decoded run code. Empty fields are not filtered.
    pub fn from_selection(selection: &RunSelection) -> Self {
        Self {
            languages: non_empty(&selection.languages),
            categories: non_empty(&selection.categories),
            severities: non_empty(&selection.severities),
            origins: None,
            include_empty: false,
        }
    }

    /// Check whether `rule` passes every active filter
    pub fn matches(&self, rule: &Rule) -> bool {
        if let Some(wanted) = &self.languages {
            let rule_languages = rule.languages.as_deref().unwrap_or_default();
            let matched = if rule_languages.is_empty() {
                self.include_empty
            } else {
                languages::normalize(rule_languages)
                    .iter()
                    .any(|lang| wanted.contains(lang))
            };
            if !matched {
                return false;
            }
        }

        if !self.matches_optional(&self.categories, rule.category.as_deref()) {
            return false;
        }

        if !self.matches_optional(&self.severities, rule.severity.as_deref()) {
            return false;
        }

        if let Some(origins) = &self.origins {
            if !origins.contains(&rule.source) {
                return false;
            }
        }

        true
    }

    fn matches_optional(&self, filter: &Option<BTreeSet<String>>, value: Option<&str>) -> bool {
        match (filter, value) {
            (None, _) => true,
            (Some(set), Some(value)) => set.contains(value),
            (Some(_), None) => self.include_empty,
        }
    }
}

/// Apply `filter` to `rules`, keeping their order
pub fn filter_rules<'a>(rules: &'a [Rule], filter: &FilterConfig) -> Vec<&'a Rule> {
    let selected: Vec<&Rule> = rules.iter().filter(|rule| filter.matches(rule)).collect();
    debug!("{} of {} rules match the filter", selected.len(), rules.len());
    selected
}
