//! Scanner ruleset output
//!
//! Every rule's YAML content becomes one entry of the top-level `rules`
//! list. The rule's origin is recorded under
//! `metadata."semgrep.dev".rule.origin`.

use serde_yaml::{Mapping, Value};

use super::RulesetRenderer;
use crate::database::Rule;
use crate::error::{DatabaseError, SgsError};

pub struct YamlRuleset;

impl YamlRuleset {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlRuleset {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the mapping stored under `key`, creating it if absent
fn child_mapping<'a>(
    parent: &'a mut Mapping,
    key: &str,
    rule_id: &str,
) -> Result<&'a mut Mapping, SgsError> {
    let entry = parent
        .entry(Value::from(key))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if entry.is_null() {
        *entry = Value::Mapping(Mapping::new());
    }
    entry.as_mapping_mut().ok_or_else(|| {
        DatabaseError::InvalidRule {
            id: rule_id.to_string(),
            reason: format!("'{}' is not a mapping", key),
        }
        .into()
    })
}

/// Parse a rule's content and tag it with its origin
pub fn rule_entry(rule: &Rule) -> Result<Value, SgsError> {
    let invalid = |reason: String| DatabaseError::InvalidRule {
        id: rule.id.clone(),
        reason,
    };

    let mut value: Value =
        serde_yaml::from_str(&rule.content).map_err(|e| invalid(e.to_string()))?;
    let root = value
        .as_mapping_mut()
        .ok_or_else(|| invalid("content is not a mapping".to_string()))?;

    let metadata = child_mapping(root, "metadata", &rule.id)?;
    let registry = child_mapping(metadata, "semgrep.dev", &rule.id)?;
    let entry = child_mapping(registry, "rule", &rule.id)?;
    entry.insert(Value::from("origin"), Value::from(rule.source.as_str()));

    Ok(value)
}

impl RulesetRenderer for YamlRuleset {
    fn render_ruleset(&self, rules: &[&Rule]) -> Result<String, SgsError> {
        let entries = rules
            .iter()
            .map(|rule| rule_entry(rule))
            .collect::<Result<Vec<_>, _>>()?;

        let mut document = Mapping::new();
        document.insert(Value::from("rules"), Value::Sequence(entries));
        serde_yaml::to_string(&document).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, content: &str) -> Rule {
        Rule {
            id: id.to_string(),
            content: content.to_string(),
            source: "community".to_string(),
            languages: None,
            category: None,
            severity: None,
        }
    }

    #[test]
    fn test_origin_is_added() {
        let r = rule(
            "no-eval",
            "id: no-eval\nmessage: avoid eval\nseverity: ERROR\nlanguages: [python]\npattern: eval(...)\n",
        );
        let value = rule_entry(&r).unwrap();
        assert_eq!(value["id"], Value::from("no-eval"));
        assert_eq!(
            value["metadata"]["semgrep.dev"]["rule"]["origin"],
            Value::from("community")
        );
    }

    #[test]
    fn test_existing_metadata_is_kept() {
        let r = rule(
            "x",
            "id: x\nmetadata:\n  cwe: CWE-95\n  semgrep.dev:\n    rule:\n      rule_id: abc\n",
        );
        let value = rule_entry(&r).unwrap();
        assert_eq!(value["metadata"]["cwe"], Value::from("CWE-95"));
        assert_eq!(
            value["metadata"]["semgrep.dev"]["rule"]["rule_id"],
            Value::from("abc")
        );
        assert_eq!(
            value["metadata"]["semgrep.dev"]["rule"]["origin"],
            Value::from("community")
        );
    }

    #[test]
    fn test_null_metadata_is_replaced() {
        let value = rule_entry(&rule("x", "id: x\nmetadata:\n")).unwrap();
        assert_eq!(
            value["metadata"]["semgrep.dev"]["rule"]["origin"],
            Value::from("community")
        );
    }

    #[test]
    fn test_non_mapping_content_is_rejected() {
        let err = rule_entry(&rule("bad", "- just\n- a list\n")).unwrap_err();
        assert!(matches!(
            err,
            SgsError::Database(DatabaseError::InvalidRule { .. })
        ));

        let err = rule_entry(&rule("bad", "id: x\nmetadata: 3\n")).unwrap_err();
        assert!(err.to_string().contains("'metadata' is not a mapping"));
    }

    #[test]
    fn test_render_ruleset() {
        let a = rule("a", "id: a\n");
        let b = rule("b", "id: b\n");
        let rendered = YamlRuleset::new().render_ruleset(&[&a, &b]).unwrap();

        let parsed: Value = serde_yaml::from_str(&rendered).unwrap();
        let rules = parsed["rules"].as_sequence().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["id"], Value::from("a"));
        assert_eq!(rules[1]["id"], Value::from("b"));
    }
}
