//! Run code tokens
//!
//! A token is the concatenation of the four field groups in canonical order
//! (category, language, severity, feature), rendered as base58 with the
//! Bitcoin alphabet. Groups carry no separators; boundaries come from the
//! continuation bit alone, so trimmed and untrimmed groups decode the same way.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::field::{decode_group, encode_group, has_continuation};
use super::table::Field;
use crate::error::CodeError;

/// Set of names selected for one field
pub type Selection = BTreeSet<String>;

/// Selections for all four run code fields.
///
/// # Examples
///
/// ```rust
/// use semgrep_search::runconfig::token::{decode, encode, RunSelection};
///
/// let mut selection = RunSelection::default();
/// selection.languages.insert("python".to_string());
/// selection.severities.insert("ERROR".to_string());
///
/// let code = encode(&selection, false).unwrap();
/// assert_eq!(decode(&code).unwrap(), selection);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSelection {
    pub categories: Selection,
    pub languages: Selection,
    pub severities: Selection,
    pub features: Selection,
}

impl RunSelection {
    /// Selection for `field`
    pub fn field(&self, field: Field) -> &Selection {
        match field {
            Field::Category => &self.categories,
            Field::Language => &self.languages,
            Field::Severity => &self.severities,
            Field::Feature => &self.features,
        }
    }

    /// Mutable selection for `field`
    pub fn field_mut(&mut self, field: Field) -> &mut Selection {
        match field {
            Field::Category => &mut self.categories,
            Field::Language => &mut self.languages,
            Field::Severity => &mut self.severities,
            Field::Feature => &mut self.features,
        }
    }

    /// True when no field has anything selected
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.field(*f).is_empty())
    }
}

/// Split a byte string into groups along continuation bits.
///
/// Bytes left over after the last terminating byte form a final, incomplete
/// group.
pub fn split_groups(bytes: &[u8]) -> Vec<&[u8]> {
    let mut groups = Vec::new();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if !has_continuation(byte) {
            groups.push(&bytes[start..=i]);
            start = i + 1;
        }
    }
    if start < bytes.len() {
        groups.push(&bytes[start..]);
    }
    groups
}

/// Encode a selection into the raw byte form of a token.
pub fn encode_bytes(selection: &RunSelection, trim: bool) -> Result<Vec<u8>, CodeError> {
    let mut bytes = Vec::new();
    for field in Field::ALL {
        let group = encode_group(selection.field(field), field.table(), trim)?;
        bytes.extend_from_slice(&group);
    }
    Ok(bytes)
}

/// Decode the raw byte form of a token.
///
/// Fields without a group decode to an empty selection.
pub fn decode_bytes(bytes: &[u8]) -> RunSelection {
    let groups = split_groups(bytes);
    debug!("Run code has {} byte group(s)", groups.len());

    let mut selection = RunSelection::default();
    for (field, group) in Field::ALL.into_iter().zip(groups) {
        *selection.field_mut(field) = decode_group(group, field.table());
    }
    selection
}

/// Encode a selection as a base58 run code.
///
/// # Errors
///
/// Only a trimmed encoding can fail, see [`encode_group`].
pub fn encode(selection: &RunSelection, trim: bool) -> Result<String, CodeError> {
    let bytes = encode_bytes(selection, trim)?;
    Ok(bs58::encode(bytes).into_string())
}

/// Decode a base58 run code.
///
/// # Errors
///
/// Returns [`CodeError::MalformedToken`] if `token` is not valid base58.
pub fn decode(token: &str) -> Result<RunSelection, CodeError> {
    let bytes = bs58::decode(token)
        .into_vec()
        .map_err(|e| CodeError::MalformedToken {
            token: token.to_string(),
            reason: e.to_string(),
        })?;
    Ok(decode_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runconfig::table::LANGUAGES;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const SCENARIO_BYTES: [u8; 8] = [0x40, 0x80, 0x80, 0x80, 0x84, 0x00, 0x10, 0x03];

    fn set(names: &[&str]) -> Selection {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn scenario() -> RunSelection {
        RunSelection {
            categories: set(&["security"]),
            languages: set(&["python"]),
            severities: set(&["ERROR"]),
            features: set(&["export_text", "export_json"]),
        }
    }

    #[test]
    fn test_scenario_bytes() {
        assert_eq!(encode_bytes(&scenario(), false).unwrap(), SCENARIO_BYTES);
    }

    #[test]
    fn test_scenario_token() {
        let code = encode(&scenario(), false).unwrap();
        assert_eq!(code, "BnkVPW1xp1p");
        assert_eq!(decode(&code).unwrap(), scenario());
    }

    #[test]
    fn test_empty_selection_encodes_eight_zero_bytes() {
        let selection = RunSelection::default();
        assert_eq!(encode_bytes(&selection, false).unwrap(), vec![0u8; 8]);
        assert_eq!(encode(&selection, false).unwrap(), "11111111");
        assert_eq!(decode("11111111").unwrap(), selection);
    }

    #[test]
    fn test_everything_selected() {
        let all = |field: Field| -> Selection {
            field.table().names().iter().map(|n| n.to_string()).collect()
        };
        let selection = RunSelection {
            categories: all(Field::Category),
            languages: all(Field::Language),
            severities: all(Field::Severity),
            features: all(Field::Feature),
        };
        assert_eq!(selection.languages.len(), LANGUAGES.size());
        assert_eq!(
            encode_bytes(&selection, false).unwrap(),
            vec![0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F, 0x1F, 0x07]
        );
        assert_eq!(encode(&selection, false).unwrap(), "NQm6nKoPYV4");
    }

    #[test]
    fn test_decode_empty_string() {
        let selection = decode("").unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_decode_missing_trailing_groups() {
        let selection = decode("Z7xzWJoy").unwrap();
        assert_eq!(selection.categories, set(&["security"]));
        assert_eq!(selection.languages, set(&["python"]));
        assert!(selection.severities.is_empty());
        assert!(selection.features.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_base58_characters() {
        for token in ["0", "O", "I", "l", "BnkVPW1xp1p!", "Bnk VPW"] {
            let err = decode(token).unwrap_err();
            assert!(
                matches!(err, CodeError::MalformedToken { .. }),
                "{} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_split_groups() {
        assert_eq!(
            split_groups(&SCENARIO_BYTES),
            vec![
                &[0x40][..],
                &[0x80, 0x80, 0x80, 0x84, 0x00][..],
                &[0x10][..],
                &[0x03][..],
            ]
        );
        assert!(split_groups(&[]).is_empty());
    }

    #[test]
    fn test_split_groups_keeps_incomplete_tail() {
        assert_eq!(
            split_groups(&[0x01, 0x80, 0x81]),
            vec![&[0x01][..], &[0x80, 0x81][..]]
        );
    }

    #[test]
    fn test_trimmed_groups_shift_boundaries() {
        let selection = RunSelection {
            categories: set(&["null"]),
            languages: set(&["c"]),
            severities: set(&["INFO"]),
            features: set(&["export_sarif"]),
        };
        let bytes = encode_bytes(&selection, true).unwrap();
        assert_eq!(bytes, vec![0x01, 0x04, 0x04, 0x04]);
        assert_eq!(decode_bytes(&bytes), selection);
    }

    #[test]
    fn test_trimmed_with_empty_field_fails() {
        let mut selection = scenario();
        selection.severities.clear();
        let err = encode(&selection, true).unwrap_err();
        assert_eq!(err, CodeError::EmptyTrimmedSelection { field: "severity" });
    }

    #[test]
    fn test_extra_groups_are_ignored() {
        let mut bytes = SCENARIO_BYTES.to_vec();
        bytes.extend_from_slice(&[0x81, 0x00]);
        assert_eq!(decode_bytes(&bytes), scenario());
    }

    fn subset(field: Field) -> impl Strategy<Value = Selection> {
        let names = field.table().names().to_vec();
        let len = names.len();
        prop::sample::subsequence(names, 0..=len)
            .prop_map(|names| names.into_iter().map(String::from).collect())
    }

    fn selection() -> impl Strategy<Value = RunSelection> {
        (
            subset(Field::Category),
            subset(Field::Language),
            subset(Field::Severity),
            subset(Field::Feature),
        )
            .prop_map(|(categories, languages, severities, features)| RunSelection {
                categories,
                languages,
                severities,
                features,
            })
    }

    proptest! {
        #[test]
        fn prop_token_roundtrip(selection in selection()) {
            let code = encode(&selection, false).unwrap();
            prop_assert_eq!(decode(&code).unwrap(), selection);
        }

        #[test]
        fn prop_untrimmed_is_eight_bytes(selection in selection()) {
            prop_assert_eq!(encode_bytes(&selection, false).unwrap().len(), 8);
        }

        #[test]
        fn prop_unknown_names_do_not_change_bytes(selection in selection(), junk in "[a-z]{12}") {
            let mut noisy = selection.clone();
            for field in Field::ALL {
                noisy.field_mut(field).insert(junk.clone());
            }
            prop_assert_eq!(
                encode_bytes(&noisy, false).unwrap(),
                encode_bytes(&selection, false).unwrap()
            );
        }
    }
}
