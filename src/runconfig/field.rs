//! Byte groups for a single run code field
//!
//! A group stores one field's selection as a bitmap spread over bytes. Every
//! byte carries seven data bits; bit 7 is the continuation bit and is set on
//! every byte except the last one of the group, the same framing ULEB128 uses.
//! Byte `k` covers the indices `7k..7k + 7`.

use std::collections::BTreeSet;

use tracing::trace;

use super::table::EnumTable;
use crate::error::CodeError;

/// Continuation bit, set while more bytes of the same group follow
pub const CONTINUATION_BIT: u8 = 0x80;

/// Data bits per byte
pub const DATA_BITS: usize = 7;

const DATA_MASK: u8 = 0x7F;

/// Number of bytes needed to represent every index up to `highest_index`
pub fn group_len(highest_index: usize) -> usize {
    (highest_index + 1).div_ceil(DATA_BITS).max(1)
}

/// Whether `byte` announces another byte in the same group
pub fn has_continuation(byte: u8) -> bool {
    byte & CONTINUATION_BIT != 0
}

/// Indices whose data bit is set in `group`
pub fn set_indices(group: &[u8]) -> impl Iterator<Item = usize> + '_ {
    group.iter().enumerate().flat_map(|(k, &byte)| {
        (0..DATA_BITS)
            .filter(move |bit| byte & DATA_MASK & (1 << bit) != 0)
            .map(move |bit| k * DATA_BITS + bit)
    })
}

/// Encode a selection of names into a byte group.
///
/// Names unknown to `table` are dropped. Without `trim` the group is as wide
/// as the whole table requires; with `trim` it only reaches the highest
/// selected index.
///
/// # Errors
///
/// Returns [`CodeError::EmptyTrimmedSelection`] when `trim` is requested and
/// no known name is selected.
pub fn encode_group<I, S>(names: I, table: &EnumTable, trim: bool) -> Result<Vec<u8>, CodeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut indices = BTreeSet::new();
    for name in names {
        let name = name.as_ref();
        match table.lookup(name) {
            Some(index) => {
                indices.insert(index);
            }
            None => trace!("Dropping unknown {} '{}'", table.field(), name),
        }
    }

    let highest = if trim {
        *indices
            .last()
            .ok_or(CodeError::EmptyTrimmedSelection {
                field: table.field(),
            })?
    } else {
        table.max_index()
    };

    let len = group_len(highest);
    let mut group = vec![0u8; len];
    for index in indices {
        group[index / DATA_BITS] |= 1 << (index % DATA_BITS);
    }
    for byte in group.iter_mut().take(len - 1) {
        *byte |= CONTINUATION_BIT;
    }

    Ok(group)
}

/// Decode a byte group back into the names it selects.
///
/// Indices beyond the end of `table` are skipped, so groups written against
/// a larger table still decode.
pub fn decode_group(group: &[u8], table: &EnumTable) -> BTreeSet<String> {
    set_indices(group)
        .filter_map(|index| match table.reverse(index) {
            Some(name) => Some(name.to_string()),
            None => {
                trace!("Skipping unknown {} index {}", table.field(), index);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runconfig::table::{Field, CATEGORIES, FEATURES, LANGUAGES, SEVERITIES};
    use proptest::prelude::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_group_len() {
        assert_eq!(group_len(0), 1);
        assert_eq!(group_len(6), 1);
        assert_eq!(group_len(7), 2);
        assert_eq!(group_len(13), 2);
        assert_eq!(group_len(34), 5);
    }

    #[test]
    fn test_encode_single_byte_field() {
        let group = encode_group(["security"], &CATEGORIES, false).unwrap();
        assert_eq!(group, vec![0b0100_0000]);

        let group = encode_group(["ERROR"], &SEVERITIES, false).unwrap();
        assert_eq!(group, vec![0b0001_0000]);

        let group = encode_group(["export_text", "export_json"], &FEATURES, false).unwrap();
        assert_eq!(group, vec![0b0000_0011]);
    }

    #[test]
    fn test_encode_language_spans_five_bytes() {
        let group = encode_group(["python"], &LANGUAGES, false).unwrap();
        assert_eq!(group, vec![0x80, 0x80, 0x80, 0x84, 0x00]);
    }

    #[test]
    fn test_encode_empty_selection_keeps_width() {
        assert_eq!(
            encode_group(Vec::<String>::new(), &CATEGORIES, false).unwrap(),
            vec![0x00]
        );
        assert_eq!(
            encode_group(Vec::<String>::new(), &LANGUAGES, false).unwrap(),
            vec![0x80, 0x80, 0x80, 0x80, 0x00]
        );
    }

    #[test]
    fn test_encode_drops_unknown_names() {
        let with_unknown = encode_group(["go", "cobol"], &LANGUAGES, false).unwrap();
        let without = encode_group(["go"], &LANGUAGES, false).unwrap();
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_encode_trimmed() {
        let group = encode_group(["c"], &LANGUAGES, true).unwrap();
        assert_eq!(group, vec![0b0000_0100]);

        let group = encode_group(["dart"], &LANGUAGES, true).unwrap();
        assert_eq!(group, vec![0x80, 0x01]);

        let group = encode_group(["xml", "apex"], &LANGUAGES, true).unwrap();
        assert_eq!(group.len(), 5);
        assert_eq!(group[0], 0x81);
        assert_eq!(group[4], 0b0100_0000);
    }

    #[test]
    fn test_encode_trimmed_empty_is_an_error() {
        let err = encode_group(Vec::<String>::new(), &SEVERITIES, true).unwrap_err();
        assert_eq!(err, CodeError::EmptyTrimmedSelection { field: "severity" });

        let err = encode_group(["CRITICAL"], &SEVERITIES, true).unwrap_err();
        assert_eq!(err, CodeError::EmptyTrimmedSelection { field: "severity" });
    }

    #[test]
    fn test_decode_group() {
        assert_eq!(
            decode_group(&[0x80, 0x80, 0x80, 0x84, 0x00], &LANGUAGES),
            set(&["python"])
        );
        assert_eq!(
            decode_group(&[0x03], &FEATURES),
            set(&["export_text", "export_json"])
        );
        assert!(decode_group(&[0x00], &CATEGORIES).is_empty());
        assert!(decode_group(&[], &CATEGORIES).is_empty());
    }

    #[test]
    fn test_decode_skips_indices_beyond_table() {
        // bits 3..=6 are past the end of the feature table
        assert_eq!(
            decode_group(&[0x7F], &FEATURES),
            set(&["export_text", "export_json", "export_sarif"])
        );
        // a second byte only a larger table could use
        assert_eq!(decode_group(&[0x90, 0x7F], &SEVERITIES), set(&["ERROR"]));
    }

    #[test]
    fn test_decode_ignores_continuation_bit() {
        assert_eq!(decode_group(&[0xC0], &CATEGORIES), set(&["security"]));
    }

    fn field_and_names() -> impl Strategy<Value = (Field, Vec<&'static str>)> {
        prop::sample::select(Field::ALL.to_vec()).prop_flat_map(|field| {
            let names = field.table().names().to_vec();
            let len = names.len();
            (Just(field), prop::sample::subsequence(names, 0..=len))
        })
    }

    proptest! {
        #[test]
        fn prop_untrimmed_roundtrip((field, names) in field_and_names()) {
            let table = field.table();
            let group = encode_group(&names, table, false).unwrap();
            let decoded = decode_group(&group, table);
            let expected: BTreeSet<String> = names.iter().map(|n| n.to_string()).collect();
            prop_assert_eq!(decoded, expected);
        }

        #[test]
        fn prop_untrimmed_width_is_fixed((field, names) in field_and_names()) {
            let table = field.table();
            let group = encode_group(&names, table, false).unwrap();
            prop_assert_eq!(group.len(), group_len(table.max_index()));
        }

        #[test]
        fn prop_only_last_byte_ends_group((field, names) in field_and_names(), trim in any::<bool>()) {
            prop_assume!(!(trim && names.is_empty()));
            let group = encode_group(&names, field.table(), trim).unwrap();
            let (last, rest) = group.split_last().unwrap();
            prop_assert!(!has_continuation(*last));
            prop_assert!(rest.iter().all(|b| has_continuation(*b)));
        }

        #[test]
        fn prop_trimmed_roundtrip((field, names) in field_and_names()) {
            prop_assume!(!names.is_empty());
            let table = field.table();
            let group = encode_group(&names, table, true).unwrap();
            let highest = names.iter().filter_map(|n| table.lookup(n)).max().unwrap();
            prop_assert_eq!(group.len(), group_len(highest));
            prop_assert_eq!(decode_group(&group, table).len(), names.len());
        }
    }
}
