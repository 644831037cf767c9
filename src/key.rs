//! Compound identifiers: `"base:key"`.
//!
//! A parent-group member names a prerequisite node and, optionally, which of
//! the parallel edges from it is meant: `"vegetable oil:1"` is the edge with
//! key `1` from `vegetable oil`. A bare `"vegetable oil"` means the default
//! key.

use crate::model::EdgeKey;
use crate::{Error, Result};

pub const DEFAULT_DELIMITER: char = ':';

/// Splits and joins compound identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    pub delimiter: char,
    /// Key returned when the identifier has no delimiter.
    pub default_key: EdgeKey,
}

impl Default for KeyCodec {
    fn default() -> Self {
        Self { delimiter: DEFAULT_DELIMITER, default_key: EdgeKey::Int(0) }
    }
}

impl KeyCodec {
    /// Split `compound` into base and key.
    ///
    /// The key part becomes an integer when it parses as one and stays a
    /// string otherwise. More than one delimiter is a format error.
    pub fn split(&self, compound: &str) -> Result<(String, EdgeKey)> {
        let mut parts = compound.split(self.delimiter);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), None, _) => Ok((base.to_string(), self.default_key.clone())),
            (Some(base), Some(key), None) => {
                let key = match key.parse::<i64>() {
                    Ok(i) => EdgeKey::Int(i),
                    Err(_) => EdgeKey::Name(key.to_string()),
                };
                Ok((base.to_string(), key))
            }
            _ => Err(Error::Format(format!(
                "{compound:?} was not formatted as \"node{}key\"",
                self.delimiter
            ))),
        }
    }

    /// Join base and key. The key is always written, default or not.
    pub fn format(&self, base: &str, key: &EdgeKey) -> String {
        format!("{base}{}{key}", self.delimiter)
    }

    /// [`split`](Self::split) that passes the optional sentinel through.
    pub fn split_member(&self, member: Option<&str>) -> Result<Option<(String, EdgeKey)>> {
        member.map(|m| self.split(m)).transpose()
    }

    /// [`format`](Self::format) that passes the optional sentinel through.
    pub fn format_member(&self, parts: Option<(&str, &EdgeKey)>) -> Option<String> {
        parts.map(|(base, key)| self.format(base, key))
    }

    /// Split every member of a group.
    pub fn split_all(&self, members: &[Option<String>]) -> Result<Vec<Option<(String, EdgeKey)>>> {
        members.iter().map(|m| self.split_member(m.as_deref())).collect()
    }

    /// Join every member of a split group.
    pub fn format_all(&self, parts: &[Option<(String, EdgeKey)>]) -> Vec<Option<String>> {
        parts
            .iter()
            .map(|p| self.format_member(p.as_ref().map(|(b, k)| (b.as_str(), k))))
            .collect()
    }
}

/// Split with the default delimiter and key.
pub fn split(compound: &str) -> Result<(String, EdgeKey)> {
    KeyCodec::default().split(compound)
}

/// Join with the default delimiter.
pub fn format(base: &str, key: &EdgeKey) -> String {
    KeyCodec::default().format(base, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_without_delimiter_uses_default_key() {
        assert_eq!(split("milk").unwrap(), ("milk".to_string(), EdgeKey::Int(0)));

        let codec = KeyCodec { default_key: EdgeKey::Int(7), ..KeyCodec::default() };
        assert_eq!(codec.split("milk").unwrap().1, EdgeKey::Int(7));
    }

    #[test]
    fn test_split_integer_and_string_keys() {
        assert_eq!(split("vegetable oil:1").unwrap(), ("vegetable oil".to_string(), EdgeKey::Int(1)));
        assert_eq!(split("oil:-2").unwrap().1, EdgeKey::Int(-2));
        assert_eq!(split("oil:cold").unwrap().1, EdgeKey::Name("cold".into()));
        assert_eq!(split("oil:").unwrap().1, EdgeKey::Name(String::new()));
    }

    #[test]
    fn test_split_rejects_two_delimiters() {
        let err = split("a:b:c").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_custom_delimiter() {
        let codec = KeyCodec { delimiter: '#', ..KeyCodec::default() };
        assert_eq!(codec.split("a:b#3").unwrap(), ("a:b".to_string(), EdgeKey::Int(3)));
        assert_eq!(codec.format("a", &EdgeKey::Int(3)), "a#3");
    }

    #[test]
    fn test_sentinel_passes_through() {
        let codec = KeyCodec::default();
        assert_eq!(codec.split_member(None).unwrap(), None);
        assert_eq!(codec.format_member(None), None);

        let group = vec![None, Some("Maple Syrup".to_string()), Some("honey:1".to_string())];
        let split = codec.split_all(&group).unwrap();
        assert_eq!(split[0], None);
        assert_eq!(split[2], Some(("honey".to_string(), EdgeKey::Int(1))));
        assert_eq!(
            codec.format_all(&split),
            vec![None, Some("Maple Syrup:0".to_string()), Some("honey:1".to_string())]
        );
    }

    #[test]
    fn test_split_all_fails_on_any_bad_member() {
        let group = vec![Some("ok".to_string()), Some("x:y:z".to_string())];
        assert!(KeyCodec::default().split_all(&group).is_err());
    }

    proptest! {
        #[test]
        fn prop_format_then_split_round_trips(base in "[a-zA-Z ]{0,12}", key in any::<i64>()) {
            let key = EdgeKey::Int(key);
            prop_assert_eq!(split(&format(&base, &key)).unwrap(), (base, key));
        }

        #[test]
        fn prop_string_keys_round_trip(base in "[a-z ]{1,8}", key in "[a-z]{1,8}") {
            let key = EdgeKey::Name(key);
            prop_assert_eq!(split(&format(&base, &key)).unwrap(), (base, key));
        }
    }
}
