//! Dictionary helpers that coerce loosely typed entries.
//!
//! Property lists written by different tools disagree on how to store flags
//! and numbers, so the getters here accept a few encodings for the same value:
//!
//! * booleans: a boolean, the strings `true`/`false` (any case), an integer
//!   (`0` is false, anything positive true), or one byte of data;
//! * integers: an integer, a decimal or hexadecimal string, or 1, 2, 4 or 8
//!   bytes of little-endian data.

use plist::{Dictionary, Value};

use crate::{error::PlistError, kind::NodeKind};

pub fn get_bool(dict: &Dictionary, key: &str) -> Option<bool> {
    match dict.get(key)? {
        Value::Boolean(b) => Some(*b),
        Value::Data(d) => match d.as_slice() {
            [byte] => Some(*byte >= 1),
            _ => None,
        },
        Value::Integer(i) => match (i.as_signed(), i.as_unsigned()) {
            (Some(i), _) => Some(i >= 1),
            (None, Some(u)) => Some(u >= 1),
            (None, None) => None,
        },
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn get_int(dict: &Dictionary, key: &str) -> Option<i64> {
    match dict.get(key)? {
        Value::Data(d) => match d.as_slice() {
            &[b0] => Some(b0 as i64),
            &[b0, b1] => Some(i16::from_le_bytes([b0, b1]) as i64),
            &[b0, b1, b2, b3] => Some(i32::from_le_bytes([b0, b1, b2, b3]) as i64),
            &[b0, b1, b2, b3, b4, b5, b6, b7] => {
                Some(i64::from_le_bytes([b0, b1, b2, b3, b4, b5, b6, b7]))
            }
            _ => None,
        },
        Value::Integer(i) => i
            .as_signed()
            .or_else(|| i.as_unsigned().and_then(|u| i64::try_from(u).ok())),
        Value::String(s) => parse_number(s, i64::from_str_radix),
        _ => None,
    }
}

pub fn get_uint(dict: &Dictionary, key: &str) -> Option<u64> {
    match dict.get(key)? {
        Value::Data(d) => match d.as_slice() {
            &[b0] => Some(b0 as u64),
            &[b0, b1] => Some(u16::from_le_bytes([b0, b1]) as u64),
            &[b0, b1, b2, b3] => Some(u32::from_le_bytes([b0, b1, b2, b3]) as u64),
            &[b0, b1, b2, b3, b4, b5, b6, b7] => {
                Some(u64::from_le_bytes([b0, b1, b2, b3, b4, b5, b6, b7]))
            }
            _ => None,
        },
        Value::Integer(i) => i
            .as_unsigned()
            .or_else(|| i.as_signed().and_then(|s| u64::try_from(s).ok())),
        Value::String(s) => parse_number(s, u64::from_str_radix),
        _ => None,
    }
}

/// Decimal first, then hexadecimal with or without a `0x` prefix.
fn parse_number<T, E>(s: &str, from_str_radix: fn(&str, u32) -> Result<T, E>) -> Option<T> {
    let s = s.trim();
    if let Ok(n) = from_str_radix(s, 10) {
        return Some(n);
    }
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    from_str_radix(hex, 16).ok()
}

fn not_a_dict(role: &str, kind: NodeKind) -> PlistError {
    PlistError::invalid_arg(format!("{role} is a {kind}, not a dictionary"))
}

fn as_dict_mut<'a>(value: &'a mut Value, role: &str) -> Result<&'a mut Dictionary, PlistError> {
    let kind = NodeKind::of(value);
    value.as_dictionary_mut().ok_or_else(|| not_a_dict(role, kind))
}

fn as_dict<'a>(value: &'a Value, role: &str) -> Result<&'a Dictionary, PlistError> {
    value
        .as_dictionary()
        .ok_or_else(|| not_a_dict(role, NodeKind::of(value)))
}

/// Shared shape of the `copy_*` helpers: look `alt_key` (or `key`) up in the
/// source, convert it, store it in the target under `key`.
fn copy_with<F>(
    target: &mut Value,
    source: &Value,
    key: &str,
    alt_key: Option<&str>,
    convert: F,
) -> Result<(), PlistError>
where
    F: FnOnce(&Dictionary, &str) -> Option<Value>,
{
    let source = as_dict(source, "source")?;
    let target = as_dict_mut(target, "target")?;
    let lookup_key = alt_key.unwrap_or(key);
    let value = convert(source, lookup_key).ok_or_else(|| {
        PlistError::invalid_arg(format!("source has no usable entry for {lookup_key:?}"))
    })?;
    target.insert(key.to_string(), value);
    Ok(())
}

/// Copies an entry of any kind.
pub fn copy_item(
    target: &mut Value,
    source: &Value,
    key: &str,
    alt_key: Option<&str>,
) -> Result<(), PlistError> {
    copy_with(target, source, key, alt_key, |d, k| d.get(k).cloned())
}

/// Copies a flag, normalized to a boolean.
pub fn copy_bool(
    target: &mut Value,
    source: &Value,
    key: &str,
    alt_key: Option<&str>,
) -> Result<(), PlistError> {
    copy_with(target, source, key, alt_key, |d, k| {
        get_bool(d, k).map(Value::Boolean)
    })
}

pub fn copy_int(
    target: &mut Value,
    source: &Value,
    key: &str,
    alt_key: Option<&str>,
) -> Result<(), PlistError> {
    copy_with(target, source, key, alt_key, |d, k| {
        get_int(d, k).map(|i| Value::Integer(i.into()))
    })
}

pub fn copy_uint(
    target: &mut Value,
    source: &Value,
    key: &str,
    alt_key: Option<&str>,
) -> Result<(), PlistError> {
    copy_with(target, source, key, alt_key, |d, k| {
        get_uint(d, k).map(|u| Value::Integer(u.into()))
    })
}

/// Copies a data entry; other kinds are rejected rather than converted.
pub fn copy_data(
    target: &mut Value,
    source: &Value,
    key: &str,
    alt_key: Option<&str>,
) -> Result<(), PlistError> {
    copy_with(target, source, key, alt_key, |d, k| match d.get(k) {
        Some(Value::Data(data)) => Some(Value::Data(data.clone())),
        _ => None,
    })
}

/// Copies a string entry; other kinds are rejected rather than converted.
pub fn copy_string(
    target: &mut Value,
    source: &Value,
    key: &str,
    alt_key: Option<&str>,
) -> Result<(), PlistError> {
    copy_with(target, source, key, alt_key, |d, k| match d.get(k) {
        Some(Value::String(s)) => Some(Value::String(s.clone())),
        _ => None,
    })
}

/// Moves every entry of `source` into `target`, replacing entries with the
/// same key.
pub fn merge(target: &mut Value, source: Value) -> Result<(), PlistError> {
    let target = as_dict_mut(target, "target")?;
    match source {
        Value::Dictionary(source) => {
            target.extend(source);
            Ok(())
        }
        other => Err(not_a_dict("source", NodeKind::of(&other))),
    }
}

/// Orders a dictionary's entries by key. Other nodes are left as they are.
pub fn sort_keys(node: &mut Value) {
    if let Value::Dictionary(d) = node {
        d.sort_keys();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn source() -> Value {
        let mut d = Dictionary::new();
        d.insert("flag".to_string(), Value::Boolean(true));
        d.insert("flag_str".to_string(), Value::String("FALSE".to_string()));
        d.insert("flag_int".to_string(), Value::Integer(2i64.into()));
        d.insert("flag_data".to_string(), Value::Data(vec![0]));
        d.insert("num".to_string(), Value::Integer((-42i64).into()));
        d.insert("num_str".to_string(), Value::String("123".to_string()));
        d.insert("num_hex".to_string(), Value::String("ff".to_string()));
        d.insert("num_le2".to_string(), Value::Data(vec![0x34, 0x12]));
        d.insert("num_le4".to_string(), Value::Data(vec![1, 0, 0, 0]));
        d.insert("bad_data".to_string(), Value::Data(vec![1, 2, 3]));
        d.insert("blob".to_string(), Value::Data(vec![9, 9]));
        d.insert("name".to_string(), Value::String("phone".to_string()));
        Value::Dictionary(d)
    }

    fn empty() -> Value {
        Value::Dictionary(Dictionary::new())
    }

    #[test]
    fn test_get_bool_coercions() {
        let src = source();
        let d = src.as_dictionary().unwrap();
        assert_eq!(get_bool(d, "flag"), Some(true));
        assert_eq!(get_bool(d, "flag_str"), Some(false));
        assert_eq!(get_bool(d, "flag_int"), Some(true));
        assert_eq!(get_bool(d, "flag_data"), Some(false));
        assert_eq!(get_bool(d, "bad_data"), None);
        assert_eq!(get_bool(d, "name"), None);
        assert_eq!(get_bool(d, "missing"), None);
    }

    #[test]
    fn test_get_int_coercions() {
        let src = source();
        let d = src.as_dictionary().unwrap();
        assert_eq!(get_int(d, "num"), Some(-42));
        assert_eq!(get_int(d, "num_str"), Some(123));
        assert_eq!(get_int(d, "num_hex"), Some(255));
        assert_eq!(get_int(d, "num_le2"), Some(0x1234));
        assert_eq!(get_int(d, "num_le4"), Some(1));
        assert_eq!(get_int(d, "bad_data"), None);
        assert_eq!(get_int(d, "name"), None);
    }

    #[test]
    fn test_get_uint_rejects_negative() {
        let src = source();
        let d = src.as_dictionary().unwrap();
        assert_eq!(get_uint(d, "num"), None);
        assert_eq!(get_uint(d, "num_str"), Some(123));
        assert_eq!(get_uint(d, "num_le2"), Some(0x1234));
    }

    #[test]
    fn test_hex_with_prefix() {
        let mut d = Dictionary::new();
        d.insert("v".to_string(), Value::String("0x10".to_string()));
        assert_eq!(get_uint(&d, "v"), Some(16));
    }

    #[test]
    fn test_copy_helpers() {
        let src = source();
        let mut dst = empty();

        copy_item(&mut dst, &src, "name", None).unwrap();
        copy_bool(&mut dst, &src, "enabled", Some("flag_str")).unwrap();
        copy_int(&mut dst, &src, "count", Some("num_hex")).unwrap();
        copy_uint(&mut dst, &src, "size", Some("num_le4")).unwrap();
        copy_data(&mut dst, &src, "blob", None).unwrap();
        copy_string(&mut dst, &src, "label", Some("name")).unwrap();

        let d = dst.as_dictionary().unwrap();
        assert_eq!(d.get("name"), Some(&Value::String("phone".to_string())));
        assert_eq!(d.get("enabled"), Some(&Value::Boolean(false)));
        assert_eq!(d.get("count"), Some(&Value::Integer(255i64.into())));
        assert_eq!(d.get("size"), Some(&Value::Integer(1u64.into())));
        assert_eq!(d.get("blob"), Some(&Value::Data(vec![9, 9])));
        assert_eq!(d.get("label"), Some(&Value::String("phone".to_string())));
    }

    #[test]
    fn test_copy_errors() {
        let src = source();
        let mut dst = empty();
        assert!(matches!(
            copy_item(&mut dst, &src, "missing", None),
            Err(PlistError::InvalidArg(_))
        ));
        assert!(matches!(
            copy_string(&mut dst, &src, "blob", None),
            Err(PlistError::InvalidArg(_))
        ));
        let mut not_dict = Value::Array(vec![]);
        assert!(matches!(
            copy_item(&mut not_dict, &src, "name", None),
            Err(PlistError::InvalidArg(_))
        ));
        assert_eq!(dst, empty());
    }

    #[test]
    fn test_merge_overwrites() {
        let mut target = empty();
        target
            .as_dictionary_mut()
            .unwrap()
            .insert("name".to_string(), Value::String("old".to_string()));

        let mut extra = Dictionary::new();
        extra.insert("name".to_string(), Value::String("new".to_string()));
        extra.insert("id".to_string(), Value::Integer(1i64.into()));
        merge(&mut target, Value::Dictionary(extra)).unwrap();

        let d = target.as_dictionary().unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("name"), Some(&Value::String("new".to_string())));

        assert!(merge(&mut target, Value::Boolean(true)).is_err());
    }

    #[test]
    fn test_sort_keys() {
        let mut node = source();
        sort_keys(&mut node);
        let keys: Vec<&str> = node
            .as_dictionary()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(keys.first(), Some(&"bad_data"));
        assert_eq!(node, source());

        let mut leaf = Value::String("zyx".to_string());
        sort_keys(&mut leaf);
        assert_eq!(leaf, Value::String("zyx".to_string()));
    }
}
