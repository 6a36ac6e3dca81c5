//! Equality and ordering checks on plist nodes.
//!
//! The scalar comparisons return `None` (or `false`) when the node is not of
//! the kind the comparison is about, so a type mismatch is never mistaken for
//! an ordering.

use std::cmp::Ordering;

use plist::Value;

use crate::date;

/// Value-level equality over the whole tree.
///
/// Dictionaries compare equal regardless of key order and integers compare by
/// numeric value whatever their signedness. A NaN real equals another NaN, so
/// a tree always equals itself. The on-disk format a tree was read from plays
/// no part.
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Real(l), Value::Real(r)) => l == r || (l.is_nan() && r.is_nan()),
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Dictionary(l), Value::Dictionary(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(key, l)| r.get(key).is_some_and(|r| deep_equal(l, r)))
        }
        _ => left == right,
    }
}

pub fn bool_is_true(node: &Value) -> bool {
    matches!(node, Value::Boolean(true))
}

pub fn int_is_negative(node: &Value) -> bool {
    node.as_signed_integer().map_or(false, |i| i < 0)
}

/// Compares an integer node with a signed value.
pub fn compare_int(node: &Value, other: i64) -> Option<Ordering> {
    let Value::Integer(i) = node else {
        return None;
    };
    match (i.as_signed(), i.as_unsigned()) {
        (Some(i), _) => Some(i.cmp(&other)),
        // only values above i64::MAX are unsigned-only
        (None, Some(_)) => Some(Ordering::Greater),
        (None, None) => None,
    }
}

/// Compares an integer node with an unsigned value.
pub fn compare_uint(node: &Value, other: u64) -> Option<Ordering> {
    let Value::Integer(i) = node else {
        return None;
    };
    match (i.as_unsigned(), i.as_signed()) {
        (Some(u), _) => Some(u.cmp(&other)),
        (None, Some(_)) => Some(Ordering::Less),
        (None, None) => None,
    }
}

pub fn compare_uid(node: &Value, other: u64) -> Option<Ordering> {
    match node {
        Value::Uid(uid) => Some(uid.get().cmp(&other)),
        _ => None,
    }
}

/// `None` for non-real nodes and for NaN on either side.
pub fn compare_real(node: &Value, other: f64) -> Option<Ordering> {
    match node {
        Value::Real(r) => r.partial_cmp(&other),
        _ => None,
    }
}

/// Compares a date node with a unix timestamp in whole seconds.
pub fn compare_date(node: &Value, unix_secs: i64) -> Option<Ordering> {
    match node {
        Value::Date(d) => Some(date::to_unix_secs(d).cmp(&unix_secs)),
        _ => None,
    }
}

pub fn compare_string(node: &Value, other: &str) -> Option<Ordering> {
    node.as_string().map(|s| s.cmp(other))
}

/// Compares at most the first `n` bytes of a string node and `other`.
pub fn compare_string_prefix(node: &Value, other: &str, n: usize) -> Option<Ordering> {
    let s = node.as_string()?;
    let left = &s.as_bytes()[..n.min(s.len())];
    let right = &other.as_bytes()[..n.min(other.len())];
    Some(left.cmp(right))
}

pub fn string_contains(node: &Value, needle: &str) -> bool {
    node.as_string().map_or(false, |s| s.contains(needle))
}

/// Lexicographic comparison of a data node's bytes with `other`.
pub fn compare_data(node: &Value, other: &[u8]) -> Option<Ordering> {
    node.as_data().map(|d| d.cmp(other))
}

/// True when `needle` occurs as a contiguous run inside a data node. The empty
/// needle is contained in every data node.
pub fn data_contains(node: &Value, needle: &[u8]) -> bool {
    let Some(data) = node.as_data() else {
        return false;
    };
    needle.is_empty() || data.windows(needle.len()).any(|w| w == needle)
}
