//! Path access into a plist tree.
//!
//! A path is a sequence of [`PathElem`]s: dictionary keys and array indices.
//! [`lookup`] walks a path given as a slice. Callers that produce components
//! from an iterator go through [`with_owned_path`] or [`with_borrowed_path`],
//! which collect exactly the declared components into a scratch buffer and
//! hand that buffer to a slice-based lookup.

use std::fmt;

use log::warn;
use plist::Value;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElem {
    /// Selects an entry of a dictionary.
    Key(String),
    /// Selects an element of an array.
    Index(u32),
}

impl From<&str> for PathElem {
    fn from(key: &str) -> Self {
        PathElem::Key(key.to_string())
    }
}

impl From<String> for PathElem {
    fn from(key: String) -> Self {
        PathElem::Key(key)
    }
}

impl From<u32> for PathElem {
    fn from(index: u32) -> Self {
        PathElem::Index(index)
    }
}

impl fmt::Display for PathElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElem::Key(key) => write!(f, "{key:?}"),
            PathElem::Index(index) => write!(f, "[{index}]"),
        }
    }
}

fn step<'a>(node: &'a Value, elem: &PathElem) -> Option<&'a Value> {
    match (node, elem) {
        (Value::Dictionary(dict), PathElem::Key(key)) => dict.get(key),
        (Value::Array(array), PathElem::Index(index)) => array.get(*index as usize),
        _ => None,
    }
}

fn step_mut<'a>(node: &'a mut Value, elem: &PathElem) -> Option<&'a mut Value> {
    match (node, elem) {
        (Value::Dictionary(dict), PathElem::Key(key)) => dict.get_mut(key),
        (Value::Array(array), PathElem::Index(index)) => array.get_mut(*index as usize),
        _ => None,
    }
}

/// Resolves `path` against `node`.
///
/// Keys only match dictionaries and indices only match arrays; a missing key,
/// an out-of-range index or a kind mismatch yields `None`. The empty path
/// resolves to `node` itself.
pub fn lookup<'a>(node: &'a Value, path: &[PathElem]) -> Option<&'a Value> {
    path.iter().try_fold(node, step)
}

pub fn lookup_mut<'a>(node: &'a mut Value, path: &[PathElem]) -> Option<&'a mut Value> {
    path.iter().try_fold(node, step_mut)
}

/// Collects every component of `cursor` and calls `delegate` with them.
///
/// The buffer is sized from the cursor's exact length before anything is read.
/// If it cannot be allocated, `None` is returned, the cursor is left untouched
/// and `delegate` is not called. The cursor is dropped before returning.
pub fn with_owned_path<I, F, R>(cursor: I, delegate: F) -> Option<R>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Into<PathElem>,
    F: FnOnce(&[PathElem]) -> Option<R>,
{
    let mut cursor = cursor.into_iter();
    let length = cursor.len();
    let path = collect_path(length, &mut cursor)?;
    drop(cursor);
    delegate(&path)
}

/// Collects the next `length` components of a cursor owned by the caller and
/// calls `delegate` with them.
///
/// The cursor is never dropped here; anything after the first `length` items
/// is still available to the caller. With `length == 0` the cursor is not
/// read. If the buffer cannot be allocated or the cursor runs out early, the
/// result is `None` and `delegate` is not called.
pub fn with_borrowed_path<I, F, R>(length: usize, cursor: &mut I, delegate: F) -> Option<R>
where
    I: Iterator,
    I::Item: Into<PathElem>,
    F: FnOnce(&[PathElem]) -> Option<R>,
{
    let path = collect_path(length, cursor)?;
    delegate(&path)
}

fn collect_path<I>(length: usize, cursor: &mut I) -> Option<Vec<PathElem>>
where
    I: Iterator,
    I::Item: Into<PathElem>,
{
    let mut path = Vec::new();
    if let Err(e) = path.try_reserve_exact(length) {
        warn!("cannot allocate a path of {length} components: {e}");
        return None;
    }
    path.extend(cursor.by_ref().take(length).map(Into::into));
    if path.len() != length {
        warn!(
            "path declared {length} components but only {} were supplied",
            path.len()
        );
        return None;
    }
    Some(path)
}

/// Resolves the components of `path` against `node`.
///
/// ```
/// use plist::{Dictionary, Value};
/// use plist_tree::path::{access_path, PathElem};
///
/// let mut inner = Dictionary::new();
/// inner.insert("name".to_string(), Value::String("iPhone".to_string()));
/// let mut root = Dictionary::new();
/// root.insert("devices".to_string(), Value::Array(vec![Value::Dictionary(inner)]));
/// let root = Value::Dictionary(root);
///
/// let path = [PathElem::from("devices"), PathElem::from(0u32), PathElem::from("name")];
/// assert_eq!(
///     access_path(&root, path).and_then(Value::as_string),
///     Some("iPhone")
/// );
/// ```
pub fn access_path<'a, I>(node: &'a Value, path: I) -> Option<&'a Value>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Into<PathElem>,
{
    with_owned_path(path, |path| lookup(node, path))
}

/// Like [`access_path`], but reads `length` components from a cursor the caller
/// keeps using afterwards.
pub fn access_path_from<'a, I>(
    node: &'a Value,
    length: usize,
    cursor: &mut I,
) -> Option<&'a Value>
where
    I: Iterator,
    I::Item: Into<PathElem>,
{
    with_borrowed_path(length, cursor, |path| lookup(node, path))
}

pub fn access_path_mut<'a, I>(node: &'a mut Value, path: I) -> Option<&'a mut Value>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Into<PathElem>,
{
    with_owned_path(path, |path| lookup_mut(node, path))
}
