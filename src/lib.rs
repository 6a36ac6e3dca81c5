//! Path access and semantic comparison for property lists.
//!
//! Trees are [`plist::Value`]s. [`path`] resolves key/index paths into them,
//! [`compare`] decides value-level equality, and [`cli`] is the driver behind
//! the `plist_cmp` binary.

pub mod cli;
pub mod compare;
pub mod date;
pub mod dict;
pub mod error;
pub mod format;
pub mod kind;
pub mod path;
pub mod print;

pub use error::PlistError;
pub use format::{read_from_bytes, read_from_file, Format, WriteOptions};
pub use kind::NodeKind;
pub use path::{access_path, access_path_from, lookup, PathElem};
