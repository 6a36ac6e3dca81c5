use std::fmt;

use plist::Value;

/// The type tag of a plist node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Boolean,
    Integer,
    Real,
    String,
    Array,
    Dictionary,
    Date,
    Data,
    Uid,
    /// A value variant this crate does not know about.
    Unknown,
}

impl NodeKind {
    pub fn of(value: &Value) -> NodeKind {
        match value {
            Value::Boolean(_) => NodeKind::Boolean,
            Value::Integer(_) => NodeKind::Integer,
            Value::Real(_) => NodeKind::Real,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Dictionary(_) => NodeKind::Dictionary,
            Value::Date(_) => NodeKind::Date,
            Value::Data(_) => NodeKind::Data,
            Value::Uid(_) => NodeKind::Uid,
            _ => NodeKind::Unknown,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Dictionary)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Boolean => "boolean",
            NodeKind::Integer => "integer",
            NodeKind::Real => "real",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Dictionary => "dictionary",
            NodeKind::Date => "date",
            NodeKind::Data => "data",
            NodeKind::Uid => "uid",
            NodeKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
