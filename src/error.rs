use thiserror::Error;

use crate::format::Format;

#[derive(Debug, Error)]
pub enum PlistError {
    #[error("invalid argument: {0}")]
    InvalidArg(String),
    #[error("{}", parse_message(.format))]
    Parse { format: Option<Format> },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize plist: {0}")]
    Serialize(String),
}

fn parse_message(format: &Option<Format>) -> String {
    match format {
        Some(format) => format!("could not parse data as {format} plist"),
        None => "could not parse data as any known plist format".to_string(),
    }
}

impl PlistError {
    pub(crate) fn invalid_arg(msg: impl Into<String>) -> Self {
        PlistError::InvalidArg(msg.into())
    }
}

impl From<plist::Error> for PlistError {
    fn from(e: plist::Error) -> Self {
        PlistError::Serialize(e.to_string())
    }
}

impl From<serde_json::Error> for PlistError {
    fn from(e: serde_json::Error) -> Self {
        PlistError::Serialize(e.to_string())
    }
}
