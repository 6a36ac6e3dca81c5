//! The `plist_cmp` driver: load two plist files and compare their trees.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::{debug, info, log_enabled, trace, Level, LevelFilter};
use plist::Value;
use thiserror::Error;

use crate::{compare, error::PlistError, format, kind::NodeKind, print};

/// Exit code for usage errors and unreadable input. clap uses the same code
/// for argument errors.
pub const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "plist_cmp",
    version,
    about = "Compare the values stored in two plist files",
    long_about = "Compare the values stored in two plist files.\n\n\
                  Exits 0 when both files hold equal trees, 1 when they differ \
                  and 2 when a file cannot be read. XML, binary and JSON files \
                  can be compared with each other."
)]
pub struct Args {
    /// First plist file
    pub first: PathBuf,
    /// Second plist file
    pub second: PathBuf,
    /// Log progress to stderr; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Equal,
    Different,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Equal => 0,
            Outcome::Different => 1,
        }
    }
}

#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    pub source: PlistError,
}

pub fn load(path: &Path) -> Result<Value, LoadError> {
    let (value, found) = format::read_from_file(path).map_err(|source| LoadError {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "loaded {} as {found} plist, {}",
        path.display(),
        describe_root(&value)
    );
    Ok(value)
}

/// Names the root's kind, with its entry count when it is a container.
fn describe_root(root: &Value) -> String {
    let kind = NodeKind::of(root);
    if !kind.is_container() {
        return format!("{kind} root");
    }
    let len = match root {
        Value::Array(a) => a.len(),
        Value::Dictionary(d) => d.len(),
        _ => 0,
    };
    format!("{kind} root with {len} entries")
}

/// Loads both files and compares them. Both trees are dropped before this
/// returns, whichever way it returns.
pub fn run(args: &Args) -> Result<Outcome, LoadError> {
    let first = load(&args.first);
    let second = load(&args.second);
    let (first, second) = (first?, second?);

    let outcome = if compare::deep_equal(&first, &second) {
        Outcome::Equal
    } else {
        Outcome::Different
    };
    debug!(
        "{} vs {}: {outcome:?}",
        args.first.display(),
        args.second.display()
    );
    if outcome == Outcome::Different && log_enabled!(Level::Trace) {
        trace!("{}:\n{}", args.first.display(), print::pretty_print(&first));
        trace!("{}:\n{}", args.second.display(), print::pretty_print(&second));
    }
    Ok(outcome)
}
