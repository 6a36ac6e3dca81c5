use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use plist::Date as PlistDate;

pub fn to_datetime(plist_date: &PlistDate) -> DateTime<FixedOffset> {
    // plist dates carry no zone, they are always UTC
    let plist_sys_time: SystemTime = plist_date.to_owned().into();
    let utc_date: DateTime<Utc> = plist_sys_time.into();
    let utc_offset = utc_date.offset().fix();
    utc_date.with_timezone(&utc_offset)
}

/// Whole seconds since the unix epoch, negative for dates before 1970.
pub fn to_unix_secs(plist_date: &PlistDate) -> i64 {
    to_datetime(plist_date).timestamp()
}

/// Returns `None` when `secs` is outside the range chrono can represent.
pub fn from_unix_secs(secs: i64) -> Option<PlistDate> {
    let utc_date = DateTime::<Utc>::from_timestamp(secs, 0)?;
    let sys_time: SystemTime = utc_date.into();
    Some(sys_time.into())
}
