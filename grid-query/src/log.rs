//! Structured JSON logging to stderr.
//!
//! Each log line is a single JSON object:
//!
//! ```json
//! {"level":"debug","msg":"ignoring unrecognized form key \"_\"","ts":"2025-01-16T10:30:00.000Z"}
//! {"level":"warn","msg":"form field limit exceeded, remaining fields dropped","kept":"1000","ts":"2025-01-16T10:30:01.000Z"}
//! ```
//!
//! `log_debug!` compiles to nothing in release builds. The key-value `log!`
//! macro is always emitted.

use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: u64 = 86_400;

/// Render one log line: level, message, `fields` in order, then the timestamp.
pub(super) fn render(level: &str, msg: &str, fields: &[(&str, &str)]) -> String {
    let mut line = String::from("{\"level\":");
    push_json_str(&mut line, level);
    line.push_str(",\"msg\":");
    push_json_str(&mut line, msg);
    for (key, value) in fields {
        line.push(',');
        push_json_str(&mut line, key);
        line.push(':');
        push_json_str(&mut line, value);
    }
    line.push_str(",\"ts\":");
    push_json_str(&mut line, &now_utc());
    line.push('}');
    line
}

/// Write a rendered line to stderr. Failures are dropped.
pub(super) fn emit(line: &str) {
    use std::io::Write as _;
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}

/// Append `s` as a quoted JSON string.
fn push_json_str(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            },
            c => out.push(c),
        }
    }
    out.push('"');
}

fn now_utc() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    utc_timestamp(now.as_secs(), now.subsec_millis())
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ` for a Unix time.
fn utc_timestamp(secs: u64, millis: u32) -> String {
    let (year, month, day) = civil_from_days(secs / SECS_PER_DAY);
    let time = secs % SECS_PER_DAY;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{millis:03}Z",
        time / 3_600,
        time / 60 % 60,
        time % 60
    )
}

/// Gregorian `(year, month, day)` for a count of days since 1970-01-01.
///
/// Howard Hinnant's `civil_from_days`:
/// <https://howardhinnant.github.io/date_algorithms.html#civil_from_days>
#[allow(clippy::similar_names)] // doe/doy/yoe are the algorithm's names
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    // Count from 0000-03-01 so the leap day is the last day of the year
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = era * 400 + yoe + u64::from(month <= 2);
    (year, month, day)
}

/// Log a debug message to stderr (only in debug builds).
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        {
            $crate::log::emit(&$crate::log::render("debug", &format!($($arg)*), &[]));
        }
    }};
}

/// Structured logging macro with key-value pairs.
///
/// ```ignore
/// log!(warn, "form field limit exceeded", kept: 1000);
/// ```
macro_rules! log {
    ($level:ident, $msg:expr $(, $key:ident : $value:expr)* $(,)?) => {{
        let fields: &[(&str, &str)] = &[$( (stringify!($key), &$value.to_string()) ),*];
        $crate::log::emit(&$crate::log::render(stringify!($level), $msg, fields));
    }};
}

pub(super) use log;
pub(super) use log_debug as debug;
