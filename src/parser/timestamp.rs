//! Timestamp normalization stage.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

use super::{LineParser, ParseContext, ParseStep};

/// `<path>:<hh:mm:ss> <rest>`, as produced by grepping several files at once.
static PATH_TIME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w/.\-]+):\s*(\d\d:\d\d:\d\d)\s*(.*)$").expect("timestamp pattern is valid")
});

/// Canonical rendering of a normalized clock time.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Rewrites `/var/log/app.log:14:58:21 rest` as `app.log 14:58:21 rest`.
///
/// Lines that do not match, or whose clock time is not a valid time of day,
/// pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampParser;

impl TimestampParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LineParser for TimestampParser {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn parse(&self, line: &str, context: &mut ParseContext) -> ParseStep {
        let Some(caps) = PATH_TIME_LINE.captures(line) else {
            context.line = line.to_string();
            return ParseStep::Continue(line.to_string());
        };

        let path = &caps[1];
        let Ok(time) = NaiveTime::parse_from_str(&caps[2], TIME_FORMAT) else {
            tracing::trace!(line, "Unparseable clock time, passing line through");
            context.line = line.to_string();
            return ParseStep::Continue(line.to_string());
        };

        let base = Path::new(path)
            .file_name()
            .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());
        let rest = &caps[3];

        let time_text = time.format(TIME_FORMAT);
        context.line = if rest.is_empty() {
            format!("{base} {time_text}")
        } else {
            format!("{base} {time_text} {rest}")
        };
        context.source = Some(base);
        context.time = Some(time);

        ParseStep::Continue(context.line.clone())
    }
}
