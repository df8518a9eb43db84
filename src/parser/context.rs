//! Per-line parse context.

use chrono::NaiveTime;

/// Fields extracted from a single log line as it moves through the chain.
///
/// A context is created for one raw line and dropped once the line has been
/// rendered. It is never shared between lines or connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Current textual content, refined by each stage.
    pub line: String,
    /// Tenant identifier (shop domain) extracted from the line.
    pub shop: Option<String>,
    /// Base name of the source file a line was prefixed with.
    pub source: Option<String>,
    /// Normalized clock time embedded in the line.
    pub time: Option<NaiveTime>,
}

impl ParseContext {
    /// Create a context for a raw line.
    #[must_use]
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            ..Default::default()
        }
    }

    /// Whether a tenant identifier has been captured.
    #[must_use]
    pub fn has_shop(&self) -> bool {
        self.shop.is_some()
    }
}
