//! Validation of search requests into runnable commands.

use std::borrow::Cow;

use serde::Deserialize;

use super::SearchError;

/// Script used when a secondary filter narrows the primary search.
///
/// User data is passed as positional parameters (`$0` tool, `$1` primary
/// term, `$2` file, `$3` filter term) and never interpolated into the script.
pub const FILTER_PIPELINE: &str = r#""$0" -E -e "$1" "$2" | grep -E -e "$3""#;

/// Characters with special meaning in POSIX extended regular expressions.
const ERE_META: &[char] = &[
    '\\', '.', '^', '$', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// Search tool, chosen by the compression suffix of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchTool {
    /// `zgrep`, for gzip-compressed rotations.
    Zgrep,
    /// `bzgrep`, for bzip2-compressed rotations.
    Bzgrep,
    /// Plain `grep`.
    Grep,
}

impl SearchTool {
    /// Pick the tool for a log file path.
    #[must_use]
    pub fn for_file(path: &str) -> Self {
        if path.ends_with(".gz") {
            Self::Zgrep
        } else if path.ends_with(".bz2") {
            Self::Bzgrep
        } else {
            Self::Grep
        }
    }

    /// Executable name.
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Zgrep => "zgrep",
            Self::Bzgrep => "bzgrep",
            Self::Grep => "grep",
        }
    }
}

/// Raw query parameters of a search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    /// Requested log file.
    pub file: Option<String>,
    /// Primary query.
    pub q: Option<String>,
    /// Optional secondary filter, typically a shop domain.
    pub shop: Option<String>,
}

impl SearchParams {
    #[must_use]
    pub fn new(file: impl Into<String>, q: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            q: Some(q.into()),
            shop: None,
        }
    }

    /// Narrow the search with a secondary term.
    #[must_use]
    pub fn with_filter(mut self, shop: impl Into<String>) -> Self {
        self.shop = Some(shop.into());
        self
    }

    /// Whether both `file` and `q` were supplied at all.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.file.is_some() && self.q.is_some()
    }
}

/// Escape a user query for use as a literal ERE pattern and strip quotes.
///
/// Line breaks are dropped too: grep reads each line of a `-e` argument as
/// a separate pattern.
#[must_use]
pub fn sanitize_query(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        match c {
            '\'' | '"' | '\n' | '\r' => {}
            c if ERE_META.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// A validated search: tool, whitelisted file and sanitized terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    tool: SearchTool,
    file: String,
    primary: String,
    filter: Option<String>,
}

impl CommandSpec {
    /// Validate request parameters against the discoverable-file whitelist.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidParameter` if the query is blank, the
    /// file is not whitelisted, or no non-empty term survives sanitizing.
    pub fn validate(params: &SearchParams, whitelist: &[String]) -> Result<Self, SearchError> {
        if is_blank(params.q.as_deref()) {
            return Err(SearchError::InvalidParameter(
                "Query cannot be blank".to_string(),
            ));
        }

        let file = params.file.as_deref().unwrap_or_default();
        if !whitelist.iter().any(|f| f == file) {
            return Err(SearchError::InvalidParameter(format!(
                "invalid log file {file}"
            )));
        }

        let mut terms = [params.q.as_deref(), params.shop.as_deref()]
            .into_iter()
            .flatten()
            .filter(|t| !t.trim().is_empty())
            .map(sanitize_query)
            .filter(|t| !t.is_empty());

        let primary = terms.next().ok_or_else(|| {
            SearchError::InvalidParameter("Both query and shop filter cannot be blank".to_string())
        })?;

        Ok(Self {
            tool: SearchTool::for_file(file),
            file: file.to_string(),
            primary,
            filter: terms.next(),
        })
    }

    #[must_use]
    pub fn tool(&self) -> SearchTool {
        self.tool
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Program and arguments to spawn, without any shell interpolation.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        let tool = self.tool.program().to_string();
        match &self.filter {
            None => vec![
                tool,
                "-E".to_string(),
                "-e".to_string(),
                self.primary.clone(),
                self.file.clone(),
            ],
            Some(filter) => vec![
                "sh".to_string(),
                "-c".to_string(),
                FILTER_PIPELINE.to_string(),
                tool,
                self.primary.clone(),
                self.file.clone(),
                filter.clone(),
            ],
        }
    }

    /// Shell-quoted rendering of the command for logs.
    #[must_use]
    pub fn display(&self) -> String {
        let quote = |s: &str| shell_escape::escape(Cow::Borrowed(s)).into_owned();
        let mut cmd = format!(
            "{} -E -e {} {}",
            self.tool.program(),
            quote(&self.primary),
            quote(&self.file)
        );
        if let Some(filter) = &self.filter {
            cmd.push_str(" | grep -E -e ");
            cmd.push_str(&quote(filter));
        }
        cmd
    }
}
