//! Stage trait and ordered chain.

use std::sync::Arc;

use super::{ParseContext, TenantParser, TimestampParser};

/// Outcome of running one stage over a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStep {
    /// Hand the given remainder to the next stage.
    Continue(String),
    /// Stop the chain here; the context is the rendered result.
    Finish,
}

/// A single transformation stage.
///
/// Stages must never fail on malformed input. A stage that does not
/// recognize a line leaves `context.line` equal to its input and continues
/// with the unmodified line.
pub trait LineParser: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Parse `line`, recording extracted fields in `context`.
    fn parse(&self, line: &str, context: &mut ParseContext) -> ParseStep;
}

/// Ordered sequence of [`LineParser`] stages.
#[derive(Clone, Default)]
pub struct ParserChain {
    stages: Vec<Arc<dyn LineParser>>,
}

impl std::fmt::Debug for ParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}

impl ParserChain {
    /// Create an empty chain. An empty chain renders lines unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: tenant extraction, optionally followed by
    /// timestamp normalization.
    #[must_use]
    pub fn standard(normalize_timestamps: bool) -> Self {
        let chain = Self::new().with_stage(TenantParser::new());
        if normalize_timestamps {
            chain.with_stage(TimestampParser::new())
        } else {
            chain
        }
    }

    /// Append a stage (builder pattern).
    #[must_use]
    pub fn with_stage(mut self, stage: impl LineParser + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage over a raw line and return the final context.
    #[must_use]
    pub fn parse(&self, raw: &str) -> ParseContext {
        let mut context = ParseContext::new(raw);
        let mut remainder = raw.to_string();

        for stage in &self.stages {
            match stage.parse(&remainder, &mut context) {
                ParseStep::Continue(next) => remainder = next,
                ParseStep::Finish => break,
            }
        }

        context
    }
}
