//! Line parser chain for enriching raw log lines.
//!
//! Each stage implements [`LineParser`]. A [`ParserChain`] runs the stages in
//! order over a fresh [`ParseContext`], handing each stage the remainder left
//! by the previous one.

mod chain;
mod context;
mod tenant;
mod timestamp;

pub use chain::*;
pub use context::*;
pub use tenant::*;
pub use timestamp::*;
