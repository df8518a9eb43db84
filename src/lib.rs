//! loggrep - Stream live grep results over rotating server logs to the browser.

pub mod config;
pub mod parser;
pub mod registry;
pub mod search;
pub mod web;
