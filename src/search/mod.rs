//! Search execution: command construction, process spawning and streaming
//! of rendered output to a chunk sink.

mod command;
mod error;
mod lines;
mod process;
mod render;
mod runner;
mod sink;

pub use command::*;
pub use error::*;
pub use lines::*;
pub use process::*;
pub use render::*;
pub use runner::*;
pub use sink::*;
