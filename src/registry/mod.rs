//! Registry of the one outstanding search process per client.

mod handle;
mod signal;
mod store;

pub use handle::*;
pub use signal::*;
pub use store::*;
