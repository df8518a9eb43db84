//! HTTP front end: authentication, pages and the streaming search endpoint.

mod auth;
mod error;
mod handlers;
mod pages;
mod server;

pub use auth::Credentials;
pub use error::ServerError;
pub use handlers::{index, not_found, search, AppState};
pub use pages::{
    chunk_markup, error_page, lead_in, results_header, welcome_page, DONE_MARKER, LEAD_IN_LEN,
};
pub use server::SearchServer;
