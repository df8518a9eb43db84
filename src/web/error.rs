//! Web error types and their HTTP responses.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use super::auth::REALM;
use super::pages::error_page;
use crate::search::SearchError;

/// Errors that can occur while serving requests.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Missing or wrong credentials.
    #[error("Authentication required")]
    Unauthorized,

    /// Unknown route.
    #[error("Not found")]
    NotFound,

    /// The search could not be started.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Server error.
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => {
                tracing::info!("Could not authenticate user");
                (
                    StatusCode::UNAUTHORIZED,
                    [
                        (header::WWW_AUTHENTICATE, format!(r#"Basic realm="{REALM}""#)),
                        (header::CONTENT_TYPE, "text/plain".to_string()),
                    ],
                    "HTTP Basic: Access denied.\n",
                )
                    .into_response()
            }
            Self::NotFound => (StatusCode::NOT_FOUND, Html("<h1>Not Found</h1>")).into_response(),
            Self::Search(err) => {
                let status = if err.is_invalid_parameter() {
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!(error = %err, "Search failed to start");
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Html(error_page(&err.to_string()))).into_response()
            }
            Self::BindError { .. } | Self::Serve(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page(&self.to_string())))
                    .into_response()
            }
        }
    }
}
