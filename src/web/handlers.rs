//! HTTP handlers for the search front end.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Response};
use futures_util::stream::{self, StreamExt};

use super::pages::{chunk_markup, lead_in, results_header, welcome_page};
use super::{Credentials, ServerError};
use crate::registry::ClientIdentity;
use crate::search::{SearchParams, SearchRunner};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Runner that owns the process registry and file catalog.
    pub runner: Arc<SearchRunner>,
    /// Accepted credentials.
    pub credentials: Arc<Credentials>,
}

impl AppState {
    #[must_use]
    pub fn new(runner: Arc<SearchRunner>, credentials: Credentials) -> Self {
        Self {
            runner,
            credentials: Arc::new(credentials),
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), ServerError> {
        if self.credentials.verify(headers) {
            Ok(())
        } else {
            Err(ServerError::Unauthorized)
        }
    }
}

/// GET / - Search form. Stops any search the caller still has running.
///
/// # Errors
///
/// Returns `ServerError::Unauthorized` without valid credentials.
pub async fn index(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Html<String>, ServerError> {
    state.authorize(&headers)?;
    let identity = ClientIdentity::from_peer(peer);
    tracing::debug!(identity = %identity, "Welcome page requested");

    state.runner.registry().preempt(&identity);

    Ok(Html(welcome_page(&state.runner.catalog().files())))
}

/// GET /search - Stream grep results as an HTML page.
///
/// Without both `file` and `q` the search form is shown instead.
///
/// # Errors
///
/// Returns `ServerError::Unauthorized` without valid credentials and
/// `ServerError::Search` when the search cannot be started.
pub async fn search(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Response, ServerError> {
    state.authorize(&headers)?;
    let identity = ClientIdentity::from_peer(peer);
    tracing::info!(identity = %identity, params = ?params, "Search requested");

    state.runner.registry().preempt(&identity);

    let files = state.runner.catalog().files();
    if !params.is_complete() {
        return Ok(Html(welcome_page(&files)).into_response());
    }

    let chunks = state.runner.run_search(identity, &params)?;

    let head = stream::iter([lead_in(), results_header(&files, &params)]);
    let body = head
        .chain(chunks.map(chunk_markup))
        .map(Ok::<_, Infallible>);

    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from_stream(body),
    )
        .into_response())
}

/// Fallback for unknown routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
