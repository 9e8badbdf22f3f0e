// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP server for the settings pages.
//!
//! This is a thin adapter: requests are converted to [`PlaytimeRequest`],
//! handlers call into the settings core, and rendered pages or redirects are
//! sent back. Failed requests are turned into the `error` template by a
//! single middleware.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use minijinja::{context, Value};
use playtime::request::parse_cookie_header;
use playtime::{Catalog, LanguageHints, PlaytimeRequest, Renderer, SettingsStore};
use tower_http::trace::TraceLayer;

use super::error::{AppError, HandlerFailure};
use super::handlers;
use super::session::Session;
use crate::config::Config;

const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state.
pub struct AppState {
    /// Template renderer (debug or cached).
    pub renderer: Renderer,
    /// Platform and option tables.
    pub catalog: Arc<Catalog>,
    /// Per-user settings persistence.
    pub store: Arc<dyn SettingsStore>,
    /// Application configuration.
    pub config: Config,
}

impl AppState {
    /// Renders a page for the session's user.
    ///
    /// `_csrf_token` and `user` are added to the page variables.
    pub fn render_page(
        &self,
        name: &str,
        request: &PlaytimeRequest,
        session: &Session,
        page: Value,
    ) -> Result<Response, AppError> {
        let variables = context! {
            _csrf_token => &session.csrf_token,
            user => context! { login => &session.user },
            ..page
        };

        let html = self
            .renderer
            .render(name, variables, &request.language_hints())?;
        Ok(Html(html).into_response())
    }
}

/// Builds the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/settings", get(handlers::settings_index))
        .route(
            "/settings/general",
            get(handlers::general_form).post(handlers::save_general),
        )
        .route(
            "/settings/:platform",
            get(handlers::platform_form).post(handlers::save_platform),
        )
        .route(
            "/settings/:platform/restore",
            get(handlers::restore_form).post(handlers::restore_platform),
        )
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(state.clone(), error_pages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves the router until the process is stopped.
pub async fn create_server(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn fallback_handler(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Converts an axum request into a [`PlaytimeRequest`], reading the body.
pub async fn read_request(request: Request<Body>) -> Result<PlaytimeRequest, AppError> {
    let (parts, body) = request.into_parts();

    let headers: HashMap<String, String> = parts
        .headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
        .collect();
    let cookies = headers
        .get("cookie")
        .map(|cookie| parse_cookie_header(cookie))
        .unwrap_or_default();

    let body = axum::body::to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::BadRequest("Body too large".to_string()))?;

    let mut request = PlaytimeRequest::new(parts.uri.path(), parts.method.as_str())
        .with_query(parse_query(parts.uri.query()))
        .with_headers(headers)
        .with_cookies(cookies);

    if !body.is_empty() {
        request = request.with_body(body.to_vec());
    }

    Ok(request)
}

/// Parses a query string; the first occurrence of a key wins.
fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Replaces failed responses with the rendered error page.
async fn error_pages(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let hints = language_hints(&request);

    let response = next.run(request).await;
    let status = response.status();
    let failure = match response.extensions().get::<HandlerFailure>().cloned() {
        Some(failure) => failure,
        // Rejections produced by axum itself (405, extractor errors)
        None if status.is_client_error() || status.is_server_error() => HandlerFailure {
            status,
            message: status.canonical_reason().unwrap_or("Request failed").to_string(),
        },
        None => return response,
    };

    tracing::error!(%method, %uri, error = %failure.message, "Request failed");

    let variables = context! {
        status => failure.status.as_u16(),
        error => &failure.message,
    };
    let mut page = match state.renderer.render("error", variables, &hints) {
        Ok(html) => (failure.status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(%method, %uri, error = %e, "Failed to render error page");
            (
                failure.status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("{}: {}", failure.status, failure.message),
            )
                .into_response()
        }
    };

    if let Some(allow) = response.headers().get(header::ALLOW) {
        page.headers_mut().insert(header::ALLOW, allow.clone());
    }
    page
}

fn language_hints(request: &Request) -> LanguageHints {
    let header_value = |name: header::HeaderName| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    PlaytimeRequest::new(request.uri().path(), request.method().as_str())
        .with_query(parse_query(request.uri().query()))
        .with_cookies(
            header_value(header::COOKIE)
                .map(|cookie| parse_cookie_header(&cookie))
                .unwrap_or_default(),
        )
        .with_headers(
            header_value(header::ACCEPT_LANGUAGE)
                .map(|value| HashMap::from([("accept-language".to_string(), value)]))
                .unwrap_or_default(),
        )
        .language_hints()
}

/// A `302 Found` redirect.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
