// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Settings page handlers.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::response::Response;
use minijinja::context;
use playtime::{ControlsMapping, EmulatorButtons, EmulatorSettings, PlaytimeRequest, Reconciler};

use super::error::AppError;
use super::http::{found, read_request, AppState};
use super::session::Session;

/// Reads the request and resolves its session.
async fn open(state: &AppState, request: Request) -> Result<(PlaytimeRequest, Session), AppError> {
    let request = read_request(request).await?;
    let session = Session::from_request(&request, &state.config.server);
    Ok((request, session))
}

/// Parses the submitted form and checks its CSRF token.
fn submitted_fields(
    request: &PlaytimeRequest,
    session: &Session,
) -> Result<std::collections::HashMap<String, String>, AppError> {
    let fields = request
        .form_fields()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    session.verify(&fields)?;
    Ok(fields)
}

fn is_done(request: &PlaytimeRequest) -> bool {
    request.query.get("done").is_some_and(|done| done == "1")
}

/// `GET /settings`
pub async fn settings_index(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let (request, session) = open(&state, request).await?;
    let settings = state.store.get(&session.user)?;

    state.render_page(
        "settings",
        &request,
        &session,
        context! {
            platforms => state.catalog.sorted_platforms(),
            settings,
            done => is_done(&request),
        },
    )
}

/// `GET /settings/general`
pub async fn general_form(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let (request, session) = open(&state, request).await?;
    let settings = state.store.get(&session.user)?;

    state.render_page(
        "settings_general",
        &request,
        &session,
        context! {
            settings,
            languages => state.catalog.languages(),
            done => is_done(&request),
        },
    )
}

/// `POST /settings/general`
pub async fn save_general(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let (request, session) = open(&state, request).await?;
    let fields = submitted_fields(&request, &session)?;

    let mut settings = state.store.get(&session.user)?;
    Reconciler::new(&state.catalog).reconcile_general(&mut settings, &fields)?;
    state.store.save(&settings)?;

    tracing::info!(user = %session.user, "Saved general settings");
    Ok(found("/settings/general?done=1"))
}

/// `GET /settings/:platform`
pub async fn platform_form(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let platform = state.catalog.require_platform(&platform)?;
    let (request, session) = open(&state, request).await?;

    let settings = state.store.get(&session.user)?;
    let current: EmulatorSettings = match settings.emulator_settings.get(&platform.id) {
        Some(current) => current.clone(),
        None => state.catalog.default_emulator_settings(&platform.id)?,
    };

    state.render_page(
        "settings_platform",
        &request,
        &session,
        context! {
            platform,
            settings => current,
            cores => &platform.cores,
            bioses => &platform.bios,
            shaders => state.catalog.shaders(),
            core_options => state.catalog.core_options_by_platform(&platform.id),
            fast_forward_ratios => state.catalog.fast_forward_ratios(),
            slow_motion_ratios => state.catalog.slow_motion_ratios(),
            rewind_granularities => state.catalog.rewind_granularities(),
            button_names => EmulatorButtons::NAMES,
            control_buttons => ControlsMapping::BUTTONS,
        },
    )
}

/// `POST /settings/:platform`
pub async fn save_platform(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let platform = state.catalog.require_platform(&platform)?;
    let (request, session) = open(&state, request).await?;
    let fields = submitted_fields(&request, &session)?;

    let reconciled = Reconciler::new(&state.catalog).reconcile_platform(&platform.id, &fields)?;

    let mut settings = state.store.get(&session.user)?;
    settings
        .emulator_settings
        .insert(platform.id.clone(), reconciled.value);
    state.store.save(&settings)?;

    tracing::info!(
        user = %session.user,
        platform = %platform.id,
        warnings = reconciled.warnings.len(),
        "Saved platform settings"
    );
    Ok(found("/settings?done=1"))
}

/// `GET /settings/:platform/restore`
pub async fn restore_form(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let platform = state.catalog.require_platform(&platform)?;
    let (request, session) = open(&state, request).await?;

    state.render_page(
        "settings_platform_restore",
        &request,
        &session,
        context! { platform },
    )
}

/// `POST /settings/:platform/restore`
pub async fn restore_platform(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let platform = state.catalog.require_platform(&platform)?;
    let (request, session) = open(&state, request).await?;
    submitted_fields(&request, &session)?;

    let defaults = state.catalog.default_emulator_settings(&platform.id)?;
    let mut settings = state.store.get(&session.user)?;
    settings
        .emulator_settings
        .insert(platform.id.clone(), defaults);
    state.store.save(&settings)?;

    tracing::info!(user = %session.user, platform = %platform.id, "Restored platform defaults");
    Ok(found(&format!("/settings/{}", platform.id)))
}
