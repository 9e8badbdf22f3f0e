// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the settings routes.
//!
//! These tests drive the real router with the embedded templates and an
//! in-memory settings store.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use playtime::{MemorySettingsStore, SettingsStore};
use playtime_cli::commands::serve::build_state;
use playtime_cli::config::Config;
use playtime_cli::server::{build_router, csrf_token, USER_HEADER};

const SECRET: &str = "test-secret";

struct Harness {
    server: TestServer,
    store: Arc<MemorySettingsStore>,
}

fn setup() -> Harness {
    let mut config = Config::default();
    config.server.csrf_secret = SECRET.to_string();

    let store = Arc::new(MemorySettingsStore::new());
    let state = build_state(config, store.clone()).unwrap();
    let server = TestServer::new(build_router(Arc::new(state))).unwrap();

    Harness { server, store }
}

fn token(user: &str) -> String {
    csrf_token(SECRET, user)
}

#[tokio::test]
async fn test_settings_overview_lists_platforms() {
    let h = setup();

    let response = h.server.get("/settings").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Super Nintendo"));
    assert!(html.contains("href=\"/settings/snes\""));
    assert!(html.contains("Signed in as local"));
    assert!(!html.contains("Settings saved"));

    let html = h.server.get("/settings").add_query_param("done", "1").await.text();
    assert!(html.contains("Settings saved"));
}

#[tokio::test]
async fn test_pages_follow_requested_language() {
    let h = setup();

    let html = h
        .server
        .get("/settings/general")
        .add_query_param("lang", "de")
        .await
        .text();
    assert!(html.contains("<html lang=\"de\">"));
    assert!(html.contains("Speichern"));

    let html = h
        .server
        .get("/settings/snes")
        .add_header(
            HeaderName::from_static("accept-language"),
            HeaderValue::from_static("de-CH,de;q=0.9"),
        )
        .await
        .text();
    assert!(html.contains("Einstellungen für Super Nintendo"));
    // No German entry for this key
    assert!(html.contains("Core"));
}

#[tokio::test]
async fn test_save_general_settings() {
    let h = setup();

    let response = h
        .server
        .post("/settings/general")
        .form(&[
            ("_csrf", token("local").as_str()),
            ("language", "de"),
            ("netplay-enabled", "1"),
            ("auto-save-enabled", "1"),
            ("auto-save-interval", "5"),
            ("auto-save-capacity", "3"),
        ])
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "/settings/general?done=1");

    let settings = h.store.get("local").unwrap();
    assert_eq!(settings.language, "de");
    let defaults = &settings.default_game_settings;
    assert!(defaults.netplay_enabled);
    assert!(!defaults.netplay_require_login);
    assert!(defaults.auto_save_enabled);
    assert_eq!(defaults.auto_save_interval, 300);
    assert_eq!(defaults.auto_save_capacity, 3);
    assert!(!defaults.cue_enabled);

    let html = h.server.get("/settings/general?done=1").await.text();
    assert!(html.contains("value=\"5\""));
}

#[tokio::test]
async fn test_invalid_interval_is_rejected() {
    let h = setup();

    let response = h
        .server
        .post("/settings/general")
        .form(&[
            ("_csrf", token("local").as_str()),
            ("language", "de"),
            ("auto-save-interval", "five"),
            ("auto-save-capacity", "3"),
        ])
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("auto-save-interval"));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_missing_csrf_token_is_forbidden() {
    let h = setup();

    let response = h
        .server
        .post("/settings/general")
        .form(&[("auto-save-interval", "5"), ("auto-save-capacity", "3")])
        .expect_failure()
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Another user's token does not work either
    let response = h
        .server
        .post("/settings/general")
        .add_header(
            HeaderName::from_static(USER_HEADER),
            HeaderValue::from_static("alice"),
        )
        .form(&[
            ("_csrf", token("local").as_str()),
            ("auto-save-interval", "5"),
            ("auto-save-capacity", "3"),
        ])
        .expect_failure()
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_unknown_platform_renders_error_page() {
    let h = setup();

    let response = h.server.get("/settings/dreamcast").expect_failure().await;
    response.assert_status(StatusCode::NOT_FOUND);
    let html = response.text();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Platform not found: dreamcast"));

    let response = h
        .server
        .post("/settings/dreamcast")
        .form(&[("_csrf", token("local").as_str())])
        .expect_failure()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let h = setup();

    let response = h.server.get("/nowhere").expect_failure().await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("nowhere"));
}

#[tokio::test]
async fn test_unsupported_method_renders_error_page() {
    let h = setup();

    let response = h.server.put("/settings/general").expect_failure().await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.maybe_header("allow").is_some());

    let html = response.text();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Method Not Allowed"));
}

#[tokio::test]
async fn test_save_platform_falls_back_to_default_shader() {
    let h = setup();

    let response = h
        .server
        .post("/settings/snes")
        .add_header(
            HeaderName::from_static(USER_HEADER),
            HeaderValue::from_static("alice"),
        )
        .form(&[
            ("_csrf", token("alice").as_str()),
            ("core", "snes9x"),
            ("shader", "bogus"),
            ("volume", "0.8"),
            ("video-rotation", "7"),
            ("cache-limit", "1024"),
            ("fps", "1"),
            ("button-play-pause", "1"),
            ("control-keyboard-0-start", "Enter"),
            ("snes9x_region", "PAL"),
        ])
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "/settings?done=1");

    let settings = h.store.get("alice").unwrap();
    let snes = &settings.emulator_settings["snes"];
    assert_eq!(snes.shader, "disabled");
    assert_eq!(snes.core, "snes9x");
    assert_eq!(snes.volume, 0.8);
    assert_eq!(snes.video_rotation, 0);
    assert_eq!(snes.cache_limit, 1024);
    assert!(snes.fps);
    assert!(snes.buttons.play_pause);
    assert!(!snes.buttons.restart);
    assert_eq!(snes.controls[0].keyboard.get("start"), Some("Enter"));
    assert_eq!(snes.core_options.get("snes9x_region").map(String::as_str), Some("PAL"));

    // The default user is untouched
    assert!(h.store.get("local").unwrap().emulator_settings.is_empty());
}

#[tokio::test]
async fn test_restore_platform_defaults() {
    let h = setup();

    h.server
        .post("/settings/gba")
        .form(&[
            ("_csrf", token("local").as_str()),
            ("core", "mgba"),
            ("volume", "0.1"),
            ("fps", "1"),
        ])
        .await
        .assert_status(StatusCode::FOUND);
    assert!(h.store.get("local").unwrap().emulator_settings["gba"].fps);

    let html = h.server.get("/settings/gba/restore").await.text();
    assert!(html.contains("Restore the default settings for Game Boy Advance?"));

    let response = h
        .server
        .post("/settings/gba/restore")
        .form(&[("_csrf", token("local").as_str())])
        .await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "/settings/gba");

    let gba = h.store.get("local").unwrap().emulator_settings["gba"].clone();
    assert!(!gba.fps);
    assert_eq!(gba.volume, 0.5);
    assert_eq!(gba.bios, "gba_bios.bin");
}

#[tokio::test]
async fn test_saved_volume_is_shown_as_submitted() {
    let h = setup();

    h.server
        .post("/settings/snes")
        .form(&[
            ("_csrf", token("local").as_str()),
            ("core", "snes9x"),
            ("volume", "0.7"),
        ])
        .await
        .assert_status(StatusCode::FOUND);

    let html = h.server.get("/settings/snes").await.text();
    assert!(html.contains("name=\"volume\" value=\"0.7\""));
}
