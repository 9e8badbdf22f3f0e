// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request identity and CSRF protection.
//!
//! Authentication happens upstream: a proxy sets `x-playtime-user` on every
//! request. Without that header the configured default user is assumed.

use std::collections::HashMap;

use playtime::PlaytimeRequest;
use sha2::{Digest, Sha256};

use super::error::AppError;
use crate::config::ServerConfig;

/// Header carrying the authenticated user id.
pub const USER_HEADER: &str = "x-playtime-user";

/// Form field carrying the CSRF token.
pub const CSRF_FIELD: &str = "_csrf";

/// The user behind a request and the token their forms must echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// User id.
    pub user: String,
    /// Token expected in the `_csrf` field of submissions.
    pub csrf_token: String,
}

impl Session {
    /// Resolves the session of a request.
    pub fn from_request(request: &PlaytimeRequest, config: &ServerConfig) -> Self {
        let user = request
            .header(USER_HEADER)
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .unwrap_or(&config.default_user)
            .to_string();

        Self {
            csrf_token: csrf_token(&config.csrf_secret, &user),
            user,
        }
    }

    /// Checks the `_csrf` field of a submission.
    pub fn verify(&self, fields: &HashMap<String, String>) -> Result<(), AppError> {
        match fields.get(CSRF_FIELD) {
            Some(token) if *token == self.csrf_token => Ok(()),
            _ => Err(AppError::Csrf),
        }
    }
}

/// Hex SHA-256 of `secret:user`.
pub fn csrf_token(secret: &str, user: &str) -> String {
    format!("{:x}", Sha256::digest(format!("{}:{}", secret, user).as_bytes()))
}
