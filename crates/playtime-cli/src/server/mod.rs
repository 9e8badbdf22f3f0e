// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP server for the settings pages.

mod error;
mod handlers;
mod http;
mod session;

pub use error::{AppError, HandlerFailure};
pub use http::{build_router, create_server, found, read_request, AppState};
pub use session::{csrf_token, Session, CSRF_FIELD, USER_HEADER};
