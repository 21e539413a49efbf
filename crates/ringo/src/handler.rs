//! Handlers not owned by a feature crate

use axum::{Json, extract::State, http::StatusCode};

use crate::prelude::*;
use ringo_core::extract::Auth;
use ringo_types::session::Flash;
use ringo_types::types::ApiResponse;

/// GET /flash
pub async fn get_flash(
	State(app): State<App>,
	Auth(ctx): Auth,
) -> RgResult<(StatusCode, Json<ApiResponse<Vec<Flash>>>)> {
	let flash = app.sessions.pop_flashes(&ctx.sid).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(flash))))
}

// vim: ts=4
