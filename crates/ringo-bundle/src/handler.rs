//! Bundle handler

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};

use crate::dispatch::{BundleOutcome, BundleRequest, bundle_dispatch};
use crate::prelude::*;
use ringo_core::extract::Auth;
use ringo_types::session::Flash;
use ringo_types::types::ApiResponse;

/// POST /{module}/bundle
pub async fn post_bundle(
	State(app): State<App>,
	Auth(ctx): Auth,
	Path(module): Path<String>,
	Json(request): Json<BundleRequest>,
) -> RgResult<(StatusCode, Json<ApiResponse<BundleOutcome>>)> {
	let module = app.module(&module)?;
	if !module.has_action("list") {
		return Err(Error::NotFound);
	}

	let outcome = bundle_dispatch(&app, &module, &ctx.user, &ctx.sid, &request).await?;

	let mut flash = app.sessions.pop_flashes(&ctx.sid).await?;
	if let Some(notice) = outcome.notice() {
		flash.push(Flash::info(notice));
	}
	let redirect = match &outcome {
		BundleOutcome::Handled { result, .. } => result.redirect.clone(),
		_ => None,
	}
	.or_else(|| module.url("list", None));

	let mut res = ApiResponse::new(outcome).with_flash(flash);
	if let Some(redirect) = redirect {
		res = res.with_redirect(redirect);
	}
	Ok((StatusCode::OK, Json(res)))
}

// vim: ts=4
