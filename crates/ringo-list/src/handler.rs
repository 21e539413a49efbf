//! List and REST handlers

use axum::{
	Form, Json,
	extract::{Path, Query, State},
	http::StatusCode,
};

use crate::build::{Listing, list_build, rest_list};
use crate::params::ListParams;
use crate::prelude::*;
use ringo_core::extract::Auth;
use ringo_types::item::Item;
use ringo_types::types::ApiResponse;

async fn list(app: &App, auth: &Auth, module: &str, params: &ListParams) -> RgResult<ApiResponse<Listing>> {
	let module = app.module(module)?;
	if !module.has_action("list") {
		return Err(Error::NotFound);
	}
	let listing = list_build(app, &module, &auth.0.user, &auth.0.sid, params).await?;
	let flash = app.sessions.pop_flashes(&auth.0.sid).await?;
	let total = listing.total;
	Ok(ApiResponse::new(listing).with_total(total).with_flash(flash))
}

/// GET /{module}/list
pub async fn get_list(
	State(app): State<App>,
	auth: Auth,
	Path(module): Path<String>,
	Query(params): Query<ListParams>,
) -> RgResult<(StatusCode, Json<ApiResponse<Listing>>)> {
	let res = list(&app, &auth, &module, &params).await?;
	Ok((StatusCode::OK, Json(res)))
}

/// POST /{module}/list, submitted by the search form
pub async fn post_list(
	State(app): State<App>,
	auth: Auth,
	Path(module): Path<String>,
	Form(params): Form<ListParams>,
) -> RgResult<(StatusCode, Json<ApiResponse<Listing>>)> {
	let res = list(&app, &auth, &module, &params).await?;
	Ok((StatusCode::OK, Json(res)))
}

/// GET /rest/{module}
pub async fn get_rest_list(
	State(app): State<App>,
	Auth(ctx): Auth,
	Path(module): Path<String>,
) -> RgResult<(StatusCode, Json<ApiResponse<Vec<Item>>>)> {
	let module = app.module(&module)?;
	let items = rest_list(&app, &module, &ctx.user).await?;
	let total = items.len();
	Ok((StatusCode::OK, Json(ApiResponse::new(items).with_total(total))))
}

// vim: ts=4
