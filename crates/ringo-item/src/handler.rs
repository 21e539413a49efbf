//! Create, read, update and delete handlers

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::delete::{DeleteResult, handle_delete};
use crate::load::load_item;
use crate::params::{FormParams, ItemParams, handle_params};
use crate::prelude::*;
use crate::save::{SaveResult, SaveTarget, handle_save, save_redirect};
use ringo_core::extract::Auth;
use ringo_core::perm;
use ringo_types::item::{Fields, Item};
use ringo_types::module::ModuleDef;
use ringo_types::types::ApiResponse;

/// Module with the action enabled, `Error::NotFound` otherwise
fn module_action(app: &App, module: &str, action: &str) -> RgResult<Arc<ModuleDef>> {
	let module = app.module(module)?;
	if !module.has_action(action) {
		return Err(Error::NotFound);
	}
	Ok(module)
}

async fn save_response(
	app: &App,
	auth: &Auth,
	module: &ModuleDef,
	res: SaveResult,
	created: bool,
) -> RgResult<(StatusCode, Json<ApiResponse<SaveResult>>)> {
	let (status, redirect) = match &res {
		SaveResult::Saved(item) => {
			let redirect = save_redirect(app, module, &auth.0.user, &auth.0.sid, item).await?;
			(if created { StatusCode::CREATED } else { StatusCode::OK }, Some(redirect))
		}
		SaveResult::ValidationFailed(_) => (StatusCode::UNPROCESSABLE_ENTITY, None),
		SaveResult::Failed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, None),
	};
	let flash = app.sessions.pop_flashes(&auth.0.sid).await?;
	let mut response = ApiResponse::new(res).with_flash(flash);
	if let Some(redirect) = redirect {
		response = response.with_redirect(redirect);
	}
	Ok((status, Json(response)))
}

/// GET /{module}/create
pub async fn get_create(
	State(app): State<App>,
	Auth(ctx): Auth,
	Path(module): Path<String>,
	Query(params): Query<ItemParams>,
) -> RgResult<(StatusCode, Json<ApiResponse<FormParams>>)> {
	let module = module_action(&app, &module, "create")?;
	if !perm::can(&ctx.user, &module.name, "create") {
		return Err(Error::PermissionDenied);
	}
	let form = handle_params(&app, &module, &ctx.sid, &params).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(form))))
}

/// POST /{module}/create
pub async fn post_create(
	State(app): State<App>,
	auth: Auth,
	Path(module): Path<String>,
	Json(input): Json<Fields>,
) -> RgResult<(StatusCode, Json<ApiResponse<SaveResult>>)> {
	let module = module_action(&app, &module, "create")?;
	let res = handle_save(&app, &module, &auth.0.user, &auth.0.sid, SaveTarget::Create, &input, &[]).await?;
	save_response(&app, &auth, &module, res, true).await
}

/// GET /{module}/read/{id}
pub async fn get_read(
	State(app): State<App>,
	Auth(ctx): Auth,
	Path((module, id)): Path<(String, ItemId)>,
) -> RgResult<(StatusCode, Json<ApiResponse<Item>>)> {
	let module = module_action(&app, &module, "read")?;
	let item = load_item(&app, &module.name, id).await?;
	if !perm::has_permission(&ctx.user, &module.name, "read", &item) {
		warn!(user = %ctx.user.login, module = %module.name, id = %id, "read denied");
		return Err(Error::PermissionDenied);
	}
	Ok((StatusCode::OK, Json(ApiResponse::new(item))))
}

/// POST /{module}/update/{id}
pub async fn post_update(
	State(app): State<App>,
	auth: Auth,
	Path((module, id)): Path<(String, ItemId)>,
	Json(input): Json<Fields>,
) -> RgResult<(StatusCode, Json<ApiResponse<SaveResult>>)> {
	let module = module_action(&app, &module, "update")?;
	let item = load_item(&app, &module.name, id).await?;
	let res =
		handle_save(&app, &module, &auth.0.user, &auth.0.sid, SaveTarget::Update(&item), &input, &[]).await?;
	save_response(&app, &auth, &module, res, false).await
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
	pub confirmed: Option<String>,
}

/// POST /{module}/delete/{id}?confirmed=1
pub async fn post_delete(
	State(app): State<App>,
	Auth(ctx): Auth,
	Path((module, id)): Path<(String, ItemId)>,
	Query(params): Query<DeleteParams>,
) -> RgResult<(StatusCode, Json<ApiResponse<DeleteResult>>)> {
	let module = module_action(&app, &module, "delete")?;
	let item = load_item(&app, &module.name, id).await?;
	let confirmed = params.confirmed.as_deref() == Some("1");
	let res = handle_delete(&app, &module, &ctx.user, &ctx.sid, &item, confirmed).await?;

	let redirect = match &res {
		DeleteResult::Deleted { redirect, .. } => Some(redirect.clone()),
		DeleteResult::NeedsConfirmation(_) => None,
	};
	let flash = app.sessions.pop_flashes(&ctx.sid).await?;
	let mut response = ApiResponse::new(res).with_flash(flash);
	if let Some(redirect) = redirect {
		response = response.with_redirect(redirect);
	}
	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
