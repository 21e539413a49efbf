use axum::{
	Router, middleware,
	routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::prelude::*;
use ringo_core::middleware::require_auth;

pub fn init(app: App) -> Router {
	let protected_router = Router::new()
		.route("/flash", get(handler::get_flash))
		.route("/rest/{module}", get(ringo_list::handler::get_rest_list))
		.route("/{module}/list", get(ringo_list::handler::get_list).post(ringo_list::handler::post_list))
		.route("/{module}/bundle", post(ringo_bundle::handler::post_bundle))
		.route("/{module}/create", get(ringo_item::handler::get_create).post(ringo_item::handler::post_create))
		.route("/{module}/read/{id}", get(ringo_item::handler::get_read))
		.route("/{module}/update/{id}", post(ringo_item::handler::post_update))
		.route("/{module}/delete/{id}", post(ringo_item::handler::post_delete))
		.layer(middleware::from_fn_with_state(app.clone(), require_auth));

	Router::new().merge(protected_router).layer(TraceLayer::new_for_http()).with_state(app)
}

// vim: ts=4
