//! Shared helpers for the app level integration tests

#![allow(dead_code)]

use axum::{
	Router,
	body::{Body, to_bytes},
	http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use ringo::bootstrap::USER_GROUP;
use ringo::{App, AppBuilder};
use ringo_store_sqlite::ItemStoreSqlite;
use ringo_types::module::{FieldKind, ModuleDef};
use ringo_types::session::SessionId;

pub fn todo_module() -> ModuleDef {
	ModuleDef::new(1, "todos", "Todo").title_field("name").field("name", "Name", FieldKind::Column)
}

/// Read-only module without create, update and delete
pub fn note_module() -> ModuleDef {
	ModuleDef::new(2, "notes", "Note").title_field("title").actions(&["list", "read"])
}

pub async fn create_test_app() -> (App, TempDir) {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = ItemStoreSqlite::new(temp_dir.path()).await.expect("Failed to create store");

	let mut builder = AppBuilder::new();
	builder.store(Arc::new(store)).module(todo_module()).module(note_module());
	let app = builder.build().await.expect("Failed to build app");
	(app, temp_dir)
}

/// Session of a new member of the "users" group
pub async fn user_session(app: &App, login: &str) -> SessionId {
	let admin = app.store.read_user_by_login(&app.opts.admin_login).await.expect("No administrator");
	let users = admin
		.groups
		.iter()
		.find(|group| group.name.as_ref() == USER_GROUP)
		.map(|group| group.id)
		.expect("No users group");
	let uid = app.store.create_user(login, Some(users)).await.expect("Failed to create user");
	app.store.add_user_group(uid, users).await.expect("Failed to join group");
	app.sessions.create_session(uid).await.expect("Failed to create session")
}

/// Session of a user without roles or groups
pub async fn outsider_session(app: &App, login: &str) -> SessionId {
	let uid = app.store.create_user(login, None).await.expect("Failed to create user");
	app.sessions.create_session(uid).await.expect("Failed to create session")
}

pub async fn admin_session(app: &App) -> SessionId {
	let admin = app.store.read_user_by_login(&app.opts.admin_login).await.expect("No administrator");
	app.sessions.create_session(admin.id).await.expect("Failed to create session")
}

pub async fn request(
	router: &Router,
	method: Method,
	uri: &str,
	sid: Option<&SessionId>,
	body: Option<Value>,
) -> (StatusCode, Value) {
	let mut req = Request::builder().method(method).uri(uri);
	if let Some(sid) = sid {
		req = req.header(header::AUTHORIZATION, format!("Bearer {}", sid));
	}
	let req = match body {
		Some(body) => req
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.expect("Failed to build request"),
		None => req.body(Body::empty()).expect("Failed to build request"),
	};

	let res = router.clone().oneshot(req).await.expect("Request failed");
	let status = res.status();
	let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("Failed to read body");
	let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("Invalid JSON") };
	(status, body)
}

// vim: ts=4
