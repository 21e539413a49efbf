//! Shared helpers for the bundle dispatcher integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use ringo_core::App;
use ringo_core::app::{AppBuilderOpts, AppState};
use ringo_core::registry::Registry;
use ringo_core::session::MemorySessionStore;
use ringo_core::settings::SettingsRegistry;
use ringo_store_sqlite::ItemStoreSqlite;
use ringo_types::auth::User;
use ringo_types::item::{Fields, Item, Owner};
use ringo_types::module::{FieldKind, ModuleDef};
use ringo_types::prelude::*;
use ringo_types::session::SessionId;
use serde_json::json;
use tempfile::TempDir;

pub fn todo_module() -> ModuleDef {
	ModuleDef::new(1, "todos", "Todo").title_field("name").field("name", "Name", FieldKind::Column)
}

/// App with the todo module, the default bundle handlers and whatever
/// `configure` adds to the registry
pub async fn create_test_app(configure: impl FnOnce(&mut Registry)) -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = ItemStoreSqlite::new(temp_dir.path()).await.expect("Failed to create store");

	let mut registry = Registry::new();
	registry.register_module(todo_module()).expect("Failed to register module");
	ringo_bundle::register(&mut registry);
	configure(&mut registry);

	let mut settings_registry = SettingsRegistry::new();
	ringo_core::register_settings(&mut settings_registry).expect("Failed to register settings");

	let app = AppState::new(
		AppBuilderOpts::default(),
		Arc::new(store),
		Arc::new(MemorySessionStore::new()),
		registry,
		settings_registry,
		&HashMap::new(),
	)
	.expect("Failed to create app");
	(app, temp_dir)
}

/// User with restricted `todos` permissions for the given actions
pub async fn create_user(app: &App, login: &str, actions: &[&str]) -> Arc<User> {
	let role = app.store.create_role(&format!("{}-role", login), false).await.unwrap();
	for action in actions {
		let perm = app.store.create_permission("todos", action, false).await.unwrap();
		app.store.add_role_permission(role, perm).await.unwrap();
	}
	let uid = app.store.create_user(login, None).await.unwrap();
	app.store.add_user_role(uid, role).await.unwrap();
	Arc::new(app.store.read_user(uid).await.unwrap())
}

pub async fn create_session(app: &App, user: &User) -> SessionId {
	app.sessions.create_session(user.id).await.unwrap()
}

pub async fn create_item(app: &App, uid: UserId, name: &str) -> Item {
	let fields: Fields = json!({ "name": name }).as_object().cloned().unwrap_or_default();
	app.store.create("todos", Owner { uid, gid: None }, &fields).await.unwrap()
}

// vim: ts=4
