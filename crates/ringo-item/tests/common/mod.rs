//! Shared helpers for the lifecycle handler integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use ringo_core::App;
use ringo_core::app::{AppBuilderOpts, AppState};
use ringo_core::form::{FieldType, FormDef, FormField, Rule};
use ringo_core::registry::Registry;
use ringo_core::session::MemorySessionStore;
use ringo_core::settings::SettingsRegistry;
use ringo_store_sqlite::ItemStoreSqlite;
use ringo_types::auth::User;
use ringo_types::item::{Fields, Item, Owner};
use ringo_types::module::{FieldKind, ModuleDef};
use ringo_types::prelude::*;
use ringo_types::session::SessionId;
use serde_json::Value;
use tempfile::TempDir;

pub fn todo_module() -> ModuleDef {
	ModuleDef::new(1, "todos", "Todo")
		.title_field("name")
		.field("name", "Name", FieldKind::Column)
		.field("done", "Done", FieldKind::Column)
}

pub fn todo_form() -> FormDef {
	FormDef::new()
		.field(FormField::new("name", FieldType::Text).required().rule(Rule::MaxLength(40)))
		.field(FormField::new("done", FieldType::Bool))
		.field(FormField::new("uid", FieldType::Integer))
		.field(FormField::new("gid", FieldType::Integer))
}

pub fn project_module() -> ModuleDef {
	ModuleDef::new(2, "projects", "Project")
		.title_field("name")
		.field("name", "Name", FieldKind::Column)
		.field("todos", "Todos", FieldKind::Relation { module: "todos".into() })
}

/// App with the todo and project modules plus whatever `configure` adds
pub async fn create_test_app(configure: impl FnOnce(&mut Registry)) -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = ItemStoreSqlite::new(temp_dir.path()).await.expect("Failed to create store");

	let mut registry = Registry::new();
	registry.register_module(todo_module()).expect("Failed to register module");
	registry.register_module(project_module()).expect("Failed to register module");
	registry.register_form("todos", todo_form());
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

/// User with `(module, action, admin)` permissions and an own default group
pub async fn create_user(app: &App, login: &str, perms: &[(&str, &str, bool)]) -> Arc<User> {
	let role = app.store.create_role(&format!("{}-role", login), false).await.unwrap();
	for (module, action, admin) in perms {
		let perm = app.store.create_permission(module, action, *admin).await.unwrap();
		app.store.add_role_permission(role, perm).await.unwrap();
	}
	let gid = app.store.create_usergroup(&format!("{}-group", login)).await.unwrap();
	let uid = app.store.create_user(login, Some(gid)).await.unwrap();
	app.store.add_user_role(uid, role).await.unwrap();
	app.store.add_user_group(uid, gid).await.unwrap();
	Arc::new(app.store.read_user(uid).await.unwrap())
}

/// Restricted create, read, update and delete on todos
pub async fn create_editor(app: &App, login: &str) -> Arc<User> {
	create_user(
		app,
		login,
		&[("todos", "create", false), ("todos", "read", false), ("todos", "update", false), ("todos", "delete", false)],
	)
	.await
}

pub async fn create_session(app: &App, user: &User) -> SessionId {
	app.sessions.create_session(user.id).await.unwrap()
}

pub fn fields(value: Value) -> Fields {
	value.as_object().cloned().unwrap_or_default()
}

pub async fn create_item(app: &App, module: &str, uid: UserId, data: Value) -> Item {
	app.store.create(module, Owner { uid, gid: None }, &fields(data)).await.unwrap()
}

pub async fn count(app: &App, module: &str) -> usize {
	app.store.list(module, &Default::default()).await.unwrap().1
}

// vim: ts=4
