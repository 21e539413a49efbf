//! Shared helpers for the list builder integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use ringo_core::app::{AppBuilderOpts, AppState};
use ringo_core::registry::Registry;
use ringo_core::session::MemorySessionStore;
use ringo_core::settings::SettingsRegistry;
use ringo_core::App;
use ringo_store_sqlite::ItemStoreSqlite;
use ringo_types::auth::User;
use ringo_types::item::{Fields, Item, Owner};
use ringo_types::module::{ColumnConfig, FieldKind, ModuleDef, TableConfig};
use ringo_types::prelude::*;
use ringo_types::session::SessionId;
use serde_json::{Value, json};
use tempfile::TempDir;

pub fn todo_module(table: TableConfig) -> ModuleDef {
	ModuleDef::new(1, "todos", "Todo")
		.title_field("name")
		.field("name", "Name", FieldKind::Column)
		.field("priority", "Priority", FieldKind::Column)
		.field(
			"shout",
			"Shout",
			FieldKind::Computed(Arc::new(|item: &Item| match item.get("name") {
				Value::String(name) => Value::String(name.to_uppercase()),
				_ => Value::Null,
			})),
		)
		.table(table)
}

pub fn columns() -> Vec<ColumnConfig> {
	vec![ColumnConfig::new("name", "Name"), ColumnConfig::new("priority", "Priority").searchable(false)]
}

pub async fn create_test_app(modules: Vec<ModuleDef>, settings: &[(&str, &str)]) -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = ItemStoreSqlite::new(temp_dir.path()).await.expect("Failed to create store");

	let mut registry = Registry::new();
	for module in modules {
		registry.register_module(module).expect("Failed to register module");
	}
	let mut settings_registry = SettingsRegistry::new();
	ringo_core::register_settings(&mut settings_registry).expect("Failed to register core settings");
	ringo_list::register_settings(&mut settings_registry).expect("Failed to register list settings");
	let configured: HashMap<String, String> =
		settings.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();

	let app = AppState::new(
		AppBuilderOpts::default(),
		Arc::new(store),
		Arc::new(MemorySessionStore::new()),
		registry,
		settings_registry,
		&configured,
	)
	.expect("Failed to create app");
	(app, temp_dir)
}

/// Create a user with one role holding the given `(module, action, admin)`
/// permissions, optionally as member of a group
pub async fn create_user(app: &App, login: &str, perms: &[(&str, &str, bool)], gid: Option<GroupId>) -> User {
	let role = app.store.create_role(&format!("{}-role", login), false).await.unwrap();
	for (module, action, admin) in perms {
		let perm = app.store.create_permission(module, action, *admin).await.unwrap();
		app.store.add_role_permission(role, perm).await.unwrap();
	}
	let uid = app.store.create_user(login, gid).await.unwrap();
	app.store.add_user_role(uid, role).await.unwrap();
	if let Some(gid) = gid {
		app.store.add_user_group(uid, gid).await.unwrap();
	}
	app.store.read_user(uid).await.unwrap()
}

pub async fn create_session(app: &App, user: &User) -> SessionId {
	app.sessions.create_session(user.id).await.unwrap()
}

pub async fn create_item(app: &App, owner: (i64, Option<i64>), data: Value) -> Item {
	let fields: Fields = data.as_object().cloned().unwrap_or_default();
	let owner = Owner { uid: UserId(owner.0), gid: owner.1.map(GroupId) };
	app.store.create("todos", owner, &fields).await.unwrap()
}

/// Items named `item-0` .. `item-{n-1}` with descending priority
pub async fn create_items(app: &App, uid: i64, n: usize) -> Vec<Item> {
	let mut items = Vec::with_capacity(n);
	for i in 0..n {
		items.push(create_item(app, (uid, None), json!({ "name": format!("item-{}", i), "priority": n - i })).await);
	}
	items
}

pub fn ids(items: &[Item]) -> Vec<ItemId> {
	items.iter().map(|item| item.id).collect()
}

// vim: ts=4
