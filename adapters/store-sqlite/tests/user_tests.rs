//! User, role and permission tests

use ringo_store_sqlite::ItemStoreSqlite;
use ringo_types::item_store::ItemStore;
use ringo_types::prelude::*;
use serde_json::json;
use tempfile::TempDir;

async fn create_test_adapter() -> (ItemStoreSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = ItemStoreSqlite::new(temp_dir.path()).await.expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_read_user_with_roles_and_groups() {
	let (adapter, _temp) = create_test_adapter().await;

	let read = adapter.create_permission("todos", "read", false).await.unwrap();
	let update = adapter.create_permission("todos", "update", true).await.unwrap();
	let user_role = adapter.create_role("user", false).await.unwrap();
	let editor_role = adapter.create_role("editor", false).await.unwrap();
	adapter.add_role_permission(user_role, read).await.unwrap();
	adapter.add_role_permission(editor_role, update).await.unwrap();
	// duplicate links are ignored
	adapter.add_role_permission(user_role, read).await.unwrap();

	let staff = adapter.create_usergroup("staff").await.unwrap();
	adapter.add_group_role(staff, editor_role).await.unwrap();

	let uid = adapter.create_user("alice", Some(staff)).await.unwrap();
	adapter.add_user_role(uid, user_role).await.unwrap();
	adapter.add_user_group(uid, staff).await.unwrap();

	let user = adapter.read_user(uid).await.unwrap();
	assert_eq!(user.login.as_ref(), "alice");
	assert_eq!(user.default_group, Some(staff));
	assert_eq!(user.roles.len(), 1);
	assert_eq!(user.roles[0].permissions.len(), 1);
	assert_eq!(user.roles[0].permissions[0].action.as_ref(), "read");
	assert_eq!(user.groups.len(), 1);
	assert_eq!(user.groups[0].roles[0].name.as_ref(), "editor");
	assert!(user.groups[0].roles[0].permissions[0].admin);

	let by_login = adapter.read_user_by_login("alice").await.unwrap();
	assert_eq!(by_login, user);
}

#[tokio::test]
async fn test_unknown_user() {
	let (adapter, _temp) = create_test_adapter().await;

	assert!(matches!(adapter.read_user(UserId(42)).await, Err(Error::NotFound)));
	assert!(matches!(adapter.read_user_by_login("nobody").await, Err(Error::NotFound)));
	assert!(matches!(adapter.read_user_settings(UserId(42)).await, Err(Error::NotFound)));
	assert!(matches!(adapter.update_user_settings(UserId(42), &json!({})).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_duplicate_login_fails() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.create_user("bob", None).await.unwrap();
	assert!(adapter.create_user("bob", None).await.is_err());
}

#[tokio::test]
async fn test_user_settings() {
	let (adapter, _temp) = create_test_adapter().await;
	let uid = adapter.create_user("carol", None).await.unwrap();

	assert_eq!(adapter.read_user_settings(uid).await.unwrap(), json!({}));

	let settings = json!({ "searches": { "todos": { "a1": { "name": "open", "search": [], "sorting": { "field": "id", "order": "asc" } } } } });
	adapter.update_user_settings(uid, &settings).await.unwrap();
	assert_eq!(adapter.read_user_settings(uid).await.unwrap(), settings);
}

#[tokio::test]
async fn test_reopen_keeps_data() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let uid = {
		let adapter = ItemStoreSqlite::new(temp_dir.path()).await.unwrap();
		adapter.create_user("dave", None).await.unwrap()
	};

	let adapter = ItemStoreSqlite::new(temp_dir.path()).await.unwrap();
	assert_eq!(adapter.read_user(uid).await.unwrap().login.as_ref(), "dave");
}

// vim: ts=4
