//! Item store trait
//!
//! The item store persists the items of every module together with the
//! users, groups, roles and permissions the permission filter works on.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::auth::User;
use crate::item::{Fields, Item, Owner};
use crate::list::ListQuery;
use crate::prelude::*;

#[async_trait]
pub trait ItemStore: Debug + Send + Sync {
	// Items
	//*******
	/// Creates and persists a new item owned by `owner`
	async fn create(&self, module: &str, owner: Owner, data: &Fields) -> RgResult<Item>;

	/// Loads an item, `Error::NotFound` if it does not exist
	async fn load(&self, module: &str, id: ItemId) -> RgResult<Item>;

	/// Applies `changes` to the item and persists it, returns the stored state
	async fn save(&self, item: &Item, changes: &Fields) -> RgResult<Item>;

	async fn delete(&self, item: &Item) -> RgResult<()>;

	/// Lists items of a module, returns the page and the total count
	async fn list(&self, module: &str, query: &ListQuery) -> RgResult<(Vec<Item>, usize)>;

	// Relations
	//***********
	async fn link(&self, parent: &Item, relation: &str, child: &Item) -> RgResult<()>;
	async fn list_links(&self, parent: &Item, relation: &str) -> RgResult<Vec<ItemId>>;

	// Users
	//*******
	async fn read_user(&self, uid: UserId) -> RgResult<User>;
	async fn read_user_by_login(&self, login: &str) -> RgResult<User>;
	/// Settings blob of a user, an empty object if nothing was stored yet
	async fn read_user_settings(&self, uid: UserId) -> RgResult<serde_json::Value>;
	async fn update_user_settings(&self, uid: UserId, settings: &serde_json::Value) -> RgResult<()>;

	// Bootstrap
	//***********
	async fn create_permission(&self, module: &str, action: &str, admin: bool) -> RgResult<PermissionId>;
	async fn create_role(&self, name: &str, admin: bool) -> RgResult<RoleId>;
	async fn add_role_permission(&self, role_id: RoleId, perm_id: PermissionId) -> RgResult<()>;
	async fn create_usergroup(&self, name: &str) -> RgResult<GroupId>;
	async fn add_group_role(&self, gid: GroupId, role_id: RoleId) -> RgResult<()>;
	async fn create_user(&self, login: &str, default_group: Option<GroupId>) -> RgResult<UserId>;
	async fn add_user_role(&self, uid: UserId, role_id: RoleId) -> RgResult<()>;
	async fn add_user_group(&self, uid: UserId, gid: GroupId) -> RgResult<()>;
}

// vim: ts=4
