//! SQLite-backed item store for Ringo.
//!
//! Stores the items of every registered module, the users with their
//! groups, roles and permissions, relation links and per-user settings.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod item;
mod relation;
mod schema;
mod user;
mod utils;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use ringo_types::auth::User;
use ringo_types::item::{Fields, Item, Owner};
use ringo_types::item_store::ItemStore;
use ringo_types::list::ListQuery;
use ringo_types::prelude::*;

const DB_FILE: &str = "ringo.db";

#[derive(Debug)]
pub struct ItemStoreSqlite {
	db: SqlitePool,
}

impl ItemStoreSqlite {
	/// Open (or create) the database in the given directory
	pub async fn new(path: impl AsRef<Path>) -> RgResult<Self> {
		tokio::fs::create_dir_all(path.as_ref()).await?;
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref().join(DB_FILE))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		info!("Item store opened at {}", path.as_ref().display());
		Ok(Self { db })
	}
}

#[async_trait]
impl ItemStore for ItemStoreSqlite {
	// Items
	//*******
	async fn create(&self, module: &str, owner: Owner, data: &Fields) -> RgResult<Item> {
		item::create(&self.db, module, owner, data).await
	}

	async fn load(&self, module: &str, id: ItemId) -> RgResult<Item> {
		item::load(&self.db, module, id).await
	}

	async fn save(&self, item: &Item, changes: &Fields) -> RgResult<Item> {
		item::save(&self.db, item, changes).await
	}

	async fn delete(&self, item: &Item) -> RgResult<()> {
		item::delete(&self.db, item).await
	}

	async fn list(&self, module: &str, query: &ListQuery) -> RgResult<(Vec<Item>, usize)> {
		item::list(&self.db, module, query).await
	}

	// Relations
	//***********
	async fn link(&self, parent: &Item, relation: &str, child: &Item) -> RgResult<()> {
		relation::link(&self.db, parent, relation, child).await
	}

	async fn list_links(&self, parent: &Item, relation: &str) -> RgResult<Vec<ItemId>> {
		relation::list_links(&self.db, parent, relation).await
	}

	// Users
	//*******
	async fn read_user(&self, uid: UserId) -> RgResult<User> {
		user::read_user(&self.db, uid).await
	}

	async fn read_user_by_login(&self, login: &str) -> RgResult<User> {
		user::read_user_by_login(&self.db, login).await
	}

	async fn read_user_settings(&self, uid: UserId) -> RgResult<serde_json::Value> {
		user::read_settings(&self.db, uid).await
	}

	async fn update_user_settings(&self, uid: UserId, settings: &serde_json::Value) -> RgResult<()> {
		user::update_settings(&self.db, uid, settings).await
	}

	// Bootstrap
	//***********
	async fn create_permission(&self, module: &str, action: &str, admin: bool) -> RgResult<PermissionId> {
		user::create_permission(&self.db, module, action, admin).await
	}

	async fn create_role(&self, name: &str, admin: bool) -> RgResult<RoleId> {
		user::create_role(&self.db, name, admin).await
	}

	async fn add_role_permission(&self, role_id: RoleId, perm_id: PermissionId) -> RgResult<()> {
		user::link(
			&self.db,
			"INSERT OR IGNORE INTO role_permissions (role_id, perm_id) VALUES (?, ?)",
			role_id.0,
			perm_id.0,
		)
		.await
	}

	async fn create_usergroup(&self, name: &str) -> RgResult<GroupId> {
		user::create_usergroup(&self.db, name).await
	}

	async fn add_group_role(&self, gid: GroupId, role_id: RoleId) -> RgResult<()> {
		user::link(&self.db, "INSERT OR IGNORE INTO group_roles (gid, role_id) VALUES (?, ?)", gid.0, role_id.0).await
	}

	async fn create_user(&self, login: &str, default_group: Option<GroupId>) -> RgResult<UserId> {
		user::create_user(&self.db, login, default_group).await
	}

	async fn add_user_role(&self, uid: UserId, role_id: RoleId) -> RgResult<()> {
		user::link(&self.db, "INSERT OR IGNORE INTO user_roles (uid, role_id) VALUES (?, ?)", uid.0, role_id.0).await
	}

	async fn add_user_group(&self, uid: UserId, gid: GroupId) -> RgResult<()> {
		user::link(&self.db, "INSERT OR IGNORE INTO user_groups (uid, gid) VALUES (?, ?)", uid.0, gid.0).await
	}
}

// vim: ts=4
