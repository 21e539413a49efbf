//! Database schema initialization
//!
//! Creates the tables and indexes if they do not exist yet.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Items
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS items (
		id integer NOT NULL,
		module text NOT NULL,
		uid integer,
		gid integer,
		data json NOT NULL DEFAULT '{}',
		created_at integer NOT NULL DEFAULT (unixepoch()),
		updated_at integer NOT NULL DEFAULT (unixepoch()),
		PRIMARY KEY(id AUTOINCREMENT)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_module ON items(module, id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_owner ON items(module, uid, gid)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS relations (
		parent_id integer NOT NULL,
		relation text NOT NULL,
		child_id integer NOT NULL,
		PRIMARY KEY(parent_id, relation, child_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Users and groups
	//******************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		uid integer NOT NULL,
		login text NOT NULL,
		default_gid integer,
		settings json NOT NULL DEFAULT '{}',
		created_at integer NOT NULL DEFAULT (unixepoch()),
		PRIMARY KEY(uid AUTOINCREMENT),
		UNIQUE(login)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS usergroups (
		gid integer NOT NULL,
		name text NOT NULL,
		PRIMARY KEY(gid AUTOINCREMENT),
		UNIQUE(name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_groups (
		uid integer NOT NULL,
		gid integer NOT NULL,
		PRIMARY KEY(uid, gid)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Roles and permissions
	//***********************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS roles (
		role_id integer NOT NULL,
		name text NOT NULL,
		admin boolean NOT NULL DEFAULT 0,
		PRIMARY KEY(role_id AUTOINCREMENT),
		UNIQUE(name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permissions (
		perm_id integer NOT NULL,
		module text NOT NULL,
		action text NOT NULL,
		admin boolean NOT NULL DEFAULT 0,
		PRIMARY KEY(perm_id AUTOINCREMENT)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS role_permissions (
		role_id integer NOT NULL,
		perm_id integer NOT NULL,
		PRIMARY KEY(role_id, perm_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_roles (
		uid integer NOT NULL,
		role_id integer NOT NULL,
		PRIMARY KEY(uid, role_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS group_roles (
		gid integer NOT NULL,
		role_id integer NOT NULL,
		PRIMARY KEY(gid, role_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
