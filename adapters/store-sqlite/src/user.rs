//! Users, groups, roles and permissions

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::{collect_res, inspect, map_res};
use ringo_types::auth::{Permission, Role, User, Usergroup};
use ringo_types::prelude::*;

fn read_permission(row: &SqliteRow) -> Result<Permission, sqlx::Error> {
	Ok(Permission {
		id: PermissionId(row.try_get("perm_id")?),
		module: row.try_get::<String, _>("module")?.into(),
		action: row.try_get::<String, _>("action")?.into(),
		admin: row.try_get("admin")?,
	})
}

async fn read_permissions(db: &SqlitePool, role_id: i64) -> RgResult<Vec<Permission>> {
	let rows = sqlx::query(
		"SELECT p.perm_id, p.module, p.action, p.admin FROM permissions p
		JOIN role_permissions rp ON rp.perm_id = p.perm_id
		WHERE rp.role_id = ? ORDER BY p.perm_id",
	)
	.bind(role_id)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	collect_res(rows.iter().map(read_permission))
}

/// Roles with their permissions; `sql` selects role_id, name, admin for one bound id
async fn read_roles(db: &SqlitePool, sql: &str, id: i64) -> RgResult<Vec<Role>> {
	let rows = sqlx::query(sql).bind(id).fetch_all(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	let heads = collect_res(rows.iter().map(|row| -> Result<(i64, String, bool), sqlx::Error> {
		Ok((row.try_get("role_id")?, row.try_get("name")?, row.try_get("admin")?))
	}))?;

	let mut roles = Vec::with_capacity(heads.len());
	for (role_id, name, admin) in heads {
		roles.push(Role {
			id: RoleId(role_id),
			name: name.into(),
			admin,
			permissions: read_permissions(db, role_id).await?,
		});
	}
	Ok(roles)
}

pub(crate) async fn read_user(db: &SqlitePool, uid: UserId) -> RgResult<User> {
	let res = sqlx::query("SELECT uid, login, default_gid FROM users WHERE uid = ?").bind(uid.0).fetch_one(db).await;
	let (login, default_gid) = map_res(res, |row| -> Result<(String, Option<i64>), sqlx::Error> {
		Ok((row.try_get("login")?, row.try_get("default_gid")?))
	})?;

	let roles = read_roles(
		db,
		"SELECT r.role_id, r.name, r.admin FROM roles r
		JOIN user_roles ur ON ur.role_id = r.role_id
		WHERE ur.uid = ? ORDER BY r.role_id",
		uid.0,
	)
	.await?;

	let rows = sqlx::query(
		"SELECT g.gid, g.name FROM usergroups g
		JOIN user_groups ug ON ug.gid = g.gid
		WHERE ug.uid = ? ORDER BY g.gid",
	)
	.bind(uid.0)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	let group_heads = collect_res(rows.iter().map(|row| -> Result<(i64, String), sqlx::Error> {
		Ok((row.try_get("gid")?, row.try_get("name")?))
	}))?;

	let mut groups = Vec::with_capacity(group_heads.len());
	for (gid, name) in group_heads {
		let roles = read_roles(
			db,
			"SELECT r.role_id, r.name, r.admin FROM roles r
			JOIN group_roles gr ON gr.role_id = r.role_id
			WHERE gr.gid = ? ORDER BY r.role_id",
			gid,
		)
		.await?;
		groups.push(Usergroup { id: GroupId(gid), name: name.into(), roles });
	}

	Ok(User { id: uid, login: login.into(), default_group: default_gid.map(GroupId), roles, groups })
}

pub(crate) async fn read_user_by_login(db: &SqlitePool, login: &str) -> RgResult<User> {
	let res = sqlx::query("SELECT uid FROM users WHERE login = ?").bind(login).fetch_one(db).await;
	let uid = map_res(res, |row| row.try_get(0))?;
	read_user(db, UserId(uid)).await
}

pub(crate) async fn read_settings(db: &SqlitePool, uid: UserId) -> RgResult<serde_json::Value> {
	let res = sqlx::query("SELECT settings FROM users WHERE uid = ?").bind(uid.0).fetch_one(db).await;
	let settings: String = map_res(res, |row| row.try_get(0))?;
	serde_json::from_str(&settings).inspect_err(|err| warn!("Invalid settings of user {}: {}", uid, err)).map_err(|_| Error::DbError)
}

pub(crate) async fn update_settings(db: &SqlitePool, uid: UserId, settings: &serde_json::Value) -> RgResult<()> {
	let res = sqlx::query("UPDATE users SET settings = ? WHERE uid = ?")
		.bind(settings.to_string())
		.bind(uid.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// Bootstrap
//***********
pub(crate) async fn create_permission(db: &SqlitePool, module: &str, action: &str, admin: bool) -> RgResult<PermissionId> {
	let res = sqlx::query("INSERT INTO permissions (module, action, admin) VALUES (?, ?, ?) RETURNING perm_id")
		.bind(module)
		.bind(action)
		.bind(admin)
		.fetch_one(db)
		.await;
	Ok(PermissionId(map_res(res, |row| row.try_get(0))?))
}

pub(crate) async fn create_role(db: &SqlitePool, name: &str, admin: bool) -> RgResult<RoleId> {
	let res = sqlx::query("INSERT INTO roles (name, admin) VALUES (?, ?) RETURNING role_id")
		.bind(name)
		.bind(admin)
		.fetch_one(db)
		.await;
	Ok(RoleId(map_res(res, |row| row.try_get(0))?))
}

pub(crate) async fn create_usergroup(db: &SqlitePool, name: &str) -> RgResult<GroupId> {
	let res = sqlx::query("INSERT INTO usergroups (name) VALUES (?) RETURNING gid").bind(name).fetch_one(db).await;
	Ok(GroupId(map_res(res, |row| row.try_get(0))?))
}

pub(crate) async fn create_user(db: &SqlitePool, login: &str, default_group: Option<GroupId>) -> RgResult<UserId> {
	let res = sqlx::query("INSERT INTO users (login, default_gid) VALUES (?, ?) RETURNING uid")
		.bind(login)
		.bind(default_group.map(|gid| gid.0))
		.fetch_one(db)
		.await;
	Ok(UserId(map_res(res, |row| row.try_get(0))?))
}

/// Insert into one of the n:m tables, existing links are kept
pub(crate) async fn link(db: &SqlitePool, sql: &str, a: i64, b: i64) -> RgResult<()> {
	sqlx::query(sql).bind(a).bind(b).execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(())
}

// vim: ts=4
