//! First start setup of roles, groups and the administrator

use crate::prelude::*;
use ringo_types::auth::ADMIN_ROLE;

/// Role granted restricted access to every registered module
pub const USER_ROLE: &str = "user";
pub const ADMIN_GROUP: &str = "admins";
pub const USER_GROUP: &str = "users";

const ACTIONS: [&str; 4] = ["read", "create", "update", "delete"];

/// Create the default roles, groups and the administrator unless the
/// administrator already exists
pub async fn bootstrap(app: &App) -> RgResult<()> {
	let login: &str = &app.opts.admin_login;
	match app.store.read_user_by_login(login).await {
		Ok(user) => {
			debug!("Administrator {} exists, skipping bootstrap", user.login);
			return Ok(());
		}
		Err(Error::NotFound) => {}
		Err(err) => return Err(err),
	}
	info!("Bootstrapping roles, groups and administrator {}", login);

	let admin_role = app.store.create_role(ADMIN_ROLE, true).await?;
	let user_role = app.store.create_role(USER_ROLE, false).await?;

	let mut modules: Vec<_> = app.registry.modules().collect();
	modules.sort_by_key(|module| module.id);
	for module in modules {
		for action in ACTIONS {
			let perm_id = app.store.create_permission(&module.name, action, false).await?;
			app.store.add_role_permission(user_role, perm_id).await?;
		}
		debug!("Granted {} {:?} to role {}", module.name, ACTIONS, USER_ROLE);
	}

	let admins = app.store.create_usergroup(ADMIN_GROUP).await?;
	app.store.add_group_role(admins, admin_role).await?;
	let users = app.store.create_usergroup(USER_GROUP).await?;
	app.store.add_group_role(users, user_role).await?;

	let uid = app.store.create_user(login, Some(admins)).await?;
	app.store.add_user_group(uid, admins).await?;
	app.store.add_user_group(uid, users).await?;
	app.store.add_user_role(uid, admin_role).await?;
	info!("Created administrator {} ({})", login, uid);

	Ok(())
}

// vim: ts=4
