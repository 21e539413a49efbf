//! Permission filter
//!
//! Decides per user, module and action whether the user may act on every
//! item (`Access::All`), only on owned items (`Access::OwnOrGroup`), or on
//! nothing. Any unrestricted grant wins, independent of the order roles and
//! permissions are stored in.

use ringo_types::auth::{ADMIN_ROLE, User};
use ringo_types::item::Item;
use ringo_types::list::Restriction;

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
	All,
	OwnOrGroup,
	None,
}

pub fn access(user: &User, module: &str, action: &str) -> Access {
	let mut access = Access::None;
	for role in user.effective_roles() {
		if role.name.as_ref() == ADMIN_ROLE {
			debug!(user = %user.login, module, action, "access granted by admin role");
			return Access::All;
		}
		for perm in &role.permissions {
			if perm.module.as_ref() != module || !perm.action.eq_ignore_ascii_case(action) {
				continue;
			}
			if perm.admin || role.admin {
				debug!(user = %user.login, module, action, role = %role.name, "unrestricted access");
				return Access::All;
			}
			access = Access::OwnOrGroup;
		}
	}
	debug!(user = %user.login, module, action, ?access, "access decision");
	access
}

/// Collection level check, e.g. for create
pub fn can(user: &User, module: &str, action: &str) -> bool {
	access(user, module, action) != Access::None
}

/// Whether the user owns the item directly or through one of their groups
pub fn is_owner(user: &User, item: &Item) -> bool {
	item.uid == Some(user.id) || item.gid.is_some_and(|gid| user.is_member(gid))
}

/// Per item check
pub fn has_permission(user: &User, module: &str, action: &str, item: &Item) -> bool {
	match access(user, module, action) {
		Access::All => true,
		Access::OwnOrGroup => is_owner(user, item),
		Access::None => false,
	}
}

/// Query restriction for restricted access, `None` for unrestricted
pub fn restriction(user: &User, access: Access) -> Option<Restriction> {
	match access {
		Access::OwnOrGroup => Some(Restriction { uid: user.id, gids: user.group_ids() }),
		Access::All | Access::None => None,
	}
}


// vim: ts=4
