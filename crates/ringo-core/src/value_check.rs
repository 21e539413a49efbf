//! Pre-save value checks
//!
//! Runs after form validation and before persisting. On create a failing
//! check aborts the save; on update it returns the subset of changes the
//! user may apply.

use ringo_types::auth::User;
use ringo_types::item::{Fields, Item};
use ringo_types::module::ModuleDef;

use crate::perm::{self, Access};
use crate::prelude::*;

const OWNERSHIP_FIELDS: &[&str] = &["uid", "gid"];

pub trait ValueChecker: Send + Sync {
	fn check_create(&self, module: &ModuleDef, user: &User, data: &Fields) -> RgResult<()>;

	/// Returns the permitted changes
	fn check_update(&self, module: &ModuleDef, user: &User, item: &Item, data: &Fields) -> RgResult<Fields>;
}

/// Only users with unrestricted access may set the ownership fields
#[derive(Debug, Default)]
pub struct OwnershipChecker;

impl ValueChecker for OwnershipChecker {
	fn check_create(&self, module: &ModuleDef, user: &User, data: &Fields) -> RgResult<()> {
		let sets_owner = OWNERSHIP_FIELDS.iter().any(|f| data.get(*f).is_some_and(|v| !v.is_null()));
		if sets_owner && perm::access(user, &module.name, "create") != Access::All {
			warn!(user = %user.login, module = %module.name, "ownership change on create denied");
			return Err(Error::PermissionDenied);
		}
		Ok(())
	}

	fn check_update(&self, module: &ModuleDef, user: &User, item: &Item, data: &Fields) -> RgResult<Fields> {
		let mut changes = item.diff(data);
		if perm::access(user, &module.name, "update") != Access::All {
			for field in OWNERSHIP_FIELDS {
				if changes.remove(*field).is_some() {
					warn!(user = %user.login, module = %module.name, id = %item.id, field, "ownership change dropped");
				}
			}
		}
		Ok(changes)
	}
}


// vim: ts=4
