//! Users, groups, roles and permissions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::prelude::*;

/// Name of the role which grants unrestricted access to every module
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
	pub id: PermissionId,
	pub module: Box<str>,
	pub action: Box<str>,
	/// Grants access to every item, not only owned ones
	pub admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
	pub id: RoleId,
	pub name: Box<str>,
	pub admin: bool,
	pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usergroup {
	pub id: GroupId,
	pub name: Box<str>,
	pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub login: Box<str>,
	pub default_group: Option<GroupId>,
	pub roles: Vec<Role>,
	pub groups: Vec<Usergroup>,
}

impl User {
	/// Direct roles followed by the roles of every group, deduplicated by
	/// name. The first occurrence of a name wins.
	pub fn effective_roles(&self) -> Vec<&Role> {
		let mut seen = HashSet::new();
		self.roles
			.iter()
			.chain(self.groups.iter().flat_map(|group| group.roles.iter()))
			.filter(|role| seen.insert(role.name.as_ref()))
			.collect()
	}

	pub fn group_ids(&self) -> Vec<GroupId> {
		self.groups.iter().map(|group| group.id).collect()
	}

	pub fn is_member(&self, gid: GroupId) -> bool {
		self.groups.iter().any(|group| group.id == gid)
	}
}


// vim: ts=4
