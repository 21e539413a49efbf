//! Common types used throughout Ringo.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

use crate::session::Flash;

macro_rules! id_type {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub i64);

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl std::str::FromStr for $name {
			type Err = crate::error::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.trim().parse::<i64>().map($name).map_err(|_| crate::error::Error::Parse)
			}
		}
	};
}

id_type!(
	/// Identifier of a persisted item, unique within its module
	ItemId
);
id_type!(UserId);
id_type!(GroupId);
id_type!(RoleId);
id_type!(PermissionId);

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs() as i64)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// ApiResponse //
//*************//
/// JSON envelope returned by every handler
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub flash: Vec<Flash>,
	pub redirect: Option<String>,
	pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, flash: Vec::new(), redirect: None, total: None }
	}

	pub fn with_flash(mut self, flash: Vec<Flash>) -> Self {
		self.flash = flash;
		self
	}

	pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
		self.redirect = Some(redirect.into());
		self
	}

	pub fn with_total(mut self, total: usize) -> Self {
		self.total = Some(total);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_id_parse() {
		assert_eq!(" 42".parse::<ItemId>().ok(), Some(ItemId(42)));
		assert!("abc".parse::<ItemId>().is_err());
	}

	#[test]
	fn test_api_response_skips_empty() {
		let res = serde_json::to_value(ApiResponse::new(1)).unwrap();
		assert_eq!(res, serde_json::json!({ "data": 1 }));
	}
}

// vim: ts=4
