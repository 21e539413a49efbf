//! Session state and the session store trait
//!
//! Every session keeps one `ModuleSession` per module, holding the list
//! state, the remembered bundle selection and stashed request parameters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::list::{SearchTerm, Sorting};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Box<str>);

impl std::fmt::Display for SessionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	pub page: usize,
	/// `None` means no limit
	pub size: Option<usize>,
}

impl Pagination {
	/// `(offset, limit)` of the page. An offset beyond `usize` saturates,
	/// such a page is always empty.
	pub fn slice(&self) -> Option<(usize, usize)> {
		self.size.map(|size| (self.page.checked_mul(size).unwrap_or(usize::MAX), size))
	}
}

/// Persisted search, sort and paging state of a list view
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListState {
	#[serde(default)]
	pub search: Vec<SearchTerm>,
	#[serde(default)]
	pub regexpr: bool,
	pub sort: Option<Sorting>,
	pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSelection {
	pub action: String,
	pub ids: Vec<ItemId>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSession {
	#[serde(default)]
	pub list: ListState,
	pub bundle: Option<BundleSelection>,
	/// Url to return to after the next successful save
	pub backurl: Option<String>,
	/// Pending relation link: `relation:module:id`
	pub addrelation: Option<String>,
	/// Alternative form configuration
	pub form: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
	Success,
	Error,
	Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
	pub level: FlashLevel,
	pub text: String,
}

impl Flash {
	pub fn success(text: impl Into<String>) -> Self {
		Self { level: FlashLevel::Success, text: text.into() }
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self { level: FlashLevel::Error, text: text.into() }
	}

	pub fn info(text: impl Into<String>) -> Self {
		Self { level: FlashLevel::Info, text: text.into() }
	}
}

#[async_trait]
pub trait SessionStore: Debug + Send + Sync {
	async fn create_session(&self, uid: UserId) -> RgResult<SessionId>;
	/// User the session belongs to, `Error::PermissionDenied` for unknown sessions
	async fn read_session_user(&self, sid: &SessionId) -> RgResult<UserId>;
	async fn delete_session(&self, sid: &SessionId) -> RgResult<()>;

	/// State of a module, the default state if nothing was stored yet
	async fn read_module(&self, sid: &SessionId, module: &str) -> RgResult<ModuleSession>;
	async fn write_module(&self, sid: &SessionId, module: &str, state: &ModuleSession) -> RgResult<()>;
	async fn delete_module(&self, sid: &SessionId, module: &str) -> RgResult<()>;

	async fn flash(&self, sid: &SessionId, flash: Flash) -> RgResult<()>;
	/// Returns and clears the queued flash messages
	async fn pop_flashes(&self, sid: &SessionId) -> RgResult<Vec<Flash>>;
}

// vim: ts=4
