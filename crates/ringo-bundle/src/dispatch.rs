//! Selection handling and handler dispatch

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::prelude::*;
use ringo_core::message::{self, EMPTY_SELECTION, FILTERED, NOT_APPLICABLE};
use ringo_core::perm;
use ringo_core::registry::{BundleContext, BundleResult};
use ringo_types::auth::User;
use ringo_types::module::ModuleDef;
use ringo_types::session::BundleSelection;

/// Submitted bundle form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleRequest {
	/// Starts a new selection; without it the remembered one is used
	pub bundle_action: Option<String>,
	#[serde(default)]
	pub id: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BundleOutcome {
	/// The handler ran on the permitted items, `filtered` were left out
	Handled { result: BundleResult, filtered: usize },
	EmptySelection,
	/// Every selected item failed the permission check
	NotApplicable { action: String, filtered: usize },
}

impl BundleOutcome {
	/// Notice shown to the user when no handler ran or items were filtered
	pub fn notice(&self) -> Option<String> {
		match self {
			BundleOutcome::Handled { filtered: 0, .. } => None,
			BundleOutcome::Handled { filtered, .. } => {
				let num = filtered.to_string();
				Some(message::render(FILTERED, &[("num", num.as_str())]))
			}
			BundleOutcome::EmptySelection => Some(EMPTY_SELECTION.to_string()),
			BundleOutcome::NotApplicable { action, filtered } => {
				let num = filtered.to_string();
				Some(message::render(NOT_APPLICABLE, &[("action", action.as_str()), ("num", num.as_str())]))
			}
		}
	}
}

/// Run a bundle action on the selection of the session.
///
/// A request with `bundle_action` replaces the remembered selection, the
/// selection outlives the dispatch until `clear_bundle` is called.
pub async fn bundle_dispatch(
	app: &App,
	module: &Arc<ModuleDef>,
	user: &Arc<User>,
	sid: &SessionId,
	request: &BundleRequest,
) -> RgResult<BundleOutcome> {
	let mut session = app.sessions.read_module(sid, &module.name).await?;
	let selection = if let Some(action) = &request.bundle_action {
		let selection = BundleSelection { action: action.clone(), ids: request.id.clone() };
		session.bundle = Some(selection.clone());
		app.sessions.write_module(sid, &module.name, &session).await?;
		selection
	} else {
		session.bundle.unwrap_or_default()
	};

	if selection.ids.is_empty() {
		debug!(module = %module.name, action = %selection.action, "empty bundle selection");
		return Ok(BundleOutcome::EmptySelection);
	}

	let mut items = Vec::with_capacity(selection.ids.len());
	for id in &selection.ids {
		let item = app.store.load(&module.name, *id).await?;
		if perm::has_permission(user, &module.name, &selection.action, &item) {
			items.push(item);
		} else {
			debug!(user = %user.login, module = %module.name, id = %id, action = %selection.action, "filtered from bundle");
		}
	}

	let filtered = selection.ids.len() - items.len();
	if items.is_empty() {
		warn!(user = %user.login, module = %module.name, action = %selection.action, filtered, "bundle not applicable");
		return Ok(BundleOutcome::NotApplicable { action: selection.action, filtered });
	}

	let handler = app.registry.resolve_bundle_handler(&module.name, &selection.action)?;
	let count = items.len();
	let ctx = BundleContext {
		user: user.clone(),
		sid: sid.clone(),
		module: module.clone(),
		action: selection.action.clone(),
		items,
	};
	let result = handler(app.clone(), ctx).await?;
	info!(
		user = %user.login,
		module = %module.name,
		action = %selection.action,
		count,
		filtered,
		"bundle action applied"
	);
	Ok(BundleOutcome::Handled { result, filtered })
}

/// Forget the remembered selection of a module
pub async fn clear_bundle(app: &App, sid: &SessionId, module: &str) -> RgResult<()> {
	let mut session = app.sessions.read_module(sid, module).await?;
	if session.bundle.take().is_some() {
		app.sessions.write_module(sid, module, &session).await?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_notice() {
		assert_eq!(BundleOutcome::Handled { result: BundleResult::default(), filtered: 0 }.notice(), None);
		let notice = BundleOutcome::Handled { result: BundleResult::default(), filtered: 2 }.notice();
		assert_eq!(notice.as_deref(), Some("2 items were filtered out."));
		assert_eq!(BundleOutcome::EmptySelection.notice().as_deref(), Some(EMPTY_SELECTION));

		let notice = BundleOutcome::NotApplicable { action: "archive".into(), filtered: 2 }.notice().unwrap();
		assert!(notice.contains("'archive'"));
		assert!(notice.contains("(2 items were filtered out.)"));
	}

	#[test]
	fn test_request_defaults() {
		let request: BundleRequest = serde_json::from_str(r#"{"bundle_action":"delete"}"#).unwrap();
		assert_eq!(request.bundle_action.as_deref(), Some("delete"));
		assert!(request.id.is_empty());

		let request: BundleRequest = serde_json::from_str(r#"{"id":[3,4]}"#).unwrap();
		assert_eq!(request.bundle_action, None);
		assert_eq!(request.id, vec![ItemId(3), ItemId(4)]);
	}
}

// vim: ts=4
