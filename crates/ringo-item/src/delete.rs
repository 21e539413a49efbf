//! Deletion of a single item

use serde::Serialize;
use std::sync::Arc;

use crate::prelude::*;
use ringo_core::message::{self, DELETE_SUCCESS};
use ringo_core::perm;
use ringo_core::registry::{Event, EventContext};
use ringo_types::auth::User;
use ringo_types::item::Item;
use ringo_types::module::ModuleDef;
use ringo_types::session::Flash;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DeleteResult {
	/// Asks the user to confirm before anything is deleted
	NeedsConfirmation(Item),
	Deleted { id: ItemId, redirect: String },
}

pub async fn handle_delete(
	app: &App,
	module: &Arc<ModuleDef>,
	user: &Arc<User>,
	sid: &SessionId,
	item: &Item,
	confirmed: bool,
) -> RgResult<DeleteResult> {
	if !perm::has_permission(user, &module.name, "delete", item) {
		warn!(user = %user.login, module = %module.name, id = %item.id, "delete denied");
		return Err(Error::PermissionDenied);
	}
	if !confirmed {
		return Ok(DeleteResult::NeedsConfirmation(item.clone()));
	}

	app.store.delete(item).await?;
	for handler in app.registry.event_handlers(&module.name, Event::Delete) {
		let ctx = EventContext { event: Event::Delete, user: user.clone(), item: item.clone() };
		handler(app.clone(), ctx).await?;
	}
	app.cache.invalidate();

	let title = module.title(item);
	let text = message::render(DELETE_SUCCESS, &[("item_type", module.label.as_ref()), ("item", title.as_str())]);
	app.sessions.flash(sid, Flash::success(text)).await?;
	info!("User {} deleted {} {}", user.login, module.label, item.id);

	let mut session = app.sessions.read_module(sid, &module.name).await?;
	let redirect = match session.backurl.take() {
		Some(backurl) => {
			app.sessions.write_module(sid, &module.name, &session).await?;
			backurl
		}
		None => module.url("list", None).unwrap_or_else(|| "/".into()),
	};
	Ok(DeleteResult::Deleted { id: item.id, redirect })
}

// vim: ts=4
