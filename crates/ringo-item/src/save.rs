//! Create and update of items
//!
//! A save runs through validation, the module's value check, persistence,
//! the lifecycle callbacks of the module, the pending relation link and the
//! caller's post-save callbacks. Validation failures and errors after
//! validation are reported through flash messages and the returned
//! `SaveResult`, storage is untouched on validation failure.

use serde::Serialize;
use std::sync::Arc;

use crate::prelude::*;
use ringo_core::form::{Validation, passthrough};
use ringo_core::message::{
	self, SAVE_ERROR_CREATE, SAVE_ERROR_UPDATE, SAVE_SUCCESS_CREATE, SAVE_SUCCESS_UPDATE, VALIDATION_ERROR_CREATE,
	VALIDATION_ERROR_UPDATE,
};
use ringo_core::perm;
use ringo_core::registry::{Event, EventContext, PostSaveCallback};
use ringo_types::auth::User;
use ringo_types::item::{Fields, Item, Owner};
use ringo_types::module::ModuleDef;
use ringo_types::session::Flash;

#[derive(Debug, Clone, Copy)]
pub enum SaveTarget<'a> {
	Create,
	Update(&'a Item),
}

impl SaveTarget<'_> {
	pub fn event(&self) -> Event {
		match self {
			SaveTarget::Create => Event::Create,
			SaveTarget::Update(_) => Event::Update,
		}
	}
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SaveResult {
	Saved(Item),
	ValidationFailed(Validation),
	Failed { error: String },
}

/// Validate and persist submitted form data.
///
/// Returns `Err` only if the user may not create or update at all; every
/// later failure ends up in the `SaveResult`.
pub async fn handle_save(
	app: &App,
	module: &Arc<ModuleDef>,
	user: &Arc<User>,
	sid: &SessionId,
	target: SaveTarget<'_>,
	input: &Fields,
	callbacks: &[PostSaveCallback],
) -> RgResult<SaveResult> {
	let permitted = match target {
		SaveTarget::Create => perm::can(user, &module.name, "create"),
		SaveTarget::Update(item) => perm::has_permission(user, &module.name, "update", item),
	};
	if !permitted {
		warn!(user = %user.login, module = %module.name, event = target.event().as_str(), "save denied");
		return Err(Error::PermissionDenied);
	}

	let validation = match app.registry.form(&module.name) {
		Some(form) => form.validate(input),
		None => passthrough(input),
	};

	if !validation.is_valid() {
		let text = match target {
			SaveTarget::Create => message::render(VALIDATION_ERROR_CREATE, &[("item_type", module.label.as_ref())]),
			SaveTarget::Update(item) => {
				let title = module.title(item);
				message::render(VALIDATION_ERROR_UPDATE, &[("item_type", module.label.as_ref()), ("item", title.as_str())])
			}
		};
		debug!(module = %module.name, errors = ?validation.errors, "validation failed");
		app.sessions.flash(sid, Flash::error(text)).await?;
		return Ok(SaveResult::ValidationFailed(validation));
	}

	let res = persist(app, module, user, sid, target, &validation.data, callbacks).await;
	// a failed save may still have written parts
	app.cache.invalidate();

	match res {
		Ok(item) => {
			let (text, verb) = match target {
				SaveTarget::Create => {
					(message::render(SAVE_SUCCESS_CREATE, &[("item_type", module.label.as_ref())]), "created")
				}
				SaveTarget::Update(_) => {
					let title = module.title(&item);
					let params = [("item_type", module.label.as_ref()), ("item", title.as_str())];
					(message::render(SAVE_SUCCESS_UPDATE, &params), "edited")
				}
			};
			app.sessions.flash(sid, Flash::success(text)).await?;
			info!("User {} {} {} {}", user.login, verb, module.label, item.id);
			Ok(SaveResult::Saved(item))
		}
		Err(err) => {
			let error = err.to_string();
			error!(user = %user.login, module = %module.name, event = target.event().as_str(), "save failed: {}", error);
			let text = match target {
				SaveTarget::Create => message::render(
					SAVE_ERROR_CREATE,
					&[("item_type", module.label.as_ref()), ("error", error.as_str())],
				),
				SaveTarget::Update(item) => {
					let title = module.title(item);
					message::render(
						SAVE_ERROR_UPDATE,
						&[("item_type", module.label.as_ref()), ("item", title.as_str()), ("error", error.as_str())],
					)
				}
			};
			app.sessions.flash(sid, Flash::error(text)).await?;
			Ok(SaveResult::Failed { error })
		}
	}
}

async fn persist(
	app: &App,
	module: &Arc<ModuleDef>,
	user: &Arc<User>,
	sid: &SessionId,
	target: SaveTarget<'_>,
	data: &Fields,
	callbacks: &[PostSaveCallback],
) -> RgResult<Item> {
	let checker = app.registry.value_checker_for(&module.name);
	let event = target.event();

	let item = match target {
		SaveTarget::Create => {
			checker.check_create(module, user, data)?;
			let owner = Owner { uid: user.id, gid: user.default_group };
			app.store.create(&module.name, owner, data).await?
		}
		SaveTarget::Update(item) => {
			let changes = checker.check_update(module, user, item, data)?;
			if changes.is_empty() {
				debug!(module = %module.name, id = %item.id, "nothing changed");
				item.clone()
			} else {
				app.store.save(item, &changes).await?
			}
		}
	};

	for handler in app.registry.event_handlers(&module.name, event) {
		let ctx = EventContext { event, user: user.clone(), item: item.clone() };
		handler(app.clone(), ctx).await?;
	}

	link_relation(app, module, sid, &item).await?;

	if callbacks.is_empty() {
		return Ok(item);
	}
	let stored = item.clone();
	let mut item = item;
	for callback in callbacks {
		item = callback(app.clone(), user.clone(), item).await?;
	}
	let changes = stored.diff(&item.fields);
	if changes.is_empty() {
		return Ok(item);
	}
	debug!(module = %module.name, id = %item.id, fields = changes.len(), "saving callback changes");
	app.store.save(&stored, &changes).await
}

/// Apply the pending `relation:module:id` link of the session to a saved item
async fn link_relation(app: &App, module: &ModuleDef, sid: &SessionId, item: &Item) -> RgResult<()> {
	let mut session = app.sessions.read_module(sid, &module.name).await?;
	let Some(addrelation) = session.addrelation.take() else {
		return Ok(());
	};

	let mut parts = addrelation.splitn(3, ':');
	match (parts.next(), parts.next(), parts.next().map(str::parse::<ItemId>)) {
		(Some(relation), Some(parent_module), Some(Ok(parent_id))) if !relation.is_empty() => {
			let parent = app.store.load(parent_module, parent_id).await?;
			app.store.link(&parent, relation, item).await?;
			debug!("Linked new {} {} to {} {} as {}", module.name, item.id, parent_module, parent_id, relation);
		}
		_ => warn!("Dropping malformed addrelation {:?}", addrelation),
	}

	app.sessions.write_module(sid, &module.name, &session).await
}

/// Where to go after a successful save.
///
/// A stashed backurl is consumed first, otherwise the update view if the
/// user may update the item, else the read view.
pub async fn save_redirect(
	app: &App,
	module: &ModuleDef,
	user: &User,
	sid: &SessionId,
	item: &Item,
) -> RgResult<String> {
	let mut session = app.sessions.read_module(sid, &module.name).await?;
	if let Some(backurl) = session.backurl.take() {
		app.sessions.write_module(sid, &module.name, &session).await?;
		return Ok(backurl);
	}

	let url = if perm::has_permission(user, &module.name, "update", item) {
		module.url("update", Some(item.id))
	} else {
		None
	};
	Ok(url
		.or_else(|| module.url("read", Some(item.id)))
		.unwrap_or_else(|| format!("/{}/list", module.name)))
}


// vim: ts=4
