//! Listing assembly

use serde::Serialize;

use crate::paginate::{handle_paginating, slice};
use crate::params::ListParams;
use crate::prelude::*;
use crate::saved::{self, SavedSearch};
use crate::search::{SearchFilter, get_search};
use crate::settings::{ADVANCED_OVERVIEWS, DEFAULT_PAGE_SIZE, OPTIMIZED_LIST_LOAD};
use crate::sort::{handle_sorting, sort_items};
use ringo_core::perm::{self, Access};
use ringo_types::auth::User;
use ringo_types::item::Item;
use ringo_types::list::{ListQuery, SearchTerm, Sorting};
use ringo_types::module::ModuleDef;
use ringo_types::session::Pagination;

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
	pub items: Vec<Item>,
	/// Number of matching items on all pages
	pub total: usize,
	pub page: usize,
	pub size: Option<usize>,
	pub search: Vec<SearchTerm>,
	pub regexpr: bool,
	pub sorting: Sorting,
}

async fn load_saved(app: &App, user: &User, module: &ModuleDef, params: &ListParams) -> RgResult<Option<SavedSearch>> {
	let Some(key) = params.saved_key() else { return Ok(None) };
	let saved = saved::load(app.store.as_ref(), user.id, &module.name, key).await?;
	if saved.is_none() {
		debug!("Unknown saved search {} for {}", key, module.name);
	}
	Ok(saved)
}

/// Load the permitted items of a page.
///
/// The store does the work when no search is active and the sort field is
/// a plain column, otherwise every permitted item is loaded and filtered,
/// sorted and sliced here.
async fn load_items(
	app: &App,
	module: &ModuleDef,
	user: &User,
	search: &[SearchTerm],
	sorting: &Sorting,
	pagination: Pagination,
) -> RgResult<(Vec<Item>, usize)> {
	let access = perm::access(user, &module.name, "read");
	if access == Access::None {
		debug!(user = %user.login, module = %module.name, "no read access, empty listing");
		return Ok((Vec::new(), 0));
	}
	let restrict = perm::restriction(user, access);

	let optimized = app.settings.get_bool(OPTIMIZED_LIST_LOAD)?;
	if optimized && search.is_empty() && module.is_column(&sorting.field) {
		let query = ListQuery {
			restrict,
			sort: Some(sorting.clone()),
			slice: pagination.slice(),
		};
		return app.store.list(&module.name, &query).await;
	}

	let (items, _) = app.store.list(&module.name, &ListQuery { restrict, sort: None, slice: None }).await?;
	let filter = SearchFilter::new(module, search);
	let items: Vec<Item> =
		if filter.is_empty() { items } else { items.into_iter().filter(|item| filter.matches(item)).collect() };
	let items = sort_items(module, items, sorting);
	let total = items.len();
	Ok((slice(items, pagination), total))
}

/// Build the listing of a module for a list request
pub async fn list_build(
	app: &App,
	module: &ModuleDef,
	user: &User,
	sid: &SessionId,
	params: &ListParams,
) -> RgResult<Listing> {
	let mut session = app.sessions.read_module(sid, &module.name).await?;
	// entering the overview leaves any context a stashed backurl belongs to
	if session.backurl.take().is_some() {
		debug!("Discarding backurl of {}", module.name);
	}

	let saved = load_saved(app, user, module, params).await?;
	let search = get_search(&module.table, &mut session.list, params, saved.as_ref());
	let sorting = handle_sorting(&module.table, &mut session.list, params, saved.as_ref());

	let advanced_default = app.settings.get_bool(ADVANCED_OVERVIEWS)?;
	let default_size = usize::try_from(app.settings.get_int(DEFAULT_PAGE_SIZE)?)
		.map_err(|_| Error::ConfigError(format!("{} out of range", DEFAULT_PAGE_SIZE)))?;
	let pagination = handle_paginating(&module.table, &mut session.list, params, advanced_default, default_size)?;

	let (items, total) = load_items(app, module, user, &search, &sorting, pagination).await?;

	if !items.is_empty() {
		let saved_selected = params.is_search_form() && saved.is_some();
		if !saved_selected {
			session.list.search.clone_from(&search);
		}
		if params.is_search_form() {
			if let Some(name) = params.save.as_deref() {
				saved::save(app.store.as_ref(), user.id, &module.name, name, &search, &sorting).await?;
			} else if let Some(key) = params.delete.as_deref() {
				saved::delete(app.store.as_ref(), user.id, &module.name, key).await?;
			}
		}
	}
	app.sessions.write_module(sid, &module.name, &session).await?;

	debug!(
		user = %user.login,
		module = %module.name,
		total,
		page = pagination.page,
		search = search.len(),
		"listing built"
	);
	Ok(Listing {
		items,
		total,
		page: pagination.page,
		size: pagination.size,
		search,
		regexpr: session.list.regexpr,
		sorting,
	})
}

/// Every permitted item of a module, unsorted and unpaged
pub async fn rest_list(app: &App, module: &ModuleDef, user: &User) -> RgResult<Vec<Item>> {
	let access = perm::access(user, &module.name, "read");
	if access == Access::None {
		return Ok(Vec::new());
	}
	let query = ListQuery { restrict: perm::restriction(user, access), sort: None, slice: None };
	let (items, _) = app.store.list(&module.name, &query).await?;
	Ok(items)
}

// vim: ts=4
