//! List builder integration tests
//!
//! Permission filtering, search stack persistence, sorting paths,
//! pagination and saved searches against the SQLite store

mod common;

use common::*;
use ringo_list::{ListParams, list_build, rest_list, saved};
use ringo_types::list::{SearchTerm, SortOrder, Sorting};
use ringo_types::module::TableConfig;
use ringo_types::prelude::*;
use serde_json::json;

fn search(term: &str, field: Option<&str>) -> ListParams {
	ListParams {
		form: Some("search".into()),
		search: Some(term.into()),
		field: field.map(Into::into),
		..ListParams::default()
	}
}

fn sort(field: &str, order: &str) -> ListParams {
	ListParams { sort_field: Some(field.into()), sort_order: Some(order.into()), ..ListParams::default() }
}

fn paged_table() -> TableConfig {
	TableConfig { columns: columns(), paginated: true, advanced: Some(true), ..TableConfig::default() }
}

#[tokio::test]
async fn test_restricted_listing() {
	let (app, _temp) = create_test_app(vec![todo_module(TableConfig::default())], &[]).await;
	let staff = app.store.create_usergroup("staff").await.unwrap();
	let bob = create_user(&app, "bob", &[("todos", "read", false)], Some(staff)).await;
	let sid = create_session(&app, &bob).await;
	let module = app.module("todos").unwrap();

	let own = create_item(&app, (bob.id.0, None), json!({ "name": "own" })).await;
	let group = create_item(&app, (99, Some(staff.0)), json!({ "name": "group" })).await;
	create_item(&app, (99, None), json!({ "name": "foreign" })).await;
	create_item(&app, (99, Some(staff.0 + 1)), json!({ "name": "other group" })).await;

	let listing = list_build(&app, &module, &bob, &sid, &ListParams::default()).await.unwrap();
	assert_eq!(ids(&listing.items), vec![own.id, group.id]);
	assert_eq!(listing.total, 2);

	let rest = rest_list(&app, &module, &bob).await.unwrap();
	assert_eq!(ids(&rest), vec![own.id, group.id]);
}

#[tokio::test]
async fn test_unrestricted_and_no_access() {
	let (app, _temp) = create_test_app(vec![todo_module(TableConfig::default())], &[]).await;
	let manager = create_user(&app, "manager", &[("todos", "read", true)], None).await;
	let guest = create_user(&app, "guest", &[("tags", "read", true)], None).await;
	let module = app.module("todos").unwrap();
	create_items(&app, 99, 3).await;

	let sid = create_session(&app, &manager).await;
	let listing = list_build(&app, &module, &manager, &sid, &ListParams::default()).await.unwrap();
	assert_eq!(listing.total, 3);

	let sid = create_session(&app, &guest).await;
	let listing = list_build(&app, &module, &guest, &sid, &ListParams::default()).await.unwrap();
	assert!(listing.items.is_empty());
	assert_eq!(listing.total, 0);
	assert!(rest_list(&app, &module, &guest).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_optimized_and_fallback_agree() {
	let data = [
		json!({ "name": "pear", "priority": 2 }),
		json!({ "name": "Apple", "priority": 1 }),
		json!({ "priority": 3 }),
		json!({ "name": "apple", "priority": 2 }),
		json!({ "name": "pear", "priority": null }),
		json!({ "name": "fig", "priority": 2 }),
	];

	let mut results = Vec::new();
	for optimized in ["true", "false"] {
		let (app, _temp) = create_test_app(
			vec![todo_module(paged_table())],
			&[("feature.optimized_list_load", optimized)],
		)
		.await;
		let user = create_user(&app, "admin-user", &[("todos", "read", true)], None).await;
		let sid = create_session(&app, &user).await;
		let module = app.module("todos").unwrap();
		for value in &data {
			create_item(&app, (user.id.0, None), value.clone()).await;
		}

		let mut pages = Vec::new();
		for (field, order) in [("name", "asc"), ("name", "desc"), ("priority", "desc"), ("created_at", "asc")] {
			// offsets past i64::MAX and past usize::MAX are empty pages too
			for page in ["0", "1", "2", "4611686018427387904", "18446744073709551615"] {
				let params = ListParams {
					pagination_page: Some(page.into()),
					pagination_size: Some("2".into()),
					..sort(field, order)
				};
				let listing = list_build(&app, &module, &user, &sid, &params).await.unwrap();
				pages.push((ids(&listing.items), listing.total));
			}
		}
		results.push(pages);
	}

	assert_eq!(results[0], results[1]);
	// name asc: missing name, "Apple", "apple", "fig", "pear", "pear"
	assert_eq!(results[0][0], (vec![ItemId(3), ItemId(2)], 6));
	assert_eq!(results[0][2], (vec![ItemId(1), ItemId(5)], 6));
	assert_eq!(results[0][3], (vec![], 6));
	assert_eq!(results[0][4], (vec![], 6));
	// name desc keeps id order for the tied "pear" items
	assert_eq!(results[0][5], (vec![ItemId(1), ItemId(5)], 6));
}

#[tokio::test]
async fn test_computed_sort_uses_fallback() {
	let (app, _temp) = create_test_app(vec![todo_module(TableConfig::default())], &[]).await;
	let user = create_user(&app, "alice", &[("todos", "read", true)], None).await;
	let sid = create_session(&app, &user).await;
	let module = app.module("todos").unwrap();

	let b = create_item(&app, (user.id.0, None), json!({ "name": "b" })).await;
	let a = create_item(&app, (user.id.0, None), json!({ "name": "a" })).await;
	let c = create_item(&app, (user.id.0, None), json!({ "name": "c" })).await;

	let listing = list_build(&app, &module, &user, &sid, &sort("shout", "desc")).await.unwrap();
	assert_eq!(ids(&listing.items), vec![c.id, b.id, a.id]);
	assert_eq!(listing.sorting, Sorting::new("shout", SortOrder::Desc));

	// sorting is kept in the session
	let listing = list_build(&app, &module, &user, &sid, &ListParams::default()).await.unwrap();
	assert_eq!(ids(&listing.items), vec![c.id, b.id, a.id]);
}

#[tokio::test]
async fn test_search_stack_persists_only_on_results() {
	let (app, _temp) = create_test_app(
		vec![todo_module(TableConfig { columns: columns(), ..TableConfig::default() })],
		&[],
	)
	.await;
	let user = create_user(&app, "alice", &[("todos", "read", false)], None).await;
	let sid = create_session(&app, &user).await;
	let module = app.module("todos").unwrap();
	let items = create_items(&app, user.id.0, 12).await;

	let listing = list_build(&app, &module, &user, &sid, &search("ITEM-1", None)).await.unwrap();
	// item-1, item-10, item-11
	assert_eq!(ids(&listing.items), vec![items[1].id, items[10].id, items[11].id]);
	let state = app.sessions.read_module(&sid, "todos").await.unwrap();
	assert_eq!(state.list.search, vec![SearchTerm::new("ITEM-1", None, false)]);

	// pushing the same term again is a no-op
	let listing = list_build(&app, &module, &user, &sid, &search("ITEM-1", None)).await.unwrap();
	assert_eq!(listing.search.len(), 1);

	// no result: the stack of the request narrows to nothing, session keeps the old stack
	let listing = list_build(&app, &module, &user, &sid, &search("zzz", None)).await.unwrap();
	assert!(listing.items.is_empty());
	assert_eq!(listing.search.len(), 2);
	let state = app.sessions.read_module(&sid, "todos").await.unwrap();
	assert_eq!(state.list.search.len(), 1);

	// a field restricts the match to that field, searchable or not
	let listing = list_build(&app, &module, &user, &sid, &search("11", Some("priority"))).await.unwrap();
	assert_eq!(ids(&listing.items), vec![items[1].id]);

	// empty term pops the latest entry
	let listing = list_build(&app, &module, &user, &sid, &search("", None)).await.unwrap();
	assert_eq!(listing.search, vec![SearchTerm::new("ITEM-1", None, false)]);
	assert_eq!(listing.total, 3);

	let reset = ListParams { reset: Some("1".into()), ..ListParams::default() };
	let listing = list_build(&app, &module, &user, &sid, &reset).await.unwrap();
	assert!(listing.search.is_empty());
	assert_eq!(listing.total, 12);
}

#[tokio::test]
async fn test_regex_search() {
	let (app, _temp) = create_test_app(
		vec![todo_module(TableConfig { columns: columns(), ..TableConfig::default() })],
		&[],
	)
	.await;
	let user = create_user(&app, "alice", &[("todos", "read", false)], None).await;
	let sid = create_session(&app, &user).await;
	let module = app.module("todos").unwrap();
	let items = create_items(&app, user.id.0, 5).await;

	let enable = ListParams { enableregexpr: Some("1".into()), ..ListParams::default() };
	let listing = list_build(&app, &module, &user, &sid, &enable).await.unwrap();
	assert!(listing.regexpr);

	let listing = list_build(&app, &module, &user, &sid, &search("^item-[13]$", Some("name"))).await.unwrap();
	assert_eq!(ids(&listing.items), vec![items[1].id, items[3].id]);
	assert!(listing.search[0].regex);

	// regex terms are case-sensitive
	let listing = list_build(&app, &module, &user, &sid, &search("ITEM", None)).await.unwrap();
	assert!(listing.items.is_empty());
}

#[tokio::test]
async fn test_pagination() {
	let (app, _temp) = create_test_app(vec![todo_module(paged_table())], &[("list.default_page_size", "2")]).await;
	let user = create_user(&app, "alice", &[("todos", "read", false)], None).await;
	let sid = create_session(&app, &user).await;
	let module = app.module("todos").unwrap();
	let items = create_items(&app, user.id.0, 5).await;

	let listing = list_build(&app, &module, &user, &sid, &ListParams::default()).await.unwrap();
	assert_eq!(ids(&listing.items), vec![items[0].id, items[1].id]);
	assert_eq!((listing.page, listing.size, listing.total), (0, Some(2), 5));

	let params = ListParams { pagination_page: Some("2".into()), ..ListParams::default() };
	let listing = list_build(&app, &module, &user, &sid, &params).await.unwrap();
	assert_eq!(ids(&listing.items), vec![items[4].id]);

	// page is remembered
	let listing = list_build(&app, &module, &user, &sid, &ListParams::default()).await.unwrap();
	assert_eq!(listing.page, 2);

	let params = ListParams { pagination_size: Some(String::new()), ..ListParams::default() };
	let listing = list_build(&app, &module, &user, &sid, &params).await.unwrap();
	assert_eq!(listing.size, None);

	let params = ListParams { pagination_page: Some("x".into()), ..ListParams::default() };
	assert!(matches!(list_build(&app, &module, &user, &sid, &params).await, Err(Error::Parse)));
}

#[tokio::test]
async fn test_saved_search_round_trip() {
	let (app, _temp) = create_test_app(
		vec![todo_module(TableConfig { columns: columns(), ..TableConfig::default() })],
		&[],
	)
	.await;
	let user = create_user(&app, "alice", &[("todos", "read", false)], None).await;
	let sid = create_session(&app, &user).await;
	let module = app.module("todos").unwrap();
	create_items(&app, user.id.0, 12).await;

	list_build(&app, &module, &user, &sid, &sort("priority", "asc")).await.unwrap();
	list_build(&app, &module, &user, &sid, &search("item-1", None)).await.unwrap();

	let save = ListParams { form: Some("search".into()), save: Some("Ones".into()), ..ListParams::default() };
	list_build(&app, &module, &user, &sid, &save).await.unwrap();
	// same display name is not saved twice
	list_build(&app, &module, &user, &sid, &save).await.unwrap();

	let searches = saved::list(app.store.as_ref(), user.id, "todos").await.unwrap();
	assert_eq!(searches.len(), 1);
	let (key, entry) = searches.iter().next().unwrap();
	assert_eq!(entry.name, "Ones");
	assert_eq!(entry.search, vec![SearchTerm::new("item-1", None, false)]);
	assert_eq!(entry.sorting, Sorting::new("priority", SortOrder::Asc));

	// start over, then apply the saved search
	let reset = ListParams { reset: Some("1".into()), ..ListParams::default() };
	list_build(&app, &module, &user, &sid, &reset).await.unwrap();
	let apply = ListParams { form: Some("search".into()), saved: Some(key.clone()), ..ListParams::default() };
	let listing = list_build(&app, &module, &user, &sid, &apply).await.unwrap();
	assert_eq!(listing.search, entry.search);
	assert_eq!(listing.sorting, entry.sorting);
	assert_eq!(listing.total, 3);

	// selection applies to that request only
	let state = app.sessions.read_module(&sid, "todos").await.unwrap();
	assert!(state.list.search.is_empty());
	assert_eq!(state.list.sort, Some(Sorting::default()));

	let delete = ListParams { form: Some("search".into()), delete: Some(key.clone()), ..ListParams::default() };
	list_build(&app, &module, &user, &sid, &delete).await.unwrap();
	assert!(saved::list(app.store.as_ref(), user.id, "todos").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_discards_backurl() {
	let (app, _temp) = create_test_app(vec![todo_module(TableConfig::default())], &[]).await;
	let user = create_user(&app, "alice", &[("todos", "read", false)], None).await;
	let sid = create_session(&app, &user).await;
	let module = app.module("todos").unwrap();

	let mut state = app.sessions.read_module(&sid, "todos").await.unwrap();
	state.backurl = Some("/tags/update/3".into());
	app.sessions.write_module(&sid, "todos", &state).await.unwrap();

	list_build(&app, &module, &user, &sid, &ListParams::default()).await.unwrap();
	let state = app.sessions.read_module(&sid, "todos").await.unwrap();
	assert_eq!(state.backurl, None);
}

// vim: ts=4
