//! Pagination of listings

use crate::params::ListParams;
use crate::prelude::*;
use ringo_types::module::TableConfig;
use ringo_types::session::{ListState, Pagination};

/// Resolve page and page size of a list request.
///
/// Only paginated tables shown as advanced overview are paged; every other
/// listing shows all items on page 0 and keeps no paging state.
pub fn handle_paginating(
	table: &TableConfig,
	state: &mut ListState,
	params: &ListParams,
	advanced_default: bool,
	default_size: usize,
) -> RgResult<Pagination> {
	if !(table.paginated && table.is_advanced(advanced_default)) {
		return Ok(Pagination { page: 0, size: None });
	}

	let default = Pagination { page: 0, size: Some(default_size) };
	let mut pagination = match (state.pagination, params.is_reset()) {
		(Some(pagination), false) => pagination,
		_ => default,
	};

	if let Some(page) = params.pagination_page.as_deref() {
		pagination.page = page.trim().parse().map_err(|_| {
			debug!("Invalid pagination_page {:?}", page);
			Error::Parse
		})?;
	}
	if let Some(size) = params.pagination_size.as_deref() {
		pagination.size = match size.trim() {
			"" => None,
			size => Some(size.parse().map_err(|_| {
				debug!("Invalid pagination_size {:?}", size);
				Error::Parse
			})?),
		};
	}

	state.pagination = Some(if params.is_reset() { default } else { pagination });
	Ok(pagination)
}

/// Slice one page out of a full listing
pub fn slice<T>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
	match pagination.slice() {
		Some((offset, limit)) => items.into_iter().skip(offset).take(limit).collect(),
		None => items,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn paged() -> TableConfig {
		TableConfig { paginated: true, advanced: Some(true), ..TableConfig::default() }
	}

	fn params(page: Option<&str>, size: Option<&str>, reset: bool) -> ListParams {
		ListParams {
			pagination_page: page.map(ToOwned::to_owned),
			pagination_size: size.map(ToOwned::to_owned),
			reset: reset.then(String::new),
			..ListParams::default()
		}
	}

	#[test]
	fn test_not_paginated() {
		let mut state = ListState::default();
		let table = TableConfig { paginated: true, ..TableConfig::default() };
		let res = handle_paginating(&table, &mut state, &params(Some("3"), None, false), false, 50).unwrap();
		assert_eq!(res, Pagination { page: 0, size: None });
		assert_eq!(state.pagination, None);

		// the global setting turns it on
		let res = handle_paginating(&table, &mut state, &params(None, None, false), true, 50).unwrap();
		assert_eq!(res, Pagination { page: 0, size: Some(50) });
	}

	#[test]
	fn test_overrides_and_persistence() {
		let mut state = ListState::default();
		let res = handle_paginating(&paged(), &mut state, &params(Some("2"), Some("10"), false), false, 50).unwrap();
		assert_eq!(res, Pagination { page: 2, size: Some(10) });
		assert_eq!(state.pagination, Some(res));

		let res = handle_paginating(&paged(), &mut state, &params(None, Some(""), false), false, 50).unwrap();
		assert_eq!(res, Pagination { page: 2, size: None });

		let res = handle_paginating(&paged(), &mut state, &params(Some("1"), None, true), false, 50).unwrap();
		assert_eq!(res, Pagination { page: 1, size: Some(50) });
		assert_eq!(state.pagination, Some(Pagination { page: 0, size: Some(50) }));

		assert!(matches!(
			handle_paginating(&paged(), &mut state, &params(Some("x"), None, false), false, 50),
			Err(Error::Parse)
		));
	}

	#[test]
	fn test_slice() {
		let items: Vec<u32> = (0..7).collect();
		assert_eq!(slice(items.clone(), Pagination { page: 1, size: Some(3) }), vec![3, 4, 5]);
		assert_eq!(slice(items.clone(), Pagination { page: 2, size: Some(3) }), vec![6]);
		assert!(slice(items.clone(), Pagination { page: 5, size: Some(3) }).is_empty());
		assert!(slice(items.clone(), Pagination { page: usize::MAX, size: Some(2) }).is_empty());
		assert_eq!(slice(items, Pagination { page: 4, size: None }).len(), 7);
	}
}

// vim: ts=4
