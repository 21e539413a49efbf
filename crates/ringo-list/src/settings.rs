//! List related settings registration

use crate::prelude::*;
use ringo_core::settings::{SettingDefinition, SettingValue, SettingsRegistry};

pub const ADVANCED_OVERVIEWS: &str = "layout.advanced_overviews";
pub const OPTIMIZED_LIST_LOAD: &str = "feature.optimized_list_load";
pub const DEFAULT_PAGE_SIZE: &str = "list.default_page_size";

/// Register all list settings
pub fn register_settings(registry: &mut SettingsRegistry) -> RgResult<()> {
	// Tables without an explicit flag follow this
	registry.register(
		SettingDefinition::builder(ADVANCED_OVERVIEWS)
			.description("Render overviews with server side pagination by default")
			.default(SettingValue::Bool(false))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder(OPTIMIZED_LIST_LOAD)
			.description("Let the store sort and paginate listings without an active search")
			.default(SettingValue::Bool(true))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder(DEFAULT_PAGE_SIZE)
			.description("Page size of paginated advanced overviews")
			.default(SettingValue::Int(50))
			.validator(|v| match v {
				SettingValue::Int(n) if *n > 0 => Ok(()),
				_ => Err(Error::ValidationError("Page size must be positive".into())),
			})
			.build()?,
	)?;

	Ok(())
}

// vim: ts=4
