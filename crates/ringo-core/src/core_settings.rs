//! Core settings registration

use crate::prelude::*;
use crate::settings::{SettingDefinition, SettingValue, SettingsRegistry};

/// Register all core settings
pub fn register_settings(registry: &mut SettingsRegistry) -> RgResult<()> {
	registry.register(
		SettingDefinition::builder("cache.size")
			.description("Number of items kept in the shared read cache")
			.default(SettingValue::Int(1000))
			.validator(|value| match value {
				SettingValue::Int(n) if *n > 0 => Ok(()),
				_ => Err(Error::ValidationError("cache.size must be positive".into())),
			})
			.build()?,
	)?;

	Ok(())
}

// vim: ts=4
