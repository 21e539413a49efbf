//! Settings service: resolves configured values against the registry

use std::collections::HashMap;
use std::sync::Arc;

use super::types::{FrozenSettingsRegistry, SettingValue};
use crate::prelude::*;

/// Resolved application settings (configured value -> default)
pub struct Settings {
	registry: Arc<FrozenSettingsRegistry>,
	values: HashMap<String, SettingValue>,
}

impl Settings {
	/// Parse and validate the configured raw values.
	///
	/// Unknown keys, values not matching the type of the default and
	/// settings without default that are left unconfigured are rejected.
	pub fn new(registry: Arc<FrozenSettingsRegistry>, configured: &HashMap<String, String>) -> RgResult<Self> {
		let mut values = HashMap::new();
		for (key, raw) in configured {
			let def = registry
				.get(key)
				.ok_or_else(|| Error::ConfigError(format!("Unknown setting: {}", key)))?;
			let value = match &def.default {
				Some(default) => SettingValue::parse_as(raw, default)?,
				None => SettingValue::String(raw.clone()),
			};
			def.validate(&value)?;
			debug!("Setting '{}' configured as {:?}", key, value);
			values.insert(key.clone(), value);
		}

		for def in registry.list() {
			if def.default.is_none() && !values.contains_key(&def.key) {
				return Err(Error::ConfigError(format!(
					"Setting '{}' has no default and must be configured",
					def.key
				)));
			}
		}

		Ok(Self { registry, values })
	}

	pub fn get(&self, key: &str) -> RgResult<SettingValue> {
		if let Some(value) = self.values.get(key) {
			return Ok(value.clone());
		}
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ConfigError(format!("Unknown setting: {}", key)))?;
		def.default
			.clone()
			.ok_or_else(|| Error::ConfigError(format!("Setting '{}' is not configured", key)))
	}

	pub fn get_bool(&self, key: &str) -> RgResult<bool> {
		match self.get(key)? {
			SettingValue::Bool(b) => Ok(b),
			other => Err(Error::ConfigError(format!(
				"Setting '{}' is {}, expected bool",
				key,
				other.type_name()
			))),
		}
	}

	pub fn get_int(&self, key: &str) -> RgResult<i64> {
		match self.get(key)? {
			SettingValue::Int(i) => Ok(i),
			other => Err(Error::ConfigError(format!(
				"Setting '{}' is {}, expected int",
				key,
				other.type_name()
			))),
		}
	}
}


// vim: ts=4
