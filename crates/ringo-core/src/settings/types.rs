//! Settings types and definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> RgResult<()> + Send + Sync>;

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	/// Check if this value matches the type of another value
	pub fn matches_type(&self, other: &SettingValue) -> bool {
		matches!(
			(self, other),
			(SettingValue::String(_), SettingValue::String(_))
				| (SettingValue::Int(_), SettingValue::Int(_))
				| (SettingValue::Bool(_), SettingValue::Bool(_))
				| (SettingValue::Json(_), SettingValue::Json(_))
		)
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::Bool(_) => "bool",
			SettingValue::Json(_) => "json",
		}
	}

	/// Parse a raw configuration string into the type of `like`
	pub fn parse_as(raw: &str, like: &SettingValue) -> RgResult<SettingValue> {
		match like {
			SettingValue::Bool(_) => match raw.trim() {
				"true" | "1" | "yes" | "on" => Ok(SettingValue::Bool(true)),
				"false" | "0" | "no" | "off" => Ok(SettingValue::Bool(false)),
				_ => Err(Error::ConfigError(format!("'{}' is not a boolean", raw))),
			},
			SettingValue::Int(_) => raw
				.trim()
				.parse()
				.map(SettingValue::Int)
				.map_err(|_| Error::ConfigError(format!("'{}' is not an integer", raw))),
			SettingValue::String(_) => Ok(SettingValue::String(raw.to_string())),
			SettingValue::Json(_) => serde_json::from_str(raw)
				.map(SettingValue::Json)
				.map_err(|e| Error::ConfigError(format!("invalid JSON: {}", e))),
		}
	}
}

/// Setting definition - defines metadata for each setting
pub struct SettingDefinition {
	/// Dot-separated key (e.g., "layout.advanced_overviews")
	pub key: String,
	pub description: String,
	/// Optional default value. Without a default the setting must be configured.
	pub default: Option<SettingValue>,
	pub validator: Option<SettingValidator>,
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("default", &self.default)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl SettingDefinition {
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}

	/// Check type and custom rules of a configured value
	pub fn validate(&self, value: &SettingValue) -> RgResult<()> {
		if let Some(default) = &self.default {
			if !value.matches_type(default) {
				return Err(Error::ConfigError(format!(
					"Type mismatch for setting '{}': expected {}, got {}",
					self.key,
					default.type_name(),
					value.type_name()
				)));
			}
		}
		if let Some(validator) = &self.validator {
			validator(value)?;
		}
		Ok(())
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	default: Option<SettingValue>,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into(), description: None, default: None, validator: None }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> RgResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	pub fn build(self) -> RgResult<SettingDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Setting description is required".into()))?;

		let def = SettingDefinition {
			key: self.key,
			description,
			default: self.default,
			validator: self.validator,
		};
		if let Some(default) = &def.default {
			def.validate(default)?;
		}
		Ok(def)
	}
}

/// Mutable registry used during app initialization
pub struct SettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> RgResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
pub struct FrozenSettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
