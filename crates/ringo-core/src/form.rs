//! Form definitions and validation
//!
//! A form lists the fields a module accepts on create and update, how raw
//! input is converted and the rules each value must satisfy. Validation
//! always ends with the form-level check which fails if any field failed,
//! carrying the banner telling the user that nothing was saved.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use ringo_types::item::Fields;

pub const INVALID_FORM_MESSAGE: &str = "The information contained errors. <strong>All entries \
	(including error-free) were not saved!</strong> Please correct your entries in the fields \
	marked in red and resave.";

const READONLY_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

pub type RuleFn = Arc<dyn Fn(&Value, &Fields) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Rule {
	Required,
	MaxLength(usize),
	Pattern(Regex),
	/// Custom check receiving the value and all converted form data
	Custom { check: RuleFn, message: String },
}

impl std::fmt::Debug for Rule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Required => write!(f, "Required"),
			Self::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
			Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
			Self::Custom { message, .. } => f.debug_struct("Custom").field("message", message).finish(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
	Text,
	Integer,
	Bool,
}

#[derive(Debug, Clone)]
pub struct FormField {
	pub name: Box<str>,
	pub field_type: FieldType,
	pub rules: Vec<Rule>,
	pub readonly: bool,
}

impl FormField {
	pub fn new(name: impl Into<Box<str>>, field_type: FieldType) -> Self {
		Self { name: name.into(), field_type, rules: Vec::new(), readonly: false }
	}

	pub fn rule(mut self, rule: Rule) -> Self {
		self.rules.push(rule);
		self
	}

	pub fn required(self) -> Self {
		self.rule(Rule::Required)
	}

	pub fn readonly(mut self) -> Self {
		self.readonly = true;
		self
	}
}

#[derive(Debug, Clone, Default)]
pub struct FormDef {
	pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Validation {
	/// Converted values of the submitted fields
	pub data: Fields,
	pub errors: BTreeMap<String, Vec<String>>,
	/// Form level error
	pub banner: Option<String>,
}

impl Validation {
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty() && self.banner.is_none()
	}
}

fn is_empty(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.trim().is_empty(),
		_ => false,
	}
}

fn convert(value: &Value, field_type: FieldType) -> Result<Value, &'static str> {
	match (field_type, value) {
		(_, Value::Null) => Ok(Value::Null),
		(FieldType::Text, Value::String(_)) => Ok(value.clone()),
		(FieldType::Text, Value::Number(n)) => Ok(Value::String(n.to_string())),
		(FieldType::Text, Value::Bool(b)) => Ok(Value::String(b.to_string())),
		(FieldType::Integer, Value::Number(n)) if n.is_i64() => Ok(value.clone()),
		(FieldType::Integer, Value::String(s)) if s.trim().is_empty() => Ok(Value::Null),
		(FieldType::Integer, Value::String(s)) => {
			s.trim().parse::<i64>().map(Value::from).map_err(|_| "Please enter an integer.")
		}
		(FieldType::Integer, _) => Err("Please enter an integer."),
		(FieldType::Bool, Value::Bool(_)) => Ok(value.clone()),
		(FieldType::Bool, Value::String(s)) => match s.as_str() {
			"1" | "true" | "on" | "yes" => Ok(Value::Bool(true)),
			"" | "0" | "false" | "off" | "no" => Ok(Value::Bool(false)),
			_ => Err("Please enter a yes/no value."),
		},
		(FieldType::Bool, Value::Number(n)) => Ok(Value::Bool(n.as_i64() != Some(0))),
		_ => Err("Unsupported value."),
	}
}

impl FormDef {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn field(mut self, field: FormField) -> Self {
		self.fields.push(field);
		self
	}

	/// Validate submitted input.
	///
	/// Only fields declared on the form and present in the input end up in
	/// `data`; readonly fields are ignored.
	pub fn validate(&self, input: &Fields) -> Validation {
		let mut validation = Validation::default();

		for field in self.fields.iter().filter(|f| !f.readonly) {
			let Some(raw) = input.get(field.name.as_ref()) else {
				if field.rules.iter().any(|r| matches!(r, Rule::Required)) {
					validation.errors.entry(field.name.to_string()).or_default().push("This field is required.".into());
				}
				continue;
			};
			match convert(raw, field.field_type) {
				Ok(value) => {
					validation.data.insert(field.name.to_string(), value);
				}
				Err(msg) => {
					validation.errors.entry(field.name.to_string()).or_default().push(msg.into());
				}
			}
		}

		for field in &self.fields {
			let Some(value) = validation.data.get(field.name.as_ref()) else { continue };
			let mut messages = Vec::new();
			for rule in &field.rules {
				match rule {
					Rule::Required if is_empty(value) => messages.push("This field is required.".to_string()),
					Rule::MaxLength(max) => {
						if let Some(s) = value.as_str() {
							if s.chars().count() > *max {
								messages.push(format!("Value is longer than {} characters.", max));
							}
						}
					}
					Rule::Pattern(re) => {
						if let Some(s) = value.as_str() {
							if !s.is_empty() && !re.is_match(s) {
								messages.push("Invalid format.".to_string());
							}
						}
					}
					Rule::Custom { check, message } if !check(value, &validation.data) => {
						messages.push(message.clone());
					}
					_ => {}
				}
			}
			if !messages.is_empty() {
				validation.errors.entry(field.name.to_string()).or_default().extend(messages);
			}
		}

		// form level check, must run last
		if !validation.errors.is_empty() {
			validation.banner = Some(INVALID_FORM_MESSAGE.to_string());
		}
		validation
	}
}

/// Input handling for modules without a form: every field except the
/// read-only built-ins is accepted unchanged
pub fn passthrough(input: &Fields) -> Validation {
	let data = input
		.iter()
		.filter(|(key, _)| !READONLY_FIELDS.contains(&key.as_str()))
		.map(|(k, v)| (k.clone(), v.clone()))
		.collect();
	Validation { data, ..Validation::default() }
}


// vim: ts=4
