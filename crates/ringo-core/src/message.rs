//! User facing message templates
//!
//! Templates use `${name}` placeholders; unknown placeholders are left as is.

pub const VALIDATION_ERROR_CREATE: &str = "Error on validation new ${item_type}.";
pub const VALIDATION_ERROR_UPDATE: &str = "Error on validation ${item_type} \"${item}\".";
pub const SAVE_SUCCESS_CREATE: &str = "Created new ${item_type} successfully.";
pub const SAVE_SUCCESS_UPDATE: &str = "Edited ${item_type} \"${item}\" successfully.";
pub const SAVE_ERROR_CREATE: &str = "Error while saving new ${item_type}: ${error}.";
pub const SAVE_ERROR_UPDATE: &str = "Error while saving ${item_type} \"${item}\": ${error}.";
pub const DELETE_SUCCESS: &str = "Deleted ${item_type} \"${item}\" successfully.";
pub const EMPTY_SELECTION: &str =
	"You have not selected any item in the list. Click 'OK' to return to the overview.";
pub const NOT_APPLICABLE: &str = "After checking the permissions no items remain for which an \
	'${action}' can be performed. (${num} items were filtered out.)";
pub const FILTERED: &str = "${num} items were filtered out.";
pub const BUNDLE_DELETE_SUCCESS: &str = "Deleted ${num} ${item_type} items successfully.";

/// Substitute `${name}` placeholders
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;
	while let Some(start) = rest.find("${") {
		out.push_str(&rest[..start]);
		let after = &rest[start + 2..];
		let Some(end) = after.find('}') else {
			out.push_str(&rest[start..]);
			return out;
		};
		let name = &after[..end];
		match params.iter().find(|(key, _)| *key == name) {
			Some((_, value)) => out.push_str(value),
			None => out.push_str(&rest[start..start + 2 + end + 1]),
		}
		rest = &after[end + 1..];
	}
	out.push_str(rest);
	out
}


// vim: ts=4
