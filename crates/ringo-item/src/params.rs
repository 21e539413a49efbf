//! Request parameters of the create and update views

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::prelude::*;
use ringo_types::item::Fields;
use ringo_types::module::ModuleDef;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemParams {
	/// Url to return to after the next successful save
	pub backurl: Option<String>,
	/// Pending relation link: `relation:module:id`
	pub addrelation: Option<String>,
	/// URL-encoded `key=value` pairs prefilling the form
	pub values: Option<String>,
	/// Alternative form configuration
	pub form: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormParams {
	pub values: Fields,
	pub form: Option<String>,
}

fn decode_values(values: &str) -> RgResult<Fields> {
	let pairs: Vec<(String, String)> = serde_urlencoded::from_str(values).map_err(|err| {
		debug!("Invalid values parameter {:?}: {}", values, err);
		Error::Parse
	})?;
	Ok(pairs.into_iter().map(|(key, value)| (key, Value::String(value))).collect())
}

/// Stash `backurl` and `addrelation` in the session and decode the form
/// prefill values
pub async fn handle_params(
	app: &App,
	module: &ModuleDef,
	sid: &SessionId,
	params: &ItemParams,
) -> RgResult<FormParams> {
	let values = match params.values.as_deref() {
		Some(values) => decode_values(values)?,
		None => Fields::new(),
	};

	let mut session = app.sessions.read_module(sid, &module.name).await?;
	let mut changed = false;
	if let Some(backurl) = params.backurl.as_deref().filter(|url| !url.is_empty()) {
		session.backurl = Some(backurl.to_string());
		changed = true;
	}
	if let Some(addrelation) = params.addrelation.as_deref().filter(|rel| !rel.is_empty()) {
		session.addrelation = Some(addrelation.to_string());
		changed = true;
	}
	if params.form != session.form {
		session.form.clone_from(&params.form);
		changed = true;
	}
	if changed {
		app.sessions.write_module(sid, &module.name, &session).await?;
	}

	Ok(FormParams { values, form: params.form.clone() })
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_decode_values() {
		let values = decode_values("name=Buy%20milk&done=1&note=a+b").unwrap();
		assert_eq!(values.get("name"), Some(&json!("Buy milk")));
		assert_eq!(values.get("done"), Some(&json!("1")));
		assert_eq!(values.get("note"), Some(&json!("a b")));

		assert!(decode_values("").unwrap().is_empty());
	}
}

// vim: ts=4
