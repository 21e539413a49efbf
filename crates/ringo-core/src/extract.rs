//! Custom extractors for Ringo specific data

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

use crate::prelude::*;
use ringo_types::auth::User;

/// Authenticated session context, inserted by the auth middleware
#[derive(Debug, Clone)]
pub struct UserCtx {
	pub sid: SessionId,
	pub user: Arc<User>,
}

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub UserCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// vim: ts=4
