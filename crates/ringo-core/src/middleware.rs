//! Custom middlewares

use axum::{
	body::Body,
	extract::State,
	http::{Request, header},
	middleware::Next,
	response::Response,
};
use std::sync::Arc;

use crate::extract::{Auth, UserCtx};
use crate::prelude::*;

/// Resolve the `Authorization: Bearer <session id>` header into the session
/// user and attach it to the request
pub async fn require_auth(State(app): State<App>, mut req: Request<Body>, next: Next) -> RgResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::PermissionDenied)?;

	let Some(token) = auth_header.strip_prefix("Bearer ") else {
		return Err(Error::PermissionDenied);
	};
	let sid = SessionId(token.trim().into());

	let uid = app.sessions.read_session_user(&sid).await?;
	let user = app.store.read_user(uid).await.map_err(|err| {
		warn!("Session {} refers to unknown user {}: {}", sid, uid, err);
		Error::PermissionDenied
	})?;

	req.extensions_mut().insert(Auth(UserCtx { sid, user: Arc::new(user) }));

	Ok(next.run(req).await)
}

// vim: ts=4
