//! In-memory session store
//!
//! Sessions live for the lifetime of the process. Concurrent requests of the
//! same session follow last-write-wins per module.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::prelude::*;
use ringo_types::session::{Flash, ModuleSession, SessionStore};

#[derive(Debug, Default)]
struct SessionData {
	uid: Option<UserId>,
	modules: HashMap<Box<str>, ModuleSession>,
	flashes: Vec<Flash>,
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
	sessions: RwLock<HashMap<SessionId, SessionData>>,
}

impl MemorySessionStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.sessions.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.sessions.read().is_empty()
	}
}

#[async_trait]
impl SessionStore for MemorySessionStore {
	async fn create_session(&self, uid: UserId) -> RgResult<SessionId> {
		let sid = SessionId(Uuid::new_v4().to_string().into());
		self.sessions.write().insert(sid.clone(), SessionData { uid: Some(uid), ..SessionData::default() });
		debug!("Session created for user {}", uid);
		Ok(sid)
	}

	async fn read_session_user(&self, sid: &SessionId) -> RgResult<UserId> {
		self.sessions.read().get(sid).and_then(|s| s.uid).ok_or(Error::PermissionDenied)
	}

	async fn delete_session(&self, sid: &SessionId) -> RgResult<()> {
		self.sessions.write().remove(sid);
		Ok(())
	}

	async fn read_module(&self, sid: &SessionId, module: &str) -> RgResult<ModuleSession> {
		let sessions = self.sessions.read();
		let session = sessions.get(sid).ok_or(Error::PermissionDenied)?;
		Ok(session.modules.get(module).cloned().unwrap_or_default())
	}

	async fn write_module(&self, sid: &SessionId, module: &str, state: &ModuleSession) -> RgResult<()> {
		let mut sessions = self.sessions.write();
		let session = sessions.get_mut(sid).ok_or(Error::PermissionDenied)?;
		session.modules.insert(module.into(), state.clone());
		Ok(())
	}

	async fn delete_module(&self, sid: &SessionId, module: &str) -> RgResult<()> {
		if let Some(session) = self.sessions.write().get_mut(sid) {
			session.modules.remove(module);
		}
		Ok(())
	}

	async fn flash(&self, sid: &SessionId, flash: Flash) -> RgResult<()> {
		let mut sessions = self.sessions.write();
		let session = sessions.get_mut(sid).ok_or(Error::PermissionDenied)?;
		session.flashes.push(flash);
		Ok(())
	}

	async fn pop_flashes(&self, sid: &SessionId) -> RgResult<Vec<Flash>> {
		let mut sessions = self.sessions.write();
		let session = sessions.get_mut(sid).ok_or(Error::PermissionDenied)?;
		Ok(std::mem::take(&mut session.flashes))
	}
}


// vim: ts=4
