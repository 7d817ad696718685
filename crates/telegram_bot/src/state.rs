use std::{collections::HashMap, sync::Arc};

use engine::DialogueState;
use teloxide::types::UserId;
use tokio::sync::Mutex;

/// Dialogue of every user currently inside one.
///
/// Idle users have no entry. The dispatcher handles one update per chat at a
/// time, so a user's get and set never interleave.
#[derive(Clone, Default)]
pub(crate) struct SessionStore {
    inner: Arc<Mutex<HashMap<UserId, DialogueState>>>,
}

impl SessionStore {
    pub(crate) async fn get(&self, user_id: UserId) -> DialogueState {
        let guard = self.inner.lock().await;
        guard.get(&user_id).cloned().unwrap_or_default()
    }

    pub(crate) async fn set(&self, user_id: UserId, state: DialogueState) {
        let mut guard = self.inner.lock().await;
        if state.is_idle() {
            guard.remove(&user_id);
        } else {
            guard.insert(user_id, state);
        }
    }
}
