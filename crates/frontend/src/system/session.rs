//! Session issued by the sign-in flow: a bearer token under `token` and the
//! user summary under `user`.

use crate::shared::storage::{BrowserStorage, KeyValueStorage, TOKEN_KEY, USER_KEY};
use contracts::system::session::SessionUser;

pub fn access_token() -> Option<String> {
    read_token(&BrowserStorage)
}

pub fn current_user() -> Option<SessionUser> {
    read_user(&BrowserStorage)
}

/// Drops the session after the backend rejected the token.
pub fn clear() {
    clear_session(&BrowserStorage);
}

pub fn read_token<S: KeyValueStorage>(storage: &S) -> Option<String> {
    storage
        .get(TOKEN_KEY)
        .map(|t| t.trim().trim_matches('"').to_string())
        .filter(|t| !t.is_empty())
}

pub fn read_user<S: KeyValueStorage>(storage: &S) -> Option<SessionUser> {
    let raw = storage.get(USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("stored user is unreadable: {}", e);
            None
        }
    }
}

pub fn clear_session<S: KeyValueStorage>(storage: &S) {
    storage.remove(TOKEN_KEY);
    storage.remove(USER_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_token_is_unquoted() {
        let s = MemoryStorage::new();
        assert_eq!(read_token(&s), None);
        s.set(TOKEN_KEY, "\"abc.def\"");
        assert_eq!(read_token(&s).as_deref(), Some("abc.def"));
        s.set(TOKEN_KEY, "  ");
        assert_eq!(read_token(&s), None);
    }

    #[test]
    fn test_user_and_clear() {
        let s = MemoryStorage::new();
        s.set(TOKEN_KEY, "t");
        s.set(USER_KEY, r#"{"id":"7","username":"asha"}"#);
        assert_eq!(read_user(&s).map(|u| u.username).as_deref(), Some("asha"));

        s.set(USER_KEY, "{broken");
        assert!(read_user(&s).is_none());

        clear_session(&s);
        assert_eq!(read_token(&s), None);
        assert_eq!(s.get(USER_KEY), None);
    }
}
