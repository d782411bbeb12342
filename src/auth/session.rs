use secrecy::SecretString;
use std::sync::{Arc, RwLock};

/// The bearer token and the user it belongs to.
///
/// `SecretString` keeps the token out of `Debug` output.
#[derive(Debug)]
pub struct AccessCredential {
    pub access_token: SecretString,
    pub user_id: String,
}

/// Holder of the active credential, shared between a caller and its clients.
///
/// Cloning a `Session` shares the same underlying slot, so a caller that
/// keeps a clone can rotate the token with [`Session::activate`] and every
/// client built from it picks the new token up on its next call. Calls
/// already in flight keep the credential they started with.
///
/// There is no expiry tracking: an expired token is discovered when the API
/// answers 401.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Arc<RwLock<Option<Arc<AccessCredential>>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that is already active.
    pub fn with_credential(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let session = Self::new();
        session.activate(access_token, user_id);
        session
    }

    /// Install a credential. Last write wins; the token format is not checked.
    pub fn activate(&self, access_token: impl Into<String>, user_id: impl Into<String>) {
        let credential = Arc::new(AccessCredential {
            access_token: SecretString::from(access_token.into()),
            user_id: user_id.into(),
        });
        // The slot only ever holds a complete snapshot, so a poisoned lock
        // still contains a usable value.
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(credential);
        tracing::debug!("Session credential activated");
    }

    /// Drop the current credential; subsequent authenticated calls fail.
    pub fn deactivate(&self) {
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Snapshot of the current credential, if any.
    pub fn credential(&self) -> Option<Arc<AccessCredential>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_active(&self) -> bool {
        self.credential().is_some()
    }

    pub fn user_id(&self) -> Option<String> {
        self.credential().map(|c| c.user_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_new_session_is_inactive() {
        let session = Session::new();
        assert!(!session.is_active());
        assert!(session.credential().is_none());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn test_activate_last_write_wins() {
        let session = Session::new();
        session.activate("token-1", "user-1");
        session.activate("token-2", "user-2");

        let credential = session.credential().unwrap();
        assert_eq!(credential.access_token.expose_secret(), "token-2");
        assert_eq!(credential.user_id, "user-2");
    }

    #[test]
    fn test_clones_share_the_slot() {
        let session = Session::new();
        let shared = session.clone();
        session.activate("token", "user");
        assert!(shared.is_active());
        shared.deactivate();
        assert!(!session.is_active());
    }

    #[test]
    fn test_snapshot_survives_rotation() {
        let session = Session::with_credential("old", "user");
        let in_flight = session.credential().unwrap();
        session.activate("new", "user");
        assert_eq!(in_flight.access_token.expose_secret(), "old");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let session = Session::with_credential("very-secret-token", "user");
        let output = format!("{:?}", session);
        assert!(!output.contains("very-secret-token"));
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        let session = Session::with_credential("t0", "user");
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let session = session.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            session.activate(format!("t{i}"), "user");
                        } else {
                            assert!(session.credential().is_some());
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(session.is_active());
    }
}
