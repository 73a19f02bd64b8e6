use anyhow::{anyhow, Result};
use log::{info, warn};

use crate::repository::FileSessionRepository;

pub const PIN_LENGTH: usize = 4;
pub const DEFAULT_PIN: &str = "1502";
pub const PIN_ENV_VAR: &str = "BURNDOWN_PIN";

/// Soft access gate: a shared numeric PIN, not a security boundary.
pub struct AuthService {
    expected_pin: String,
    session: FileSessionRepository,
}

impl AuthService {
    pub fn new(expected_pin: &str, session: FileSessionRepository) -> Result<Self> {
        if !is_well_formed(expected_pin) {
            return Err(anyhow!("Configured PIN must be exactly {} digits", PIN_LENGTH));
        }
        Ok(Self {
            expected_pin: expected_pin.to_string(),
            session,
        })
    }

    /// Uses `BURNDOWN_PIN` when set, the built-in default otherwise.
    pub fn from_env(session: FileSessionRepository) -> Result<Self> {
        let pin = std::env::var(PIN_ENV_VAR).unwrap_or_else(|_| DEFAULT_PIN.to_string());
        Self::new(pin.trim(), session)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Returns `Ok(false)` on a wrong code; the session is only persisted on success.
    pub fn login(&self, pin: &str) -> Result<bool> {
        if pin.trim() != self.expected_pin {
            warn!("event=login module=auth status=rejected");
            return Ok(false);
        }
        self.session.store()?;
        info!("event=login module=auth status=ok");
        Ok(true)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.remove()?;
        info!("event=logout module=auth status=ok");
        Ok(())
    }
}

fn is_well_formed(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> AuthService {
        let session = FileSessionRepository::new(Some(dir.path().to_path_buf())).unwrap();
        AuthService::new("1502", session).unwrap()
    }

    #[test]
    fn test_rejects_malformed_configured_pin() {
        let dir = TempDir::new().unwrap();
        let session = FileSessionRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(AuthService::new("12a4", session.clone()).is_err());
        assert!(AuthService::new("12345", session).is_err());
    }

    #[test]
    fn test_login_persists_until_logout() {
        let dir = TempDir::new().unwrap();
        let auth = service(&dir);
        assert!(!auth.is_authenticated());

        assert!(!auth.login("0000").unwrap());
        assert!(!auth.is_authenticated());

        assert!(auth.login("1502").unwrap());
        // A fresh service on the same directory is still logged in.
        assert!(service(&dir).is_authenticated());

        auth.logout().unwrap();
        assert!(!service(&dir).is_authenticated());
        // Logging out twice is fine.
        auth.logout().unwrap();
    }
}
