//! Optional shared-password gate.
//!
//! This is UI friction, not authentication: the password sits in clear text
//! in the config file and anyone with file access can bypass it. The session
//! is created once in `run()` and handed to the dispatcher explicitly.

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No password configured.
    Open,
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, Copy)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn open(cfg: &Config, password: Option<&str>) -> Self {
        let state = match cfg.access_password.as_deref() {
            None | Some("") => SessionState::Open,
            Some(expected) if password == Some(expected) => SessionState::Unlocked,
            Some(_) => SessionState::Locked,
        };
        Self { state }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state != SessionState::Locked
    }

    pub fn require(&self) -> AppResult<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(AppError::AccessDenied(
                "wrong or missing password (use --password or FLEETLOG_PASSWORD)".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(pw: Option<&str>) -> Config {
        Config {
            access_password: pw.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn no_password_configured_is_open() {
        let s = Session::open(&cfg(None), None);
        assert_eq!(s.state(), SessionState::Open);
        assert!(s.require().is_ok());
    }

    #[test]
    fn password_gate() {
        let c = cfg(Some("depot"));
        assert_eq!(Session::open(&c, Some("depot")).state(), SessionState::Unlocked);
        assert!(Session::open(&c, Some("depot")).require().is_ok());

        let locked = Session::open(&c, Some("wrong"));
        assert!(matches!(locked.require(), Err(AppError::AccessDenied(_))));
        assert!(!Session::open(&c, None).is_unlocked());
    }
}
