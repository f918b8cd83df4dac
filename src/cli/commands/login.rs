use crate::core::session::{Session, SessionState};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(session: &Session) -> AppResult<()> {
    match session.state() {
        SessionState::Open => {
            info("No access password is configured.");
            Ok(())
        }
        SessionState::Unlocked => {
            success("Access granted.");
            Ok(())
        }
        SessionState::Locked => Err(AppError::AccessDenied("wrong or missing password".into())),
    }
}
