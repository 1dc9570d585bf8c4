use thiserror::Error;

/// Errors surfaced by clan operations.
///
/// Every variant carries the user-facing text shown to the issuing player.
/// Errors are handled at the point of detection: the command applicator
/// renders them as a chat message plus an error cue; none propagate further.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClanError {
    /// Bad input: invalid or duplicate clan name, clan full.
    #[error("{0}")]
    Validation(String),

    /// Caller lacks the required role (owner-only operations).
    #[error("{0}")]
    Authorization(String),

    /// Named player, clan, or join request does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Operation requires a membership state the caller is not in.
    #[error("{0}")]
    StateConflict(String),
}

impl ClanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn state_conflict(msg: impl Into<String>) -> Self {
        Self::StateConflict(msg.into())
    }
}

/// Returned by a host effect port when the deterrent effect cannot be applied.
///
/// Callers log and swallow this; effect application is best-effort and never
/// blocks the damage cancellation it accompanies.
#[derive(Error, Debug, Clone)]
#[error("host rejected effect: {0}")]
pub struct EffectError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_user_facing_text() {
        let err = ClanError::validation("Invalid clan name!");
        assert_eq!(err.to_string(), "Invalid clan name!");

        let err = ClanError::authorization("You are not authorized to manage this clan.");
        assert_eq!(
            err.to_string(),
            "You are not authorized to manage this clan."
        );
    }
}
