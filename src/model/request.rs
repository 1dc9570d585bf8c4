use serde::{Deserialize, Serialize};

use crate::error::ClanError;

/// Join-request lifecycle. Only two transitions exist:
/// Pending → Approved and Pending → Denied. Anything else is a state
/// conflict. Resolved requests are deleted from the store, not archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

impl RequestStatus {
    fn transition(self, to: RequestStatus) -> Result<RequestStatus, ClanError> {
        match (self, to) {
            (RequestStatus::Pending, RequestStatus::Approved)
            | (RequestStatus::Pending, RequestStatus::Denied) => Ok(to),
            _ => Err(ClanError::state_conflict(format!(
                "Join request is already {self:?}."
            ))),
        }
    }
}

/// An outstanding request to join a clan, keyed in the store by the
/// requesting player's name. At most one per player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub clan: String,
    pub status: RequestStatus,
    pub timestamp: u64,
}

impl JoinRequest {
    pub fn pending(clan: &str, timestamp: u64) -> Self {
        Self {
            clan: clan.to_string(),
            status: RequestStatus::Pending,
            timestamp,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn approve(&mut self) -> Result<(), ClanError> {
        self.status = self.status.transition(RequestStatus::Approved)?;
        Ok(())
    }

    pub fn deny(&mut self) -> Result<(), ClanError> {
        self.status = self.status.transition(RequestStatus::Denied)?;
        Ok(())
    }
}
