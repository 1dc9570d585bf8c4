use std::collections::BTreeMap;

use bevy_ecs::component::Component;

use crate::model::{Clan, JoinRequest};

/// Host identity of an online player. Player names are the host's stable
/// identifiers; stored member lists and cooldown keys use them too.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PlayerId {
    pub name: String,
}

/// A player's role within their clan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Owner,
}

/// Explicit per-player relational state: which clan the player is in, with
/// what role, and any clan they are waiting on approval from.
///
/// Invariants: at most one clan at a time; `pending` never names the clan
/// the player is already in. Offline players have no component; their
/// membership lives only in the stored member lists and is rebuilt here on
/// spawn.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    pub clan: Option<(String, Role)>,
    pub pending: Option<String>,
}

impl Membership {
    pub fn in_clan(&self) -> bool {
        self.clan.is_some()
    }

    pub fn clan_name(&self) -> Option<&str> {
        self.clan.as_ref().map(|(name, _)| name.as_str())
    }

    /// Clan name if this player owns it.
    pub fn owned_clan(&self) -> Option<&str> {
        match &self.clan {
            Some((name, Role::Owner)) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn set_member(&mut self, clan: &str) {
        self.clan = Some((clan.to_string(), Role::Member));
        self.pending = None;
    }

    pub fn set_owner(&mut self, clan: &str) {
        self.clan = Some((clan.to_string(), Role::Owner));
        self.pending = None;
    }

    pub fn set_pending(&mut self, clan: &str) {
        self.pending = Some(clan.to_string());
    }

    pub fn clear_clan(&mut self) {
        self.clan = None;
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Rebuild a player's relational state from the stored records, used
    /// when they (re)enter the world. The registry is authoritative; the
    /// component is a per-process cache of it.
    pub fn from_records(
        player: &str,
        clans: &BTreeMap<String, Clan>,
        requests: &BTreeMap<String, JoinRequest>,
    ) -> Self {
        let clan = clans.iter().find_map(|(name, clan)| {
            if clan.owner == player {
                Some((name.clone(), Role::Owner))
            } else if clan.is_member(player) {
                Some((name.clone(), Role::Member))
            } else {
                None
            }
        });
        let pending = match &clan {
            Some(_) => None,
            None => requests
                .get(player)
                .filter(|r| r.is_pending())
                .map(|r| r.clan.clone()),
        };
        Self { clan, pending }
    }
}
