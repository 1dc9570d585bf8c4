use serde::{Deserialize, Serialize};

/// Hard cap on clan size, owner included.
pub const MAX_MEMBERS: usize = 25;

/// Members per level step: level = members / 5 + 1.
const MEMBERS_PER_LEVEL: usize = 5;

/// Level derived from member count.
pub fn level_for(member_count: usize) -> u32 {
    (member_count / MEMBERS_PER_LEVEL) as u32 + 1
}

/// Display tag derived from a clan name: first three characters, uppercased,
/// bracketed (`Alpha` → `[ALP]`).
pub fn clan_tag(name: &str) -> String {
    let head: String = name.chars().take(3).collect();
    format!("[{}]", head.to_uppercase())
}

/// A registered clan, as stored in the `clans` blob keyed by clan name.
///
/// `level` is a cache of `level_for(members.len())`. Every membership
/// mutation goes through [`Clan::add_member`] / [`Clan::remove_member`] so
/// the cache cannot drift from the actual member count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clan {
    pub owner: String,
    pub members: Vec<String>,
    pub tag: String,
    pub level: u32,
    pub active: bool,
    pub created: u64,
}

impl Clan {
    /// A freshly founded clan: the founder is owner and sole member.
    pub fn found(name: &str, owner: &str, created: u64) -> Self {
        Self {
            owner: owner.to_string(),
            members: vec![owner.to_string()],
            tag: clan_tag(name),
            level: level_for(1),
            active: true,
            created,
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_MEMBERS
    }

    pub fn is_member(&self, player: &str) -> bool {
        self.members.iter().any(|m| m == player)
    }

    /// Append a member and refresh the cached level. No-op if already listed.
    pub fn add_member(&mut self, player: &str) {
        if !self.is_member(player) {
            self.members.push(player.to_string());
        }
        self.level = level_for(self.members.len());
    }

    /// Drop a member and refresh the cached level.
    pub fn remove_member(&mut self, player: &str) {
        self.members.retain(|m| m != player);
        self.level = level_for(self.members.len());
    }

    /// Members other than the given player, in list order.
    pub fn members_except<'a>(&'a self, player: &str) -> Vec<&'a str> {
        self.members
            .iter()
            .filter(|m| m.as_str() != player)
            .map(String::as_str)
            .collect()
    }

    /// Leaderboard score: one point per member, ten per level.
    pub fn score(&self) -> u64 {
        self.members.len() as u64 + self.level as u64 * 10
    }
}

/// Read-side projection of a clan for display. Level is recomputed from the
/// member count rather than read from the cached field.
#[derive(Debug, Clone, PartialEq)]
pub struct ClanSummary {
    pub name: String,
    pub tag: String,
    pub owner: String,
    pub level: u32,
    pub member_count: usize,
    pub members: Vec<String>,
    pub online: Vec<String>,
}

impl ClanSummary {
    pub fn new(name: &str, clan: &Clan, online: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            tag: clan.tag.clone(),
            owner: clan.owner.clone(),
            level: level_for(clan.members.len()),
            member_count: clan.members.len(),
            members: clan.members.clone(),
            online,
        }
    }
}
