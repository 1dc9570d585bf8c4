use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::clan::Clan;

/// How many clans the leaderboard shows.
const TOP_COUNT: usize = 10;

/// One leaderboard row, as cached in the `topClans` blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopClanEntry {
    pub name: String,
    pub tag: String,
    pub level: u32,
    pub members: usize,
}

/// Rank all clans by score (`members * 1 + level * 10`), descending, and
/// keep the top ten. Ties break by registry iteration order, which for a
/// `BTreeMap` is lexicographic by name, deterministic for a given input.
pub fn rank_clans(clans: &BTreeMap<String, Clan>) -> Vec<TopClanEntry> {
    let mut ranked: Vec<(&String, &Clan)> = clans.iter().collect();
    ranked.sort_by(|a, b| b.1.score().cmp(&a.1.score()));
    ranked
        .into_iter()
        .take(TOP_COUNT)
        .map(|(name, clan)| TopClanEntry {
            name: name.clone(),
            tag: clan.tag.clone(),
            level: clan.level,
            members: clan.members.len(),
        })
        .collect()
}

/// Display order for the join screen: active clans first, then by member
/// count descending, then by name.
pub fn join_listing(clans: &BTreeMap<String, Clan>) -> Vec<(&str, &Clan)> {
    let mut listing: Vec<(&str, &Clan)> = clans.iter().map(|(n, c)| (n.as_str(), c)).collect();
    listing.sort_by(|a, b| {
        b.1.active
            .cmp(&a.1.active)
            .then(b.1.members.len().cmp(&a.1.members.len()))
            .then(a.0.cmp(b.0))
    });
    listing
}
