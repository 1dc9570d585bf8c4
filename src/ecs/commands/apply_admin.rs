use bevy_ecs::world::World;

use crate::ecs::events::ClanEvent;
use crate::error::ClanError;
use crate::model::{clan_tag, validate_name};

use super::Confirm;
use super::applicator::{ApplyCtx, membership_of};

pub(crate) fn apply_rename(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    new_name: &str,
) -> Result<(), ClanError> {
    let old_name = membership_of(world, &ctx.directory, issuer)
        .owned_clan()
        .map(str::to_string)
        .ok_or_else(|| {
            ClanError::authorization("You are not authorized to manage this clan.")
        })?;

    validate_name(new_name, |n| ctx.clans.contains_key(n))?;

    let Some(mut clan) = ctx.clans.remove(&old_name) else {
        return Err(ClanError::not_found(format!(
            "Clan \"{old_name}\" does not exist."
        )));
    };
    clan.tag = clan_tag(new_name);
    let members = clan.members.clone();
    ctx.clans.insert(new_name.to_string(), clan);
    ctx.clans_dirty = true;

    // The protection flag follows the clan to its new key.
    if let Some(flag) = ctx.protection.remove(&old_name) {
        ctx.protection.insert(new_name.to_string(), flag);
        ctx.protection_dirty = true;
    }

    // Pending requests keep pointing at the clan, not at the dead key.
    let mut pending_players = Vec::new();
    for (player, request) in ctx.requests.iter_mut() {
        if request.clan == old_name {
            request.clan = new_name.to_string();
            pending_players.push(player.clone());
            ctx.requests_dirty = true;
        }
    }
    for player in pending_players {
        ctx.update_membership(world, &player, |m| m.set_pending(new_name));
    }

    // Re-point every online member; role is preserved, offline members are
    // carried implicitly by the stored list. A listed player whose
    // membership moved on (a departed owner) is left alone.
    for member in members {
        ctx.update_membership(world, &member, |m| {
            if m.clan_name() == Some(old_name.as_str()) {
                if let Some((_, role)) = m.clan.take() {
                    m.clan = Some((new_name.to_string(), role));
                }
            }
        });
    }

    ctx.outbox.message(
        issuer,
        format!("Clan name successfully changed to \"{new_name}\""),
    );
    ctx.emit(ClanEvent::Renamed {
        old: old_name,
        new: new_name.to_string(),
    });
    Ok(())
}

pub(crate) fn apply_disband(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    confirm: Confirm,
) -> Result<(), ClanError> {
    let clan_name = membership_of(world, &ctx.directory, issuer)
        .owned_clan()
        .map(str::to_string)
        .ok_or_else(|| {
            ClanError::authorization("You are not authorized to delete this clan.")
        })?;

    if confirm == Confirm::No {
        ctx.outbox.message(issuer, "Clan deletion canceled.");
        return Ok(());
    }

    let Some(clan) = ctx.clans.remove(&clan_name) else {
        return Err(ClanError::not_found(format!(
            "Clan \"{clan_name}\" does not exist."
        )));
    };
    ctx.clans_dirty = true;

    // Best-effort for offline members: the stored list is iterated in full,
    // but only online players have a component to clear or a chat to reach.
    // Listed players whose membership moved on are skipped.
    for member in &clan.members {
        let still_here = membership_of(world, &ctx.directory, member).clan_name()
            == Some(clan_name.as_str());
        if !still_here {
            continue;
        }
        ctx.update_membership(world, member, |m| m.clear_clan());
        if member != issuer && ctx.directory.is_online(member) {
            ctx.outbox.message(
                member,
                format!("The clan \"{clan_name}\" has been disbanded."),
            );
        }
    }
    ctx.outbox.message(
        issuer,
        format!("You have disbanded the clan \"{clan_name}\"."),
    );

    if ctx.protection.remove(&clan_name).is_some() {
        ctx.protection_dirty = true;
    }

    // Outstanding requests for the dead clan are dropped, pending markers
    // cleared where the requester is online.
    let stale: Vec<String> = ctx
        .requests
        .iter()
        .filter(|(_, r)| r.clan == clan_name)
        .map(|(player, _)| player.clone())
        .collect();
    for player in stale {
        ctx.requests.remove(&player);
        ctx.requests_dirty = true;
        ctx.update_membership(world, &player, |m| m.clear_pending());
    }

    ctx.emit(ClanEvent::Disbanded { clan: clan_name });
    Ok(())
}

pub(crate) fn apply_toggle_protection(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
) -> Result<(), ClanError> {
    let clan_name = membership_of(world, &ctx.directory, issuer)
        .owned_clan()
        .map(str::to_string)
        .ok_or_else(|| {
            ClanError::authorization("You are not authorized to manage this clan.")
        })?;

    let enabled = !ctx.protection.get(&clan_name).copied().unwrap_or(false);
    ctx.protection.insert(clan_name.clone(), enabled);
    ctx.protection_dirty = true;

    let status = if enabled { "ENABLED" } else { "DISABLED" };
    ctx.outbox.message(
        issuer,
        format!("Clan PvP protection is now {status} for {clan_name}"),
    );
    ctx.notify_clan(
        &clan_name,
        &format!(
            "PvP protection has been {}",
            if enabled { "enabled" } else { "disabled" }
        ),
    );
    ctx.emit(ClanEvent::ProtectionToggled {
        clan: clan_name,
        enabled,
    });
    Ok(())
}
