use bevy_ecs::world::World;
use rand::Rng;

use crate::ecs::events::ClanEvent;
use crate::ecs::resources::SoundCue;
use crate::error::ClanError;
use crate::model::{Clan, JoinRequest, validate_name};

use super::Confirm;
use super::applicator::{ApplyCtx, membership_of};

pub(crate) fn apply_create(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    name: &str,
) -> Result<(), ClanError> {
    if membership_of(world, &ctx.directory, issuer).in_clan() {
        return Err(ClanError::state_conflict(
            "You are already in a clan. You must leave your current clan before creating a new one.",
        ));
    }
    validate_name(name, |n| ctx.clans.contains_key(n))?;

    let clan = Clan::found(name, issuer, ctx.now_ms);
    let tag = clan.tag.clone();
    ctx.clans.insert(name.to_string(), clan);
    ctx.clans_dirty = true;

    // Founding supersedes any outstanding join request elsewhere.
    if ctx.requests.remove(issuer).is_some() {
        ctx.requests_dirty = true;
    }
    ctx.update_membership(world, issuer, |m| m.set_owner(name));

    ctx.outbox.message(
        issuer,
        format!("Successfully created clan \"{name}\" with tag {tag}"),
    );
    ctx.emit(ClanEvent::Created {
        clan: name.to_string(),
        owner: issuer.to_string(),
    });
    Ok(())
}

pub(crate) fn apply_request_join(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    clan_name: &str,
) -> Result<(), ClanError> {
    if membership_of(world, &ctx.directory, issuer).in_clan() {
        return Err(ClanError::state_conflict(
            "You are already in a clan. Leave your current clan first.",
        ));
    }
    if ctx.requests.get(issuer).is_some_and(JoinRequest::is_pending) {
        return Err(ClanError::state_conflict(
            "You already have a pending join request.",
        ));
    }
    let clan = ctx
        .clans
        .get(clan_name)
        .ok_or_else(|| ClanError::not_found(format!("Clan \"{clan_name}\" does not exist.")))?;
    if clan.is_full() {
        return Err(ClanError::validation("This clan is full (25/25 members)."));
    }

    ctx.requests
        .insert(issuer.to_string(), JoinRequest::pending(clan_name, ctx.now_ms));
    ctx.requests_dirty = true;
    ctx.update_membership(world, issuer, |m| m.set_pending(clan_name));

    ctx.outbox
        .message(issuer, format!("Request to join {clan_name} sent!"));
    ctx.notify_clan(
        clan_name,
        &format!("{issuer} wants to join your clan! Use /clan manage to review"),
    );
    ctx.emit(ClanEvent::JoinRequested {
        clan: clan_name.to_string(),
        requester: issuer.to_string(),
    });
    Ok(())
}

pub(crate) fn apply_resolve_join(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    requester: &str,
    approve: bool,
) -> Result<(), ClanError> {
    let clan_name = membership_of(world, &ctx.directory, issuer)
        .owned_clan()
        .map(str::to_string)
        .ok_or_else(|| {
            ClanError::authorization("You are not authorized to manage this clan.")
        })?;

    let mut request = ctx
        .requests
        .get(requester)
        .filter(|r| r.clan == clan_name && r.is_pending())
        .cloned()
        .ok_or_else(|| ClanError::not_found("Could not find the selected member."))?;

    if approve {
        {
            let clan = ctx
                .clans
                .get_mut(&clan_name)
                .ok_or_else(|| ClanError::not_found("Could not find the selected member."))?;
            // Admitting past the cap would break the size invariant; the
            // request stays pending so the owner can retry after a kick.
            if clan.is_full() {
                return Err(ClanError::validation("This clan is full (25/25 members)."));
            }
            request.approve()?;
            clan.add_member(requester);
            clan.active = true;
        }
        ctx.clans_dirty = true;
        ctx.update_membership(world, requester, |m| m.set_member(&clan_name));
        if ctx.directory.is_online(requester) {
            ctx.outbox.message(
                requester,
                format!("Congratulations! You have been approved and added to the clan \"{clan_name}\"."),
            );
            ctx.outbox.sound(requester, SoundCue::Celebrate);
        }
        ctx.emit(ClanEvent::MemberJoined {
            clan: clan_name.clone(),
            player: requester.to_string(),
        });
    } else {
        request.deny()?;
        ctx.update_membership(world, requester, |m| m.clear_pending());
        if ctx.directory.is_online(requester) {
            ctx.outbox.message(
                requester,
                format!("You have been denied entry to the clan \"{clan_name}\". Better luck next time."),
            );
        }
        ctx.emit(ClanEvent::JoinDenied {
            clan: clan_name.clone(),
            player: requester.to_string(),
        });
    }

    ctx.requests.remove(requester);
    ctx.requests_dirty = true;
    Ok(())
}

pub(crate) fn apply_invite(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    target: &str,
    confirm: Confirm,
) -> Result<(), ClanError> {
    let clan_name = membership_of(world, &ctx.directory, issuer)
        .owned_clan()
        .map(str::to_string)
        .ok_or_else(|| {
            ClanError::authorization("You are not authorized to invite players to this clan.")
        })?;

    if confirm == Confirm::No {
        ctx.outbox.message(issuer, "Invitation canceled.");
        return Ok(());
    }
    if !ctx.directory.is_online(target) {
        return Err(ClanError::not_found("Could not find the selected player."));
    }
    if membership_of(world, &ctx.directory, target).in_clan() {
        return Err(ClanError::state_conflict("That player is already in a clan."));
    }

    {
        let clan = ctx
            .clans
            .get_mut(&clan_name)
            .ok_or_else(|| ClanError::not_found("Could not find the selected player."))?;
        if clan.is_full() {
            return Err(ClanError::validation("This clan is full (25/25 members)."));
        }
        clan.add_member(target);
    }
    ctx.clans_dirty = true;

    // A direct add supersedes any request the target had filed elsewhere.
    if ctx.requests.remove(target).is_some() {
        ctx.requests_dirty = true;
    }
    ctx.update_membership(world, target, |m| m.set_member(&clan_name));

    ctx.outbox.message(
        target,
        format!("You have been invited and added to the clan \"{clan_name}\" by {issuer}."),
    );
    ctx.outbox.message(
        issuer,
        format!("You have invited and added {target} to the clan \"{clan_name}\"."),
    );
    ctx.outbox.sound(issuer, SoundCue::Fanfare);
    ctx.emit(ClanEvent::MemberInvited {
        clan: clan_name,
        player: target.to_string(),
    });
    Ok(())
}

pub(crate) fn apply_kick(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    target: &str,
) -> Result<(), ClanError> {
    let clan_name = membership_of(world, &ctx.directory, issuer)
        .owned_clan()
        .map(str::to_string)
        .ok_or_else(|| {
            ClanError::authorization("You are not authorized to manage this clan.")
        })?;

    if target == issuer {
        return Err(ClanError::validation("You cannot kick the clan owner."));
    }

    {
        let clan = ctx
            .clans
            .get_mut(&clan_name)
            .ok_or_else(|| ClanError::not_found("Could not find the selected member."))?;
        if !clan.is_member(target) {
            return Err(ClanError::not_found("Could not find the selected member."));
        }
        clan.remove_member(target);
    }
    ctx.clans_dirty = true;
    ctx.update_membership(world, target, |m| {
        if m.clan_name() == Some(clan_name.as_str()) {
            m.clear_clan();
        }
    });

    if ctx.directory.is_online(target) {
        ctx.outbox.message(
            target,
            format!("You have been kicked from the clan \"{clan_name}\" by {issuer}."),
        );
        ctx.outbox.sound(target, SoundCue::Blip);
    }
    ctx.outbox.message(
        issuer,
        format!("You have kicked {target} from the clan \"{clan_name}\"."),
    );
    ctx.emit(ClanEvent::MemberKicked {
        clan: clan_name,
        player: target.to_string(),
    });
    Ok(())
}

pub(crate) fn apply_leave(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    confirm: Confirm,
) -> Result<(), ClanError> {
    let clan_name = membership_of(world, &ctx.directory, issuer)
        .clan_name()
        .map(str::to_string)
        .ok_or_else(|| ClanError::state_conflict("You are not currently in any clan."))?;

    if confirm == Confirm::No {
        return Ok(());
    }

    ctx.update_membership(world, issuer, |m| m.clear_clan());
    ctx.outbox
        .message(issuer, format!("You have left the clan \"{clan_name}\"."));

    let (is_owner, candidates) = {
        let world_ref: &World = world;
        let Some(clan) = ctx.clans.get(&clan_name) else {
            return Ok(());
        };
        // List entries whose allegiance moved on (departed owners) are not
        // promotion candidates.
        let candidates: Vec<String> = clan
            .members_except(issuer)
            .into_iter()
            .filter(|member| {
                let elsewhere = ctx.clans.iter().any(|(name, other)| {
                    name != &clan_name && (other.owner == *member || other.is_member(member))
                });
                let online_mismatch = ctx.directory.is_online(member)
                    && membership_of(world_ref, &ctx.directory, member).clan_name()
                        != Some(clan_name.as_str());
                !elsewhere && !online_mismatch
            })
            .map(str::to_string)
            .collect();
        (clan.owner == issuer, candidates)
    };

    if is_owner {
        if candidates.is_empty() {
            ctx.clans.remove(&clan_name);
            ctx.clans_dirty = true;
            if ctx.protection.remove(&clan_name).is_some() {
                ctx.protection_dirty = true;
            }
            ctx.emit(ClanEvent::Disbanded {
                clan: clan_name.clone(),
            });
        } else {
            // Uniform choice among the remaining members. The departing
            // owner stays in the stored member list; only the owner field
            // and the markers change hands.
            let new_owner = {
                let idx = ctx.rng.rng.random_range(0..candidates.len());
                candidates[idx].clone()
            };
            if let Some(clan) = ctx.clans.get_mut(&clan_name) {
                clan.owner = new_owner.clone();
            }
            ctx.clans_dirty = true;
            ctx.update_membership(world, &new_owner, |m| m.set_owner(&clan_name));
            if ctx.directory.is_online(&new_owner) {
                ctx.outbox.message(
                    &new_owner,
                    format!("You have been promoted to the owner of the clan \"{clan_name}\"."),
                );
            }
            ctx.emit(ClanEvent::OwnershipTransferred {
                clan: clan_name.clone(),
                new_owner,
            });
        }
    } else {
        if let Some(clan) = ctx.clans.get_mut(&clan_name) {
            clan.remove_member(issuer);
        }
        ctx.clans_dirty = true;
    }

    ctx.emit(ClanEvent::MemberLeft {
        clan: clan_name,
        player: issuer.to_string(),
    });
    Ok(())
}
