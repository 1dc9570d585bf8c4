use bevy_ecs::world::World;

use crate::ecs::resources::SoundCue;
use crate::error::ClanError;

use super::applicator::{ApplyCtx, membership_of};

/// Clan chat: one line delivered to every online member of the sender's
/// clan, sender included.
pub(crate) fn apply_chat(
    ctx: &mut ApplyCtx,
    world: &mut World,
    issuer: &str,
    message: &str,
) -> Result<(), ClanError> {
    let clan_name = membership_of(world, &ctx.directory, issuer)
        .clan_name()
        .map(str::to_string)
        .ok_or_else(|| ClanError::state_conflict("You are not in any clan."))?;

    let members = match ctx.clans.get(&clan_name) {
        Some(clan) => clan.members.clone(),
        None => return Ok(()),
    };
    for member in &members {
        // Online and still pointing at this clan (a departed owner may
        // linger in the stored list).
        let here = ctx.directory.is_online(member)
            && membership_of(world, &ctx.directory, member).clan_name()
                == Some(clan_name.as_str());
        if here {
            ctx.outbox.sound(member, SoundCue::Blip);
            ctx.outbox
                .message(member, format!("[Clan {clan_name}] {issuer}: {message}"));
        }
    }
    Ok(())
}
