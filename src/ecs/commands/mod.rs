pub mod applicator;
mod apply_admin;
mod apply_chat;
mod apply_membership;

use bevy_ecs::message::Message;

pub use applicator::apply_clan_commands;

/// Outcome of a host confirmation dialog, carried by the commands that
/// require one. A dismissed dialog never produces a command at all, so
/// `No` here is an explicit button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
}

/// A player-initiated clan operation.
///
/// Host adapters write these via `MessageWriter<ClanCommand>` (typically
/// from a menu selection); the exclusive applicator in
/// `TickPhase::PostUpdate` validates and applies them, surfacing every
/// error to the issuer as a chat message plus an error cue.
#[derive(Message, Clone, Debug)]
pub struct ClanCommand {
    /// Name of the player who issued the command. Always online.
    pub issuer: String,
    pub kind: ClanCommandKind,
}

impl ClanCommand {
    pub fn new(issuer: impl Into<String>, kind: ClanCommandKind) -> Self {
        Self {
            issuer: issuer.into(),
            kind,
        }
    }
}

/// Every clan operation a player can request.
#[derive(Clone, Debug)]
pub enum ClanCommandKind {
    /// Found a new clan. Issuer becomes owner and sole member.
    Create { name: String },
    /// File a join request with a clan; its members get notified.
    RequestJoin { clan: String },
    /// Owner resolves a pending join request for their clan.
    ResolveJoin { requester: String, approve: bool },
    /// Owner adds an online player directly, after confirming.
    Invite { target: String, confirm: Confirm },
    /// Owner removes a member.
    Kick { target: String },
    /// Leave the current clan, after confirming. An owner leaving hands
    /// the clan to a randomly chosen remaining member, or deletes it.
    Leave { confirm: Confirm },
    /// Owner renames their clan; every member is re-pointed.
    Rename { new_name: String },
    /// Owner deletes the clan outright, after confirming.
    Disband { confirm: Confirm },
    /// Owner flips the clan's PvP protection flag.
    ToggleProtection,
    /// Send a chat line to all online members of the issuer's clan.
    Chat { message: String },
}
