use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

/// A player entered the world. Written by the host adapter (and by
/// [`crate::ecs::spawn::spawn_player`]); consumed by the presence system.
#[derive(Message, Clone, Debug)]
pub struct PlayerSpawned {
    pub entity: Entity,
}

/// A player attempted to damage another player. Written by the host
/// adapter from its combat event hook, before running the tick.
#[derive(Message, Clone, Debug)]
pub struct AttackAttempt {
    pub attacker: Entity,
    pub victim: Entity,
}

/// Why an attack was suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// Attacker still inside the post-block cooldown window.
    Cooldown,
    /// Attacker and victim are in the same clan.
    SameClan,
}

/// Outcome of one [`AttackAttempt`]. The host adapter reads these after the
/// tick and sets its engine-side cancel flag for cancelled hits.
#[derive(Message, Clone, Debug)]
pub struct AttackVerdict {
    pub attacker: Entity,
    pub victim: Entity,
    pub cancel: bool,
    pub reason: Option<BlockReason>,
}

/// Reactive events emitted by the command applicator after registry
/// mutations, for cross-system reactions (leaderboard refresh) and host
/// adapters that mirror clan state elsewhere.
#[derive(Message, Clone, Debug)]
pub enum ClanEvent {
    Created {
        clan: String,
        owner: String,
    },
    JoinRequested {
        clan: String,
        requester: String,
    },
    MemberJoined {
        clan: String,
        player: String,
    },
    JoinDenied {
        clan: String,
        player: String,
    },
    MemberInvited {
        clan: String,
        player: String,
    },
    MemberKicked {
        clan: String,
        player: String,
    },
    MemberLeft {
        clan: String,
        player: String,
    },
    OwnershipTransferred {
        clan: String,
        new_owner: String,
    },
    Renamed {
        old: String,
        new: String,
    },
    Disbanded {
        clan: String,
    },
    ProtectionToggled {
        clan: String,
        enabled: bool,
    },
}
