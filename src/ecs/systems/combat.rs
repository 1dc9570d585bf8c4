//! Combat protection hook.
//!
//! Two systems on the Update phase:
//! 1. `resolve_attacks`: per attempt, cooldown branch first, then the
//!    same-clan branch, else the hit passes through unmodified.
//! 2. `sweep_cooldowns`: once per second, drops expired cooldown entries.

use bevy_app::{App, Plugin};
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::ecs::clock::{HostClock, TICKS_PER_SECOND};
use crate::ecs::components::{Membership, PlayerId};
use crate::ecs::conditions::every_second;
use crate::ecs::events::{AttackAttempt, AttackVerdict, BlockReason};
use crate::ecs::resources::{AttackCooldowns, Effects, Outbox};
use crate::ecs::schedule::{HostTick, TickPhase};

/// Suppression window after a blocked same-clan hit: two seconds.
pub const ATTACK_COOLDOWN_TICKS: u64 = 2 * TICKS_PER_SECOND;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(HostTick, resolve_attacks.in_set(TickPhase::Update));
        app.add_systems(
            HostTick,
            sweep_cooldowns
                .run_if(every_second)
                .in_set(TickPhase::Update),
        );
    }
}

fn resolve_attacks(
    mut attempts: MessageReader<AttackAttempt>,
    mut verdicts: MessageWriter<AttackVerdict>,
    players: Query<(&PlayerId, &Membership)>,
    clock: Res<HostClock>,
    mut cooldowns: ResMut<AttackCooldowns>,
    mut outbox: ResMut<Outbox>,
    effects: Res<Effects>,
) {
    for attempt in attempts.read() {
        let Ok((attacker_id, attacker_m)) = players.get(attempt.attacker) else {
            continue;
        };
        let Ok((_, victim_m)) = players.get(attempt.victim) else {
            continue;
        };

        // Cooldown branch wins: inside the window every hit is blocked,
        // whoever the victim is, and the window is not renewed.
        if cooldowns.active(&attacker_id.name, clock.tick) {
            outbox.message(&attacker_id.name, "You're attacking too fast! Wait 2 seconds");
            apply_deterrent(&effects, &attacker_id.name);
            verdicts.write(AttackVerdict {
                attacker: attempt.attacker,
                victim: attempt.victim,
                cancel: true,
                reason: Some(BlockReason::Cooldown),
            });
            continue;
        }

        // Same-clan hits are blocked unconditionally; the per-clan
        // protection flag is not consulted here.
        let same_clan = match (attacker_m.clan_name(), victim_m.clan_name()) {
            (Some(a), Some(v)) => a == v,
            _ => false,
        };
        if same_clan {
            outbox.message(&attacker_id.name, "You can't attack your own clan members!");
            cooldowns.start(&attacker_id.name, clock.tick + ATTACK_COOLDOWN_TICKS);
            apply_deterrent(&effects, &attacker_id.name);
            verdicts.write(AttackVerdict {
                attacker: attempt.attacker,
                victim: attempt.victim,
                cancel: true,
                reason: Some(BlockReason::SameClan),
            });
            continue;
        }

        verdicts.write(AttackVerdict {
            attacker: attempt.attacker,
            victim: attempt.victim,
            cancel: false,
            reason: None,
        });
    }
}

/// Deterrent application is best-effort: a host rejection is logged and
/// never blocks the cancellation it accompanies.
fn apply_deterrent(effects: &Effects, player: &str) {
    if let Err(err) = effects.0.apply_deterrent(player) {
        tracing::warn!(player, "deterrent effect failed: {err}");
    }
}

fn sweep_cooldowns(clock: Res<HostClock>, mut cooldowns: ResMut<AttackCooldowns>) {
    cooldowns.sweep(clock.tick);
    tracing::debug!(remaining = cooldowns.len(), "cooldown sweep");
}
