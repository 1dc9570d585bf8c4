use bevy_ecs::resource::Resource;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Deterministic RNG for the service (ownership-transfer choice).
/// Seed it explicitly in tests to pin the promoted member.
#[derive(Resource)]
pub struct ClanRng {
    pub rng: SmallRng,
    pub seed: u64,
}

impl ClanRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }
}
