use std::sync::Arc;

use bevy_ecs::resource::Resource;

use crate::error::EffectError;

/// Host capability for applying the deterrent status effect to a player
/// whose attack was suppressed. Failures are best-effort: callers log and
/// continue, the cancellation itself is never blocked.
pub trait EffectPort: Send + Sync {
    fn apply_deterrent(&self, player: &str) -> Result<(), EffectError>;
}

/// Effect port that does nothing. Default until the host installs its own.
pub struct NoopEffects;

impl EffectPort for NoopEffects {
    fn apply_deterrent(&self, _player: &str) -> Result<(), EffectError> {
        Ok(())
    }
}

/// Resource wrapper around the installed effect port.
#[derive(Resource, Clone)]
pub struct Effects(pub Arc<dyn EffectPort>);

impl Effects {
    pub fn noop() -> Self {
        Self(Arc::new(NoopEffects))
    }
}
