use bevy_ecs::resource::Resource;

/// Semantic sound cues. The host adapter maps these to engine sound ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Operation rejected.
    Error,
    /// Join request approved.
    Celebrate,
    /// Clan notification / pending-request reminder.
    Chime,
    /// Kick notice and clan chat lines.
    Blip,
    /// Invitation completed.
    Fanfare,
}

/// What gets delivered to a player.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Message(String),
    Sound(SoundCue),
}

/// One queued delivery to an online player.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub player: String,
    pub payload: Payload,
}

/// Queued chat messages and sound cues, drained by the host adapter after
/// each tick. Ordering is preserved per player and overall.
#[derive(Resource, Debug, Default)]
pub struct Outbox {
    deliveries: Vec<Delivery>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&mut self, player: &str, text: impl Into<String>) {
        self.deliveries.push(Delivery {
            player: player.to_string(),
            payload: Payload::Message(text.into()),
        });
    }

    pub fn sound(&mut self, player: &str, cue: SoundCue) {
        self.deliveries.push(Delivery {
            player: player.to_string(),
            payload: Payload::Sound(cue),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.deliveries)
    }

    /// Message texts queued for one player, in order. Leaves the queue
    /// intact; used by assertions.
    pub fn messages_for(&self, player: &str) -> Vec<&str> {
        self.deliveries
            .iter()
            .filter(|d| d.player == player)
            .filter_map(|d| match &d.payload {
                Payload::Message(text) => Some(text.as_str()),
                Payload::Sound(_) => None,
            })
            .collect()
    }

    /// Sound cues queued for one player, in order.
    pub fn sounds_for(&self, player: &str) -> Vec<SoundCue> {
        self.deliveries
            .iter()
            .filter(|d| d.player == player)
            .filter_map(|d| match &d.payload {
                Payload::Sound(cue) => Some(*cue),
                Payload::Message(_) => None,
            })
            .collect()
    }
}
