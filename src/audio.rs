//! Audio sink boundary
//!
//! The simulation only emits [`GameEvent`]s. This module maps them to sound
//! effects and hands those to whatever backend the presentation layer plugs in.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A tank fired a shell
    Fire,
    /// A shell damaged a tank
    Hit,
    /// An enemy tank blew up
    Explosion,
    /// Player engine loop starts (tank started moving)
    MoveLoopStart,
    /// Player engine loop stops (back to idle rumble)
    MoveLoopStop,
    /// Player tank destroyed
    GameOver,
}

impl SoundEffect {
    /// Base mix level before master/sfx volume
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Fire => 1.0,
            SoundEffect::Hit => 0.6,
            SoundEffect::Explosion => 0.7,
            SoundEffect::MoveLoopStart => 0.4,
            SoundEffect::MoveLoopStop => 0.4,
            SoundEffect::GameOver => 1.0,
        }
    }
}

/// Sound effect for an event, if it makes any noise
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Fired { .. } => Some(SoundEffect::Fire),
        GameEvent::Hit { .. } => Some(SoundEffect::Hit),
        GameEvent::Exploded { .. } => Some(SoundEffect::Explosion),
        GameEvent::EngineMoving { .. } => Some(SoundEffect::MoveLoopStart),
        GameEvent::EngineIdle { .. } => Some(SoundEffect::MoveLoopStop),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        GameEvent::Removed { .. } | GameEvent::EnemySpawned { .. } | GameEvent::Restarted => None,
    }
}

/// Backend that actually makes noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Play every event's sound at its base volume, in order
pub fn play_events<'a>(events: impl IntoIterator<Item = &'a GameEvent>, sink: &mut impl AudioSink) {
    for effect in events.into_iter().filter_map(sound_for) {
        sink.play(effect, effect.base_volume());
    }
}

/// Volume policy in front of an [`AudioSink`]
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the sound for every event that has one, in order
    pub fn play_events<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for effect in events.into_iter().filter_map(sound_for) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Sink that writes every trigger to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} @ {:.2}", effect, volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(sound_for(&GameEvent::Fired { shooter: 1, shell: 2 }), Some(SoundEffect::Fire));
        assert_eq!(sound_for(&GameEvent::Exploded { id: 3 }), Some(SoundEffect::Explosion));
        assert_eq!(sound_for(&GameEvent::Removed { id: 3 }), None);
        assert_eq!(
            sound_for(&GameEvent::EnemySpawned {
                id: 4,
                pos: Vec2::ZERO
            }),
            None
        );
    }

    #[test]
    fn test_play_events_in_order_with_volume() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(0.5);
        let events = [
            GameEvent::Fired { shooter: 1, shell: 9 },
            GameEvent::Restarted,
            GameEvent::Hit {
                target: 2,
                shooter: 1,
                damage: 30.0,
            },
        ];
        audio.play_events(&events);
        let played = &audio.sink().0;
        assert_eq!(played.len(), 2);
        assert_eq!(played[0].0, SoundEffect::Fire);
        assert!((played[0].1 - 0.5).abs() < 1e-6);
        assert_eq!(played[1].0, SoundEffect::Hit);
        assert!((played[1].1 - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_free_play_events_uses_base_volume() {
        let mut sink = Recorder::default();
        let events = vec![GameEvent::Exploded { id: 2 }, GameEvent::GameOver { score: 3 }];
        play_events(&events, &mut sink);
        assert_eq!(sink.0, vec![(SoundEffect::Explosion, 0.7), (SoundEffect::GameOver, 1.0)]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Explosion);
        assert!(audio.sink().0.is_empty());
    }
}
