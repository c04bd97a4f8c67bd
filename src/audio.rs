//! Audio service handle
//!
//! The simulation never plays sound itself. It emits events; the host maps
//! them onto an `AudioManager`, which applies volumes and music bookkeeping
//! before handing the request to whatever `AudioBackend` the platform provides.

use crate::settings::AudioSettings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump taken
    Jump,
    /// Actor killed by a hazard
    Death,
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Level,
}

/// Platform audio output
pub trait AudioBackend {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32);
    /// Start `track` from the beginning at `volume`, replacing any current track
    fn play_music(&mut self, track: MusicTrack, volume: f32);
    /// Rewind the current track
    fn restart_music(&mut self);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sound {:?} at {:.2}", effect, volume);
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        log::debug!("music {:?} at {:.2}", track, volume);
    }

    fn restart_music(&mut self) {
        log::debug!("music restarted");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    settings: AudioSettings,
    current_track: Option<MusicTrack>,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: AudioSettings) -> Self {
        Self {
            backend: Some(backend),
            settings,
            current_track: None,
        }
    }

    /// Manager with no output; every request is dropped
    pub fn silent(settings: AudioSettings) -> Self {
        log::warn!("No audio backend - audio disabled");
        Self {
            backend: None,
            settings,
            current_track: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.settings.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    /// Master volume times the clip's own volume; zero when muted
    fn effective_volume(&self, clip_volume: f32) -> f32 {
        if self.settings.muted {
            0.0
        } else {
            self.settings.master_volume * clip_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let clip_volume = match effect {
            SoundEffect::Jump => self.settings.jump_volume,
            SoundEffect::Death => self.settings.death_volume,
        };
        let vol = self.effective_volume(clip_volume);
        if vol <= 0.0 {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.play_sound(effect, vol);
        }
    }

    pub fn play_menu_music(&mut self, restart: bool) {
        self.play_music(MusicTrack::Menu, restart);
    }

    pub fn play_level_music(&mut self, restart: bool) {
        self.play_music(MusicTrack::Level, restart);
    }

    /// Rewind whatever is playing
    pub fn restart_current(&mut self) {
        if self.current_track.is_none() {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.restart_music();
        }
    }

    /// Already playing the same track is a no-op unless `restart` is set
    fn play_music(&mut self, track: MusicTrack, restart: bool) {
        if self.current_track == Some(track) && !restart {
            return;
        }
        let clip_volume = match track {
            MusicTrack::Menu => self.settings.menu_music_volume,
            MusicTrack::Level => self.settings.level_music_volume,
        };
        let vol = self.effective_volume(clip_volume);
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play_music(track, vol);
        self.current_track = Some(track);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Played {
        Sound(SoundEffect, f32),
        Music(MusicTrack, f32),
        Restart,
    }

    /// Backend that records every request
    #[derive(Clone, Default)]
    pub(crate) struct Recorder(pub Rc<RefCell<Vec<Played>>>);

    impl AudioBackend for Recorder {
        fn play_sound(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push(Played::Sound(effect, volume));
        }

        fn play_music(&mut self, track: MusicTrack, volume: f32) {
            self.0.borrow_mut().push(Played::Music(track, volume));
        }

        fn restart_music(&mut self) {
            self.0.borrow_mut().push(Played::Restart);
        }
    }

    #[test]
    fn test_effect_volume_is_master_times_clip() {
        let recorder = Recorder::default();
        let settings = AudioSettings {
            master_volume: 0.5,
            death_volume: 0.5,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Box::new(recorder.clone()), settings);
        audio.play(SoundEffect::Death);
        assert_eq!(
            *recorder.0.borrow(),
            vec![Played::Sound(SoundEffect::Death, 0.25)]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()), AudioSettings::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Jump);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_same_track_not_restarted_unless_asked() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()), AudioSettings::default());
        audio.play_level_music(false);
        audio.play_level_music(false);
        assert_eq!(recorder.0.borrow().len(), 1);

        audio.play_level_music(true);
        assert_eq!(recorder.0.borrow().len(), 2);

        audio.play_menu_music(false);
        assert_eq!(audio.current_track(), Some(MusicTrack::Menu));
        assert_eq!(recorder.0.borrow().len(), 3);
    }

    #[test]
    fn test_silent_manager_drops_everything() {
        let mut audio = AudioManager::silent(AudioSettings::default());
        audio.play(SoundEffect::Jump);
        audio.play_level_music(false);
        audio.restart_current();
        assert_eq!(audio.current_track(), None);
    }

    #[test]
    fn test_master_volume_is_clamped_and_applied() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()), AudioSettings::default());
        audio.set_master_volume(0.5);
        audio.play(SoundEffect::Jump);
        audio.set_master_volume(3.0);
        audio.play(SoundEffect::Jump);
        audio.set_master_volume(-1.0);
        audio.play(SoundEffect::Jump);
        assert_eq!(
            *recorder.0.borrow(),
            vec![
                Played::Sound(SoundEffect::Jump, 0.5),
                Played::Sound(SoundEffect::Jump, 1.0),
            ]
        );
    }

    #[test]
    fn test_restart_current_rewinds_only_when_playing() {
        let recorder = Recorder::default();
        let settings = AudioSettings {
            master_volume: 1.0,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Box::new(recorder.clone()), settings);
        audio.restart_current();
        assert!(recorder.0.borrow().is_empty());

        audio.play_level_music(false);
        audio.restart_current();
        assert_eq!(
            *recorder.0.borrow(),
            vec![Played::Music(MusicTrack::Level, 0.7), Played::Restart]
        );
    }
}
