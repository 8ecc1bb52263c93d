//! Background music.
//!
//! [`MusicManager`] keeps the track registry and play/pause/volume state;
//! the actual sound output sits behind [`AudioBackend`]. With the `audio`
//! feature the backend is rodio, otherwise a silent stand-in keeps the same
//! state machine running.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio output: {0}")]
    Output(String),

    #[error("music file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

/// Sound output used by [`MusicManager`].
pub trait AudioBackend {
    /// Start looping `path`, replacing whatever was playing.
    fn play(&mut self, path: &Path, volume: f32) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Backend that produces no sound.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, _path: &Path, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn stop(&mut self) {}
    fn set_volume(&mut self, _volume: f32) {}
}

#[cfg(feature = "audio")]
pub use rodio_backend::RodioBackend;

#[cfg(feature = "audio")]
mod rodio_backend {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::{AudioBackend, AudioError};

    /// Plays through the default output device.
    pub struct RodioBackend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sink: Option<Sink>,
    }

    impl RodioBackend {
        pub fn new() -> Result<Self, AudioError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
                sink: None,
            })
        }
    }

    impl AudioBackend for RodioBackend {
        fn play(&mut self, path: &Path, volume: f32) -> Result<(), AudioError> {
            self.stop();
            let file =
                File::open(path).map_err(|_| AudioError::FileNotFound(path.to_path_buf()))?;
            let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            let sink =
                Sink::try_new(&self.handle).map_err(|e| AudioError::Output(e.to_string()))?;
            sink.set_volume(volume);
            sink.append(source.repeat_infinite());
            self.sink = Some(sink);
            Ok(())
        }

        fn pause(&mut self) {
            if let Some(sink) = &self.sink {
                sink.pause();
            }
        }

        fn resume(&mut self) {
            if let Some(sink) = &self.sink {
                sink.play();
            }
        }

        fn stop(&mut self) {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
        }

        fn set_volume(&mut self, volume: f32) {
            if let Some(sink) = &self.sink {
                sink.set_volume(volume);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MusicManager
// ---------------------------------------------------------------------------

/// Named background tracks plus playback state. Owned by the app shell and
/// disposed when the window closes.
pub struct MusicManager {
    backend: Box<dyn AudioBackend>,
    tracks: BTreeMap<String, PathBuf>,
    current: Option<String>,
    paused: bool,
    volume: f32,
    muted: bool,
    volume_before_mute: f32,
}

impl MusicManager {
    pub fn new(backend: Box<dyn AudioBackend>, volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            backend,
            tracks: BTreeMap::new(),
            current: None,
            paused: false,
            volume,
            muted: false,
            volume_before_mute: volume,
        }
    }

    /// Rodio output when the `audio` feature is on and a device opens,
    /// silence otherwise.
    pub fn with_default_backend(volume: f32) -> Self {
        #[cfg(feature = "audio")]
        let backend: Box<dyn AudioBackend> = match RodioBackend::new() {
            Ok(b) => Box::new(b),
            Err(e) => {
                log::error!("{e}; music disabled");
                Box::new(SilentBackend)
            }
        };
        #[cfg(not(feature = "audio"))]
        let backend: Box<dyn AudioBackend> = {
            log::info!("Built without the `audio` feature; music disabled");
            Box::new(SilentBackend)
        };
        Self::new(backend, volume)
    }

    /// Register a track under `name`. Returns false if the file is missing.
    pub fn load_music(&mut self, name: &str, path: &Path) -> bool {
        if !path.is_file() {
            log::warn!("Music file not found: {}", path.display());
            return false;
        }
        self.tracks.insert(name.to_string(), path.to_path_buf());
        log::info!("Music loaded: {name}");
        true
    }

    /// Play a registered track, stopping the current one.
    pub fn play(&mut self, name: &str) -> bool {
        let Some(path) = self.tracks.get(name) else {
            log::warn!("Music track not found: {name}");
            return false;
        };
        let volume = self.effective_volume();
        match self.backend.play(path, volume) {
            Ok(()) => {
                self.current = Some(name.to_string());
                self.paused = false;
                log::info!("Playing music: {name}");
                true
            }
            Err(e) => {
                log::error!("Failed to play music '{name}': {e}");
                false
            }
        }
    }

    pub fn pause(&mut self) {
        if self.current.is_some() {
            self.backend.pause();
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.current.is_some() {
            self.backend.resume();
            self.paused = false;
        }
    }

    /// Toggle between paused and playing.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn stop(&mut self) {
        if let Some(name) = self.current.take() {
            self.backend.stop();
            self.paused = false;
            log::info!("Music stopped: {name}");
        }
    }

    pub fn stop_all(&mut self) {
        self.backend.stop();
        self.current = None;
        self.paused = false;
    }

    /// Set the volume, clamped to [0, 1]. While muted the new level takes
    /// effect on unmute.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if self.muted {
            self.volume_before_mute = volume;
        } else {
            self.volume = volume;
            self.backend.set_volume(volume);
        }
    }

    pub fn volume(&self) -> f32 {
        if self.muted {
            self.volume_before_mute
        } else {
            self.volume
        }
    }

    pub fn mute(&mut self) {
        if !self.muted {
            self.volume_before_mute = self.volume;
            self.muted = true;
            self.backend.set_volume(0.0);
        }
    }

    pub fn unmute(&mut self) {
        if self.muted {
            self.muted = false;
            self.volume = self.volume_before_mute;
            self.backend.set_volume(self.volume);
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.unmute();
        } else {
            self.mute();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some() && !self.paused
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn remove_track(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) {
            self.stop();
        }
        if self.tracks.remove(name).is_some() {
            log::info!("Track removed: {name}");
        }
    }

    pub fn loaded_tracks(&self) -> Vec<&str> {
        self.tracks.keys().map(String::as_str).collect()
    }

    /// Stop everything and forget all tracks.
    pub fn dispose(&mut self) {
        self.stop_all();
        self.tracks.clear();
        log::info!("Music manager disposed");
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every backend call.
    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, path: &Path, volume: f32) -> Result<(), AudioError> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.0.borrow_mut().push(format!("play {name} {volume}"));
            Ok(())
        }
        fn pause(&mut self) {
            self.0.borrow_mut().push("pause".into());
        }
        fn resume(&mut self) {
            self.0.borrow_mut().push("resume".into());
        }
        fn stop(&mut self) {
            self.0.borrow_mut().push("stop".into());
        }
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().push(format!("volume {volume}"));
        }
    }

    fn manager_with_track() -> (MusicManager, Recorder, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.mp3");
        std::fs::write(&path, b"not really mp3").unwrap();

        let recorder = Recorder::default();
        let mut manager = MusicManager::new(Box::new(recorder.clone()), 0.5);
        assert!(manager.load_music("theme", &path));
        (manager, recorder, dir)
    }

    #[test]
    fn test_missing_file_is_not_loaded() {
        let mut manager = MusicManager::new(Box::new(SilentBackend), 0.5);
        assert!(!manager.load_music("theme", Path::new("/no/such/theme.mp3")));
        assert!(manager.loaded_tracks().is_empty());
        assert!(!manager.play("theme"));
    }

    #[test]
    fn test_play_pause_resume_stop() {
        let (mut manager, recorder, _dir) = manager_with_track();

        assert!(manager.play("theme"));
        assert!(manager.is_playing());
        assert_eq!(manager.current_track(), Some("theme"));

        manager.toggle_pause();
        assert!(!manager.is_playing());
        manager.toggle_pause();
        assert!(manager.is_playing());

        manager.stop();
        assert!(!manager.is_playing());
        assert_eq!(manager.current_track(), None);

        assert_eq!(
            recorder.events(),
            vec!["play theme.mp3 0.5", "pause", "resume", "stop"]
        );
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut manager = MusicManager::new(Box::new(SilentBackend), 2.0);
        assert_eq!(manager.volume(), 1.0);
        manager.set_volume(-1.0);
        assert_eq!(manager.volume(), 0.0);
        manager.set_volume(0.3);
        assert_eq!(manager.volume(), 0.3);
    }

    #[test]
    fn test_mute_restores_previous_volume() {
        let (mut manager, recorder, _dir) = manager_with_track();
        manager.set_volume(0.8);
        manager.mute();
        assert!(manager.is_muted());
        assert!(manager.play("theme"));
        manager.set_volume(0.25);
        manager.unmute();

        assert!(!manager.is_muted());
        assert_eq!(manager.volume(), 0.25);
        assert_eq!(
            recorder.events(),
            vec!["volume 0.8", "volume 0", "play theme.mp3 0", "volume 0.25"]
        );
    }

    #[test]
    fn test_remove_current_track_stops_it() {
        let (mut manager, _recorder, _dir) = manager_with_track();
        manager.play("theme");
        manager.remove_track("theme");

        assert_eq!(manager.current_track(), None);
        assert!(manager.loaded_tracks().is_empty());
    }

    #[test]
    fn test_dispose_clears_everything() {
        let (mut manager, _recorder, _dir) = manager_with_track();
        manager.play("theme");
        manager.dispose();

        assert!(!manager.is_playing());
        assert!(manager.loaded_tracks().is_empty());
    }
}
