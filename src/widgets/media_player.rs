//! Media player state (rendering-agnostic)
//!
//! Holds the playlist and transport state. Audio goes through an
//! `AudioOutput`, so decoding and devices stay out of this module.

use crate::core::panel::TransportControl;
use crate::sound::AudioOutput;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

pub struct MediaPlayerState {
    output: Box<dyn AudioOutput>,

    /// Tracks in the order they were opened
    pub playlist: Vec<PathBuf>,

    /// Index into `playlist` of the loaded track
    pub current: Option<usize>,

    pub state: PlaybackState,

    /// 0..=100
    pub volume: u8,

    /// Duration of the loaded track, when the decoder knows it
    pub duration: Option<Duration>,

    pub status_text: String,
}

impl MediaPlayerState {
    pub fn new(output: Box<dyn AudioOutput>, initial_volume: u8) -> Self {
        let mut player = Self {
            output,
            playlist: Vec::new(),
            current: None,
            state: PlaybackState::Stopped,
            volume: initial_volume.min(100),
            duration: None,
            status_text: String::from("Status: Ready"),
        };
        player.apply_volume();
        player
    }

    fn apply_volume(&mut self) {
        self.output.set_volume(f32::from(self.volume) / 100.0);
    }

    pub fn position(&self) -> Duration {
        if self.current.is_none() {
            return Duration::ZERO;
        }
        self.output.position()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current
            .and_then(|idx| self.playlist.get(idx))
            .map(PathBuf::as_path)
    }

    pub fn current_name(&self) -> Option<String> {
        self.current_path().map(display_name)
    }

    /// Add a file to the playlist (or reuse its entry) and start playing it
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if let Some(index) = self.playlist.iter().position(|p| p == path) {
            return self.play_index(index);
        }

        // Load before touching the playlist so a bad file leaves no trace
        self.load_track(path)?;
        self.playlist.push(path.to_path_buf());
        self.current = Some(self.playlist.len() - 1);
        self.start();
        info!("Playing {:?}", path);
        Ok(())
    }

    fn load_track(&mut self, path: &Path) -> Result<()> {
        let duration = self.output.load(path)?;
        self.duration = duration;
        self.apply_volume();
        Ok(())
    }

    fn play_index(&mut self, index: usize) -> Result<()> {
        let path = self.playlist[index].clone();
        self.load_track(&path)?;
        self.current = Some(index);
        self.start();
        info!("Playing {:?}", path);
        Ok(())
    }

    fn start(&mut self) {
        self.output.play();
        self.state = PlaybackState::Playing;
        self.status_text = match self.current_name() {
            Some(name) => format!("Playing: {}", name),
            None => String::from("Playing"),
        };
    }

    /// Jump to a track, logging instead of failing when it won't load
    fn switch_to(&mut self, index: usize) -> bool {
        match self.play_index(index) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to switch track: {:#}", e);
                self.status_text = format!("Failed to play: {}", display_name(&self.playlist[index]));
                false
            }
        }
    }

    /// Advance to the next track when the current one ends
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing || !self.output.is_finished() {
            return false;
        }

        let next = self.current.map(|idx| idx + 1).unwrap_or(0);
        if next < self.playlist.len() {
            debug!("Track finished, advancing to {}", next);
            self.switch_to(next);
        } else {
            debug!("Playlist finished");
            self.output.stop();
            self.state = PlaybackState::Stopped;
            self.status_text = String::from("Stopped");
        }
        true
    }

    pub fn stop(&mut self) {
        self.output.stop();
        self.state = PlaybackState::Stopped;
        self.status_text = String::from("Stopped");
    }
}

impl TransportControl for MediaPlayerState {
    fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                self.output.pause();
                self.state = PlaybackState::Paused;
                self.status_text = String::from("Paused");
            }
            PlaybackState::Paused => self.start(),
            PlaybackState::Stopped => {
                if self.playlist.is_empty() {
                    return;
                }
                let index = self.current.unwrap_or(0);
                self.switch_to(index);
            }
        }
    }

    fn seek_relative(&mut self, secs: i64) {
        if self.current.is_none() || self.state == PlaybackState::Stopped {
            return;
        }

        let now = self.output.position();
        let step = Duration::from_secs(secs.unsigned_abs());
        let mut target = if secs >= 0 {
            now + step
        } else {
            now.saturating_sub(step)
        };
        if let Some(total) = self.duration {
            target = target.min(total);
        }

        if let Err(e) = self.output.seek(target) {
            warn!("{:#}", e);
        }
    }

    fn next_track(&mut self) -> bool {
        match self.current {
            Some(idx) if idx + 1 < self.playlist.len() => self.switch_to(idx + 1),
            _ => false,
        }
    }

    fn previous_track(&mut self) -> bool {
        match self.current {
            Some(idx) if idx > 0 => self.switch_to(idx - 1),
            _ => false,
        }
    }

    fn adjust_volume(&mut self, delta: i32) {
        self.volume = (i32::from(self.volume) + delta).clamp(0, 100) as u8;
        self.apply_volume();
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
