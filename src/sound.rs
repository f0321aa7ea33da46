use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[cfg(feature = "sound")]
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
#[cfg(feature = "sound")]
use std::fs::File;
#[cfg(feature = "sound")]
use std::io::BufReader;

/// Audio sink used by the media player
///
/// Decoding and device routing belong to the implementation; the player
/// only drives transport and volume.
pub trait AudioOutput {
    /// Load a track paused at position zero. Returns its duration if known.
    fn load(&mut self, path: &Path) -> Result<Option<Duration>>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, position: Duration) -> Result<()>;
    fn position(&self) -> Duration;
    /// Linear volume, 0.0 to 1.0
    fn set_volume(&mut self, volume: f32);
    /// True once a loaded track has played to the end
    fn is_finished(&self) -> bool;
}

/// Pick the real device when available, falling back to silence
pub fn open_output(enabled: bool) -> Box<dyn AudioOutput> {
    #[cfg(feature = "sound")]
    if enabled {
        match RodioOutput::new() {
            Ok(output) => return Box::new(output),
            Err(e) => warn!("Audio device unavailable, media playback is silent: {}", e),
        }
    }

    #[cfg(not(feature = "sound"))]
    if enabled {
        warn!("Built without the `sound` feature, media playback is silent");
    }

    Box::new(SilentOutput::new())
}

/// Plays through the default output device
#[cfg(feature = "sound")]
pub struct RodioOutput {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    volume: f32,
}

#[cfg(feature = "sound")]
impl RodioOutput {
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().context("Failed to open default audio output")?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            volume: 1.0,
        })
    }
}

#[cfg(feature = "sound")]
impl AudioOutput for RodioOutput {
    fn load(&mut self, path: &Path) -> Result<Option<Duration>> {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode {:?}", path))?;
        let duration = source.total_duration();

        // A fresh sink per track; a stopped sink keeps its stop flag
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let sink = Sink::try_new(&self.stream_handle).context("Failed to create audio sink")?;
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(source);
        self.sink = Some(sink);

        debug!("Loaded {:?} (duration {:?})", path, duration);
        Ok(duration)
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        match &self.sink {
            Some(sink) => sink
                .try_seek(position)
                .map_err(|e| anyhow::anyhow!("Seek to {:?} failed: {:?}", position, e)),
            None => Ok(()),
        }
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map(|s| s.get_pos()).unwrap_or_default()
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().map(|s| s.empty()).unwrap_or(false)
    }
}

/// Keeps transport bookkeeping without a device. Position advances with the
/// wall clock while "playing" so the UI still behaves.
#[derive(Debug, Default)]
pub struct SilentOutput {
    loaded: bool,
    offset: Duration,
    playing_since: Option<Instant>,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for SilentOutput {
    fn load(&mut self, path: &Path) -> Result<Option<Duration>> {
        if !path.is_file() {
            anyhow::bail!("No such file: {:?}", path);
        }
        self.loaded = true;
        self.offset = Duration::ZERO;
        self.playing_since = None;
        Ok(None)
    }

    fn play(&mut self) {
        if self.loaded && self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.offset = self.position();
        self.playing_since = None;
    }

    fn stop(&mut self) {
        self.loaded = false;
        self.offset = Duration::ZERO;
        self.playing_since = None;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.offset = position;
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
        Ok(())
    }

    fn position(&self) -> Duration {
        self.offset + self.playing_since.map(|t| t.elapsed()).unwrap_or_default()
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn is_finished(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_output_rejects_missing_file() {
        let mut out = SilentOutput::new();
        assert!(out.load(Path::new("/definitely/not/here.mp3")).is_err());
    }

    #[test]
    fn test_silent_output_seek_and_pause() {
        let dir = tempfile::tempdir().unwrap();
        let track = dir.path().join("a.wav");
        std::fs::write(&track, b"RIFF").unwrap();

        let mut out = SilentOutput::new();
        out.load(&track).unwrap();
        out.seek(Duration::from_secs(30)).unwrap();
        out.pause();
        assert_eq!(out.position(), Duration::from_secs(30));

        out.stop();
        assert_eq!(out.position(), Duration::ZERO);
    }
}
