//! Audio feedback for guesses.
//!
//! Sound is best effort. A sink may fail, the session logs the failure and
//! keeps going.

use anyhow::Result;

use crate::types::Clip;

/// Plays feedback clips.
pub trait AudioSink {
    fn play(&mut self, clip: Clip) -> Result<()>;
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, clip: Clip) -> Result<()> {
        (**self).play(clip)
    }
}

/// Sink that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _clip: Clip) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "sound")]
pub use self::rodio_sink::RodioAudio;

#[cfg(feature = "sound")]
mod rodio_sink {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    use anyhow::{anyhow, Context, Result};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use tracing::{debug, warn};

    use super::AudioSink;
    use crate::types::Clip;

    const EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "flac"];

    struct Output {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    /// Plays clips from a sounds directory through the default output device.
    ///
    /// The device is opened on the first `play`, so constructing the sink is
    /// free and works on machines without audio.
    pub struct RodioAudio {
        sounds_dir: PathBuf,
        volume: f32,
        output: Option<Output>,
        /// Set after the device failed to open; no retries.
        unavailable: bool,
    }

    impl RodioAudio {
        pub fn new(sounds_dir: impl Into<PathBuf>, volume: f32) -> Self {
            Self {
                sounds_dir: sounds_dir.into(),
                volume: volume.clamp(0.0, 1.0),
                output: None,
                unavailable: false,
            }
        }

        pub fn sounds_dir(&self) -> &Path {
            &self.sounds_dir
        }

        fn output(&mut self) -> Result<Option<&OutputStreamHandle>> {
            if self.unavailable {
                return Ok(None);
            }
            if self.output.is_none() {
                match OutputStream::try_default() {
                    Ok((stream, handle)) => {
                        debug!("opened audio output");
                        self.output = Some(Output {
                            _stream: stream,
                            handle,
                        });
                    }
                    Err(e) => {
                        self.unavailable = true;
                        return Err(anyhow!("no audio output device: {}", e));
                    }
                }
            }
            Ok(self.output.as_ref().map(|o| &o.handle))
        }

        fn resolve(&self, clip: Clip) -> Option<PathBuf> {
            EXTENSIONS
                .iter()
                .map(|ext| self.sounds_dir.join(format!("{}.{}", clip.file_stem(), ext)))
                .find(|path| path.exists())
        }
    }

    impl AudioSink for RodioAudio {
        fn play(&mut self, clip: Clip) -> Result<()> {
            let Some(path) = self.resolve(clip) else {
                warn!(
                    "Sound file not found: {:?} (tried extensions: {})",
                    self.sounds_dir.join(clip.file_stem()),
                    EXTENSIONS.join(", ")
                );
                return Ok(());
            };

            let volume = self.volume;
            let Some(handle) = self.output()? else {
                return Ok(());
            };

            let file = File::open(&path).with_context(|| format!("opening {:?}", path))?;
            let source = Decoder::new(BufReader::new(file))
                .with_context(|| format!("decoding {:?}", path))?;
            let sink = Sink::try_new(handle)?;
            sink.set_volume(volume);
            sink.append(source);
            sink.detach();

            debug!("Playing sound: {:?} at volume {}", path, volume);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn missing_clip_is_skipped() {
            let dir = std::env::temp_dir().join("higher-lower-no-sounds-here");
            let mut audio = RodioAudio::new(&dir, 2.0);
            assert_eq!(audio.volume, 1.0);
            assert!(audio.resolve(Clip::Correct).is_none());
            // Never touches the output device when the file is missing.
            assert!(audio.play(Clip::Wrong).is_ok());
            assert!(audio.output.is_none());
        }
    }
}
