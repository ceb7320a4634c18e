//! Fire-and-forget tone playback.

use log::debug;

use crate::constants::*;
use crate::error::Result;
use crate::session::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    pub waveform: Waveform,
}

impl Tone {
    pub fn new(frequency_hz: f32, duration_secs: f32, waveform: Waveform) -> Self {
        Tone { frequency_hz, duration_secs, waveform }
    }

    pub fn sine(frequency_hz: f32, duration_secs: f32) -> Self {
        Tone::new(frequency_hz, duration_secs, Waveform::Sine)
    }

    /// The tone a game event plays, if any.
    pub fn for_event(event: GameEvent) -> Option<Tone> {
        match event {
            GameEvent::Crashed | GameEvent::FuelExhausted => {
                Some(Tone::new(CRASH_TONE_HZ, CRASH_TONE_SECS, Waveform::Square))
            }
            GameEvent::FuelCollected => Some(Tone::sine(FUEL_TONE_HZ, FUEL_TONE_SECS)),
            GameEvent::PackageDelivered => Some(Tone::sine(DELIVERY_TONE_HZ, DELIVERY_TONE_SECS)),
            GameEvent::LevelUp { .. } | GameEvent::Started => None,
        }
    }

    /// Gain `elapsed_secs` into the tone: starts at 0.1 and falls exponentially to
    /// 0.01 at the end.
    #[cfg_attr(not(feature = "audio"), allow(dead_code))]
    pub fn gain_at(&self, elapsed_secs: f32) -> f32 {
        if self.duration_secs <= 0.0 {
            return TONE_END_GAIN;
        }
        let progress = (elapsed_secs / self.duration_secs).clamp(0.0, 1.0);
        TONE_START_GAIN * (TONE_END_GAIN / TONE_START_GAIN).powf(progress)
    }

    /// Unit-amplitude waveform sample at `phase` (radians).
    #[cfg_attr(not(feature = "audio"), allow(dead_code))]
    pub fn sample_at(&self, phase: f32) -> f32 {
        let s = phase.sin();
        match self.waveform {
            Waveform::Sine => s,
            Waveform::Square => {
                if s >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Plays tones without blocking. Overlapping calls overlap.
pub trait ToneGenerator {
    fn play(&self, tone: Tone);
}

/// Logs tones instead of playing them.
#[derive(Debug, Default)]
pub struct MutedTones;

impl ToneGenerator for MutedTones {
    fn play(&self, tone: Tone) {
        debug!(
            "Tone (muted): {} Hz for {} s, {:?}",
            tone.frequency_hz, tone.duration_secs, tone.waveform
        );
    }
}

/// Opens the process-wide tone generator. Without the `audio` feature, or when
/// muted, tones are only logged.
pub fn open_tone_generator(muted: bool) -> Result<Box<dyn ToneGenerator>> {
    if muted {
        return Ok(Box::new(MutedTones));
    }
    open_speaker()
}

#[cfg(feature = "audio")]
fn open_speaker() -> Result<Box<dyn ToneGenerator>> {
    Ok(Box::new(speaker::RodioTones::open()?))
}

#[cfg(not(feature = "audio"))]
fn open_speaker() -> Result<Box<dyn ToneGenerator>> {
    log::warn!("Built without the `audio` feature; tones will only be logged.");
    Ok(Box::new(MutedTones))
}

#[cfg(feature = "audio")]
mod speaker {
    use std::f32::consts::TAU;
    use std::time::Duration;

    use log::{debug, error, info};
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    use super::{Tone, ToneGenerator};
    use crate::error::{GameError, Result};

    const SAMPLE_RATE: u32 = 44_100;

    /// One tone rendered sample by sample, mono.
    #[derive(Debug, Clone)]
    struct ToneSource {
        tone: Tone,
        sample_index: u32,
        total_samples: u32,
        phase: f32,
        phase_step: f32,
    }

    impl ToneSource {
        fn new(tone: Tone) -> Self {
            let total_samples = (tone.duration_secs.max(0.0) * SAMPLE_RATE as f32) as u32;
            ToneSource {
                tone,
                sample_index: 0,
                total_samples,
                phase: 0.0,
                phase_step: TAU * tone.frequency_hz / SAMPLE_RATE as f32,
            }
        }
    }

    impl Iterator for ToneSource {
        type Item = f32;

        fn next(&mut self) -> Option<Self::Item> {
            if self.sample_index >= self.total_samples {
                return None;
            }
            let elapsed = self.sample_index as f32 / SAMPLE_RATE as f32;
            let sample = self.tone.sample_at(self.phase) * self.tone.gain_at(elapsed);

            self.phase += self.phase_step;
            if self.phase >= TAU {
                self.phase -= TAU;
            }
            self.sample_index += 1;
            Some(sample)
        }
    }

    impl Source for ToneSource {
        fn current_frame_len(&self) -> Option<usize> {
            Some((self.total_samples - self.sample_index) as usize)
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            SAMPLE_RATE
        }

        fn total_duration(&self) -> Option<Duration> {
            Some(Duration::from_secs_f32(self.tone.duration_secs.max(0.0)))
        }
    }

    pub struct RodioTones {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioTones {
        pub fn open() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default().map_err(|e| {
                error!("Failed to open audio output: {}", e);
                GameError::Audio(e.to_string())
            })?;
            info!("Audio output opened.");
            Ok(RodioTones { _stream: stream, handle })
        }
    }

    impl ToneGenerator for RodioTones {
        fn play(&self, tone: Tone) {
            let Ok(sink) = Sink::try_new(&self.handle) else {
                debug!("No sink available for tone {:?}", tone);
                return;
            };
            sink.append(ToneSource::new(tone));
            sink.detach();
        }
    }

}
