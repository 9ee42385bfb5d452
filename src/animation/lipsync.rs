//! Mouth movement driven by audio amplitude.
//!
//! [`lip_sync`] returns two halves. [`LipSyncInput`] lives with the audio callback: it
//! owns the sample ring and recomputes the smoothed mouth openness whenever samples
//! arrive. [`LipSync`] is the per-tick modifier; it only publishes the latest openness
//! into the face state. The halves share a single atomic scalar, so the tick side never
//! reads the ring and cannot observe a half-written buffer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    animation::modifier::Modifier,
    foundation::error::{FaceError, FaceResult},
    state::face::FaceState,
};

/// Ring size and response shaping for lip-sync.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LipSyncConfig {
    /// Number of samples the RMS window covers.
    pub buffer_length: usize,
    /// Weight kept from the previous openness on each update, in `[0, 1)`.
    pub smoothing: f64,
    /// Amplitude multiplier applied before clamping.
    pub gain: f64,
}

impl Default for LipSyncConfig {
    fn default() -> Self {
        Self {
            buffer_length: 1024,
            smoothing: 0.7,
            gain: 1.0,
        }
    }
}

impl LipSyncConfig {
    /// Reject an empty ring, smoothing outside `[0, 1)` and a negative gain.
    pub fn validate(&self) -> FaceResult<()> {
        if self.buffer_length == 0 {
            return Err(FaceError::config("lip-sync buffer_length must be > 0"));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(FaceError::config("lip-sync smoothing must be in [0, 1)"));
        }
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(FaceError::config("lip-sync gain must be finite and >= 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SharedOpen(AtomicU64);

impl SharedOpen {
    fn store(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Release);
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }
}

/// Build a connected input/modifier pair.
pub fn lip_sync(config: LipSyncConfig) -> FaceResult<(LipSyncInput, LipSync)> {
    config.validate()?;
    let shared = Arc::new(SharedOpen::default());
    shared.store(0.0);
    let input = LipSyncInput {
        ring: vec![0.0; config.buffer_length],
        index: 0,
        open: 0.0,
        config,
        shared: Arc::clone(&shared),
    };
    Ok((input, LipSync { shared }))
}

/// Audio-side half: owns the ring buffer.
#[derive(Debug)]
pub struct LipSyncInput {
    ring: Vec<f32>,
    index: usize,
    open: f64,
    config: LipSyncConfig,
    shared: Arc<SharedOpen>,
}

impl LipSyncInput {
    /// Feed newly captured samples and return the updated openness.
    ///
    /// Non-finite samples reject the whole buffer; the ring is left untouched.
    pub fn push(&mut self, samples: &[f32]) -> FaceResult<f64> {
        if let Some(pos) = samples.iter().position(|s| !s.is_finite()) {
            return Err(FaceError::invalid_input(format!(
                "lip-sync sample {pos} is not finite"
            )));
        }

        let len = self.ring.len();
        for &s in samples {
            self.ring[self.index] = s;
            self.index = (self.index + 1) % len;
        }

        let target = (self.rms() * 4.0 * self.config.gain).clamp(0.0, 1.0);
        let k = self.config.smoothing;
        self.open = self.open * k + target * (1.0 - k);
        self.shared.store(self.open);
        Ok(self.open)
    }

    /// Root mean square over the whole ring.
    pub fn rms(&self) -> f64 {
        let sum_sq: f64 = self.ring.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
        (sum_sq / self.ring.len() as f64).sqrt()
    }

    /// Latest smoothed openness.
    pub fn open(&self) -> f64 {
        self.open
    }
}

/// Tick-side half: copies the latest openness into `mouth.open`.
#[derive(Clone, Debug)]
pub struct LipSync {
    shared: Arc<SharedOpen>,
}

impl LipSync {
    /// Latest openness published by the input half.
    pub fn open(&self) -> f64 {
        self.shared.load()
    }
}

impl Modifier for LipSync {
    fn name(&self) -> &str {
        "lip-sync"
    }

    fn apply(&mut self, _elapsed_ms: f64, face: &mut FaceState) -> FaceResult<()> {
        face.mouth.open = self.open();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lipsync.rs"]
mod tests;
