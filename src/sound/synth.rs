//! Parameters of the ambient drone.

use std::time::Duration;

use rand::Rng;

/// C3, G3, C4, E4.
pub const DRONE_FREQUENCIES: [f32; 4] = [130.81, 196.00, 261.63, 329.63];
/// Each oscillator is detuned by a random amount within this many cents.
pub const MAX_DETUNE_CENTS: f32 = 5.0;
/// Master gain once faded in.
pub const GAIN: f32 = 0.15;
pub const FADE_IN: Duration = Duration::from_secs(2);
pub const FADE_OUT: Duration = Duration::from_secs(1);
pub const SAMPLE_RATE: u32 = 48_000;

/// Shifts `frequency` by `cents` (1/100 of a semitone).
pub fn detune(frequency: f32, cents: f32) -> f32 {
    frequency * 2f32.powf(cents / 1200.0)
}

/// Oscillator frequencies with a fresh random detune each.
pub fn detuned_frequencies<R: Rng>(rng: &mut R) -> [f32; 4] {
    DRONE_FREQUENCIES.map(|f| detune(f, rng.gen_range(-MAX_DETUNE_CENTS..MAX_DETUNE_CENTS)))
}

/// Linear fade from `from` to silence over [`FADE_OUT`].
#[derive(Debug, Clone, Copy)]
pub struct FadeOut {
    from: f32,
}

impl FadeOut {
    pub fn new(from: f32) -> Self {
        Self { from }
    }

    /// Volume after `elapsed` of fading.
    pub fn volume_at(&self, elapsed: Duration) -> f32 {
        let fraction = elapsed.as_secs_f32() / FADE_OUT.as_secs_f32();
        (self.from * (1.0 - fraction)).max(0.0)
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= FADE_OUT
    }
}
