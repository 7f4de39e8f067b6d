//! Simulated live visitor count.

use rand::Rng;

/// Count shown at startup.
pub const INITIAL_VISITORS: u64 = 1240;

/// Random walk of the "live" visitor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorCounter {
    count: u64,
}

impl Default for VisitorCounter {
    fn default() -> Self {
        Self {
            count: INITIAL_VISITORS,
        }
    }
}

impl VisitorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Moves the count by -1, 0 or +1 with equal probability.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> u64 {
        let delta: i64 = rng.gen_range(-1..=1);
        self.count = self.count.saturating_add_signed(delta);
        self.count
    }

    /// Count with thousands separators, e.g. `1,240`.
    pub fn display(&self) -> String {
        let digits = self.count.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}
