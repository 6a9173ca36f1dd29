//! Scheduling for the decorative paws that walk across the page.
//!
//! Purely presentational. The UI drives it with a clock and a source of
//! uniform random numbers in `[0, 1)`; each paw lives for a fixed time and is
//! then expired.

use serde::Serialize;

/// Delay before the first paw appears.
pub const FIRST_PAW_DELAY_MS: u64 = 3_000;
/// How long a paw stays on screen (one walk across).
pub const PAW_LIFETIME_MS: u64 = 8_000;
/// Spawn interval is `MIN_SPAWN_INTERVAL_MS + random * SPAWN_JITTER_MS`.
pub const MIN_SPAWN_INTERVAL_MS: u64 = 8_000;
pub const SPAWN_JITTER_MS: u64 = 7_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalkDirection {
    LeftToRight,
    RightToLeft,
}

impl WalkDirection {
    pub fn css_class(self) -> &'static str {
        match self {
            WalkDirection::LeftToRight => "paw-walk-ltr",
            WalkDirection::RightToLeft => "paw-walk-rtl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkingPaw {
    pub id: u64,
    pub direction: WalkDirection,
    /// Vertical position, percent of the viewport height (20..80).
    pub top_percent: f64,
    /// Animation start delay in seconds (0..2).
    pub delay_s: f64,
    pub spawned_at_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PawParade {
    paws: Vec<WalkingPaw>,
    next_id: u64,
}

impl PawParade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paws(&self) -> &[WalkingPaw] {
        &self.paws
    }

    /// Add a paw. `random` must yield values in `[0, 1)`.
    pub fn spawn(&mut self, now_ms: u64, mut random: impl FnMut() -> f64) -> &WalkingPaw {
        let direction = if random() > 0.5 {
            WalkDirection::LeftToRight
        } else {
            WalkDirection::RightToLeft
        };
        let paw = WalkingPaw {
            id: self.next_id,
            direction,
            top_percent: 20.0 + random() * 60.0,
            delay_s: random() * 2.0,
            spawned_at_ms: now_ms,
        };
        self.next_id += 1;
        self.paws.push(paw);
        &self.paws[self.paws.len() - 1]
    }

    /// Drop paws whose walk has finished. Returns how many were removed.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.paws.len();
        self.paws
            .retain(|paw| now_ms.saturating_sub(paw.spawned_at_ms) < PAW_LIFETIME_MS);
        before - self.paws.len()
    }

    /// Wait before the next spawn, given one random draw in `[0, 1)`.
    pub fn spawn_interval_ms(random: f64) -> u64 {
        MIN_SPAWN_INTERVAL_MS + (random.clamp(0.0, 1.0) * SPAWN_JITTER_MS as f64) as u64
    }
}
