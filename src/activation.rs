//! Background click counting and the one-shot message reveal.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::{ActivationConfig, ConfettiConfig};
use crate::confetti::ConfettiPiece;
use crate::event::Target;
use crate::geometry::Vec2;
use crate::perishable::{Perishable, PerishableStore};
use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationState {
    pub click_count: u32,
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click landed on the heart
    Ignored,
    Counted,
    /// Confetti fired; `revealed` is true on the click that crossed the threshold
    Burst { pieces: usize, revealed: bool },
}

/// Counts page clicks and fires the confetti burst / message reveal.
pub struct ActivationCounter {
    click_count: u32,
    revealed_at: Option<Duration>,
    threshold: u32,
    confetti_count: usize,
    repeat_burst: bool,
    confetti_style: ConfettiConfig,
    confetti: PerishableStore<ConfettiPiece>,
}

impl ActivationCounter {
    pub fn new(config: &ActivationConfig, confetti_style: &ConfettiConfig) -> Self {
        Self {
            click_count: 0,
            revealed_at: None,
            threshold: config.clicks_to_activate,
            confetti_count: config.confetti_count,
            repeat_burst: config.repeat_burst,
            confetti_style: confetti_style.clone(),
            confetti: PerishableStore::new(),
        }
    }

    pub fn on_screen_click(
        &mut self,
        now: Duration,
        pos: Vec2,
        target: Target,
        rng: &mut dyn RandomSource,
    ) -> ClickOutcome {
        if target == Target::Heart || self.confetti.is_torn_down() {
            return ClickOutcome::Ignored;
        }

        self.click_count = self.click_count.saturating_add(1);
        debug!(count = self.click_count, threshold = self.threshold, "screen click");

        let crossed = self.click_count == self.threshold;
        if crossed && self.revealed_at.is_none() {
            self.revealed_at = Some(now);
            info!("message revealed");
        }

        let past = self.click_count > self.threshold;
        if !(crossed || (past && self.repeat_burst)) {
            return ClickOutcome::Counted;
        }

        let pieces = self.burst(now, pos, rng);
        ClickOutcome::Burst {
            pieces,
            revealed: crossed,
        }
    }

    /// 🎊 Each piece expires after its own randomized duration
    fn burst(&mut self, now: Duration, pos: Vec2, rng: &mut dyn RandomSource) -> usize {
        let mut added = 0;
        for _ in 0..self.confetti_count {
            let piece = ConfettiPiece::random(pos, &self.confetti_style, rng);
            if self.confetti.add(now, piece.duration, piece).is_some() {
                added += 1;
            }
        }
        info!(pieces = added, x = pos.x, y = pos.y, "confetti burst");
        added
    }

    pub fn advance(&mut self, now: Duration) {
        self.confetti.advance(now);
    }

    pub fn teardown(&mut self) {
        self.confetti.teardown();
    }

    pub fn state(&self) -> ActivationState {
        ActivationState {
            click_count: self.click_count,
            revealed: self.revealed_at.is_some(),
        }
    }

    pub fn revealed_at(&self) -> Option<Duration> {
        self.revealed_at
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Fill of the progress bar, `[0, 1]`
    pub fn progress(&self) -> f32 {
        (self.click_count as f32 / self.threshold.max(1) as f32).min(1.0)
    }

    pub fn remaining(&self) -> u32 {
        self.threshold.saturating_sub(self.click_count)
    }

    /// Whether the `index`-th progress marker is lit
    pub fn is_marker_active(&self, index: u32) -> bool {
        index < self.click_count
    }

    pub fn confetti(&self) -> &[Perishable<ConfettiPiece>] {
        self.confetti.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn counter() -> ActivationCounter {
        ActivationCounter::new(&ActivationConfig::default(), &ConfettiConfig::default())
    }

    fn click(counter: &mut ActivationCounter, target: Target) -> ClickOutcome {
        let mut rng = ScriptedRandom::new(vec![0.2, 0.6, 0.9, 0.4]);
        counter.on_screen_click(ms(0), Vec2::new(50.0, 50.0), target, &mut rng)
    }

    #[test]
    fn fifth_click_reveals_and_bursts() {
        let mut counter = counter();
        for _ in 0..4 {
            assert_eq!(click(&mut counter, Target::Background), ClickOutcome::Counted);
        }
        assert_eq!(
            counter.state(),
            ActivationState { click_count: 4, revealed: false }
        );
        assert!(counter.confetti().is_empty());

        assert_eq!(
            click(&mut counter, Target::Background),
            ClickOutcome::Burst { pieces: 50, revealed: true }
        );
        assert_eq!(
            counter.state(),
            ActivationState { click_count: 5, revealed: true }
        );
        assert_eq!(counter.confetti().len(), 50);
    }

    #[test]
    fn sixth_click_does_not_burst_again() {
        let mut counter = counter();
        for _ in 0..5 {
            click(&mut counter, Target::Background);
        }
        assert_eq!(click(&mut counter, Target::Background), ClickOutcome::Counted);
        assert!(counter.state().revealed);
        assert_eq!(counter.state().click_count, 6);
        assert_eq!(counter.confetti().len(), 50);
    }

    #[test]
    fn repeat_burst_fires_past_threshold() {
        let config = ActivationConfig {
            repeat_burst: true,
            ..ActivationConfig::default()
        };
        let mut counter = ActivationCounter::new(&config, &ConfettiConfig::default());
        for _ in 0..5 {
            click(&mut counter, Target::Background);
        }
        assert_eq!(
            click(&mut counter, Target::Background),
            ClickOutcome::Burst { pieces: 50, revealed: false }
        );
        assert_eq!(counter.confetti().len(), 100);
    }

    #[test]
    fn heart_clicks_never_count() {
        let mut counter = counter();
        for _ in 0..10 {
            assert_eq!(click(&mut counter, Target::Heart), ClickOutcome::Ignored);
        }
        assert_eq!(counter.state().click_count, 0);
    }

    #[test]
    fn confetti_expires_on_its_own_schedule() {
        let mut counter = counter();
        for _ in 0..5 {
            click(&mut counter, Target::Background);
        }
        // every duration lies in [1s, 2.5s)
        counter.advance(ms(999));
        assert_eq!(counter.confetti().len(), 50);
        counter.advance(ms(2_500));
        assert!(counter.confetti().is_empty());
    }

    #[test]
    fn progress_and_markers() {
        let mut counter = counter();
        assert_eq!(counter.remaining(), 5);
        click(&mut counter, Target::Background);
        click(&mut counter, Target::Background);
        assert!((counter.progress() - 0.4).abs() < 1e-6);
        assert_eq!(counter.remaining(), 3);
        assert!(counter.is_marker_active(1));
        assert!(!counter.is_marker_active(2));
        for _ in 0..10 {
            click(&mut counter, Target::Background);
        }
        assert_eq!(counter.progress(), 1.0);
        assert_eq!(counter.remaining(), 0);
    }

    #[test]
    fn teardown_clears_pending_confetti_timers() {
        let mut counter = counter();
        for _ in 0..5 {
            click(&mut counter, Target::Background);
        }
        counter.teardown();
        counter.advance(ms(60_000));
        assert_eq!(counter.confetti().len(), 50);
        assert_eq!(click(&mut counter, Target::Background), ClickOutcome::Ignored);
    }
}
