//! Application controller: routes input, advances timers, exposes a snapshot.

use std::time::Duration;

use tracing::{debug, info};

use crate::activation::ActivationCounter;
use crate::config::Config;
use crate::confetti::ConfettiPiece;
use crate::event::{EventSource, InputEvent, Layout, Target};
use crate::geometry::Vec2;
use crate::heart::{Heart, HeartState, Splash};
use crate::perishable::Perishable;
use crate::random::RandomSource;
use crate::stars::{generate_stars, Star};
use crate::tilt::TiltTracker;

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub now: Duration,
    pub tilt: Vec2,
    pub heart: HeartState,
    pub click_count: u32,
    pub threshold: u32,
    pub remaining: u32,
    pub progress: f32,
    pub revealed: bool,
    pub revealed_at: Option<Duration>,
    pub splashes: &'a [Perishable<Splash>],
    pub confetti: &'a [Perishable<ConfettiPiece>],
    pub stars: &'a [Star],
}

pub struct App {
    tilt: TiltTracker,
    heart: Heart,
    activation: ActivationCounter,
    stars: Vec<Star>,
    rng: Box<dyn RandomSource>,
    now: Duration,
    torn_down: bool,
}

impl App {
    /// Mount at time `now`. Stars are rolled here and never again.
    pub fn new(config: &Config, mut rng: Box<dyn RandomSource>, now: Duration) -> Self {
        let stars = generate_stars(config.stars.count, rng.as_mut());
        info!(stars = stars.len(), "mounted");

        Self {
            tilt: TiltTracker::new(config.tilt.strength, config.tilt.padding),
            heart: Heart::new(&config.heart, now),
            activation: ActivationCounter::new(&config.activation, &config.confetti),
            stars,
            rng,
            now,
            torn_down: false,
        }
    }

    /// Apply a single input event at time `now`.
    pub fn dispatch(&mut self, event: InputEvent, now: Duration) {
        if self.torn_down {
            return;
        }
        self.now = self.now.max(now);

        match event {
            InputEvent::PointerMove { pos } => self.tilt.on_pointer_move(pos),
            InputEvent::PointerDown { target, .. } => {
                if target == Target::Heart {
                    self.heart.on_press();
                }
            }
            InputEvent::PointerUp { .. } => {
                let outcome = self.heart.on_release(self.now);
                debug!(?outcome, "release");
            }
            InputEvent::Click { pos, target } => {
                self.activation
                    .on_screen_click(self.now, pos, target, self.rng.as_mut());
            }
        }
    }

    /// One frame: fire timers that fell due since the last frame, then drain
    /// host input in order, then recompute tilt once.
    ///
    /// Input polled this frame arrived after those deadlines, so it applies on top.
    pub fn frame(&mut self, now: Duration, layout: &Layout, source: &mut dyn EventSource) {
        if self.torn_down {
            return;
        }

        self.advance(now);
        for event in source.poll(layout) {
            self.dispatch(event, now);
        }
        self.tilt.on_frame(layout.heart, layout.viewport);
    }

    /// Fire timers due at or before `now` without touching input.
    pub fn advance(&mut self, now: Duration) {
        if self.torn_down {
            return;
        }
        self.now = self.now.max(now);
        self.heart.advance(self.now);
        self.activation.advance(self.now);
    }

    /// Cancel every timer and stop reacting to input.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.heart.teardown();
        self.activation.teardown();
        info!("torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let activation = self.activation.state();
        Snapshot {
            now: self.now,
            tilt: self.tilt.rotation(),
            heart: self.heart.state(),
            click_count: activation.click_count,
            threshold: self.activation.threshold(),
            remaining: self.activation.remaining(),
            progress: self.activation.progress(),
            revealed: activation.revealed,
            revealed_at: self.activation.revealed_at(),
            splashes: self.heart.splashes(),
            confetti: self.activation.confetti(),
            stars: &self.stars,
        }
    }
}
