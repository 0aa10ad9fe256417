//! The pressable heart: love level, heartbeat and splash circles.

use std::f32::consts::PI;
use std::time::Duration;

use tracing::debug;

use crate::config::HeartConfig;
use crate::geometry::Vec2;
use crate::perishable::{ItemId, Perishable, PerishableStore};
use crate::timer::Interval;

/// Length of the heart outline, used for the stroke dash offset
pub const PATH_LENGTH: f32 = 1506.0;
pub const LAYERS: usize = 20;
/// Depth between stacked layers, in pixels
pub const LAYER_GAP: f32 = 2.0;

/// Splash circle left behind by a charging press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splash {
    /// Love level right after the press that spawned it
    pub love: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartState {
    pub love: f32,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// Release without a matching press
    Ignored,
    /// Love was full and dropped back to zero
    Reset,
    /// Love went up and a splash was spawned
    Charged { splash: Option<ItemId> },
}

/// Values the renderer needs, all derived from state and tilt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartVisual {
    /// HSL lightness in percent
    pub lightness: f32,
    pub scale: f32,
    pub stroke_offset: f32,
    /// Horizontal position of the shine band across the heart (0..1-ish)
    pub shine_x: f32,
    pub shine_opacity: f32,
}

impl HeartState {
    pub fn visual(&self, tilt: Vec2) -> HeartVisual {
        HeartVisual {
            lightness: self.love * 80.0 + 20.0,
            scale: 0.8 + self.love * 0.2 - if self.pressed { 0.1 } else { 0.0 },
            stroke_offset: stroke_offset(tilt),
            shine_x: tilt.y / 50.0 + 0.5,
            shine_opacity: tilt.x / 200.0 + 0.5,
        }
    }
}

/// Map the tilt direction onto `[0, PATH_LENGTH]`
pub fn stroke_offset(tilt: Vec2) -> f32 {
    tilt.y.atan2(tilt.x) / PI * (PATH_LENGTH / 2.0) + PATH_LENGTH / 2.0
}

/// Scale of layer `i`; bulges in the middle of the stack
pub fn layer_scale(i: usize) -> f32 {
    (i as f32 / LAYERS as f32 * PI).sin() / 10.0 + 1.0
}

/// ❤️ The pressable heart: love level, press state and its splash circles
pub struct Heart {
    love: f32,
    pressed: bool,
    press_step: f32,
    splash_lifetime: Duration,
    heartbeat: Option<Interval>,
    heartbeat_settle: f32,
    heartbeat_step: f32,
    splashes: PerishableStore<Splash>,
}

impl Heart {
    pub fn new(config: &HeartConfig, now: Duration) -> Self {
        Self {
            love: config.initial_love,
            pressed: false,
            press_step: config.press_step,
            splash_lifetime: config.splash_lifetime(),
            heartbeat: config
                .heartbeat_interval()
                .map(|period| Interval::start(period, now)),
            heartbeat_settle: config.heartbeat_settle,
            heartbeat_step: config.heartbeat_step,
            splashes: PerishableStore::new(),
        }
    }

    pub fn on_press(&mut self) {
        if self.splashes.is_torn_down() {
            return;
        }
        self.pressed = true;
    }

    /// Releases arrive from anywhere on screen; only one that ends a press counts.
    pub fn on_release(&mut self, now: Duration) -> ReleaseOutcome {
        if !std::mem::replace(&mut self.pressed, false) {
            return ReleaseOutcome::Ignored;
        }

        if self.love >= 1.0 {
            self.love = 0.0;
            debug!("love reset");
            return ReleaseOutcome::Reset;
        }

        self.love += self.press_step;
        let splash = self
            .splashes
            .add(now, self.splash_lifetime, Splash { love: self.love });
        debug!(love = self.love, "love charged");
        ReleaseOutcome::Charged { splash }
    }

    /// 💓 Advance heartbeat ticks and expire splashes up to `now`
    pub fn advance(&mut self, now: Duration) {
        if let Some(heartbeat) = self.heartbeat.as_mut() {
            for _ in 0..heartbeat.due(now) {
                self.love = if self.love >= 1.0 {
                    self.heartbeat_settle
                } else {
                    self.love + self.heartbeat_step
                };
            }
        }
        self.splashes.advance(now);
    }

    pub fn teardown(&mut self) {
        if let Some(heartbeat) = self.heartbeat.as_mut() {
            heartbeat.cancel();
        }
        self.splashes.teardown();
        self.pressed = false;
    }

    pub fn state(&self) -> HeartState {
        HeartState {
            love: self.love,
            pressed: self.pressed,
        }
    }

    pub fn splashes(&self) -> &[Perishable<Splash>] {
        self.splashes.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn heart_at(love: f32) -> Heart {
        let config = HeartConfig {
            initial_love: love,
            heartbeat: false,
            ..HeartConfig::default()
        };
        Heart::new(&config, ms(0))
    }

    #[test]
    fn release_when_full_resets() {
        let mut heart = heart_at(1.0);
        heart.on_press();
        assert!(heart.state().pressed);
        assert_eq!(heart.on_release(ms(10)), ReleaseOutcome::Reset);
        assert_eq!(heart.state(), HeartState { love: 0.0, pressed: false });
        assert!(heart.splashes().is_empty());
    }

    #[test]
    fn release_below_full_charges_and_splashes_once() {
        let mut heart = heart_at(0.7);
        heart.on_press();
        let outcome = heart.on_release(ms(10));
        assert!(matches!(outcome, ReleaseOutcome::Charged { splash: Some(_) }));
        assert!((heart.state().love - 1.0).abs() < 1e-6);
        assert_eq!(heart.splashes().len(), 1);
    }

    #[test]
    fn stray_release_is_ignored() {
        let mut heart = heart_at(0.2);
        assert_eq!(heart.on_release(ms(0)), ReleaseOutcome::Ignored);
        heart.on_press();
        heart.on_release(ms(0));
        assert_eq!(heart.on_release(ms(0)), ReleaseOutcome::Ignored);
        assert_eq!(heart.splashes().len(), 1);
    }

    #[test]
    fn splash_fades_after_lifetime() {
        let mut heart = heart_at(0.0);
        heart.on_press();
        heart.on_release(ms(100));
        heart.advance(ms(1_099));
        assert_eq!(heart.splashes().len(), 1);
        heart.advance(ms(1_100));
        assert!(heart.splashes().is_empty());
    }

    #[test]
    fn heartbeat_climbs_then_settles() {
        let config = HeartConfig {
            initial_love: 0.75,
            ..HeartConfig::default()
        };
        let mut heart = Heart::new(&config, ms(0));

        heart.advance(ms(800));
        assert!((heart.state().love - 0.85).abs() < 1e-5);
        heart.advance(ms(2_400));
        assert!((heart.state().love - 1.05).abs() < 1e-5);
        heart.advance(ms(3_200));
        assert_eq!(heart.state().love, 0.5);
    }

    #[test]
    fn heartbeat_from_full_settles() {
        let mut heart = Heart::new(&HeartConfig::default(), ms(0));
        heart.advance(ms(800));
        assert_eq!(heart.state().love, 0.5);
    }

    #[test]
    fn teardown_stops_heartbeat_and_splashes() {
        let mut heart = Heart::new(&HeartConfig::default(), ms(0));
        heart.on_press();
        heart.teardown();
        heart.advance(ms(10_000));
        assert_eq!(heart.state().love, 1.0);
        heart.on_press();
        assert!(!heart.state().pressed);
    }

    #[test]
    fn visual_follows_love_and_press() {
        let state = HeartState { love: 1.0, pressed: true };
        let v = state.visual(Vec2::ZERO);
        assert_eq!(v.lightness, 100.0);
        assert!((v.scale - 0.9).abs() < 1e-6);
        assert_eq!(v.stroke_offset, PATH_LENGTH / 2.0);
    }

    #[test]
    fn stroke_offset_stays_on_path() {
        for &(x, y) in &[(1.0, 0.0), (-1.0, 0.0), (0.0, -1.0), (-3.0, -0.001), (-3.0, 0.001)] {
            let off = stroke_offset(Vec2::new(x, y));
            assert!((0.0..=PATH_LENGTH).contains(&off), "{off}");
        }
    }

    #[test]
    fn middle_layers_bulge() {
        assert_eq!(layer_scale(0), 1.0);
        assert!(layer_scale(LAYERS / 2) > layer_scale(1));
    }
}
