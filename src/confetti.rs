//! Confetti pieces: randomized at burst time, animated over their lifetime.

use std::time::Duration;

use crate::config::ConfettiConfig;
use crate::geometry::Vec2;
use crate::random::RandomSource;

/// HSL color; saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// One heart-shaped confetti piece. Randomized once, never changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    /// Top-left corner at spawn time
    pub origin: Vec2,
    pub size: f32,
    /// Travel from origin over the full lifetime
    pub end_offset: Vec2,
    /// Degrees
    pub start_rotation: f32,
    pub end_rotation: f32,
    pub start_scale: f32,
    pub duration: Duration,
    pub color: Hsl,
}

impl ConfettiPiece {
    /// 🎉 Random piece bursting out of `click`
    pub fn random(click: Vec2, config: &ConfettiConfig, rng: &mut dyn RandomSource) -> Self {
        let duration = rng.range(1.0, 2.5);
        let size = rng.range(10.0, 25.0);
        let saturation = rng.range(70.0, 100.0).floor();
        let lightness = rng.range(50.0, 80.0).floor();

        Self {
            origin: Vec2::new(click.x - size / 2.0, click.y - size / 2.0),
            size,
            end_offset: Vec2::new(
                (rng.next_f32() - 0.5) * config.spread,
                (rng.next_f32() - 0.5) * config.spread,
            ),
            start_rotation: rng.range(0.0, 360.0),
            end_rotation: (rng.next_f32() - 0.5) * 1080.0,
            start_scale: rng.range(0.5, 1.5),
            duration: Duration::from_secs_f32(duration),
            color: Hsl {
                hue: config.hue,
                saturation,
                lightness,
            },
        }
    }

    /// Center of the piece at lifetime fraction `t`
    pub fn center_at(&self, t: f32) -> Vec2 {
        let half = Vec2::new(self.size / 2.0, self.size / 2.0);
        self.origin + half + self.end_offset * t
    }

    pub fn rotation_at(&self, t: f32) -> f32 {
        self.start_rotation + (self.end_rotation - self.start_rotation) * t
    }

    pub fn scale_at(&self, t: f32) -> f32 {
        self.start_scale * (1.0 - t)
    }
}
