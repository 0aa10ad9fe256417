//! Ambient twinkling stars, rolled once at mount.

use std::time::Duration;

use crate::geometry::Vec2;
use crate::random::RandomSource;

/// Stagger between consecutive star animations
const STAR_STAGGER_SECS: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarGlyph {
    Sparkle,
    Star,
}

/// ✨ Decorative floating star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Pixels
    pub size: f32,
    /// Percent of the viewport on each axis
    pub position: Vec2,
    pub delay: Duration,
    pub duration: Duration,
    pub opacity: f32,
    pub glyph: StarGlyph,
}

/// Generate `count` stars. Called once at mount; the list never changes.
pub fn generate_stars(count: usize, rng: &mut dyn RandomSource) -> Vec<Star> {
    let stagger_window = count as f32 * STAR_STAGGER_SECS;
    (0..count)
        .map(|_| Star {
            size: rng.range(8.0, 23.0),
            position: Vec2::new(rng.range(0.0, 100.0), rng.range(0.0, 100.0)),
            delay: Duration::from_secs_f32(rng.range(0.0, stagger_window)),
            duration: Duration::from_secs_f32(rng.range(4.0, 8.0)),
            opacity: rng.range(0.1, 0.5),
            glyph: if rng.coin() {
                StarGlyph::Sparkle
            } else {
                StarGlyph::Star
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, StdRandom};

    #[test]
    fn produces_requested_count_within_bounds() {
        let mut rng = StdRandom::seeded(42);
        let stars = generate_stars(12, &mut rng);
        assert_eq!(stars.len(), 12);
        for star in &stars {
            assert!((8.0..=23.0).contains(&star.size));
            assert!((0.0..=100.0).contains(&star.position.x));
            assert!((0.0..=100.0).contains(&star.position.y));
            assert!(star.delay.as_secs_f32() <= 12.0 * STAR_STAGGER_SECS);
            assert!((4.0..=8.0).contains(&star.duration.as_secs_f32()));
            assert!((0.1..=0.5).contains(&star.opacity));
        }
    }

    #[test]
    fn glyph_follows_coin_flip() {
        let mut rng = ScriptedRandom::constant(0.9);
        assert_eq!(generate_stars(1, &mut rng)[0].glyph, StarGlyph::Sparkle);
        let mut rng = ScriptedRandom::constant(0.1);
        assert_eq!(generate_stars(1, &mut rng)[0].glyph, StarGlyph::Star);
    }

    #[test]
    fn empty_when_count_is_zero() {
        let mut rng = ScriptedRandom::constant(0.5);
        assert!(generate_stars(0, &mut rng).is_empty());
    }
}
