//! Pointer-driven 3D tilt of the heart.

use crate::geometry::{Rect, Vec2};

/// Convert a pointer position inside `bounds` into `(rotateX, rotateY)` degrees.
///
/// The point is clamped into the bounds first, so the result never exceeds
/// `±strength` on either axis.
pub fn compute_tilt(bounds: Rect, pointer: Vec2, strength: f32) -> Vec2 {
    let p = bounds.clamp_point(pointer);
    Vec2 {
        x: -(p.y - bounds.top - bounds.height / 2.0) / bounds.height * strength,
        y: (p.x - bounds.left - bounds.width / 2.0) / bounds.width * strength,
    }
}

/// 🖱️ Tracks the pointer and turns it into a bounded rotation for the heart
#[derive(Debug, Clone)]
pub struct TiltTracker {
    /// Max rotation in degrees on each axis
    pub strength: f32,
    /// 0 = track across the whole viewport, otherwise around the element
    pub padding: f32,
    pending: Option<Vec2>,
    rotation: Vec2,
}

impl TiltTracker {
    pub fn new(strength: f32, padding: f32) -> Self {
        Self {
            strength,
            padding,
            pending: None,
            rotation: Vec2::ZERO,
        }
    }

    /// Moves within one frame coalesce; only the latest position is kept.
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.pending = Some(pos);
    }

    /// Once-per-frame recompute. Returns true when the rotation changed.
    ///
    /// Without a mounted reference element the pending move is held and the
    /// last rotation stays in place.
    pub fn on_frame(&mut self, reference: Option<Rect>, viewport: Rect) -> bool {
        let Some(pos) = self.pending else {
            return false;
        };
        let Some(reference) = reference else {
            return false;
        };

        let bounds = if self.padding > 0.0 {
            reference.expand(self.padding)
        } else {
            viewport
        };
        if bounds.is_degenerate() {
            return false;
        }

        self.pending = None;
        let rotation = compute_tilt(bounds, pos, self.strength);
        let changed = rotation != self.rotation;
        self.rotation = rotation;
        changed
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    fn heart_box() -> Rect {
        Rect::new(300.0, 200.0, 200.0, 200.0)
    }

    #[test]
    fn center_is_flat() {
        let r = compute_tilt(VIEWPORT, Vec2::new(400.0, 300.0), 20.0);
        assert_eq!(r, Vec2::ZERO);
    }

    #[test]
    fn corners_reach_full_strength() {
        let r = compute_tilt(VIEWPORT, Vec2::new(800.0, 0.0), 20.0);
        assert_eq!(r, Vec2::new(10.0, 10.0));
        let r = compute_tilt(VIEWPORT, Vec2::new(0.0, 600.0), 20.0);
        assert_eq!(r, Vec2::new(-10.0, -10.0));
    }

    #[test]
    fn far_outside_points_stay_bounded() {
        let strength = 25.0;
        for &(x, y) in &[(-1e7, -1e7), (1e7, 3.0), (400.0, 1e9), (-5.0, 1e6)] {
            let r = compute_tilt(VIEWPORT, Vec2::new(x, y), strength);
            assert!(r.x.abs() <= strength && r.y.abs() <= strength, "{r:?}");
        }
    }

    #[test]
    fn moves_coalesce_to_latest() {
        let mut tracker = TiltTracker::new(20.0, 0.0);
        tracker.on_pointer_move(Vec2::new(0.0, 0.0));
        tracker.on_pointer_move(Vec2::new(400.0, 300.0));
        assert!(!tracker.on_frame(Some(heart_box()), VIEWPORT));
        assert_eq!(tracker.rotation(), Vec2::ZERO);

        tracker.on_pointer_move(Vec2::new(800.0, 300.0));
        assert!(tracker.on_frame(Some(heart_box()), VIEWPORT));
        assert_eq!(tracker.rotation(), Vec2::new(0.0, 10.0));
        // nothing new this frame
        assert!(!tracker.on_frame(Some(heart_box()), VIEWPORT));
    }

    #[test]
    fn unmounted_reference_keeps_last_value() {
        let mut tracker = TiltTracker::new(20.0, 0.0);
        tracker.on_pointer_move(Vec2::new(800.0, 0.0));
        tracker.on_frame(Some(heart_box()), VIEWPORT);
        let before = tracker.rotation();

        tracker.on_pointer_move(Vec2::new(0.0, 600.0));
        assert!(!tracker.on_frame(None, VIEWPORT));
        assert_eq!(tracker.rotation(), before);
    }

    #[test]
    fn padding_tracks_around_the_element() {
        let mut tracker = TiltTracker::new(20.0, 50.0);
        // bounds become 250..550 x 150..450
        tracker.on_pointer_move(Vec2::new(550.0, 150.0));
        tracker.on_frame(Some(heart_box()), VIEWPORT);
        assert_eq!(tracker.rotation(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn zero_sized_bounds_are_skipped() {
        let mut tracker = TiltTracker::new(20.0, 0.0);
        tracker.on_pointer_move(Vec2::new(10.0, 10.0));
        assert!(!tracker.on_frame(Some(heart_box()), Rect::default()));
        assert_eq!(tracker.rotation(), Vec2::ZERO);
    }
}
