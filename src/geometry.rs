//! Screen-space vectors and boxes.

/// Bound `n` to `[min, max]`.
pub fn clamp(min: f32, max: f32, n: f32) -> f32 {
    max.min(min.max(n))
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f32) -> Vec2 {
        Vec2 {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Axis-aligned box in screen pixels (`top`/`left` is the origin corner).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Grow the box by `padding` on all four sides
    pub fn expand(&self, padding: f32) -> Rect {
        Rect {
            left: self.left - padding,
            top: self.top - padding,
            width: self.width + padding * 2.0,
            height: self.height + padding * 2.0,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Pull a point inside the box, axis by axis
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(self.left, self.right(), point.x),
            clamp(self.top, self.bottom(), point.y),
        )
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(0.0, 1.0, -3.0), 0.0);
        assert_eq!(clamp(0.0, 1.0, 3.0), 1.0);
        assert_eq!(clamp(0.0, 1.0, 0.25), 0.25);
    }

    #[test]
    fn expand_grows_every_side() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0).expand(5.0);
        assert_eq!(r, Rect::new(5.0, 15.0, 110.0, 60.0));
    }

    #[test]
    fn clamp_point_pulls_outside_points_to_edges() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(r.clamp_point(Vec2::new(-50.0, 300.0)), Vec2::new(0.0, 100.0));
        assert!(r.contains(r.clamp_point(Vec2::new(1e9, -1e9))));
    }

    #[test]
    fn zero_area_is_degenerate() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}
