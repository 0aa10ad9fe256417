//! macroquad drawing of an app snapshot.

use std::f32::consts::{PI, TAU};
use std::time::Duration;

use heart_greeting::app::Snapshot;
use heart_greeting::config::TextConfig;
use heart_greeting::confetti::Hsl;
use heart_greeting::event::Layout;
use heart_greeting::geometry::{Rect as PageRect, Vec2 as PageVec2};
use heart_greeting::heart::{layer_scale, HeartVisual, LAYERS, LAYER_GAP, PATH_LENGTH};
use heart_greeting::stars::{Star, StarGlyph};
use macroquad::color::hsl_to_rgb;
use macroquad::prelude::*;
use tracing::warn;

/// Heart aspect ratio (height / width) of the outline artwork
const HEART_ASPECT: f32 = 430.0 / 500.0;
const OUTLINE_POINTS: usize = 64;
const HEART_HUE: f32 = 340.0;
/// Slide distance of the revealed message, in pixels
const REVEAL_SLIDE: f32 = 25.0;
const REVEAL_FADE_SECS: f32 = 1.2;

fn to_mac_vec2(v: PageVec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn with_alpha(mut color: Color, alpha: f32) -> Color {
    color.a = alpha.clamp(0.0, 1.0);
    color
}

fn hsl(color: Hsl) -> Color {
    hsl_to_rgb(color.hue / 360.0, color.saturation / 100.0, color.lightness / 100.0)
}

/// Where the heart sits this frame
pub fn layout() -> Layout {
    let (w, h) = (screen_width(), screen_height());
    let heart_w = w.min(h) * 0.38;
    let center = PageVec2::new(w / 2.0, h * 0.42);
    Layout {
        viewport: PageRect::new(0.0, 0.0, w, h),
        heart: Some(PageRect::centered(center, heart_w, heart_w * HEART_ASPECT)),
    }
}

/// Closed heart outline fitted into a `width` x `height` box around `center`
fn heart_outline(center: Vec2, width: f32, height: f32, rotation: f32) -> Vec<Vec2> {
    // Classic parametric heart spans x in [-16, 16], y in [-11.7, 17]
    const SPAN_Y: f32 = 28.7;
    const MID_Y: f32 = 2.65;
    let (sin_r, cos_r) = rotation.sin_cos();

    (0..OUTLINE_POINTS)
        .map(|i| {
            let t = i as f32 / OUTLINE_POINTS as f32 * TAU;
            let x = 16.0 * t.sin().powi(3);
            let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
            let local = Vec2::new(x / 32.0 * width, (y - MID_Y) / SPAN_Y * height);
            center + Vec2::new(local.x * cos_r - local.y * sin_r, local.x * sin_r + local.y * cos_r)
        })
        .collect()
}

fn fill_heart(center: Vec2, width: f32, height: f32, rotation: f32, color: Color) {
    let points = heart_outline(center, width, height, rotation);
    for (i, p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        draw_triangle(center, *p, next, color);
    }
}

/// Draw the first `fraction` of the outline
fn stroke_heart(center: Vec2, width: f32, height: f32, fraction: f32, thickness: f32, color: Color) {
    let points = heart_outline(center, width, height, 0.0);
    let segments = (fraction.clamp(0.0, 1.0) * points.len() as f32) as usize;
    for i in 0..segments {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        draw_line(a.x, a.y, b.x, b.y, thickness, color);
    }
}

fn draw_star_shape(center: Vec2, radius: f32, spikes: usize, color: Color) {
    let inner = radius * 0.4;
    let steps = spikes * 2;
    let point = |k: usize| {
        let angle = k as f32 / steps as f32 * TAU - PI / 2.0;
        let r = if k % 2 == 0 { radius } else { inner };
        center + Vec2::new(angle.cos() * r, angle.sin() * r)
    };
    for k in 0..steps {
        draw_triangle(center, point(k), point((k + 1) % steps), color);
    }
}

fn draw_centered_text(text: &str, y: f32, font_size: f32, color: Color) {
    let width = measure_text(text, None, font_size as u16, 1.0).width;
    draw_text(text, (screen_width() - width) / 2.0, y, font_size, color);
}

pub struct Renderer {
    text: TextConfig,
    image: Option<Texture2D>,
}

impl Renderer {
    /// A missing image only costs the picture under the message
    pub async fn load(text: TextConfig) -> Self {
        let mut image = None;
        if let Some(path) = &text.image {
            match load_texture(&path.to_string_lossy()).await {
                Ok(texture) => image = Some(texture),
                Err(e) => warn!(path = %path.display(), "could not load image: {e}"),
            }
        }
        Self { text, image }
    }

    pub fn draw(&self, snap: &Snapshot<'_>, layout: &Layout) {
        clear_background(Color::from_rgba(30, 8, 22, 255));

        self.draw_stars(snap.stars, snap.now);

        if let Some(heart) = layout.heart {
            let visual = snap.heart.visual(snap.tilt);
            self.draw_splashes(snap, heart, &visual);
            self.draw_heart(heart, &visual, snap.tilt);
        }

        draw_centered_text(&self.text.headline, 60.0, 40.0, Color::from_rgba(255, 214, 232, 255));

        if snap.revealed {
            self.draw_message(snap, layout);
        } else {
            self.draw_progress(snap, layout);
        }

        self.draw_confetti(snap);
    }

    fn draw_heart(&self, rect: PageRect, visual: &HeartVisual, tilt: PageVec2) {
        let center = to_mac_vec2(rect.center());
        let (rot_x, rot_y) = (tilt.x.to_radians(), tilt.y.to_radians());
        // Fake perspective: deeper layers slide along the tilt and squash with it
        let depth_shift = |z: f32| Vec2::new(rot_y.sin() * z, -rot_x.sin() * z);
        let squash = Vec2::new(rot_y.cos(), rot_x.cos());

        for i in 0..LAYERS {
            let z = i as f32 * LAYER_GAP;
            let scale = visual.scale * layer_scale(i);
            let depth = 0.6 + 0.4 * i as f32 / LAYERS as f32;
            let color = hsl_to_rgb(HEART_HUE / 360.0, 1.0, visual.lightness / 100.0 * depth * 0.6);
            fill_heart(
                center + depth_shift(z),
                rect.width * scale * squash.x,
                rect.height * scale * squash.y,
                0.0,
                color,
            );
        }

        let top = center + depth_shift((LAYERS + 1) as f32 * LAYER_GAP);
        let stroke_scale = visual.scale * 0.9;
        stroke_heart(
            top,
            rect.width * stroke_scale * squash.x,
            rect.height * stroke_scale * squash.y,
            1.0 - visual.stroke_offset / PATH_LENGTH,
            3.0,
            Color::from_rgba(255, 240, 246, 200),
        );

        // Shine band as a soft highlight inside the top layer
        let shine_x = (1.0 - visual.shine_x * 1.4 + 0.2).clamp(0.15, 0.85);
        let highlight = Vec2::new(
            top.x - rect.width * stroke_scale / 2.0 + shine_x * rect.width * stroke_scale,
            top.y - rect.height * 0.15,
        );
        draw_circle(
            highlight.x,
            highlight.y,
            rect.width * 0.12,
            with_alpha(WHITE, visual.shine_opacity * 0.25),
        );
    }

    fn draw_splashes(&self, snap: &Snapshot<'_>, rect: PageRect, visual: &HeartVisual) {
        let center = to_mac_vec2(rect.center());
        for splash in snap.splashes {
            let t = splash.progress(snap.now);
            let grow = visual.scale * (1.0 + t * 0.6);
            let color = hsl_to_rgb(HEART_HUE / 360.0, 1.0, 0.5 + splash.data.love.min(1.0) * 0.3);
            stroke_heart(
                center,
                rect.width * grow,
                rect.height * grow,
                1.0,
                4.0 * (1.0 - t) + 1.0,
                with_alpha(color, (1.0 - t) * 0.7),
            );
        }
    }

    fn draw_confetti(&self, snap: &Snapshot<'_>) {
        for item in snap.confetti {
            let piece = &item.data;
            let t = item.progress(snap.now);
            let size = piece.size * piece.scale_at(t).max(0.05);
            fill_heart(
                to_mac_vec2(piece.center_at(t)),
                size,
                size * HEART_ASPECT,
                piece.rotation_at(t).to_radians(),
                with_alpha(hsl(piece.color), 1.0 - t * t),
            );
        }
    }

    fn draw_stars(&self, stars: &[Star], now: Duration) {
        let (w, h) = (screen_width(), screen_height());
        for star in stars {
            let elapsed = now.saturating_sub(star.delay).as_secs_f32();
            let phase = elapsed / star.duration.as_secs_f32().max(0.1) * TAU;
            let center = Vec2::new(
                star.position.x / 100.0 * w,
                star.position.y / 100.0 * h + phase.sin() * 10.0,
            );
            let alpha = star.opacity * (0.7 + 0.3 * phase.cos());
            let color = with_alpha(Color::from_rgba(255, 236, 170, 255), alpha);
            match star.glyph {
                StarGlyph::Sparkle => draw_star_shape(center, star.size / 2.0, 4, color),
                StarGlyph::Star => draw_star_shape(center, star.size / 2.0, 5, color),
            }
        }
    }

    fn draw_progress(&self, snap: &Snapshot<'_>, layout: &Layout) {
        let top = layout.heart.map_or(screen_height() * 0.7, |r| r.bottom() + 50.0);
        let pink = Color::from_rgba(255, 120, 170, 255);

        draw_centered_text(&self.text.hint, top, 26.0, Color::from_rgba(255, 220, 235, 230));

        // Bar
        let bar_w = 260.0;
        let bar_x = (screen_width() - bar_w) / 2.0;
        draw_rectangle(bar_x, top + 18.0, bar_w, 10.0, Color::from_rgba(255, 255, 255, 40));
        draw_rectangle(bar_x, top + 18.0, bar_w * snap.progress, 10.0, pink);

        let counter = if snap.remaining > 0 {
            format!(
                "{} toque{} más",
                snap.remaining,
                if snap.remaining > 1 { "s" } else { "" }
            )
        } else {
            "¡Listo!".to_string()
        };
        draw_centered_text(&counter, top + 56.0, 22.0, WHITE);

        // One marker per required click
        let spacing = 34.0;
        let row_x = (screen_width() - spacing * (snap.threshold as f32 - 1.0)) / 2.0;
        for i in 0..snap.threshold {
            let center = Vec2::new(row_x + i as f32 * spacing, top + 84.0);
            if i < snap.click_count {
                fill_heart(center, 22.0, 22.0 * HEART_ASPECT, 0.0, pink);
            } else {
                stroke_heart(center, 22.0, 22.0 * HEART_ASPECT, 1.0, 1.5, WHITE);
            }
        }
    }

    fn draw_message(&self, snap: &Snapshot<'_>, layout: &Layout) {
        let since = snap
            .revealed_at
            .map_or(0.0, |at| snap.now.saturating_sub(at).as_secs_f32());
        let alpha = (since / REVEAL_FADE_SECS).clamp(0.0, 1.0);
        let slide = REVEAL_SLIDE * (1.0 - alpha);
        let mut y = layout.heart.map_or(screen_height() * 0.65, |r| r.bottom() + 50.0) + slide;

        for line in &self.text.message {
            draw_centered_text(line, y, 30.0, with_alpha(Color::from_rgba(255, 228, 240, 255), alpha));
            y += 36.0;
        }

        if let Some(texture) = &self.image {
            let height = (screen_height() - y - 10.0).clamp(0.0, 180.0);
            if height > 0.0 {
                let width = height * texture.width() / texture.height().max(1.0);
                draw_texture_ex(
                    texture,
                    (screen_width() - width) / 2.0,
                    y,
                    with_alpha(WHITE, alpha),
                    DrawTextureParams {
                        dest_size: Some(Vec2::new(width, height)),
                        ..Default::default()
                    },
                );
            }
        }
    }
}
