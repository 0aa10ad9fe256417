//! macroquad input adapter for the frame loop.

use heart_greeting::event::{EventSource, InputEvent, Layout, PointerGestures, TouchStage};
use heart_greeting::geometry::Vec2 as PageVec2;
use macroquad::prelude::*;

fn to_page(v: Vec2) -> PageVec2 {
    PageVec2::new(v.x, v.y)
}

fn stage(phase: TouchPhase) -> TouchStage {
    match phase {
        TouchPhase::Started => TouchStage::Started,
        TouchPhase::Moved | TouchPhase::Stationary => TouchStage::Moved,
        TouchPhase::Ended | TouchPhase::Cancelled => TouchStage::Ended,
    }
}

/// 🖱️ Turns macroquad touch/mouse state into page events, once per frame
pub struct MacroquadInput {
    gestures: PointerGestures,
}

impl MacroquadInput {
    pub fn new() -> Self {
        Self {
            gestures: PointerGestures::new(),
        }
    }
}

impl EventSource for MacroquadInput {
    fn poll(&mut self, layout: &Layout) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let touches = touches();

        for touch in &touches {
            self.gestures.touch(
                &mut events,
                layout,
                touch.id,
                stage(touch.phase),
                to_page(touch.position),
            );
        }

        // Fallback to mouse for desktop
        if touches.is_empty() {
            let (x, y) = mouse_position();
            self.gestures.mouse(
                &mut events,
                layout,
                PageVec2::new(x, y),
                is_mouse_button_pressed(MouseButton::Left),
                is_mouse_button_released(MouseButton::Left),
                is_mouse_button_down(MouseButton::Left),
            );
        }

        events
    }
}
