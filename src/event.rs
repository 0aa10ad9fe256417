//! Input events delivered by the host, and the interface it implements.

use std::collections::VecDeque;

use crate::geometry::{Rect, Vec2};

/// What a pointer landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Heart,
    Background,
}

impl Target {
    /// Target of a click that was pressed on `self` and released on `other`:
    /// it only lands on the heart when both ends do
    pub fn common(self, other: Target) -> Target {
        if self == Target::Heart && other == Target::Heart {
            Target::Heart
        } else {
            Target::Background
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Global pointer movement
    PointerMove { pos: Vec2 },
    /// Press; only acted on when it lands on the heart
    PointerDown { pos: Vec2, target: Target },
    /// Global release, wherever the pointer ended up
    PointerUp { pos: Vec2 },
    /// Click on the page
    Click { pos: Vec2, target: Target },
}

/// Where things are on screen this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub viewport: Rect,
    /// `None` while the heart is not mounted
    pub heart: Option<Rect>,
}

impl Layout {
    pub fn hit_test(&self, pos: Vec2) -> Target {
        match self.heart {
            Some(heart) if heart.contains(pos) => Target::Heart,
            _ => Target::Background,
        }
    }
}

/// Anything that can hand over the input events received since the last frame
pub trait EventSource {
    fn poll(&mut self, layout: &Layout) -> Vec<InputEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchStage {
    Started,
    Moved,
    Ended,
}

/// Turns raw per-frame button/touch state into ordered page events.
///
/// A press and its release may both show up in the same frame (quick taps,
/// slow frames); both are still emitted, press first.
#[derive(Debug, Default)]
pub struct PointerGestures {
    /// Target under the pointer when the current press started
    press: Option<Target>,
    touch_id: Option<u64>,
    last_mouse: Option<Vec2>,
}

impl PointerGestures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    fn press(&mut self, out: &mut Vec<InputEvent>, layout: &Layout, pos: Vec2) {
        let target = layout.hit_test(pos);
        self.press = Some(target);
        out.push(InputEvent::PointerDown { pos, target });
    }

    fn release(&mut self, out: &mut Vec<InputEvent>, layout: &Layout, pos: Vec2) {
        let Some(pressed_on) = self.press.take() else {
            return;
        };
        out.push(InputEvent::PointerUp { pos });
        out.push(InputEvent::Click {
            pos,
            target: pressed_on.common(layout.hit_test(pos)),
        });
    }

    /// Mouse state for one frame: edge flags plus whether the button is held now.
    pub fn mouse(
        &mut self,
        out: &mut Vec<InputEvent>,
        layout: &Layout,
        pos: Vec2,
        pressed: bool,
        released: bool,
        down: bool,
    ) {
        if self.last_mouse != Some(pos) {
            self.last_mouse = Some(pos);
            out.push(InputEvent::PointerMove { pos });
        }

        // Release ending a press from an earlier frame
        if released && self.press.is_some() {
            self.release(out, layout, pos);
        }
        if pressed {
            self.press(out, layout, pos);
        }
        // Press and release within this frame
        if released && !down {
            self.release(out, layout, pos);
        }
    }

    /// One touch update. Only the first finger drives the pointer.
    pub fn touch(
        &mut self,
        out: &mut Vec<InputEvent>,
        layout: &Layout,
        id: u64,
        stage: TouchStage,
        pos: Vec2,
    ) {
        match stage {
            TouchStage::Started if self.touch_id.is_none() => {
                self.touch_id = Some(id);
                out.push(InputEvent::PointerMove { pos });
                self.press(out, layout, pos);
            }
            TouchStage::Moved if self.touch_id == Some(id) => {
                out.push(InputEvent::PointerMove { pos });
            }
            TouchStage::Ended if self.touch_id == Some(id) => {
                self.touch_id = None;
                self.release(out, layout, pos);
            }
            // Whole tap fell between two frames
            TouchStage::Ended if self.touch_id.is_none() => {
                out.push(InputEvent::PointerMove { pos });
                self.press(out, layout, pos);
                self.release(out, layout, pos);
            }
            _ => {}
        }
    }
}

/// Queue of pre-recorded events, drained on each poll.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) -> &mut Self {
        self.queue.push_back(event);
        self
    }

    /// Queue a full press-and-release at `pos`, targeted via `layout`
    pub fn tap(&mut self, layout: &Layout, pos: Vec2) -> &mut Self {
        let target = layout.hit_test(pos);
        self.push(InputEvent::PointerMove { pos })
            .push(InputEvent::PointerDown { pos, target })
            .push(InputEvent::PointerUp { pos })
            .push(InputEvent::Click { pos, target })
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self, _layout: &Layout) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }
}
