use std::cell::Cell;

use glam::Vec2;

/// Pointer offset from the viewport centre.
///
/// The centre is captured once at construction and not refreshed on resize.
#[derive(Debug)]
pub struct PointerTracker {
    half: Vec2,
    offset: Cell<Vec2>,
}

impl PointerTracker {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            half: Vec2::new(viewport_width, viewport_height) * 0.5,
            offset: Cell::new(Vec2::ZERO),
        }
    }

    pub fn on_move(&self, client_x: f32, client_y: f32) {
        self.offset.set(Vec2::new(client_x, client_y) - self.half);
    }

    pub fn offset(&self) -> Vec2 {
        self.offset.get()
    }
}
