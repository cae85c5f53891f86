//! Winit input adapter
//!
//! Translates winit window events into [`PointerEvent`]s. Button events carry
//! no position in winit, so the tracker remembers the last cursor position.

use std::time::Duration;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::input::PointerEvent;

#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    position: Vec2,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn translate(&mut self, event: &WindowEvent, time: Duration) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x, position.y, time))
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64, time: Duration) -> PointerEvent {
        self.position = Vec2::new(x as f32, y as f32);
        PointerEvent::Move {
            position: self.position,
            time,
        }
    }

    /// Only the primary button drives rotation.
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        Some(match state {
            ElementState::Pressed => PointerEvent::Down {
                position: self.position,
            },
            ElementState::Released => PointerEvent::Up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_uses_last_cursor_position() {
        let mut tracker = PointerTracker::new();
        tracker.cursor_moved(12.0, 34.0, Duration::ZERO);
        assert_eq!(
            tracker.mouse_input(ElementState::Pressed, MouseButton::Left),
            Some(PointerEvent::Down {
                position: Vec2::new(12.0, 34.0)
            })
        );
        assert_eq!(
            tracker.mouse_input(ElementState::Released, MouseButton::Left),
            Some(PointerEvent::Up)
        );
    }

    #[test]
    fn ignores_secondary_buttons() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.mouse_input(ElementState::Pressed, MouseButton::Right), None);
    }
}
