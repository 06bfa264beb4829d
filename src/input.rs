use std::collections::HashSet;

use glam::DVec2;

use crate::events::WindowEvent;
use crate::types::{Action, Key, MouseButton};

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Key(Key),
    Mouse(MouseButton),
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons, in press order
    fn get_down_keys(&self) -> &[Button];
}

/// Tracks held buttons and pointer motion from queued window events
#[derive(Debug, Clone)]
pub struct InputState {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Current cursor position (relative to the client area)
    mouse_position: Option<DVec2>,
    /// Cursor movement since last reset
    mouse_delta: DVec2,
    /// Scroll offset since last reset
    scroll_delta: DVec2,
}

impl InputState {
    /// Create a new InputState with no pressed keys
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            mouse_position: None,
            mouse_delta: DVec2::ZERO,
            scroll_delta: DVec2::ZERO,
        }
    }

    /// Process a WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Key(key, _, action, _) if *key != Key::Unknown => {
                self.apply(Button::Key(*key), *action);
            }
            WindowEvent::MouseButton(button, action, _) => {
                self.apply(Button::Mouse(*button), *action);
            }
            WindowEvent::CursorPos(x, y) => {
                let new_pos = DVec2::new(*x, *y);
                if let Some(old_pos) = self.mouse_position {
                    self.mouse_delta += new_pos - old_pos;
                }
                self.mouse_position = Some(new_pos);
            }
            WindowEvent::CursorEnter(false) => {
                self.mouse_position = None;
            }
            WindowEvent::Scroll(x, y) => {
                self.scroll_delta += DVec2::new(*x, *y);
            }
            // Release events never arrive for keys held while focus is lost
            WindowEvent::Focus(false) => {
                self.pressed_keys.clear();
                self.pressed_vec.clear();
            }
            _ => {}
        }
    }

    fn apply(&mut self, button: Button, action: Action) {
        match action {
            Action::Press => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            }
            Action::Release => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
            Action::Repeat => {}
        }
    }

    /// Reset per-frame state (mouse and scroll deltas)
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = DVec2::ZERO;
        self.scroll_delta = DVec2::ZERO;
    }

    /// Get current cursor position (if inside the window)
    pub fn mouse_position(&self) -> Option<DVec2> {
        self.mouse_position
    }

    /// Get accumulated cursor delta since last reset
    pub fn mouse_delta(&self) -> DVec2 {
        self.mouse_delta
    }

    pub fn scroll_delta(&self) -> DVec2 {
        self.scroll_delta
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for InputState {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}
