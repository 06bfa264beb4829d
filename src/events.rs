//! Callback-to-queue adapter.
//!
//! [`EventQueue`] registers a closure in every window slot that records the event,
//! so an application can poll and then drain events in a loop instead of handling
//! them inside callbacks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::Result;
use crate::glfw::Glfw;
use crate::handle::Window;
use crate::types::{Action, Key, Modifiers, MouseButton};

/// One window event, as delivered by the native callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Pos(i32, i32),
    Size(i32, i32),
    Close,
    Refresh,
    Focus(bool),
    Iconify(bool),
    Maximize(bool),
    FramebufferSize(i32, i32),
    ContentScale(f32, f32),
    Key(Key, i32, Action, Modifiers),
    Char(char),
    CharModifiers(char, Modifiers),
    MouseButton(MouseButton, Action, Modifiers),
    CursorPos(f64, f64),
    CursorEnter(bool),
    Scroll(f64, f64),
    FileDrop(Vec<PathBuf>),
}

type Events = Rc<RefCell<VecDeque<(Window, WindowEvent)>>>;

/// A FIFO of events from one or more windows, in native delivery order.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Events,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes every callback of `window` into this queue. Closures previously
    /// registered on the window are dropped.
    pub fn attach(&self, glfw: &Glfw, window: Window) -> Result<()> {
        let events = self.events.clone();
        glfw.set_window_pos_callback(
            window,
            Some(Box::new(move |w, x, y| push(&events, w, WindowEvent::Pos(x, y)))),
        )?;
        let events = self.events.clone();
        glfw.set_window_size_callback(
            window,
            Some(Box::new(move |w, x, y| push(&events, w, WindowEvent::Size(x, y)))),
        )?;
        let events = self.events.clone();
        glfw.set_window_close_callback(
            window,
            Some(Box::new(move |w| push(&events, w, WindowEvent::Close))),
        )?;
        let events = self.events.clone();
        glfw.set_window_refresh_callback(
            window,
            Some(Box::new(move |w| push(&events, w, WindowEvent::Refresh))),
        )?;
        let events = self.events.clone();
        glfw.set_window_focus_callback(
            window,
            Some(Box::new(move |w, on| push(&events, w, WindowEvent::Focus(on)))),
        )?;
        let events = self.events.clone();
        glfw.set_window_iconify_callback(
            window,
            Some(Box::new(move |w, on| push(&events, w, WindowEvent::Iconify(on)))),
        )?;
        let events = self.events.clone();
        glfw.set_window_maximize_callback(
            window,
            Some(Box::new(move |w, on| push(&events, w, WindowEvent::Maximize(on)))),
        )?;
        let events = self.events.clone();
        glfw.set_framebuffer_size_callback(
            window,
            Some(Box::new(move |w, x, y| push(&events, w, WindowEvent::FramebufferSize(x, y)))),
        )?;
        let events = self.events.clone();
        glfw.set_window_content_scale_callback(
            window,
            Some(Box::new(move |w, x, y| push(&events, w, WindowEvent::ContentScale(x, y)))),
        )?;
        let events = self.events.clone();
        glfw.set_key_callback(
            window,
            Some(Box::new(move |w, key, scancode, action, mods| push(&events, w, WindowEvent::Key(key, scancode, action, mods)))),
        )?;
        let events = self.events.clone();
        glfw.set_char_callback(
            window,
            Some(Box::new(move |w, ch| push(&events, w, WindowEvent::Char(ch)))),
        )?;
        let events = self.events.clone();
        glfw.set_char_mods_callback(
            window,
            Some(Box::new(move |w, ch, mods| push(&events, w, WindowEvent::CharModifiers(ch, mods)))),
        )?;
        let events = self.events.clone();
        glfw.set_mouse_button_callback(
            window,
            Some(Box::new(move |w, button, action, mods| push(&events, w, WindowEvent::MouseButton(button, action, mods)))),
        )?;
        let events = self.events.clone();
        glfw.set_cursor_pos_callback(
            window,
            Some(Box::new(move |w, x, y| push(&events, w, WindowEvent::CursorPos(x, y)))),
        )?;
        let events = self.events.clone();
        glfw.set_cursor_enter_callback(
            window,
            Some(Box::new(move |w, on| push(&events, w, WindowEvent::CursorEnter(on)))),
        )?;
        let events = self.events.clone();
        glfw.set_scroll_callback(
            window,
            Some(Box::new(move |w, x, y| push(&events, w, WindowEvent::Scroll(x, y)))),
        )?;
        let events = self.events.clone();
        glfw.set_drop_callback(
            window,
            Some(Box::new(move |w, paths| push(&events, w, WindowEvent::FileDrop(paths)))),
        )?;

        log::debug!("attached event queue to {:?}", window);
        Ok(())
    }

    pub fn push(&self, window: Window, event: WindowEvent) {
        push(&self.events, window, event);
    }

    pub fn pop(&self) -> Option<(Window, WindowEvent)> {
        self.events.borrow_mut().pop_front()
    }

    /// Removes and returns every queued event, oldest first.
    pub fn drain(&self) -> Vec<(Window, WindowEvent)> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of registered closures (plus this handle) still feeding the queue.
    pub fn sources(&self) -> usize {
        Rc::strong_count(&self.events)
    }
}

fn push(events: &Events, window: Window, event: WindowEvent) {
    events.borrow_mut().push_back((window, event));
}
