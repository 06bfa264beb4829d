//! Callback slots and the per-instance registry that owns them.
//!
//! Closures registered through the facade live here for exactly as long as native
//! code may invoke the matching trampoline: window slots until `destroy_window`,
//! everything until `terminate`.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::error::{Error, ErrorCode, HandleKind, Result};
use crate::handle::{Cursor, Monitor, Window};
use crate::types::{Action, ConnectionEvent, Joystick, Key, Modifiers, MouseButton};

pub type ErrorCallback = dyn FnMut(ErrorCode, &str);
pub type MonitorCallback = dyn FnMut(Monitor, ConnectionEvent);
pub type JoystickCallback = dyn FnMut(Joystick, ConnectionEvent);

/// Window position, window size and framebuffer size.
pub type WindowPosCallback = dyn FnMut(Window, i32, i32);
pub type WindowSizeCallback = dyn FnMut(Window, i32, i32);
pub type FramebufferSizeCallback = dyn FnMut(Window, i32, i32);
pub type WindowCloseCallback = dyn FnMut(Window);
pub type WindowRefreshCallback = dyn FnMut(Window);
pub type WindowFocusCallback = dyn FnMut(Window, bool);
pub type WindowIconifyCallback = dyn FnMut(Window, bool);
pub type WindowMaximizeCallback = dyn FnMut(Window, bool);
pub type WindowContentScaleCallback = dyn FnMut(Window, f32, f32);

/// Key, native scancode, action and modifiers.
pub type KeyCallback = dyn FnMut(Window, Key, i32, Action, Modifiers);
pub type CharCallback = dyn FnMut(Window, char);
pub type CharModsCallback = dyn FnMut(Window, char, Modifiers);
pub type MouseButtonCallback = dyn FnMut(Window, MouseButton, Action, Modifiers);
pub type CursorPosCallback = dyn FnMut(Window, f64, f64);
pub type CursorEnterCallback = dyn FnMut(Window, bool);
pub type ScrollCallback = dyn FnMut(Window, f64, f64);
pub type DropCallback = dyn FnMut(Window, Vec<PathBuf>);

/// One registered closure plus the bookkeeping needed for re-entrant dispatch.
///
/// While a closure runs it is moved out of the slot, so the closure itself can
/// borrow the registry again. `touched` records whether the slot was replaced in
/// the meantime, in which case the replacement wins.
pub struct CallbackSlot<F: ?Sized> {
    current: Option<Box<F>>,
    in_flight: bool,
    touched: bool,
}

impl<F: ?Sized> CallbackSlot<F> {
    pub fn new() -> Self {
        Self {
            current: None,
            in_flight: false,
            touched: false,
        }
    }

    /// Whether a closure is registered (including one that is currently running).
    pub fn is_set(&self) -> bool {
        self.current.is_some() || (self.in_flight && !self.touched)
    }

    /// Installs `callback` and returns the previous closure.
    ///
    /// Replacing a slot from inside its own closure returns `None`: the running
    /// closure is dropped once it returns.
    pub fn replace(&mut self, callback: Option<Box<F>>) -> Option<Box<F>> {
        if self.in_flight {
            self.touched = true;
        }
        std::mem::replace(&mut self.current, callback)
    }

    /// Moves the closure out for a dispatch. `None` if empty or already running.
    pub fn begin(&mut self) -> Option<Box<F>> {
        if self.in_flight {
            return None;
        }
        let callback = self.current.take()?;
        self.in_flight = true;
        self.touched = false;
        Some(callback)
    }

    /// Ends a dispatch started by [`begin`](Self::begin).
    ///
    /// Hands the closure back to the caller if the slot was replaced while it ran,
    /// so it can be dropped outside any registry borrow.
    pub fn finish(&mut self, callback: Box<F>) -> Option<Box<F>> {
        self.in_flight = false;
        if std::mem::take(&mut self.touched) {
            Some(callback)
        } else {
            self.current = Some(callback);
            None
        }
    }
}

impl<F: ?Sized> Default for CallbackSlot<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every callback slot of a single window.
#[derive(Default)]
pub struct WindowCallbacks {
    pub pos: CallbackSlot<WindowPosCallback>,
    pub size: CallbackSlot<WindowSizeCallback>,
    pub close: CallbackSlot<WindowCloseCallback>,
    pub refresh: CallbackSlot<WindowRefreshCallback>,
    pub focus: CallbackSlot<WindowFocusCallback>,
    pub iconify: CallbackSlot<WindowIconifyCallback>,
    pub maximize: CallbackSlot<WindowMaximizeCallback>,
    pub framebuffer_size: CallbackSlot<FramebufferSizeCallback>,
    pub content_scale: CallbackSlot<WindowContentScaleCallback>,
    pub key: CallbackSlot<KeyCallback>,
    pub char: CallbackSlot<CharCallback>,
    pub char_mods: CallbackSlot<CharModsCallback>,
    pub mouse_button: CallbackSlot<MouseButtonCallback>,
    pub cursor_pos: CallbackSlot<CursorPosCallback>,
    pub cursor_enter: CallbackSlot<CursorEnterCallback>,
    pub scroll: CallbackSlot<ScrollCallback>,
    pub drop: CallbackSlot<DropCallback>,
}

impl WindowCallbacks {
    /// Number of occupied slots.
    pub fn active(&self) -> usize {
        [
            self.pos.is_set(),
            self.size.is_set(),
            self.close.is_set(),
            self.refresh.is_set(),
            self.focus.is_set(),
            self.iconify.is_set(),
            self.maximize.is_set(),
            self.framebuffer_size.is_set(),
            self.content_scale.is_set(),
            self.key.is_set(),
            self.char.is_set(),
            self.char_mods.is_set(),
            self.mouse_button.is_set(),
            self.cursor_pos.is_set(),
            self.cursor_enter.is_set(),
            self.scroll.is_set(),
            self.drop.is_set(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

/// Library-wide callbacks.
#[derive(Default)]
pub struct GlobalCallbacks {
    pub error: CallbackSlot<ErrorCallback>,
    pub monitor: CallbackSlot<MonitorCallback>,
    pub joystick: CallbackSlot<JoystickCallback>,
}

/// Live handles created through one `Glfw` instance, and their callbacks.
#[derive(Default)]
pub struct Registry {
    windows: HashMap<Window, WindowCallbacks>,
    cursors: HashSet<Cursor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_window(&mut self, window: Window) {
        self.windows.insert(window, WindowCallbacks::default());
    }

    /// Forgets `window`, handing back its slots so they can be dropped unborrowed.
    pub fn remove_window(&mut self, window: Window) -> Result<WindowCallbacks> {
        window.checked()?;
        self.windows
            .remove(&window)
            .ok_or(Error::UnknownHandle(HandleKind::Window))
    }

    pub fn contains_window(&self, window: Window) -> bool {
        self.windows.contains_key(&window)
    }

    /// Validates `window` against the live set.
    pub fn check_window(&self, window: Window) -> Result<()> {
        window.checked()?;
        if self.contains_window(window) {
            Ok(())
        } else {
            Err(Error::UnknownHandle(HandleKind::Window))
        }
    }

    pub fn window_mut(&mut self, window: Window) -> Result<&mut WindowCallbacks> {
        window.checked()?;
        self.windows
            .get_mut(&window)
            .ok_or(Error::UnknownHandle(HandleKind::Window))
    }

    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        self.windows.keys().copied()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn insert_cursor(&mut self, cursor: Cursor) {
        self.cursors.insert(cursor);
    }

    pub fn remove_cursor(&mut self, cursor: Cursor) -> Result<()> {
        cursor.checked()?;
        if self.cursors.remove(&cursor) {
            Ok(())
        } else {
            Err(Error::UnknownHandle(HandleKind::Cursor))
        }
    }

    /// Validates `cursor`; the null cursor is accepted and means the default arrow.
    pub fn check_cursor(&self, cursor: Cursor) -> Result<()> {
        if cursor.is_none() || self.cursors.contains(&cursor) {
            Ok(())
        } else {
            Err(Error::UnknownHandle(HandleKind::Cursor))
        }
    }

    pub fn cursors(&self) -> impl Iterator<Item = Cursor> + '_ {
        self.cursors.iter().copied()
    }

    pub fn cursor_count(&self) -> usize {
        self.cursors.len()
    }

    /// Empties the registry, returning every window's slots for dropping.
    pub fn clear(&mut self) -> Vec<WindowCallbacks> {
        self.cursors.clear();
        self.windows.drain().map(|(_, callbacks)| callbacks).collect()
    }
}
