use std::os::raw::{c_double, c_int};
use std::ptr;

use super::window::window_callbacks;
use super::Glfw;
use crate::callbacks::{
    CharCallback, CharModsCallback, CursorEnterCallback, CursorPosCallback, DropCallback, KeyCallback,
    MouseButtonCallback, ScrollCallback,
};
use crate::error::{Error, Result};
use crate::ffi::GLFW_TRUE;
use crate::handle::{Cursor, Window};
use crate::marshal;
use crate::types::{Action, CursorMode, InputMode, Key, MouseButton, PixelImage, StandardCursor};

window_callbacks! {
    /// Physical key events with the platform scancode.
    set_key_callback => key: KeyCallback, set_key_callback, key as GLFWkeyfun;
    /// Unicode text input.
    set_char_callback => char: CharCallback, set_char_callback, char_input as GLFWcharfun;
    set_char_mods_callback => char_mods: CharModsCallback, set_char_mods_callback, char_mods as GLFWcharmodsfun;
    set_mouse_button_callback => mouse_button: MouseButtonCallback, set_mouse_button_callback, mouse_button as GLFWmousebuttonfun;
    /// Cursor position relative to the client area's top-left corner.
    set_cursor_pos_callback => cursor_pos: CursorPosCallback, set_cursor_pos_callback, cursor_pos as GLFWcursorposfun;
    set_cursor_enter_callback => cursor_enter: CursorEnterCallback, set_cursor_enter_callback, cursor_enter as GLFWcursorenterfun;
    set_scroll_callback => scroll: ScrollCallback, set_scroll_callback, scroll as GLFWscrollfun;
    /// Paths dropped onto the window, copied before the closure runs.
    set_drop_callback => drop: DropCallback, set_drop_callback, file_drop as GLFWdropfun;
}

impl Glfw {
    pub fn input_mode(&self, window: Window, mode: InputMode) -> Result<i32> {
        self.with_window(window, |c, raw| unsafe { (c.get_input_mode)(raw, mode.to_raw()) })
    }

    pub fn set_input_mode(&self, window: Window, mode: InputMode, value: i32) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.set_input_mode)(raw, mode.to_raw(), value) })
    }

    pub fn cursor_mode(&self, window: Window) -> Result<CursorMode> {
        let raw = self.input_mode(window, InputMode::Cursor)?;
        Ok(CursorMode::from_raw(raw).unwrap_or(CursorMode::Normal))
    }

    pub fn set_cursor_mode(&self, window: Window, mode: CursorMode) -> Result<()> {
        self.set_input_mode(window, InputMode::Cursor, mode.to_raw())
    }

    pub fn set_sticky_keys(&self, window: Window, enabled: bool) -> Result<()> {
        self.set_input_mode(window, InputMode::StickyKeys, c_int::from(enabled))
    }

    pub fn raw_mouse_motion_supported(&self) -> Result<bool> {
        self.call(|c| unsafe { (c.raw_mouse_motion_supported)() == GLFW_TRUE })
    }

    /// Only has an effect while the cursor is disabled.
    pub fn set_raw_mouse_motion(&self, window: Window, enabled: bool) -> Result<()> {
        self.set_input_mode(window, InputMode::RawMouseMotion, c_int::from(enabled))
    }

    /// Layout-specific name of a printable key. `key` wins over `scancode`
    /// unless it is `None` or [`Key::Unknown`].
    pub fn key_name(&self, key: Option<Key>, scancode: i32) -> Result<Option<String>> {
        let key = key.unwrap_or(Key::Unknown);
        self.call(|c| unsafe { marshal::decode((c.get_key_name)(key.to_raw(), scancode)) })
    }

    pub fn key_scancode(&self, key: Key) -> Result<i32> {
        self.call(|c| unsafe { (c.get_key_scancode)(key.to_raw()) })
    }

    /// Last reported state of `key`. Never reports [`Action::Repeat`].
    pub fn key(&self, window: Window, key: Key) -> Result<Action> {
        self.with_window(window, |c, raw| unsafe {
            Action::from_raw((c.get_key)(raw, key.to_raw())).unwrap_or(Action::Release)
        })
    }

    pub fn mouse_button(&self, window: Window, button: MouseButton) -> Result<Action> {
        self.with_window(window, |c, raw| unsafe {
            Action::from_raw((c.get_mouse_button)(raw, button.to_raw())).unwrap_or(Action::Release)
        })
    }

    pub fn cursor_pos(&self, window: Window) -> Result<(f64, f64)> {
        self.with_window(window, |c, raw| {
            let (mut x, mut y): (c_double, c_double) = (0.0, 0.0);
            unsafe { (c.get_cursor_pos)(raw, &mut x, &mut y) };
            (x, y)
        })
    }

    pub fn set_cursor_pos(&self, window: Window, x: f64, y: f64) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.set_cursor_pos)(raw, x, y) })
    }

    /// Creates a cursor from an RGBA image with the hotspot at `(xhot, yhot)`.
    pub fn create_cursor(&self, image: &PixelImage, xhot: i32, yhot: i32) -> Result<Cursor> {
        let raw_image = image.as_raw();
        let raw = self.call(|c| unsafe { (c.create_cursor)(&raw_image, xhot, yhot) })?;
        self.track_cursor(Cursor::from_raw(raw))
    }

    pub fn create_standard_cursor(&self, shape: StandardCursor) -> Result<Cursor> {
        let raw = self.call(|c| unsafe { (c.create_standard_cursor)(shape.to_raw()) })?;
        self.track_cursor(Cursor::from_raw(raw))
    }

    fn track_cursor(&self, cursor: Cursor) -> Result<Cursor> {
        let cursor = cursor.non_null().ok_or(Error::CreationFailed)?;
        self.shared.registry.borrow_mut().insert_cursor(cursor);
        Ok(cursor)
    }

    /// Destroys `cursor`; windows using it revert to the default arrow.
    pub fn destroy_cursor(&self, cursor: Cursor) -> Result<()> {
        self.ensure_initialized()?;
        self.shared.registry.borrow_mut().remove_cursor(cursor)?;
        self.native(|c| unsafe { (c.destroy_cursor)(cursor.as_ptr()) })
    }

    /// Sets the cursor shown over `window`. [`Cursor::NONE`] restores the default arrow.
    pub fn set_cursor(&self, window: Window, cursor: Cursor) -> Result<()> {
        self.ensure_initialized()?;
        self.shared.registry.borrow().check_cursor(cursor)?;
        self.with_window(window, |c, raw| unsafe { (c.set_cursor)(raw, cursor.as_ptr()) })
    }

    pub fn set_clipboard_string(&self, text: &str) -> Result<()> {
        let text = marshal::encode_utf8(text)?;
        self.call(|c| unsafe { (c.set_clipboard_string)(ptr::null_mut(), text.as_ptr()) })
    }

    /// Clipboard contents as text; empty if the clipboard holds no text.
    pub fn clipboard_string(&self) -> Result<String> {
        self.call(|c| unsafe { marshal::decode_or_empty((c.get_clipboard_string)(ptr::null_mut())) })
    }

    /// Seconds since init, or since the last [`set_time`](Self::set_time).
    pub fn time(&self) -> Result<f64> {
        self.call(|c| unsafe { (c.get_time)() })
    }

    pub fn set_time(&self, seconds: f64) -> Result<()> {
        self.call(|c| unsafe { (c.set_time)(seconds) })
    }

    pub fn timer_value(&self) -> Result<u64> {
        self.call(|c| unsafe { (c.get_timer_value)() })
    }

    /// Ticks per second of [`timer_value`](Self::timer_value).
    pub fn timer_frequency(&self) -> Result<u64> {
        self.call(|c| unsafe { (c.get_timer_frequency)() })
    }
}
