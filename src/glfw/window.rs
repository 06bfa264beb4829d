use std::os::raw::{c_float, c_int};
use std::ptr;

use super::Glfw;
use crate::callbacks::{
    FramebufferSizeCallback, WindowCloseCallback, WindowContentScaleCallback, WindowFocusCallback,
    WindowIconifyCallback, WindowMaximizeCallback, WindowPosCallback, WindowRefreshCallback,
    WindowSizeCallback,
};
use crate::config::WindowConfig;
use crate::error::{Error, ErrorCode, NativeError, Result};
use crate::ffi::{self, GLFW_DONT_CARE, GLFW_TRUE};
use crate::handle::{Monitor, Window};
use crate::marshal;
use crate::types::{
    ClientApi, FrameSize, OpenGlProfile, PixelImage, StringHint, Version, WindowAttribute, WindowHint,
};

/// Generates the per-window callback setters.
macro_rules! window_callbacks {
    ($($(#[$doc:meta])* $setter:ident => $slot:ident: $alias:ident, $native:ident, $trampoline:ident as $fnty:ident;)+) => {
        impl super::Glfw {
            $(
                $(#[$doc])*
                pub fn $setter(
                    &self,
                    window: $crate::handle::Window,
                    callback: Option<Box<$alias>>,
                ) -> $crate::error::Result<Option<Box<$alias>>> {
                    self.set_window_callback(window, |slots| &mut slots.$slot, callback, |c, raw, enable| unsafe {
                        (c.$native)(raw, enable.then_some($crate::trampoline::$trampoline as $crate::ffi::$fnty));
                    })
                }
            )+
        }
    };
}

pub(crate) use window_callbacks;

window_callbacks! {
    /// Window moved; position of the client area in screen coordinates.
    set_window_pos_callback => pos: WindowPosCallback, set_window_pos_callback, window_pos as GLFWwindowposfun;
    set_window_size_callback => size: WindowSizeCallback, set_window_size_callback, window_size as GLFWwindowsizefun;
    /// The user asked to close the window. The should-close flag is already set.
    set_window_close_callback => close: WindowCloseCallback, set_window_close_callback, window_close as GLFWwindowclosefun;
    set_window_refresh_callback => refresh: WindowRefreshCallback, set_window_refresh_callback, window_refresh as GLFWwindowrefreshfun;
    set_window_focus_callback => focus: WindowFocusCallback, set_window_focus_callback, window_focus as GLFWwindowfocusfun;
    set_window_iconify_callback => iconify: WindowIconifyCallback, set_window_iconify_callback, window_iconify as GLFWwindowiconifyfun;
    set_window_maximize_callback => maximize: WindowMaximizeCallback, set_window_maximize_callback, window_maximize as GLFWwindowmaximizefun;
    /// Framebuffer resized, in pixels.
    set_framebuffer_size_callback => framebuffer_size: FramebufferSizeCallback, set_framebuffer_size_callback, framebuffer_size as GLFWframebuffersizefun;
    set_window_content_scale_callback => content_scale: WindowContentScaleCallback, set_window_content_scale_callback, window_content_scale as GLFWwindowcontentscalefun;
}

impl Glfw {
    /// Resets every window hint to its default.
    pub fn default_window_hints(&self) -> Result<()> {
        self.call(|c| unsafe { (c.default_window_hints)() })
    }

    pub fn window_hint(&self, hint: WindowHint, value: i32) -> Result<()> {
        self.call(|c| unsafe { (c.window_hint)(hint.to_raw(), value) })
    }

    pub fn window_hint_bool(&self, hint: WindowHint, value: bool) -> Result<()> {
        self.window_hint(hint, c_int::from(value))
    }

    /// String hints are encoded as each hint requires; X11 names must be ASCII.
    pub fn window_hint_string(&self, hint: StringHint, value: &str) -> Result<()> {
        self.ensure_initialized()?;
        let value = marshal::encode(value, hint.encoding())?;
        self.native(|c| unsafe { (c.window_hint_string)(hint.to_raw(), value.as_ptr()) })
    }

    /// Creates a windowed-mode window with the current hints.
    pub fn create_window(&self, width: i32, height: i32, title: &str) -> Result<Window> {
        self.create_window_ext(width, height, title, Monitor::NONE, Window::NONE)
    }

    /// Creates a window, fullscreen on `monitor` unless it is `NONE`, sharing
    /// context objects with `share` unless it is `NONE`.
    pub fn create_window_ext(
        &self,
        width: i32,
        height: i32,
        title: &str,
        monitor: Monitor,
        share: Window,
    ) -> Result<Window> {
        self.ensure_initialized()?;
        let title = marshal::encode_utf8(title)?;
        if !share.is_none() {
            self.shared.registry.borrow().check_window(share)?;
        }
        if !monitor.is_none() {
            self.check_monitor(monitor)?;
        }

        let raw = self.native(|c| unsafe {
            (c.create_window)(width, height, title.as_ptr(), monitor.as_ptr(), share.as_ptr())
        })?;
        let window = Window::from_raw(raw).non_null().ok_or(Error::CreationFailed)?;

        self.shared.registry.borrow_mut().insert_window(window);
        log::debug!("created {:?} ({}x{})", window, width, height);
        Ok(window)
    }

    /// Applies `config` as window hints and creates the window it describes.
    pub fn create_window_from_config(&self, config: &WindowConfig) -> Result<Window> {
        self.default_window_hints()?;
        self.window_hint_bool(WindowHint::Resizable, config.resizable)?;
        self.window_hint_bool(WindowHint::Visible, config.visible)?;
        self.window_hint_bool(WindowHint::Decorated, config.decorated)?;
        self.window_hint_bool(WindowHint::Maximized, config.maximized)?;
        self.window_hint(WindowHint::Samples, config.samples)?;
        self.window_hint(WindowHint::ClientApi, config.client_api.to_raw())?;
        if let Some([major, minor]) = config.context_version {
            self.window_hint(WindowHint::ContextVersionMajor, major)?;
            self.window_hint(WindowHint::ContextVersionMinor, minor)?;
        }
        if let Some(profile) = config.opengl_profile {
            self.window_hint(WindowHint::OpenGlProfile, profile.to_raw())?;
            if profile == OpenGlProfile::Core {
                self.window_hint_bool(WindowHint::OpenGlForwardCompat, true)?;
            }
        }
        if let Some(class_name) = &config.x11_class_name {
            self.window_hint_string(StringHint::X11ClassName, class_name)?;
        }

        let window = self.create_window(config.width, config.height, &config.title)?;

        if config.client_api != ClientApi::NoApi {
            if let Some(interval) = config.swap_interval {
                let setup = self
                    .make_context_current(window)
                    .and_then(|()| self.swap_interval(interval));
                if let Err(err) = setup {
                    if let Err(cleanup) = self.destroy_window(window) {
                        log::warn!("failed to destroy {:?} after setup error: {}", window, cleanup);
                    }
                    return Err(err);
                }
            }
        }
        Ok(window)
    }

    /// Destroys `window` and drops every closure registered for it.
    pub fn destroy_window(&self, window: Window) -> Result<()> {
        self.ensure_initialized()?;
        let callbacks = self.shared.registry.borrow_mut().remove_window(window)?;
        let result = self.native(|c| unsafe { (c.destroy_window)(window.as_ptr()) });
        log::debug!("destroyed {:?}, released {} callback(s)", window, callbacks.active());
        drop(callbacks);
        result
    }

    pub fn window_should_close(&self, window: Window) -> Result<bool> {
        self.with_window(window, |c, raw| unsafe { (c.window_should_close)(raw) == GLFW_TRUE })
    }

    pub fn set_window_should_close(&self, window: Window, value: bool) -> Result<()> {
        self.with_window(window, |c, raw| unsafe {
            (c.set_window_should_close)(raw, c_int::from(value))
        })
    }

    pub fn set_window_title(&self, window: Window, title: &str) -> Result<()> {
        let title = marshal::encode_utf8(title)?;
        self.with_window(window, |c, raw| unsafe { (c.set_window_title)(raw, title.as_ptr()) })
    }

    /// Sets the icon candidates; the platform picks the closest size. An empty
    /// slice restores the default icon.
    pub fn set_window_icon(&self, window: Window, images: &[PixelImage]) -> Result<()> {
        let raw_images: Vec<ffi::GLFWimage> = images.iter().map(PixelImage::as_raw).collect();
        let (count, ptr) = if raw_images.is_empty() {
            (0, ptr::null())
        } else {
            (raw_images.len() as c_int, raw_images.as_ptr())
        };
        self.with_window(window, |c, raw| unsafe { (c.set_window_icon)(raw, count, ptr) })
    }

    pub fn window_pos(&self, window: Window) -> Result<(i32, i32)> {
        self.with_window(window, |c, raw| {
            let (mut x, mut y) = (0, 0);
            unsafe { (c.get_window_pos)(raw, &mut x, &mut y) };
            (x, y)
        })
    }

    pub fn set_window_pos(&self, window: Window, x: i32, y: i32) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.set_window_pos)(raw, x, y) })
    }

    /// Client area size in screen coordinates.
    pub fn window_size(&self, window: Window) -> Result<(i32, i32)> {
        self.with_window(window, |c, raw| {
            let (mut width, mut height) = (0, 0);
            unsafe { (c.get_window_size)(raw, &mut width, &mut height) };
            (width, height)
        })
    }

    pub fn set_window_size(&self, window: Window, width: i32, height: i32) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.set_window_size)(raw, width, height) })
    }

    /// `None` leaves that bound unconstrained.
    pub fn set_window_size_limits(
        &self,
        window: Window,
        min: Option<(i32, i32)>,
        max: Option<(i32, i32)>,
    ) -> Result<()> {
        let (min_w, min_h) = min.unwrap_or((GLFW_DONT_CARE, GLFW_DONT_CARE));
        let (max_w, max_h) = max.unwrap_or((GLFW_DONT_CARE, GLFW_DONT_CARE));
        self.with_window(window, |c, raw| unsafe {
            (c.set_window_size_limits)(raw, min_w, min_h, max_w, max_h)
        })
    }

    /// Locks the aspect ratio to `numer:denom`, or unlocks it with `None`.
    pub fn set_window_aspect_ratio(&self, window: Window, ratio: Option<(i32, i32)>) -> Result<()> {
        let (numer, denom) = ratio.unwrap_or((GLFW_DONT_CARE, GLFW_DONT_CARE));
        self.with_window(window, |c, raw| unsafe {
            (c.set_window_aspect_ratio)(raw, numer, denom)
        })
    }

    /// Framebuffer size in pixels.
    pub fn framebuffer_size(&self, window: Window) -> Result<(i32, i32)> {
        self.with_window(window, |c, raw| {
            let (mut width, mut height) = (0, 0);
            unsafe { (c.get_framebuffer_size)(raw, &mut width, &mut height) };
            (width, height)
        })
    }

    pub fn window_frame_size(&self, window: Window) -> Result<FrameSize> {
        self.with_window(window, |c, raw| {
            let mut frame = FrameSize::default();
            unsafe {
                (c.get_window_frame_size)(
                    raw,
                    &mut frame.left,
                    &mut frame.top,
                    &mut frame.right,
                    &mut frame.bottom,
                )
            };
            frame
        })
    }

    pub fn window_content_scale(&self, window: Window) -> Result<(f32, f32)> {
        self.with_window(window, |c, raw| {
            let (mut x, mut y): (c_float, c_float) = (0.0, 0.0);
            unsafe { (c.get_window_content_scale)(raw, &mut x, &mut y) };
            (x, y)
        })
    }

    pub fn window_opacity(&self, window: Window) -> Result<f32> {
        self.with_window(window, |c, raw| unsafe { (c.get_window_opacity)(raw) })
    }

    /// Opacity is clamped to `0.0..=1.0`.
    pub fn set_window_opacity(&self, window: Window, opacity: f32) -> Result<()> {
        let opacity = opacity.clamp(0.0, 1.0);
        self.with_window(window, |c, raw| unsafe { (c.set_window_opacity)(raw, opacity) })
    }

    pub fn iconify_window(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.iconify_window)(raw) })
    }

    pub fn restore_window(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.restore_window)(raw) })
    }

    pub fn maximize_window(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.maximize_window)(raw) })
    }

    pub fn show_window(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.show_window)(raw) })
    }

    pub fn hide_window(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.hide_window)(raw) })
    }

    pub fn focus_window(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.focus_window)(raw) })
    }

    pub fn request_window_attention(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.request_window_attention)(raw) })
    }

    /// The monitor a fullscreen window is on, `None` in windowed mode.
    pub fn window_monitor(&self, window: Window) -> Result<Option<Monitor>> {
        self.with_window(window, |c, raw| unsafe {
            Monitor::from_raw((c.get_window_monitor)(raw)).non_null()
        })
    }

    /// Switches `window` to fullscreen on `monitor`, or back to windowed mode at
    /// `(x, y)` with `None`. `refresh_rate: None` lets the platform choose.
    pub fn set_window_monitor(
        &self,
        window: Window,
        monitor: Option<Monitor>,
        (x, y): (i32, i32),
        (width, height): (i32, i32),
        refresh_rate: Option<i32>,
    ) -> Result<()> {
        let monitor = monitor.unwrap_or(Monitor::NONE);
        if !monitor.is_none() {
            self.check_monitor(monitor)?;
        }
        let refresh_rate = refresh_rate.unwrap_or(GLFW_DONT_CARE);
        self.with_window(window, |c, raw| unsafe {
            (c.set_window_monitor)(raw, monitor.as_ptr(), x, y, width, height, refresh_rate)
        })
    }

    pub fn window_attrib(&self, window: Window, attrib: WindowAttribute) -> Result<i32> {
        self.with_window(window, |c, raw| unsafe { (c.get_window_attrib)(raw, attrib.to_raw()) })
    }

    pub fn window_attrib_bool(&self, window: Window, attrib: WindowAttribute) -> Result<bool> {
        Ok(self.window_attrib(window, attrib)? == GLFW_TRUE)
    }

    /// Only decorated, resizable, floating, auto-iconify and focus-on-show can be changed.
    pub fn set_window_attrib(&self, window: Window, attrib: WindowAttribute, value: bool) -> Result<()> {
        if !attrib.is_settable() {
            return Err(Error::Native(NativeError::new(
                ErrorCode::InvalidEnum,
                format!("{:?} cannot be changed after creation", attrib),
            )));
        }
        self.with_window(window, |c, raw| unsafe {
            (c.set_window_attrib)(raw, attrib.to_raw(), c_int::from(value))
        })
    }

    pub fn client_api(&self, window: Window) -> Result<ClientApi> {
        let raw = self.window_attrib(window, WindowAttribute::ClientApi)?;
        Ok(ClientApi::from_raw(raw).unwrap_or(ClientApi::NoApi))
    }

    pub fn context_version(&self, window: Window) -> Result<Version> {
        Ok(Version {
            major: self.window_attrib(window, WindowAttribute::ContextVersionMajor)?,
            minor: self.window_attrib(window, WindowAttribute::ContextVersionMinor)?,
            revision: self.window_attrib(window, WindowAttribute::ContextRevision)?,
        })
    }

    pub fn opengl_profile(&self, window: Window) -> Result<OpenGlProfile> {
        let raw = self.window_attrib(window, WindowAttribute::OpenGlProfile)?;
        Ok(OpenGlProfile::from_raw(raw).unwrap_or(OpenGlProfile::Any))
    }

    /// Windows created through this instance that are still alive.
    pub fn windows(&self) -> Vec<Window> {
        self.shared.registry.borrow().windows().collect()
    }
}
