use std::ffi::c_void;

use super::Glfw;
use crate::error::Result;
use crate::ffi::GLFW_TRUE;
use crate::handle::Window;
use crate::marshal;

impl Glfw {
    /// Makes the context of `window` current on this thread; [`Window::NONE`] detaches it.
    pub fn make_context_current(&self, window: Window) -> Result<()> {
        if window.is_none() {
            return self.call(|c| unsafe { (c.make_context_current)(window.as_ptr()) });
        }
        self.with_window(window, |c, raw| unsafe { (c.make_context_current)(raw) })
    }

    /// The window whose context is current on this thread.
    pub fn current_context(&self) -> Result<Option<Window>> {
        self.call(|c| unsafe { Window::from_raw((c.get_current_context)()).non_null() })
    }

    pub fn swap_buffers(&self, window: Window) -> Result<()> {
        self.with_window(window, |c, raw| unsafe { (c.swap_buffers)(raw) })
    }

    /// Screen updates to wait for before swapping; needs a current context.
    pub fn swap_interval(&self, interval: i32) -> Result<()> {
        self.call(|c| unsafe { (c.swap_interval)(interval) })
    }

    /// Whether the current context supports an API extension. Names are ASCII.
    pub fn extension_supported(&self, extension: &str) -> Result<bool> {
        self.ensure_initialized()?;
        let extension = marshal::encode_ascii(extension)?;
        self.native(|c| unsafe { (c.extension_supported)(extension.as_ptr()) == GLFW_TRUE })
    }

    /// Address of a client API function for the current context, null if absent.
    pub fn proc_address(&self, name: &str) -> Result<*const c_void> {
        self.ensure_initialized()?;
        let name = marshal::encode_ascii(name)?;
        self.native(|c| unsafe { (c.get_proc_address)(name.as_ptr()) })
    }
}
