use std::os::raw::{c_float, c_int};

use super::Glfw;
use crate::callbacks::MonitorCallback;
use crate::commands::Commands;
use crate::error::{Error, HandleKind, Result};
use crate::ffi::{self, GLFWmonitor};
use crate::handle::Monitor;
use crate::marshal;
use crate::trampoline;
use crate::types::{GammaRamp, VideoMode, Workarea};

impl Glfw {
    /// Currently connected monitors, primary first.
    pub fn monitors(&self) -> Result<Vec<Monitor>> {
        self.call(|c| {
            let mut count: c_int = 0;
            unsafe {
                let monitors = (c.get_monitors)(&mut count);
                marshal::copy_array(monitors.cast_const(), count)
                    .into_iter()
                    .map(Monitor::from_raw)
                    .collect()
            }
        })
    }

    /// The primary monitor, `None` when no monitor is connected.
    pub fn primary_monitor(&self) -> Result<Option<Monitor>> {
        self.call(|c| unsafe { Monitor::from_raw((c.get_primary_monitor)()).non_null() })
    }

    /// Rejects null handles and monitors that are no longer connected.
    pub(crate) fn check_monitor(&self, monitor: Monitor) -> Result<*mut GLFWmonitor> {
        let raw = monitor.checked()?;
        if self.monitors()?.contains(&monitor) {
            Ok(raw)
        } else {
            Err(Error::UnknownHandle(HandleKind::Monitor))
        }
    }

    fn with_monitor<T>(
        &self,
        monitor: Monitor,
        f: impl FnOnce(&Commands, *mut GLFWmonitor) -> T,
    ) -> Result<T> {
        self.ensure_initialized()?;
        let raw = self.check_monitor(monitor)?;
        self.native(|c| f(c, raw))
    }

    /// Position of the monitor's viewport on the virtual screen.
    pub fn monitor_pos(&self, monitor: Monitor) -> Result<(i32, i32)> {
        self.with_monitor(monitor, |c, raw| {
            let (mut x, mut y) = (0, 0);
            unsafe { (c.get_monitor_pos)(raw, &mut x, &mut y) };
            (x, y)
        })
    }

    /// Area not occupied by task bars and menu bars.
    pub fn monitor_workarea(&self, monitor: Monitor) -> Result<Workarea> {
        self.with_monitor(monitor, |c, raw| {
            let mut area = Workarea::default();
            unsafe {
                (c.get_monitor_workarea)(raw, &mut area.x, &mut area.y, &mut area.width, &mut area.height)
            };
            area
        })
    }

    /// Physical size in millimetres, as reported by the display.
    pub fn monitor_physical_size(&self, monitor: Monitor) -> Result<(i32, i32)> {
        self.with_monitor(monitor, |c, raw| {
            let (mut width, mut height) = (0, 0);
            unsafe { (c.get_monitor_physical_size)(raw, &mut width, &mut height) };
            (width, height)
        })
    }

    pub fn monitor_content_scale(&self, monitor: Monitor) -> Result<(f32, f32)> {
        self.with_monitor(monitor, |c, raw| {
            let (mut x, mut y): (c_float, c_float) = (0.0, 0.0);
            unsafe { (c.get_monitor_content_scale)(raw, &mut x, &mut y) };
            (x, y)
        })
    }

    /// Human-readable monitor name; empty if the platform has none.
    pub fn monitor_name(&self, monitor: Monitor) -> Result<String> {
        self.with_monitor(monitor, |c, raw| unsafe {
            marshal::decode_or_empty((c.get_monitor_name)(raw))
        })
    }

    /// Every video mode the monitor supports, sorted ascending by the platform.
    pub fn video_modes(&self, monitor: Monitor) -> Result<Vec<VideoMode>> {
        self.with_monitor(monitor, |c, raw| {
            let mut count: c_int = 0;
            unsafe { marshal::copy_array((c.get_video_modes)(raw, &mut count), count) }
        })
    }

    /// The current video mode, copied by value.
    pub fn video_mode(&self, monitor: Monitor) -> Result<Option<VideoMode>> {
        self.with_monitor(monitor, |c, raw| unsafe { (c.get_video_mode)(raw).as_ref().copied() })
    }

    /// Generates and applies a gamma ramp for exponent `gamma`.
    pub fn set_gamma(&self, monitor: Monitor, gamma: f32) -> Result<()> {
        self.with_monitor(monitor, |c, raw| unsafe { (c.set_gamma)(raw, gamma) })
    }

    pub fn gamma_ramp(&self, monitor: Monitor) -> Result<GammaRamp> {
        self.with_monitor(monitor, |c, raw| unsafe {
            (c.get_gamma_ramp)(raw)
                .as_ref()
                .map(|ramp| GammaRamp::from_raw(ramp))
                .unwrap_or_default()
        })
    }

    /// Applies `ramp`. The channel arrays are copied by GLFW before this returns.
    pub fn set_gamma_ramp(&self, monitor: Monitor, ramp: &GammaRamp) -> Result<()> {
        let raw_ramp: ffi::GLFWgammaramp = ramp.as_raw();
        self.with_monitor(monitor, |c, raw| unsafe { (c.set_gamma_ramp)(raw, &raw_ramp) })
    }

    /// Registers a closure for monitor connection changes, returning the previous one.
    pub fn set_monitor_callback(
        &self,
        callback: Option<Box<MonitorCallback>>,
    ) -> Result<Option<Box<MonitorCallback>>> {
        self.set_global_callback(|globals| &mut globals.monitor, callback, |c, enable| unsafe {
            (c.set_monitor_callback)(enable.then_some(trampoline::monitor_callback as ffi::GLFWmonitorfun));
        })
    }
}
