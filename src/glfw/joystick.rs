use std::os::raw::c_int;

use bytemuck::Zeroable;

use super::Glfw;
use crate::callbacks::JoystickCallback;
use crate::error::{Error, ErrorCode, NativeError, Result};
use crate::ffi::{self, GLFW_TRUE};
use crate::marshal;
use crate::trampoline;
use crate::types::{Action, GamepadState, Joystick, JoystickHats};

impl Glfw {
    pub fn joystick_present(&self, joystick: Joystick) -> Result<bool> {
        self.call(|c| unsafe { (c.joystick_present)(joystick.to_raw()) == GLFW_TRUE })
    }

    /// Axis positions in `-1.0..=1.0`. Empty when the joystick is absent.
    pub fn joystick_axes(&self, joystick: Joystick) -> Result<Vec<f32>> {
        self.call(|c| {
            let mut count: c_int = 0;
            unsafe { marshal::copy_array((c.get_joystick_axes)(joystick.to_raw(), &mut count), count) }
        })
    }

    pub fn joystick_buttons(&self, joystick: Joystick) -> Result<Vec<Action>> {
        self.call(|c| {
            let mut count: c_int = 0;
            let buttons = unsafe {
                marshal::copy_array((c.get_joystick_buttons)(joystick.to_raw(), &mut count), count)
            };
            buttons
                .into_iter()
                .map(|state| Action::from_raw(c_int::from(state)).unwrap_or(Action::Release))
                .collect()
        })
    }

    pub fn joystick_hats(&self, joystick: Joystick) -> Result<Vec<JoystickHats>> {
        self.call(|c| {
            let mut count: c_int = 0;
            let hats = unsafe {
                marshal::copy_array((c.get_joystick_hats)(joystick.to_raw(), &mut count), count)
            };
            hats.into_iter().map(JoystickHats::from_bits).collect()
        })
    }

    /// `None` when the joystick is absent.
    pub fn joystick_name(&self, joystick: Joystick) -> Result<Option<String>> {
        self.call(|c| unsafe { marshal::decode((c.get_joystick_name)(joystick.to_raw())) })
    }

    /// SDL-compatible GUID as a hex string, `None` when the joystick is absent.
    pub fn joystick_guid(&self, joystick: Joystick) -> Result<Option<String>> {
        self.call(|c| unsafe { marshal::decode((c.get_joystick_guid)(joystick.to_raw())) })
    }

    pub fn joystick_is_gamepad(&self, joystick: Joystick) -> Result<bool> {
        self.call(|c| unsafe { (c.joystick_is_gamepad)(joystick.to_raw()) == GLFW_TRUE })
    }

    /// Registers a closure for joystick connection changes, returning the previous one.
    pub fn set_joystick_callback(
        &self,
        callback: Option<Box<JoystickCallback>>,
    ) -> Result<Option<Box<JoystickCallback>>> {
        self.set_global_callback(|globals| &mut globals.joystick, callback, |c, enable| unsafe {
            (c.set_joystick_callback)(enable.then_some(trampoline::joystick_callback as ffi::GLFWjoystickfun));
        })
    }

    /// Adds or replaces SDL_GameControllerDB mappings. The text must be ASCII.
    pub fn update_gamepad_mappings(&self, mappings: &str) -> Result<()> {
        self.ensure_initialized()?;
        let mappings = marshal::encode_ascii(mappings)?;
        let ok = self.native(|c| unsafe { (c.update_gamepad_mappings)(mappings.as_ptr()) })?;
        if ok == GLFW_TRUE {
            Ok(())
        } else {
            Err(Error::Native(NativeError::new(ErrorCode::InvalidValue, "")))
        }
    }

    /// Name from the gamepad mapping, `None` without a mapping.
    pub fn gamepad_name(&self, joystick: Joystick) -> Result<Option<String>> {
        self.call(|c| unsafe { marshal::decode((c.get_gamepad_name)(joystick.to_raw())) })
    }

    /// Mapped gamepad state, `None` when the joystick is absent or has no mapping.
    pub fn gamepad_state(&self, joystick: Joystick) -> Result<Option<GamepadState>> {
        self.call(|c| {
            let mut state = GamepadState::zeroed();
            let ok = unsafe { (c.get_gamepad_state)(joystick.to_raw(), &mut state) };
            (ok == GLFW_TRUE).then_some(state)
        })
    }
}
