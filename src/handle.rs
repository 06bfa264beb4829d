//! Opaque handles for native objects. They own nothing; equality is by pointer value.

use std::fmt;
use std::ptr;

use crate::error::{Error, HandleKind, Result};
use crate::ffi::{GLFWcursor, GLFWmonitor, GLFWwindow};

macro_rules! native_handle {
    ($(#[$meta:meta])* $name:ident, $raw:ty, $kind:expr) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(*mut $raw);

        impl $name {
            /// The null handle.
            pub const NONE: $name = $name(ptr::null_mut());

            /// Wrap a raw native pointer. Null yields [`Self::NONE`].
            pub fn from_raw(raw: *mut $raw) -> Self {
                Self(raw)
            }

            pub fn as_ptr(self) -> *mut $raw {
                self.0
            }

            pub fn is_none(self) -> bool {
                self.0.is_null()
            }

            /// `None` for the null handle.
            pub fn non_null(self) -> Option<Self> {
                (!self.is_none()).then_some(self)
            }

            pub(crate) fn checked(self) -> Result<*mut $raw> {
                if self.is_none() {
                    Err(Error::NullHandle($kind))
                } else {
                    Ok(self.0)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::NONE
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:p})"), self.0)
            }
        }
    };
}

native_handle!(
    /// A native GLFW window.
    Window,
    GLFWwindow,
    HandleKind::Window
);

native_handle!(
    /// A connected monitor. Valid until it is disconnected or the library terminates.
    Monitor,
    GLFWmonitor,
    HandleKind::Monitor
);

native_handle!(
    /// A custom or standard cursor object.
    Cursor,
    GLFWcursor,
    HandleKind::Cursor
);
