//! Raw GLFW C ABI: opaque object types, interop structs and callback signatures.
//!
//! Layouts follow `GLFW/glfw3.h` (3.3) field for field. Nothing in here performs
//! any checking; the safe surface lives in [`crate::Glfw`].

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_double, c_float, c_int, c_uchar, c_uint, c_ushort};

pub const GLFW_TRUE: c_int = 1;
pub const GLFW_FALSE: c_int = 0;
pub const GLFW_DONT_CARE: c_int = -1;

pub const GLFW_CONNECTED: c_int = 0x0004_0001;
pub const GLFW_DISCONNECTED: c_int = 0x0004_0002;

// Context attributes read back through glfwGetWindowAttrib.
pub const GLFW_CLIENT_API: c_int = 0x0002_2001;
pub const GLFW_CONTEXT_VERSION_MAJOR: c_int = 0x0002_2002;
pub const GLFW_CONTEXT_VERSION_MINOR: c_int = 0x0002_2003;
pub const GLFW_CONTEXT_REVISION: c_int = 0x0002_2004;
pub const GLFW_OPENGL_PROFILE: c_int = 0x0002_2008;

/// Opaque native window object.
#[repr(C)]
pub struct GLFWwindow {
    _private: [u8; 0],
}

/// Opaque native monitor object.
#[repr(C)]
pub struct GLFWmonitor {
    _private: [u8; 0],
}

/// Opaque native cursor object.
#[repr(C)]
pub struct GLFWcursor {
    _private: [u8; 0],
}

/// `GLFWgammaramp`: three channel arrays of `size` elements each.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GLFWgammaramp {
    pub red: *mut c_ushort,
    pub green: *mut c_ushort,
    pub blue: *mut c_ushort,
    pub size: c_uint,
}

/// `GLFWimage`: tightly packed RGBA8 pixels, left-to-right, top-to-bottom.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GLFWimage {
    pub width: c_int,
    pub height: c_int,
    pub pixels: *mut c_uchar,
}

pub type GLFWerrorfun = unsafe extern "C" fn(c_int, *const c_char);
pub type GLFWmonitorfun = unsafe extern "C" fn(*mut GLFWmonitor, c_int);
pub type GLFWjoystickfun = unsafe extern "C" fn(c_int, c_int);

pub type GLFWwindowposfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWwindowsizefun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWwindowclosefun = unsafe extern "C" fn(*mut GLFWwindow);
pub type GLFWwindowrefreshfun = unsafe extern "C" fn(*mut GLFWwindow);
pub type GLFWwindowfocusfun = unsafe extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWwindowiconifyfun = unsafe extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWwindowmaximizefun = unsafe extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWframebuffersizefun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWwindowcontentscalefun = unsafe extern "C" fn(*mut GLFWwindow, c_float, c_float);

pub type GLFWkeyfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int, c_int);
pub type GLFWcharfun = unsafe extern "C" fn(*mut GLFWwindow, c_uint);
pub type GLFWcharmodsfun = unsafe extern "C" fn(*mut GLFWwindow, c_uint, c_int);
pub type GLFWmousebuttonfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int);
pub type GLFWcursorposfun = unsafe extern "C" fn(*mut GLFWwindow, c_double, c_double);
pub type GLFWcursorenterfun = unsafe extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWscrollfun = unsafe extern "C" fn(*mut GLFWwindow, c_double, c_double);
pub type GLFWdropfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, *mut *const c_char);
