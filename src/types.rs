//! Typed mirrors of the GLFW constants and interop structs.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::os::raw::{c_int, c_uchar, c_ushort};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ffi;

/// Declares a fieldless enum backed by native `c_int` constants.
macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_raw(raw: c_int) -> Option<Self> {
                match raw {
                    $(v if v == $value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn to_raw(self) -> c_int {
                self as c_int
            }
        }
    };
}

native_enum! {
    /// Keyboard keys, named after the US layout.
    pub enum Key {
        Unknown = -1,
        Space = 32,
        Apostrophe = 39,
        Comma = 44,
        Minus = 45,
        Period = 46,
        Slash = 47,
        Num0 = 48,
        Num1 = 49,
        Num2 = 50,
        Num3 = 51,
        Num4 = 52,
        Num5 = 53,
        Num6 = 54,
        Num7 = 55,
        Num8 = 56,
        Num9 = 57,
        Semicolon = 59,
        Equal = 61,
        A = 65,
        B = 66,
        C = 67,
        D = 68,
        E = 69,
        F = 70,
        G = 71,
        H = 72,
        I = 73,
        J = 74,
        K = 75,
        L = 76,
        M = 77,
        N = 78,
        O = 79,
        P = 80,
        Q = 81,
        R = 82,
        S = 83,
        T = 84,
        U = 85,
        V = 86,
        W = 87,
        X = 88,
        Y = 89,
        Z = 90,
        LeftBracket = 91,
        Backslash = 92,
        RightBracket = 93,
        GraveAccent = 96,
        World1 = 161,
        World2 = 162,
        Escape = 256,
        Enter = 257,
        Tab = 258,
        Backspace = 259,
        Insert = 260,
        Delete = 261,
        Right = 262,
        Left = 263,
        Down = 264,
        Up = 265,
        PageUp = 266,
        PageDown = 267,
        Home = 268,
        End = 269,
        CapsLock = 280,
        ScrollLock = 281,
        NumLock = 282,
        PrintScreen = 283,
        Pause = 284,
        F1 = 290,
        F2 = 291,
        F3 = 292,
        F4 = 293,
        F5 = 294,
        F6 = 295,
        F7 = 296,
        F8 = 297,
        F9 = 298,
        F10 = 299,
        F11 = 300,
        F12 = 301,
        F13 = 302,
        F14 = 303,
        F15 = 304,
        F16 = 305,
        F17 = 306,
        F18 = 307,
        F19 = 308,
        F20 = 309,
        F21 = 310,
        F22 = 311,
        F23 = 312,
        F24 = 313,
        F25 = 314,
        Kp0 = 320,
        Kp1 = 321,
        Kp2 = 322,
        Kp3 = 323,
        Kp4 = 324,
        Kp5 = 325,
        Kp6 = 326,
        Kp7 = 327,
        Kp8 = 328,
        Kp9 = 329,
        KpDecimal = 330,
        KpDivide = 331,
        KpMultiply = 332,
        KpSubtract = 333,
        KpAdd = 334,
        KpEnter = 335,
        KpEqual = 336,
        LeftShift = 340,
        LeftControl = 341,
        LeftAlt = 342,
        LeftSuper = 343,
        RightShift = 344,
        RightControl = 345,
        RightAlt = 346,
        RightSuper = 347,
        Menu = 348,
    }
}

impl Key {
    /// Unrecognized native values collapse to [`Key::Unknown`].
    pub fn from_raw_or_unknown(raw: c_int) -> Self {
        Self::from_raw(raw).unwrap_or(Key::Unknown)
    }
}

native_enum! {
    /// Key and button actions.
    pub enum Action {
        Release = 0,
        Press = 1,
        Repeat = 2,
    }
}

native_enum! {
    pub enum MouseButton {
        Left = 0,
        Right = 1,
        Middle = 2,
        Button4 = 3,
        Button5 = 4,
        Button6 = 5,
        Button7 = 6,
        Button8 = 7,
    }
}

native_enum! {
    pub enum Joystick {
        Joystick1 = 0,
        Joystick2 = 1,
        Joystick3 = 2,
        Joystick4 = 3,
        Joystick5 = 4,
        Joystick6 = 5,
        Joystick7 = 6,
        Joystick8 = 7,
        Joystick9 = 8,
        Joystick10 = 9,
        Joystick11 = 10,
        Joystick12 = 11,
        Joystick13 = 12,
        Joystick14 = 13,
        Joystick15 = 14,
        Joystick16 = 15,
    }
}

native_enum! {
    pub enum GamepadButton {
        A = 0,
        B = 1,
        X = 2,
        Y = 3,
        LeftBumper = 4,
        RightBumper = 5,
        Back = 6,
        Start = 7,
        Guide = 8,
        LeftThumb = 9,
        RightThumb = 10,
        DpadUp = 11,
        DpadRight = 12,
        DpadDown = 13,
        DpadLeft = 14,
    }
}

native_enum! {
    pub enum GamepadAxis {
        LeftX = 0,
        LeftY = 1,
        RightX = 2,
        RightY = 3,
        LeftTrigger = 4,
        RightTrigger = 5,
    }
}

native_enum! {
    /// Hints that must be set before `glfwInit`.
    pub enum InitHint {
        JoystickHatButtons = 0x0005_0001,
        CocoaChdirResources = 0x0005_1001,
        CocoaMenubar = 0x0005_1002,
    }
}

native_enum! {
    /// Integer window hints for the next `create_window`.
    pub enum WindowHint {
        Focused = 0x0002_0001,
        Resizable = 0x0002_0003,
        Visible = 0x0002_0004,
        Decorated = 0x0002_0005,
        AutoIconify = 0x0002_0006,
        Floating = 0x0002_0007,
        Maximized = 0x0002_0008,
        CenterCursor = 0x0002_0009,
        TransparentFramebuffer = 0x0002_000A,
        FocusOnShow = 0x0002_000C,
        RedBits = 0x0002_1001,
        GreenBits = 0x0002_1002,
        BlueBits = 0x0002_1003,
        AlphaBits = 0x0002_1004,
        DepthBits = 0x0002_1005,
        StencilBits = 0x0002_1006,
        AccumRedBits = 0x0002_1007,
        AccumGreenBits = 0x0002_1008,
        AccumBlueBits = 0x0002_1009,
        AccumAlphaBits = 0x0002_100A,
        AuxBuffers = 0x0002_100B,
        Stereo = 0x0002_100C,
        Samples = 0x0002_100D,
        SrgbCapable = 0x0002_100E,
        RefreshRate = 0x0002_100F,
        Doublebuffer = 0x0002_1010,
        ClientApi = 0x0002_2001,
        ContextVersionMajor = 0x0002_2002,
        ContextVersionMinor = 0x0002_2003,
        ContextRobustness = 0x0002_2005,
        OpenGlForwardCompat = 0x0002_2006,
        OpenGlDebugContext = 0x0002_2007,
        OpenGlProfile = 0x0002_2008,
        ContextReleaseBehavior = 0x0002_2009,
        ContextNoError = 0x0002_200A,
        ContextCreationApi = 0x0002_200B,
        ScaleToMonitor = 0x0002_200C,
        CocoaRetinaFramebuffer = 0x0002_3001,
        CocoaGraphicsSwitching = 0x0002_3003,
    }
}

native_enum! {
    /// String window hints. Each hint has its own mandated text encoding.
    pub enum StringHint {
        CocoaFrameName = 0x0002_3002,
        X11ClassName = 0x0002_4001,
        X11InstanceName = 0x0002_4002,
    }
}

impl StringHint {
    pub fn encoding(self) -> crate::marshal::Encoding {
        match self {
            StringHint::CocoaFrameName => crate::marshal::Encoding::Utf8,
            StringHint::X11ClassName | StringHint::X11InstanceName => crate::marshal::Encoding::Ascii,
        }
    }
}

native_enum! {
    /// Window and context attributes readable through `window_attrib`.
    pub enum WindowAttribute {
        Focused = 0x0002_0001,
        Iconified = 0x0002_0002,
        Resizable = 0x0002_0003,
        Visible = 0x0002_0004,
        Decorated = 0x0002_0005,
        AutoIconify = 0x0002_0006,
        Floating = 0x0002_0007,
        Maximized = 0x0002_0008,
        TransparentFramebuffer = 0x0002_000A,
        Hovered = 0x0002_000B,
        FocusOnShow = 0x0002_000C,
        ClientApi = 0x0002_2001,
        ContextVersionMajor = 0x0002_2002,
        ContextVersionMinor = 0x0002_2003,
        ContextRevision = 0x0002_2004,
        ContextRobustness = 0x0002_2005,
        OpenGlForwardCompat = 0x0002_2006,
        OpenGlDebugContext = 0x0002_2007,
        OpenGlProfile = 0x0002_2008,
        ContextReleaseBehavior = 0x0002_2009,
        ContextNoError = 0x0002_200A,
        ContextCreationApi = 0x0002_200B,
    }
}

impl WindowAttribute {
    /// Attributes accepted by `glfwSetWindowAttrib`.
    pub fn is_settable(self) -> bool {
        matches!(
            self,
            WindowAttribute::Decorated
                | WindowAttribute::Resizable
                | WindowAttribute::Floating
                | WindowAttribute::AutoIconify
                | WindowAttribute::FocusOnShow
        )
    }
}

native_enum! {
    pub enum InputMode {
        Cursor = 0x0003_3001,
        StickyKeys = 0x0003_3002,
        StickyMouseButtons = 0x0003_3003,
        LockKeyMods = 0x0003_3004,
        RawMouseMotion = 0x0003_3005,
    }
}

native_enum! {
    pub enum CursorMode {
        Normal = 0x0003_4001,
        Hidden = 0x0003_4002,
        Disabled = 0x0003_4003,
    }
}

native_enum! {
    pub enum StandardCursor {
        Arrow = 0x0003_6001,
        IBeam = 0x0003_6002,
        Crosshair = 0x0003_6003,
        Hand = 0x0003_6004,
        HResize = 0x0003_6005,
        VResize = 0x0003_6006,
    }
}

native_enum! {
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ClientApi {
        NoApi = 0,
        #[serde(rename = "opengl")]
        OpenGl = 0x0003_0001,
        #[serde(rename = "opengl_es")]
        OpenGlEs = 0x0003_0002,
    }
}

native_enum! {
    pub enum ContextCreationApi {
        Native = 0x0003_6001,
        Egl = 0x0003_6002,
        OsMesa = 0x0003_6003,
    }
}

native_enum! {
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum OpenGlProfile {
        Any = 0,
        Core = 0x0003_2001,
        Compat = 0x0003_2002,
    }
}

native_enum! {
    pub enum Robustness {
        NoRobustness = 0,
        NoResetNotification = 0x0003_1001,
        LoseContextOnReset = 0x0003_1002,
    }
}

/// Connection state change reported by monitor and joystick callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionEvent {
    Connected,
    Disconnected,
}

impl ConnectionEvent {
    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            ffi::GLFW_CONNECTED => Some(ConnectionEvent::Connected),
            ffi::GLFW_DISCONNECTED => Some(ConnectionEvent::Disconnected),
            _ => None,
        }
    }
}

/// Modifier key bits delivered with key, char and mouse events.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(c_int);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(0x0001);
    pub const CONTROL: Modifiers = Modifiers(0x0002);
    pub const ALT: Modifiers = Modifiers(0x0004);
    pub const SUPER: Modifiers = Modifiers(0x0008);
    pub const CAPS_LOCK: Modifiers = Modifiers(0x0010);
    pub const NUM_LOCK: Modifiers = Modifiers(0x0020);

    const NAMES: [(Modifiers, &'static str); 6] = [
        (Modifiers::SHIFT, "SHIFT"),
        (Modifiers::CONTROL, "CONTROL"),
        (Modifiers::ALT, "ALT"),
        (Modifiers::SUPER, "SUPER"),
        (Modifiers::CAPS_LOCK, "CAPS_LOCK"),
        (Modifiers::NUM_LOCK, "NUM_LOCK"),
    ];

    pub fn from_bits(bits: c_int) -> Self {
        Modifiers(bits & 0x3F)
    }

    pub fn bits(self) -> c_int {
        self.0
    }

    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            f.write_str("Modifiers(NONE)")
        } else {
            write!(f, "Modifiers({})", names.join(" | "))
        }
    }
}

/// State of one joystick hat as a direction bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JoystickHats(u8);

impl JoystickHats {
    pub const CENTERED: JoystickHats = JoystickHats(0);
    pub const UP: JoystickHats = JoystickHats(0x01);
    pub const RIGHT: JoystickHats = JoystickHats(0x02);
    pub const DOWN: JoystickHats = JoystickHats(0x04);
    pub const LEFT: JoystickHats = JoystickHats(0x08);

    pub fn from_bits(bits: u8) -> Self {
        JoystickHats(bits & 0x0F)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: JoystickHats) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for JoystickHats {
    type Output = JoystickHats;

    fn bitor(self, rhs: JoystickHats) -> JoystickHats {
        JoystickHats(self.0 | rhs.0)
    }
}

/// `GLFWvidmode`, copied by value out of native memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct VideoMode {
    pub width: c_int,
    pub height: c_int,
    pub red_bits: c_int,
    pub green_bits: c_int,
    pub blue_bits: c_int,
    pub refresh_rate: c_int,
}

impl VideoMode {
    pub fn color_depth(&self) -> c_int {
        self.red_bits + self.green_bits + self.blue_bits
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ {}Hz ({} bpp)",
            self.width,
            self.height,
            self.refresh_rate,
            self.color_depth()
        )
    }
}

/// `GLFWgamepadstate`, filled in place by `glfwGetGamepadState`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Zeroable)]
pub struct GamepadState {
    pub buttons: [c_uchar; 15],
    pub axes: [f32; 6],
}

impl GamepadState {
    pub fn button(&self, button: GamepadButton) -> Action {
        Action::from_raw(c_int::from(self.buttons[button as usize])).unwrap_or(Action::Release)
    }

    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis as usize]
    }
}

/// A gamma ramp owned on the Rust side. All channels have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GammaRamp {
    pub red: Vec<c_ushort>,
    pub green: Vec<c_ushort>,
    pub blue: Vec<c_ushort>,
}

impl GammaRamp {
    pub fn new(red: Vec<c_ushort>, green: Vec<c_ushort>, blue: Vec<c_ushort>) -> Result<Self> {
        if red.len() != green.len() || red.len() != blue.len() {
            return Err(Error::InvalidGammaRamp(format!(
                "channels differ in length: {}/{}/{}",
                red.len(),
                green.len(),
                blue.len()
            )));
        }
        Ok(Self { red, green, blue })
    }

    pub fn size(&self) -> usize {
        self.red.len()
    }

    /// Copies a native ramp.
    ///
    /// # Safety
    ///
    /// Each channel pointer must be valid for `size` reads (or null with `size == 0`).
    pub(crate) unsafe fn from_raw(raw: &ffi::GLFWgammaramp) -> Self {
        let size = raw.size as c_int;
        Self {
            red: crate::marshal::copy_array(raw.red.cast_const(), size),
            green: crate::marshal::copy_array(raw.green.cast_const(), size),
            blue: crate::marshal::copy_array(raw.blue.cast_const(), size),
        }
    }

    /// Native view over this ramp. Valid only while `self` is borrowed and unchanged.
    pub(crate) fn as_raw(&self) -> ffi::GLFWgammaramp {
        ffi::GLFWgammaramp {
            red: self.red.as_ptr().cast_mut(),
            green: self.green.as_ptr().cast_mut(),
            blue: self.blue.as_ptr().cast_mut(),
            size: self.size() as std::os::raw::c_uint,
        }
    }
}

/// An RGBA8 image for window icons and custom cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage(format!("empty image {}x{}", width, height)));
        }
        if width > c_int::MAX as u32 || height > c_int::MAX as u32 {
            return Err(Error::InvalidImage(format!("image {}x{} too large", width, height)));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::InvalidImage(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::new(width, height, pixels)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Native view over this image. Valid only while `self` is borrowed.
    pub(crate) fn as_raw(&self) -> ffi::GLFWimage {
        ffi::GLFWimage {
            width: self.width as c_int,
            height: self.height as c_int,
            pixels: self.pixels.as_ptr().cast_mut(),
        }
    }
}

/// Library or context version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: i32,
    pub minor: i32,
    pub revision: i32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

/// Monitor work area in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Workarea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Size of each edge of a window frame, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSize {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}
