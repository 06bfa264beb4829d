//! The resolved GLFW symbol table.
//!
//! Every entry point the facade calls is listed once below with its C prototype.
//! [`Commands::resolve`] looks all of them up eagerly and refuses to build a
//! partial table.

use std::ffi::c_void;
use std::os::raw::{c_char, c_double, c_float, c_int, c_uchar};

use crate::error::LoadError;
use crate::ffi::*;
use crate::loader::SymbolSource;

macro_rules! commands {
    ($($field:ident = $symbol:literal : fn($($arg:ty),*) $(-> $ret:ty)?;)+) => {
        /// Typed function pointers for every bound GLFW entry point.
        #[derive(Clone, Copy)]
        pub struct Commands {
            $(pub $field: unsafe extern "C" fn($($arg),*) $(-> $ret)?,)+
        }

        impl Commands {
            /// Every native symbol the table requires.
            pub const SYMBOLS: &'static [&'static str] = &[$($symbol),+];

            /// Resolve the full table from `source`, reporting every missing symbol at once.
            ///
            /// # Safety
            ///
            /// Every address `source` hands out must be a function with the GLFW prototype
            /// for that name, and must stay callable for as long as the table is used.
            pub unsafe fn resolve(source: &dyn SymbolSource) -> Result<Self, LoadError> {
                let mut missing = Vec::new();
                $(
                    let $field = source.symbol($symbol);
                    if $field.is_none() {
                        missing.push($symbol);
                    }
                )+

                match ($($field,)+) {
                    ($(Some($field),)+) => {
                        log::debug!(
                            "resolved {} GLFW symbols from {}",
                            Self::SYMBOLS.len(),
                            source.describe()
                        );
                        // fn pointers and data pointers share a size on every supported target
                        Ok(Self {
                            $($field: std::mem::transmute::<*const c_void, unsafe extern "C" fn($($arg),*) $(-> $ret)?>($field),)+
                        })
                    }
                    _ => Err(LoadError::MissingSymbols {
                        library: source.describe(),
                        symbols: missing,
                    }),
                }
            }
        }
    };
}

commands! {
    // Initialization, version and errors
    init = "glfwInit": fn() -> c_int;
    terminate = "glfwTerminate": fn();
    init_hint = "glfwInitHint": fn(c_int, c_int);
    get_version = "glfwGetVersion": fn(*mut c_int, *mut c_int, *mut c_int);
    get_version_string = "glfwGetVersionString": fn() -> *const c_char;
    get_error = "glfwGetError": fn(*mut *const c_char) -> c_int;
    set_error_callback = "glfwSetErrorCallback": fn(Option<GLFWerrorfun>) -> Option<GLFWerrorfun>;

    // Monitors
    get_monitors = "glfwGetMonitors": fn(*mut c_int) -> *mut *mut GLFWmonitor;
    get_primary_monitor = "glfwGetPrimaryMonitor": fn() -> *mut GLFWmonitor;
    get_monitor_pos = "glfwGetMonitorPos": fn(*mut GLFWmonitor, *mut c_int, *mut c_int);
    get_monitor_workarea = "glfwGetMonitorWorkarea": fn(*mut GLFWmonitor, *mut c_int, *mut c_int, *mut c_int, *mut c_int);
    get_monitor_physical_size = "glfwGetMonitorPhysicalSize": fn(*mut GLFWmonitor, *mut c_int, *mut c_int);
    get_monitor_content_scale = "glfwGetMonitorContentScale": fn(*mut GLFWmonitor, *mut c_float, *mut c_float);
    get_monitor_name = "glfwGetMonitorName": fn(*mut GLFWmonitor) -> *const c_char;
    set_monitor_callback = "glfwSetMonitorCallback": fn(Option<GLFWmonitorfun>) -> Option<GLFWmonitorfun>;
    get_video_modes = "glfwGetVideoModes": fn(*mut GLFWmonitor, *mut c_int) -> *const crate::types::VideoMode;
    get_video_mode = "glfwGetVideoMode": fn(*mut GLFWmonitor) -> *const crate::types::VideoMode;
    set_gamma = "glfwSetGamma": fn(*mut GLFWmonitor, c_float);
    get_gamma_ramp = "glfwGetGammaRamp": fn(*mut GLFWmonitor) -> *const GLFWgammaramp;
    set_gamma_ramp = "glfwSetGammaRamp": fn(*mut GLFWmonitor, *const GLFWgammaramp);

    // Windows
    default_window_hints = "glfwDefaultWindowHints": fn();
    window_hint = "glfwWindowHint": fn(c_int, c_int);
    window_hint_string = "glfwWindowHintString": fn(c_int, *const c_char);
    create_window = "glfwCreateWindow": fn(c_int, c_int, *const c_char, *mut GLFWmonitor, *mut GLFWwindow) -> *mut GLFWwindow;
    destroy_window = "glfwDestroyWindow": fn(*mut GLFWwindow);
    window_should_close = "glfwWindowShouldClose": fn(*mut GLFWwindow) -> c_int;
    set_window_should_close = "glfwSetWindowShouldClose": fn(*mut GLFWwindow, c_int);
    set_window_title = "glfwSetWindowTitle": fn(*mut GLFWwindow, *const c_char);
    set_window_icon = "glfwSetWindowIcon": fn(*mut GLFWwindow, c_int, *const GLFWimage);
    get_window_pos = "glfwGetWindowPos": fn(*mut GLFWwindow, *mut c_int, *mut c_int);
    set_window_pos = "glfwSetWindowPos": fn(*mut GLFWwindow, c_int, c_int);
    get_window_size = "glfwGetWindowSize": fn(*mut GLFWwindow, *mut c_int, *mut c_int);
    set_window_size_limits = "glfwSetWindowSizeLimits": fn(*mut GLFWwindow, c_int, c_int, c_int, c_int);
    set_window_aspect_ratio = "glfwSetWindowAspectRatio": fn(*mut GLFWwindow, c_int, c_int);
    set_window_size = "glfwSetWindowSize": fn(*mut GLFWwindow, c_int, c_int);
    get_framebuffer_size = "glfwGetFramebufferSize": fn(*mut GLFWwindow, *mut c_int, *mut c_int);
    get_window_frame_size = "glfwGetWindowFrameSize": fn(*mut GLFWwindow, *mut c_int, *mut c_int, *mut c_int, *mut c_int);
    get_window_content_scale = "glfwGetWindowContentScale": fn(*mut GLFWwindow, *mut c_float, *mut c_float);
    get_window_opacity = "glfwGetWindowOpacity": fn(*mut GLFWwindow) -> c_float;
    set_window_opacity = "glfwSetWindowOpacity": fn(*mut GLFWwindow, c_float);
    iconify_window = "glfwIconifyWindow": fn(*mut GLFWwindow);
    restore_window = "glfwRestoreWindow": fn(*mut GLFWwindow);
    maximize_window = "glfwMaximizeWindow": fn(*mut GLFWwindow);
    show_window = "glfwShowWindow": fn(*mut GLFWwindow);
    hide_window = "glfwHideWindow": fn(*mut GLFWwindow);
    focus_window = "glfwFocusWindow": fn(*mut GLFWwindow);
    request_window_attention = "glfwRequestWindowAttention": fn(*mut GLFWwindow);
    get_window_monitor = "glfwGetWindowMonitor": fn(*mut GLFWwindow) -> *mut GLFWmonitor;
    set_window_monitor = "glfwSetWindowMonitor": fn(*mut GLFWwindow, *mut GLFWmonitor, c_int, c_int, c_int, c_int, c_int);
    get_window_attrib = "glfwGetWindowAttrib": fn(*mut GLFWwindow, c_int) -> c_int;
    set_window_attrib = "glfwSetWindowAttrib": fn(*mut GLFWwindow, c_int, c_int);

    // Window callbacks
    set_window_pos_callback = "glfwSetWindowPosCallback": fn(*mut GLFWwindow, Option<GLFWwindowposfun>) -> Option<GLFWwindowposfun>;
    set_window_size_callback = "glfwSetWindowSizeCallback": fn(*mut GLFWwindow, Option<GLFWwindowsizefun>) -> Option<GLFWwindowsizefun>;
    set_window_close_callback = "glfwSetWindowCloseCallback": fn(*mut GLFWwindow, Option<GLFWwindowclosefun>) -> Option<GLFWwindowclosefun>;
    set_window_refresh_callback = "glfwSetWindowRefreshCallback": fn(*mut GLFWwindow, Option<GLFWwindowrefreshfun>) -> Option<GLFWwindowrefreshfun>;
    set_window_focus_callback = "glfwSetWindowFocusCallback": fn(*mut GLFWwindow, Option<GLFWwindowfocusfun>) -> Option<GLFWwindowfocusfun>;
    set_window_iconify_callback = "glfwSetWindowIconifyCallback": fn(*mut GLFWwindow, Option<GLFWwindowiconifyfun>) -> Option<GLFWwindowiconifyfun>;
    set_window_maximize_callback = "glfwSetWindowMaximizeCallback": fn(*mut GLFWwindow, Option<GLFWwindowmaximizefun>) -> Option<GLFWwindowmaximizefun>;
    set_framebuffer_size_callback = "glfwSetFramebufferSizeCallback": fn(*mut GLFWwindow, Option<GLFWframebuffersizefun>) -> Option<GLFWframebuffersizefun>;
    set_window_content_scale_callback = "glfwSetWindowContentScaleCallback": fn(*mut GLFWwindow, Option<GLFWwindowcontentscalefun>) -> Option<GLFWwindowcontentscalefun>;

    // Events
    poll_events = "glfwPollEvents": fn();
    wait_events = "glfwWaitEvents": fn();
    wait_events_timeout = "glfwWaitEventsTimeout": fn(c_double);
    post_empty_event = "glfwPostEmptyEvent": fn();

    // Input
    get_input_mode = "glfwGetInputMode": fn(*mut GLFWwindow, c_int) -> c_int;
    set_input_mode = "glfwSetInputMode": fn(*mut GLFWwindow, c_int, c_int);
    raw_mouse_motion_supported = "glfwRawMouseMotionSupported": fn() -> c_int;
    get_key_name = "glfwGetKeyName": fn(c_int, c_int) -> *const c_char;
    get_key_scancode = "glfwGetKeyScancode": fn(c_int) -> c_int;
    get_key = "glfwGetKey": fn(*mut GLFWwindow, c_int) -> c_int;
    get_mouse_button = "glfwGetMouseButton": fn(*mut GLFWwindow, c_int) -> c_int;
    get_cursor_pos = "glfwGetCursorPos": fn(*mut GLFWwindow, *mut c_double, *mut c_double);
    set_cursor_pos = "glfwSetCursorPos": fn(*mut GLFWwindow, c_double, c_double);
    create_cursor = "glfwCreateCursor": fn(*const GLFWimage, c_int, c_int) -> *mut GLFWcursor;
    create_standard_cursor = "glfwCreateStandardCursor": fn(c_int) -> *mut GLFWcursor;
    destroy_cursor = "glfwDestroyCursor": fn(*mut GLFWcursor);
    set_cursor = "glfwSetCursor": fn(*mut GLFWwindow, *mut GLFWcursor);

    // Input callbacks
    set_key_callback = "glfwSetKeyCallback": fn(*mut GLFWwindow, Option<GLFWkeyfun>) -> Option<GLFWkeyfun>;
    set_char_callback = "glfwSetCharCallback": fn(*mut GLFWwindow, Option<GLFWcharfun>) -> Option<GLFWcharfun>;
    set_char_mods_callback = "glfwSetCharModsCallback": fn(*mut GLFWwindow, Option<GLFWcharmodsfun>) -> Option<GLFWcharmodsfun>;
    set_mouse_button_callback = "glfwSetMouseButtonCallback": fn(*mut GLFWwindow, Option<GLFWmousebuttonfun>) -> Option<GLFWmousebuttonfun>;
    set_cursor_pos_callback = "glfwSetCursorPosCallback": fn(*mut GLFWwindow, Option<GLFWcursorposfun>) -> Option<GLFWcursorposfun>;
    set_cursor_enter_callback = "glfwSetCursorEnterCallback": fn(*mut GLFWwindow, Option<GLFWcursorenterfun>) -> Option<GLFWcursorenterfun>;
    set_scroll_callback = "glfwSetScrollCallback": fn(*mut GLFWwindow, Option<GLFWscrollfun>) -> Option<GLFWscrollfun>;
    set_drop_callback = "glfwSetDropCallback": fn(*mut GLFWwindow, Option<GLFWdropfun>) -> Option<GLFWdropfun>;

    // Joysticks and gamepads
    joystick_present = "glfwJoystickPresent": fn(c_int) -> c_int;
    get_joystick_axes = "glfwGetJoystickAxes": fn(c_int, *mut c_int) -> *const c_float;
    get_joystick_buttons = "glfwGetJoystickButtons": fn(c_int, *mut c_int) -> *const c_uchar;
    get_joystick_hats = "glfwGetJoystickHats": fn(c_int, *mut c_int) -> *const c_uchar;
    get_joystick_name = "glfwGetJoystickName": fn(c_int) -> *const c_char;
    get_joystick_guid = "glfwGetJoystickGUID": fn(c_int) -> *const c_char;
    joystick_is_gamepad = "glfwJoystickIsGamepad": fn(c_int) -> c_int;
    set_joystick_callback = "glfwSetJoystickCallback": fn(Option<GLFWjoystickfun>) -> Option<GLFWjoystickfun>;
    update_gamepad_mappings = "glfwUpdateGamepadMappings": fn(*const c_char) -> c_int;
    get_gamepad_name = "glfwGetGamepadName": fn(c_int) -> *const c_char;
    get_gamepad_state = "glfwGetGamepadState": fn(c_int, *mut crate::types::GamepadState) -> c_int;

    // Clipboard and time
    set_clipboard_string = "glfwSetClipboardString": fn(*mut GLFWwindow, *const c_char);
    get_clipboard_string = "glfwGetClipboardString": fn(*mut GLFWwindow) -> *const c_char;
    get_time = "glfwGetTime": fn() -> c_double;
    set_time = "glfwSetTime": fn(c_double);
    get_timer_value = "glfwGetTimerValue": fn() -> u64;
    get_timer_frequency = "glfwGetTimerFrequency": fn() -> u64;

    // Contexts
    make_context_current = "glfwMakeContextCurrent": fn(*mut GLFWwindow);
    get_current_context = "glfwGetCurrentContext": fn() -> *mut GLFWwindow;
    swap_buffers = "glfwSwapBuffers": fn(*mut GLFWwindow);
    swap_interval = "glfwSwapInterval": fn(c_int);
    extension_supported = "glfwExtensionSupported": fn(*const c_char) -> c_int;
    get_proc_address = "glfwGetProcAddress": fn(*const c_char) -> *const c_void;
}
