//! In-process stand-in for the GLFW shared library.
//!
//! Every export is a plain `extern "C"` function over thread-local state, so test
//! threads never share a fake display. Input is scripted with [`FakeEvent`]s that
//! are delivered through the installed native callbacks on the next poll or wait,
//! exactly the way the real library dispatches them.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::ffi::{c_void, CStr, CString};
use std::os::raw::{c_char, c_double, c_float, c_int, c_uchar, c_uint, c_ushort};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

use glfw_native::error::ErrorCode;
use glfw_native::ffi::*;
use glfw_native::types::{GamepadState, VideoMode};
use glfw_native::{Glfw, SymbolSource, Window};

const KEY_A: c_int = 65;
const SCANCODE_A: c_int = 38;
const CLIENT_API: c_int = 0x0002_2001;
const OPENGL_API: c_int = 0x0003_0001;
const CURSOR_MODE: c_int = 0x0003_3001;
const CURSOR_NORMAL: c_int = 0x0003_4001;
const SETTABLE_ATTRIBS: [c_int; 5] = [0x0002_0003, 0x0002_0005, 0x0002_0006, 0x0002_0007, 0x0002_000C];

static VERSION: &[u8] = b"3.3.8 Fake in-process\0";
static KEY_NAME_A: &[u8] = b"a\0";

/// Number of `glfwPostEmptyEvent` calls from any thread.
static POSTED: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static STATE: RefCell<FakeState> = RefCell::new(FakeState::new());
}

/// Scripted input, delivered on the next `glfwPollEvents` / `glfwWaitEvents*`.
#[derive(Debug, Clone)]
pub enum FakeEvent {
    Pos(Window, i32, i32),
    Size(Window, i32, i32),
    Close(Window),
    Refresh(Window),
    Focus(Window, bool),
    Iconify(Window, bool),
    Maximize(Window, bool),
    FramebufferSize(Window, i32, i32),
    ContentScale(Window, f32, f32),
    Key(Window, c_int, c_int, c_int, c_int),
    Char(Window, u32),
    CharMods(Window, u32, c_int),
    MouseButton(Window, c_int, c_int, c_int),
    CursorPos(Window, f64, f64),
    CursorEnter(Window, bool),
    Scroll(Window, f64, f64),
    Drop(Window, Vec<String>),
    MonitorConnected(String),
    MonitorDisconnected(usize),
    JoystickConnected(c_int),
    JoystickDisconnected(c_int),
    Error(ErrorCode, String),
}

macro_rules! native_callbacks {
    ($($setter:ident($symbol:literal): $fnty:ident => $field:ident;)+) => {
        /// Native callbacks installed on one fake window.
        #[derive(Debug, Default, Clone, Copy)]
        pub struct NativeCallbacks {
            $(pub $field: Option<$fnty>,)+
        }

        impl NativeCallbacks {
            pub fn installed(&self) -> usize {
                [$(self.$field.is_some()),+].into_iter().filter(|set| *set).count()
            }
        }

        $(
            unsafe extern "C" fn $setter(window: *mut GLFWwindow, callback: Option<$fnty>) -> Option<$fnty> {
                enter($symbol);
                with(|s| {
                    s.window_mut(window)
                        .and_then(|w| std::mem::replace(&mut w.callbacks.$field, callback))
                })
            }
        )+
    };
}

native_callbacks! {
    set_window_pos_callback("glfwSetWindowPosCallback"): GLFWwindowposfun => pos;
    set_window_size_callback("glfwSetWindowSizeCallback"): GLFWwindowsizefun => size;
    set_window_close_callback("glfwSetWindowCloseCallback"): GLFWwindowclosefun => close;
    set_window_refresh_callback("glfwSetWindowRefreshCallback"): GLFWwindowrefreshfun => refresh;
    set_window_focus_callback("glfwSetWindowFocusCallback"): GLFWwindowfocusfun => focus;
    set_window_iconify_callback("glfwSetWindowIconifyCallback"): GLFWwindowiconifyfun => iconify;
    set_window_maximize_callback("glfwSetWindowMaximizeCallback"): GLFWwindowmaximizefun => maximize;
    set_framebuffer_size_callback("glfwSetFramebufferSizeCallback"): GLFWframebuffersizefun => framebuffer_size;
    set_window_content_scale_callback("glfwSetWindowContentScaleCallback"): GLFWwindowcontentscalefun => content_scale;
    set_key_callback("glfwSetKeyCallback"): GLFWkeyfun => key;
    set_char_callback("glfwSetCharCallback"): GLFWcharfun => char;
    set_char_mods_callback("glfwSetCharModsCallback"): GLFWcharmodsfun => char_mods;
    set_mouse_button_callback("glfwSetMouseButtonCallback"): GLFWmousebuttonfun => mouse_button;
    set_cursor_pos_callback("glfwSetCursorPosCallback"): GLFWcursorposfun => cursor_pos;
    set_cursor_enter_callback("glfwSetCursorEnterCallback"): GLFWcursorenterfun => cursor_enter;
    set_scroll_callback("glfwSetScrollCallback"): GLFWscrollfun => scroll;
    set_drop_callback("glfwSetDropCallback"): GLFWdropfun => drop;
}

pub struct FakeWindow {
    pub handle: *mut GLFWwindow,
    pub title: String,
    pub pos: (c_int, c_int),
    pub size: (c_int, c_int),
    pub should_close: bool,
    pub opacity: f32,
    pub attribs: HashMap<c_int, c_int>,
    pub input_modes: HashMap<c_int, c_int>,
    pub keys: HashMap<c_int, c_int>,
    pub buttons: HashMap<c_int, c_int>,
    pub cursor_pos: (f64, f64),
    pub cursor: *mut GLFWcursor,
    pub monitor: *mut GLFWmonitor,
    pub icon_sizes: Vec<(c_int, c_int)>,
    pub size_limits: [c_int; 4],
    pub aspect_ratio: (c_int, c_int),
    pub attention_requests: usize,
    pub swaps: usize,
    pub callbacks: NativeCallbacks,
}

impl FakeWindow {
    fn attrib(&self, attrib: c_int) -> c_int {
        self.attribs.get(&attrib).copied().unwrap_or(0)
    }

    fn has_context(&self) -> bool {
        self.attrib(CLIENT_API) != 0
    }
}

pub struct FakeMonitor {
    pub handle: *mut GLFWmonitor,
    pub name: CString,
    pub pos: (c_int, c_int),
    pub workarea: [c_int; 4],
    pub physical_size: (c_int, c_int),
    pub content_scale: (f32, f32),
    pub modes: Vec<VideoMode>,
    pub current_mode: usize,
    pub ramp: [Vec<c_ushort>; 3],
    ramp_view: GLFWgammaramp,
}

impl FakeMonitor {
    fn new(handle: *mut GLFWmonitor, name: &str, x: c_int, width: c_int, height: c_int) -> Self {
        let mode = |width, height, refresh_rate| VideoMode {
            width,
            height,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            refresh_rate,
        };
        Self {
            handle,
            name: CString::new(name).unwrap_or_default(),
            pos: (x, 0),
            workarea: [x, 0, width, height - 40],
            physical_size: (width / 4, height / 4),
            content_scale: (1.0, 1.0),
            modes: vec![mode(640, 480, 60), mode(1280, 720, 60), mode(width, height, 60)],
            current_mode: 2,
            ramp: [identity_ramp(), identity_ramp(), identity_ramp()],
            ramp_view: GLFWgammaramp {
                red: ptr::null_mut(),
                green: ptr::null_mut(),
                blue: ptr::null_mut(),
                size: 0,
            },
        }
    }
}

fn identity_ramp() -> Vec<c_ushort> {
    (0..256u32).map(|i| (i * 257) as c_ushort).collect()
}

pub struct FakeJoystick {
    pub name: CString,
    pub guid: CString,
    pub axes: Vec<c_float>,
    pub buttons: Vec<c_uchar>,
    pub hats: Vec<c_uchar>,
    pub gamepad: Option<(CString, GamepadState)>,
}

impl FakeJoystick {
    pub fn pad(name: &str) -> Self {
        let mut state = GamepadState {
            buttons: [0; 15],
            axes: [0.0; 6],
        };
        state.buttons[0] = 1;
        state.axes[4] = -1.0;
        Self {
            name: CString::new(name).unwrap_or_default(),
            guid: CString::new("030000005e0400008e02000014010000").unwrap_or_default(),
            axes: vec![0.25, -1.0, 0.0, 1.0],
            buttons: vec![1, 0, 1],
            hats: vec![0x01 | 0x02, 0x00],
            gamepad: Some((CString::new("Fake Pad").unwrap_or_default(), state)),
        }
    }
}

pub struct FakeCursor {
    pub handle: *mut GLFWcursor,
    pub shape: Option<c_int>,
    pub image: Option<(c_int, c_int, c_int, c_int)>,
}

/// Everything the fake library knows, per test thread.
pub struct FakeState {
    pub initialized: bool,
    pub init_count: usize,
    pub terminate_count: usize,
    pub init_hints: HashMap<c_int, c_int>,
    pub hints: HashMap<c_int, c_int>,
    pub string_hints: HashMap<c_int, Vec<u8>>,
    pub windows: Vec<FakeWindow>,
    pub monitors: Vec<FakeMonitor>,
    monitor_list: Vec<*mut GLFWmonitor>,
    pub cursors: Vec<FakeCursor>,
    pub joysticks: HashMap<c_int, FakeJoystick>,
    pub mappings: Vec<String>,
    pub clipboard: Option<CString>,
    pub time: f64,
    pub current_context: *mut GLFWwindow,
    pub swap_interval: Option<c_int>,
    pub extensions: Vec<String>,
    pub wait_timeouts: Vec<f64>,
    pub events: VecDeque<FakeEvent>,
    pub calls: Vec<&'static str>,
    armed: HashMap<&'static str, (c_int, String)>,
    last_error: Option<(c_int, CString)>,
    returned_error: CString,
    pub error_callback: Option<GLFWerrorfun>,
    pub monitor_callback: Option<GLFWmonitorfun>,
    pub joystick_callback: Option<GLFWjoystickfun>,
    next_handle: usize,
}

impl FakeState {
    fn new() -> Self {
        let mut state = Self {
            initialized: false,
            init_count: 0,
            terminate_count: 0,
            init_hints: HashMap::new(),
            hints: default_hints(),
            string_hints: HashMap::new(),
            windows: Vec::new(),
            monitors: Vec::new(),
            monitor_list: Vec::new(),
            cursors: Vec::new(),
            joysticks: HashMap::new(),
            mappings: Vec::new(),
            clipboard: None,
            time: 0.0,
            current_context: ptr::null_mut(),
            swap_interval: None,
            extensions: vec!["GL_ARB_debug_output".to_string()],
            wait_timeouts: Vec::new(),
            events: VecDeque::new(),
            calls: Vec::new(),
            armed: HashMap::new(),
            last_error: None,
            returned_error: CString::default(),
            error_callback: None,
            monitor_callback: None,
            joystick_callback: None,
            next_handle: 0x1000,
        };
        let primary = state.handle();
        state.monitors.push(FakeMonitor::new(primary, "Fake Primary", 0, 1920, 1080));
        let secondary = state.handle();
        state.monitors.push(FakeMonitor::new(secondary, "Fake Secondary", 1920, 2560, 1440));
        state.joysticks.insert(0, FakeJoystick::pad("Fake Joystick"));
        state
    }

    fn handle<T>(&mut self) -> *mut T {
        let handle = self.next_handle;
        self.next_handle += 0x10;
        handle as *mut T
    }

    pub fn window_mut(&mut self, raw: *mut GLFWwindow) -> Option<&mut FakeWindow> {
        self.windows.iter_mut().find(|w| w.handle == raw)
    }

    pub fn window(&self, raw: *mut GLFWwindow) -> Option<&FakeWindow> {
        self.windows.iter().find(|w| w.handle == raw)
    }

    fn monitor_mut(&mut self, raw: *mut GLFWmonitor) -> Option<&mut FakeMonitor> {
        self.monitors.iter_mut().find(|m| m.handle == raw)
    }
}

fn default_hints() -> HashMap<c_int, c_int> {
    HashMap::from([
        (0x0002_0001, GLFW_TRUE),  // focused
        (0x0002_0003, GLFW_TRUE),  // resizable
        (0x0002_0004, GLFW_TRUE),  // visible
        (0x0002_0005, GLFW_TRUE),  // decorated
        (0x0002_0006, GLFW_TRUE),  // auto iconify
        (0x0002_0007, GLFW_FALSE), // floating
        (0x0002_0008, GLFW_FALSE), // maximized
        (0x0002_000C, GLFW_TRUE),  // focus on show
        (CLIENT_API, OPENGL_API),
        (0x0002_2002, 1),
        (0x0002_2003, 0),
        (0x0002_2008, 0),
    ])
}

// === Test-side API ===

pub fn with<T>(f: impl FnOnce(&mut FakeState) -> T) -> T {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Resets the fake library and loads a fresh, uninitialized facade over it.
pub fn fake_glfw() -> Glfw {
    with(|s| *s = FakeState::new());
    another_glfw()
}

/// A second facade over the same fake library, without resetting it.
pub fn another_glfw() -> Glfw {
    unsafe { Glfw::from_symbols(&FakeLibrary::complete()) }.expect("the fake exports every symbol")
}

/// A fresh facade that is already initialized.
pub fn initialized_glfw() -> Glfw {
    let glfw = fake_glfw();
    glfw.init().expect("fake init succeeds");
    glfw
}

pub fn queue(event: FakeEvent) {
    with(|s| s.events.push_back(event));
}

/// Makes the next call of `function` report `code`.
pub fn arm_error(function: &'static str, code: ErrorCode, description: &str) {
    with(|s| s.armed.insert(function, (code.to_raw(), description.to_string())));
}

pub fn calls() -> Vec<&'static str> {
    with(|s| s.calls.clone())
}

pub fn called(function: &str) -> bool {
    with(|s| s.calls.iter().any(|call| *call == function))
}

pub fn clear_calls() {
    with(|s| s.calls.clear());
}

pub fn fake_window<T>(window: Window, f: impl FnOnce(&FakeWindow) -> T) -> T {
    with(|s| f(s.window(window.as_ptr()).expect("window exists natively")))
}

pub fn native_window_exists(window: Window) -> bool {
    with(|s| s.window(window.as_ptr()).is_some())
}

pub fn posted() -> usize {
    POSTED.load(Ordering::SeqCst)
}

/// Symbol source over the fake exports, optionally hiding some of them.
pub struct FakeLibrary {
    without: Vec<&'static str>,
}

impl FakeLibrary {
    pub fn complete() -> Self {
        Self { without: Vec::new() }
    }

    pub fn without(symbols: &[&'static str]) -> Self {
        Self {
            without: symbols.to_vec(),
        }
    }
}

impl SymbolSource for FakeLibrary {
    fn symbol(&self, name: &str) -> Option<*const c_void> {
        if self.without.contains(&name) {
            return None;
        }
        lookup(name)
    }

    fn describe(&self) -> String {
        "fake-glfw".to_string()
    }
}

// === Plumbing ===

fn enter(function: &'static str) -> bool {
    let armed = with(|s| {
        s.calls.push(function);
        s.armed.remove(function)
    });
    match armed {
        Some((code, description)) => {
            report(code, &description);
            true
        }
        None => false,
    }
}

fn report(code: c_int, description: &str) {
    let description = CString::new(description).unwrap_or_default();
    let callback = with(|s| {
        s.last_error = Some((code, description.clone()));
        s.error_callback
    });
    if let Some(callback) = callback {
        unsafe { callback(code, description.as_ptr()) };
    }
}

fn report_code(code: ErrorCode, description: &str) {
    report(code.to_raw(), description);
}

unsafe fn out<T>(ptr: *mut T, value: T) {
    if !ptr.is_null() {
        *ptr = value;
    }
}

unsafe fn text(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

fn callbacks_of(window: Window) -> NativeCallbacks {
    with(|s| s.window(window.as_ptr()).map(|w| w.callbacks).unwrap_or_default())
}

fn update_window(window: Window, f: impl FnOnce(&mut FakeWindow)) {
    with(|s| {
        if let Some(w) = s.window_mut(window.as_ptr()) {
            f(w);
        }
    });
}

fn dispatch_pending() {
    while let Some(event) = with(|s| s.events.pop_front()) {
        deliver(event);
    }
}

/// Delivers one event immediately, outside of any facade call.
pub fn deliver(event: FakeEvent) {
    let raw_bool = |value: bool| if value { GLFW_TRUE } else { GLFW_FALSE };
    unsafe {
        match event {
            FakeEvent::Pos(w, x, y) => {
                update_window(w, |fw| fw.pos = (x, y));
                if let Some(f) = callbacks_of(w).pos {
                    f(w.as_ptr(), x, y);
                }
            }
            FakeEvent::Size(w, width, height) => {
                update_window(w, |fw| fw.size = (width, height));
                if let Some(f) = callbacks_of(w).size {
                    f(w.as_ptr(), width, height);
                }
            }
            FakeEvent::Close(w) => {
                update_window(w, |fw| fw.should_close = true);
                if let Some(f) = callbacks_of(w).close {
                    f(w.as_ptr());
                }
            }
            FakeEvent::Refresh(w) => {
                if let Some(f) = callbacks_of(w).refresh {
                    f(w.as_ptr());
                }
            }
            FakeEvent::Focus(w, on) => {
                update_window(w, |fw| {
                    fw.attribs.insert(0x0002_0001, raw_bool(on));
                });
                if let Some(f) = callbacks_of(w).focus {
                    f(w.as_ptr(), raw_bool(on));
                }
            }
            FakeEvent::Iconify(w, on) => {
                if let Some(f) = callbacks_of(w).iconify {
                    f(w.as_ptr(), raw_bool(on));
                }
            }
            FakeEvent::Maximize(w, on) => {
                if let Some(f) = callbacks_of(w).maximize {
                    f(w.as_ptr(), raw_bool(on));
                }
            }
            FakeEvent::FramebufferSize(w, width, height) => {
                if let Some(f) = callbacks_of(w).framebuffer_size {
                    f(w.as_ptr(), width, height);
                }
            }
            FakeEvent::ContentScale(w, x, y) => {
                if let Some(f) = callbacks_of(w).content_scale {
                    f(w.as_ptr(), x, y);
                }
            }
            FakeEvent::Key(w, key, scancode, action, mods) => {
                update_window(w, |fw| {
                    fw.keys.insert(key, if action == 0 { 0 } else { 1 });
                });
                if let Some(f) = callbacks_of(w).key {
                    f(w.as_ptr(), key, scancode, action, mods);
                }
            }
            FakeEvent::Char(w, codepoint) => {
                if let Some(f) = callbacks_of(w).char {
                    f(w.as_ptr(), codepoint as c_uint);
                }
            }
            FakeEvent::CharMods(w, codepoint, mods) => {
                if let Some(f) = callbacks_of(w).char_mods {
                    f(w.as_ptr(), codepoint as c_uint, mods);
                }
            }
            FakeEvent::MouseButton(w, button, action, mods) => {
                update_window(w, |fw| {
                    fw.buttons.insert(button, action);
                });
                if let Some(f) = callbacks_of(w).mouse_button {
                    f(w.as_ptr(), button, action, mods);
                }
            }
            FakeEvent::CursorPos(w, x, y) => {
                update_window(w, |fw| fw.cursor_pos = (x, y));
                if let Some(f) = callbacks_of(w).cursor_pos {
                    f(w.as_ptr(), x, y);
                }
            }
            FakeEvent::CursorEnter(w, on) => {
                if let Some(f) = callbacks_of(w).cursor_enter {
                    f(w.as_ptr(), raw_bool(on));
                }
            }
            FakeEvent::Scroll(w, x, y) => {
                if let Some(f) = callbacks_of(w).scroll {
                    f(w.as_ptr(), x, y);
                }
            }
            FakeEvent::Drop(w, paths) => {
                let owned: Vec<CString> = paths.iter().filter_map(|p| CString::new(p.as_str()).ok()).collect();
                let mut pointers: Vec<*const c_char> = owned.iter().map(|p| p.as_ptr()).collect();
                if let Some(f) = callbacks_of(w).drop {
                    f(w.as_ptr(), pointers.len() as c_int, pointers.as_mut_ptr());
                }
            }
            FakeEvent::MonitorConnected(name) => {
                let (handle, callback) = with(|s| {
                    let handle = s.handle();
                    let x = s.monitors.len() as c_int * 4000;
                    s.monitors.push(FakeMonitor::new(handle, &name, x, 1024, 768));
                    (handle, s.monitor_callback)
                });
                if let Some(f) = callback {
                    f(handle, GLFW_CONNECTED);
                }
            }
            FakeEvent::MonitorDisconnected(index) => {
                let (handle, callback) = with(|s| (s.monitors.remove(index).handle, s.monitor_callback));
                if let Some(f) = callback {
                    f(handle, GLFW_DISCONNECTED);
                }
            }
            FakeEvent::JoystickConnected(jid) => {
                let callback = with(|s| {
                    s.joysticks.insert(jid, FakeJoystick::pad("Hotplugged"));
                    s.joystick_callback
                });
                if let Some(f) = callback {
                    f(jid, GLFW_CONNECTED);
                }
            }
            FakeEvent::JoystickDisconnected(jid) => {
                let callback = with(|s| {
                    s.joysticks.remove(&jid);
                    s.joystick_callback
                });
                if let Some(f) = callback {
                    f(jid, GLFW_DISCONNECTED);
                }
            }
            FakeEvent::Error(code, description) => report_code(code, &description),
        }
    }
}

// === Initialization, version and errors ===

unsafe extern "C" fn init() -> c_int {
    if enter("glfwInit") {
        return GLFW_FALSE;
    }
    with(|s| {
        if !s.initialized {
            s.initialized = true;
            s.init_count += 1;
            s.hints = default_hints();
        }
    });
    GLFW_TRUE
}

unsafe extern "C" fn terminate() {
    enter("glfwTerminate");
    with(|s| {
        if s.initialized {
            s.initialized = false;
            s.terminate_count += 1;
        }
        s.windows.clear();
        s.cursors.clear();
        s.current_context = ptr::null_mut();
        s.monitor_callback = None;
        s.joystick_callback = None;
    });
}

unsafe extern "C" fn init_hint(hint: c_int, value: c_int) {
    enter("glfwInitHint");
    with(|s| s.init_hints.insert(hint, value));
}

unsafe extern "C" fn get_version(major: *mut c_int, minor: *mut c_int, revision: *mut c_int) {
    enter("glfwGetVersion");
    out(major, 3);
    out(minor, 3);
    out(revision, 8);
}

unsafe extern "C" fn get_version_string() -> *const c_char {
    enter("glfwGetVersionString");
    VERSION.as_ptr().cast()
}

unsafe extern "C" fn get_error(description: *mut *const c_char) -> c_int {
    enter("glfwGetError");
    let (code, text) = with(|s| match s.last_error.take() {
        Some((code, text)) => {
            s.returned_error = text;
            (code, s.returned_error.as_ptr())
        }
        None => (0, ptr::null()),
    });
    out(description, text);
    code
}

unsafe extern "C" fn set_error_callback(callback: Option<GLFWerrorfun>) -> Option<GLFWerrorfun> {
    enter("glfwSetErrorCallback");
    with(|s| std::mem::replace(&mut s.error_callback, callback))
}

// === Monitors ===

unsafe extern "C" fn get_monitors(count: *mut c_int) -> *mut *mut GLFWmonitor {
    enter("glfwGetMonitors");
    let (len, list) = with(|s| {
        s.monitor_list = s.monitors.iter().map(|m| m.handle).collect();
        let list = if s.monitor_list.is_empty() {
            ptr::null_mut()
        } else {
            s.monitor_list.as_mut_ptr()
        };
        (s.monitor_list.len() as c_int, list)
    });
    out(count, len);
    list
}

unsafe extern "C" fn get_primary_monitor() -> *mut GLFWmonitor {
    enter("glfwGetPrimaryMonitor");
    with(|s| s.monitors.first().map(|m| m.handle).unwrap_or(ptr::null_mut()))
}

unsafe extern "C" fn get_monitor_pos(monitor: *mut GLFWmonitor, x: *mut c_int, y: *mut c_int) {
    enter("glfwGetMonitorPos");
    let (px, py) = with(|s| s.monitor_mut(monitor).map(|m| m.pos).unwrap_or_default());
    out(x, px);
    out(y, py);
}

unsafe extern "C" fn get_monitor_workarea(
    monitor: *mut GLFWmonitor,
    x: *mut c_int,
    y: *mut c_int,
    width: *mut c_int,
    height: *mut c_int,
) {
    enter("glfwGetMonitorWorkarea");
    let area = with(|s| s.monitor_mut(monitor).map(|m| m.workarea).unwrap_or_default());
    out(x, area[0]);
    out(y, area[1]);
    out(width, area[2]);
    out(height, area[3]);
}

unsafe extern "C" fn get_monitor_physical_size(monitor: *mut GLFWmonitor, width: *mut c_int, height: *mut c_int) {
    enter("glfwGetMonitorPhysicalSize");
    let (w, h) = with(|s| s.monitor_mut(monitor).map(|m| m.physical_size).unwrap_or_default());
    out(width, w);
    out(height, h);
}

unsafe extern "C" fn get_monitor_content_scale(monitor: *mut GLFWmonitor, x: *mut c_float, y: *mut c_float) {
    enter("glfwGetMonitorContentScale");
    let (sx, sy) = with(|s| s.monitor_mut(monitor).map(|m| m.content_scale).unwrap_or_default());
    out(x, sx);
    out(y, sy);
}

unsafe extern "C" fn get_monitor_name(monitor: *mut GLFWmonitor) -> *const c_char {
    enter("glfwGetMonitorName");
    with(|s| s.monitor_mut(monitor).map(|m| m.name.as_ptr()).unwrap_or(ptr::null()))
}

unsafe extern "C" fn set_monitor_callback(callback: Option<GLFWmonitorfun>) -> Option<GLFWmonitorfun> {
    enter("glfwSetMonitorCallback");
    with(|s| std::mem::replace(&mut s.monitor_callback, callback))
}

unsafe extern "C" fn get_video_modes(monitor: *mut GLFWmonitor, count: *mut c_int) -> *const VideoMode {
    enter("glfwGetVideoModes");
    let (len, modes) = with(|s| match s.monitor_mut(monitor) {
        Some(m) => (m.modes.len() as c_int, m.modes.as_ptr()),
        None => (0, ptr::null()),
    });
    out(count, len);
    modes
}

unsafe extern "C" fn get_video_mode(monitor: *mut GLFWmonitor) -> *const VideoMode {
    enter("glfwGetVideoMode");
    with(|s| {
        s.monitor_mut(monitor)
            .map(|m| &m.modes[m.current_mode] as *const VideoMode)
            .unwrap_or(ptr::null())
    })
}

unsafe extern "C" fn set_gamma(monitor: *mut GLFWmonitor, gamma: c_float) {
    enter("glfwSetGamma");
    if !gamma.is_finite() || gamma <= 0.0 {
        report_code(ErrorCode::InvalidValue, &format!("Invalid gamma value {}", gamma));
        return;
    }
    with(|s| {
        if let Some(m) = s.monitor_mut(monitor) {
            let channel: Vec<c_ushort> = (0..256)
                .map(|i| {
                    let value = (i as f32 / 255.0).powf(1.0 / gamma) * 65535.0 + 0.5;
                    value.min(65535.0) as c_ushort
                })
                .collect();
            m.ramp = [channel.clone(), channel.clone(), channel];
        }
    });
}

unsafe extern "C" fn get_gamma_ramp(monitor: *mut GLFWmonitor) -> *const GLFWgammaramp {
    enter("glfwGetGammaRamp");
    with(|s| match s.monitor_mut(monitor) {
        Some(m) => {
            m.ramp_view = GLFWgammaramp {
                red: m.ramp[0].as_mut_ptr(),
                green: m.ramp[1].as_mut_ptr(),
                blue: m.ramp[2].as_mut_ptr(),
                size: m.ramp[0].len() as c_uint,
            };
            &m.ramp_view as *const GLFWgammaramp
        }
        None => ptr::null(),
    })
}

unsafe extern "C" fn set_gamma_ramp(monitor: *mut GLFWmonitor, ramp: *const GLFWgammaramp) {
    enter("glfwSetGammaRamp");
    let Some(ramp) = ramp.as_ref() else {
        return;
    };
    if ramp.size == 0 {
        report_code(ErrorCode::InvalidValue, "Invalid gamma ramp size 0");
        return;
    }
    let size = ramp.size as usize;
    let channels = [
        std::slice::from_raw_parts(ramp.red, size).to_vec(),
        std::slice::from_raw_parts(ramp.green, size).to_vec(),
        std::slice::from_raw_parts(ramp.blue, size).to_vec(),
    ];
    with(|s| {
        if let Some(m) = s.monitor_mut(monitor) {
            m.ramp = channels;
        }
    });
}

// === Windows ===

unsafe extern "C" fn default_window_hints() {
    enter("glfwDefaultWindowHints");
    with(|s| {
        s.hints = default_hints();
        s.string_hints.clear();
    });
}

unsafe extern "C" fn window_hint(hint: c_int, value: c_int) {
    enter("glfwWindowHint");
    with(|s| s.hints.insert(hint, value));
}

unsafe extern "C" fn window_hint_string(hint: c_int, value: *const c_char) {
    enter("glfwWindowHintString");
    let bytes = if value.is_null() {
        Vec::new()
    } else {
        CStr::from_ptr(value).to_bytes().to_vec()
    };
    with(|s| s.string_hints.insert(hint, bytes));
}

unsafe extern "C" fn create_window(
    width: c_int,
    height: c_int,
    title: *const c_char,
    monitor: *mut GLFWmonitor,
    _share: *mut GLFWwindow,
) -> *mut GLFWwindow {
    if enter("glfwCreateWindow") {
        return ptr::null_mut();
    }
    if width <= 0 || height <= 0 {
        report_code(ErrorCode::InvalidValue, &format!("Invalid window size {}x{}", width, height));
        return ptr::null_mut();
    }
    let title = text(title);
    with(|s| {
        let handle = s.handle();
        let mut attribs = s.hints.clone();
        attribs.insert(0x0002_0002, GLFW_FALSE); // iconified
        attribs.insert(0x0002_000B, GLFW_FALSE); // hovered
        attribs.insert(0x0002_2004, 0); // context revision
        if attribs.get(&CLIENT_API).copied() == Some(0) {
            attribs.insert(0x0002_2002, 0);
            attribs.insert(0x0002_2003, 0);
        }
        s.windows.push(FakeWindow {
            handle,
            title,
            pos: (100, 100),
            size: (width, height),
            should_close: false,
            opacity: 1.0,
            attribs,
            input_modes: HashMap::from([(CURSOR_MODE, CURSOR_NORMAL)]),
            keys: HashMap::new(),
            buttons: HashMap::new(),
            cursor_pos: (0.0, 0.0),
            cursor: ptr::null_mut(),
            monitor,
            icon_sizes: Vec::new(),
            size_limits: [GLFW_DONT_CARE; 4],
            aspect_ratio: (GLFW_DONT_CARE, GLFW_DONT_CARE),
            attention_requests: 0,
            swaps: 0,
            callbacks: NativeCallbacks::default(),
        });
        handle
    })
}

unsafe extern "C" fn destroy_window(window: *mut GLFWwindow) {
    enter("glfwDestroyWindow");
    with(|s| {
        s.windows.retain(|w| w.handle != window);
        if s.current_context == window {
            s.current_context = ptr::null_mut();
        }
    });
}

unsafe extern "C" fn window_should_close(window: *mut GLFWwindow) -> c_int {
    enter("glfwWindowShouldClose");
    with(|s| match s.window(window) {
        Some(w) if w.should_close => GLFW_TRUE,
        _ => GLFW_FALSE,
    })
}

unsafe extern "C" fn set_window_should_close(window: *mut GLFWwindow, value: c_int) {
    enter("glfwSetWindowShouldClose");
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.should_close = value == GLFW_TRUE;
        }
    });
}

unsafe extern "C" fn set_window_title(window: *mut GLFWwindow, title: *const c_char) {
    if enter("glfwSetWindowTitle") {
        return;
    }
    let title = text(title);
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.title = title;
        }
    });
}

unsafe extern "C" fn set_window_icon(window: *mut GLFWwindow, count: c_int, images: *const GLFWimage) {
    enter("glfwSetWindowIcon");
    let sizes: Vec<(c_int, c_int)> = if count > 0 && !images.is_null() {
        std::slice::from_raw_parts(images, count as usize)
            .iter()
            .map(|image| (image.width, image.height))
            .collect()
    } else {
        Vec::new()
    };
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.icon_sizes = sizes;
        }
    });
}

unsafe extern "C" fn get_window_pos(window: *mut GLFWwindow, x: *mut c_int, y: *mut c_int) {
    enter("glfwGetWindowPos");
    let (px, py) = with(|s| s.window(window).map(|w| w.pos).unwrap_or_default());
    out(x, px);
    out(y, py);
}

unsafe extern "C" fn set_window_pos(window: *mut GLFWwindow, x: c_int, y: c_int) {
    enter("glfwSetWindowPos");
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.pos = (x, y);
        }
    });
}

unsafe extern "C" fn get_window_size(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int) {
    enter("glfwGetWindowSize");
    let (w, h) = with(|s| s.window(window).map(|w| w.size).unwrap_or_default());
    out(width, w);
    out(height, h);
}

unsafe extern "C" fn set_window_size_limits(
    window: *mut GLFWwindow,
    min_width: c_int,
    min_height: c_int,
    max_width: c_int,
    max_height: c_int,
) {
    enter("glfwSetWindowSizeLimits");
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.size_limits = [min_width, min_height, max_width, max_height];
        }
    });
}

unsafe extern "C" fn set_window_aspect_ratio(window: *mut GLFWwindow, numer: c_int, denom: c_int) {
    enter("glfwSetWindowAspectRatio");
    if numer != GLFW_DONT_CARE && (numer <= 0 || denom <= 0) {
        report_code(ErrorCode::InvalidValue, &format!("Invalid window aspect ratio {}:{}", numer, denom));
        return;
    }
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.aspect_ratio = (numer, denom);
        }
    });
}

unsafe extern "C" fn set_window_size(window: *mut GLFWwindow, width: c_int, height: c_int) {
    enter("glfwSetWindowSize");
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.size = (width, height);
        }
    });
}

unsafe extern "C" fn get_framebuffer_size(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int) {
    enter("glfwGetFramebufferSize");
    let (w, h) = with(|s| s.window(window).map(|w| w.size).unwrap_or_default());
    out(width, w * 2);
    out(height, h * 2);
}

unsafe extern "C" fn get_window_frame_size(
    window: *mut GLFWwindow,
    left: *mut c_int,
    top: *mut c_int,
    right: *mut c_int,
    bottom: *mut c_int,
) {
    enter("glfwGetWindowFrameSize");
    let decorated = with(|s| s.window(window).map(|w| w.attrib(0x0002_0005) == GLFW_TRUE).unwrap_or(false));
    let (edge, title_bar) = if decorated { (1, 24) } else { (0, 0) };
    out(left, edge);
    out(top, title_bar);
    out(right, edge);
    out(bottom, edge);
}

unsafe extern "C" fn get_window_content_scale(window: *mut GLFWwindow, x: *mut c_float, y: *mut c_float) {
    enter("glfwGetWindowContentScale");
    let known = with(|s| s.window(window).is_some());
    let scale = if known { 2.0 } else { 0.0 };
    out(x, scale);
    out(y, scale);
}

unsafe extern "C" fn get_window_opacity(window: *mut GLFWwindow) -> c_float {
    enter("glfwGetWindowOpacity");
    with(|s| s.window(window).map(|w| w.opacity).unwrap_or(1.0))
}

unsafe extern "C" fn set_window_opacity(window: *mut GLFWwindow, opacity: c_float) {
    enter("glfwSetWindowOpacity");
    if !(0.0..=1.0).contains(&opacity) {
        report_code(ErrorCode::InvalidValue, &format!("Invalid window opacity {}", opacity));
        return;
    }
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.opacity = opacity;
        }
    });
}

fn set_attribs(window: *mut GLFWwindow, values: &[(c_int, c_int)]) {
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.attribs.extend(values.iter().copied());
        }
    });
}

unsafe extern "C" fn iconify_window(window: *mut GLFWwindow) {
    enter("glfwIconifyWindow");
    set_attribs(window, &[(0x0002_0002, GLFW_TRUE)]);
}

unsafe extern "C" fn restore_window(window: *mut GLFWwindow) {
    enter("glfwRestoreWindow");
    set_attribs(window, &[(0x0002_0002, GLFW_FALSE), (0x0002_0008, GLFW_FALSE)]);
}

unsafe extern "C" fn maximize_window(window: *mut GLFWwindow) {
    enter("glfwMaximizeWindow");
    set_attribs(window, &[(0x0002_0008, GLFW_TRUE)]);
}

unsafe extern "C" fn show_window(window: *mut GLFWwindow) {
    enter("glfwShowWindow");
    set_attribs(window, &[(0x0002_0004, GLFW_TRUE)]);
}

unsafe extern "C" fn hide_window(window: *mut GLFWwindow) {
    enter("glfwHideWindow");
    set_attribs(window, &[(0x0002_0004, GLFW_FALSE)]);
}

unsafe extern "C" fn focus_window(window: *mut GLFWwindow) {
    enter("glfwFocusWindow");
    set_attribs(window, &[(0x0002_0001, GLFW_TRUE)]);
}

unsafe extern "C" fn request_window_attention(window: *mut GLFWwindow) {
    enter("glfwRequestWindowAttention");
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.attention_requests += 1;
        }
    });
}

unsafe extern "C" fn get_window_monitor(window: *mut GLFWwindow) -> *mut GLFWmonitor {
    enter("glfwGetWindowMonitor");
    with(|s| s.window(window).map(|w| w.monitor).unwrap_or(ptr::null_mut()))
}

unsafe extern "C" fn set_window_monitor(
    window: *mut GLFWwindow,
    monitor: *mut GLFWmonitor,
    x: c_int,
    y: c_int,
    width: c_int,
    height: c_int,
    _refresh_rate: c_int,
) {
    enter("glfwSetWindowMonitor");
    if width <= 0 || height <= 0 {
        report_code(ErrorCode::InvalidValue, &format!("Invalid window size {}x{}", width, height));
        return;
    }
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.monitor = monitor;
            w.size = (width, height);
            if monitor.is_null() {
                w.pos = (x, y);
            }
        }
    });
}

unsafe extern "C" fn get_window_attrib(window: *mut GLFWwindow, attrib: c_int) -> c_int {
    enter("glfwGetWindowAttrib");
    let value = with(|s| s.window(window).and_then(|w| w.attribs.get(&attrib).copied()));
    match value {
        Some(value) => value,
        None => {
            report_code(ErrorCode::InvalidEnum, &format!("Invalid window attribute 0x{:08X}", attrib));
            0
        }
    }
}

unsafe extern "C" fn set_window_attrib(window: *mut GLFWwindow, attrib: c_int, value: c_int) {
    enter("glfwSetWindowAttrib");
    if !SETTABLE_ATTRIBS.contains(&attrib) {
        report_code(ErrorCode::InvalidEnum, &format!("Invalid window attribute 0x{:08X}", attrib));
        return;
    }
    set_attribs(window, &[(attrib, value)]);
}

// === Events ===

unsafe extern "C" fn poll_events() {
    enter("glfwPollEvents");
    dispatch_pending();
}

unsafe extern "C" fn wait_events() {
    enter("glfwWaitEvents");
    dispatch_pending();
}

unsafe extern "C" fn wait_events_timeout(timeout: c_double) {
    enter("glfwWaitEventsTimeout");
    if !timeout.is_finite() || timeout < 0.0 {
        report_code(ErrorCode::InvalidValue, &format!("Invalid time {}", timeout));
        return;
    }
    with(|s| s.wait_timeouts.push(timeout));
    dispatch_pending();
}

// Called from any thread, so it leaves the thread-local state alone.
unsafe extern "C" fn post_empty_event() {
    POSTED.fetch_add(1, Ordering::SeqCst);
}

// === Input ===

unsafe extern "C" fn get_input_mode(window: *mut GLFWwindow, mode: c_int) -> c_int {
    enter("glfwGetInputMode");
    if !(0x0003_3001..=0x0003_3005).contains(&mode) {
        report_code(ErrorCode::InvalidEnum, &format!("Invalid input mode 0x{:08X}", mode));
        return 0;
    }
    with(|s| s.window(window).and_then(|w| w.input_modes.get(&mode).copied()).unwrap_or(0))
}

unsafe extern "C" fn set_input_mode(window: *mut GLFWwindow, mode: c_int, value: c_int) {
    enter("glfwSetInputMode");
    if !(0x0003_3001..=0x0003_3005).contains(&mode) {
        report_code(ErrorCode::InvalidEnum, &format!("Invalid input mode 0x{:08X}", mode));
        return;
    }
    if mode == CURSOR_MODE && !(0x0003_4001..=0x0003_4003).contains(&value) {
        report_code(ErrorCode::InvalidEnum, &format!("Invalid cursor mode 0x{:08X}", value));
        return;
    }
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.input_modes.insert(mode, value);
        }
    });
}

unsafe extern "C" fn raw_mouse_motion_supported() -> c_int {
    enter("glfwRawMouseMotionSupported");
    GLFW_TRUE
}

unsafe extern "C" fn get_key_name(key: c_int, scancode: c_int) -> *const c_char {
    enter("glfwGetKeyName");
    if key == KEY_A || (key == -1 && scancode == SCANCODE_A) {
        KEY_NAME_A.as_ptr().cast()
    } else {
        ptr::null()
    }
}

unsafe extern "C" fn get_key_scancode(key: c_int) -> c_int {
    enter("glfwGetKeyScancode");
    if key == KEY_A {
        SCANCODE_A
    } else if key < 0 {
        report_code(ErrorCode::InvalidEnum, &format!("Invalid key {}", key));
        -1
    } else {
        key + 8
    }
}

unsafe extern "C" fn get_key(window: *mut GLFWwindow, key: c_int) -> c_int {
    enter("glfwGetKey");
    with(|s| s.window(window).and_then(|w| w.keys.get(&key).copied()).unwrap_or(0))
}

unsafe extern "C" fn get_mouse_button(window: *mut GLFWwindow, button: c_int) -> c_int {
    enter("glfwGetMouseButton");
    with(|s| s.window(window).and_then(|w| w.buttons.get(&button).copied()).unwrap_or(0))
}

unsafe extern "C" fn get_cursor_pos(window: *mut GLFWwindow, x: *mut c_double, y: *mut c_double) {
    enter("glfwGetCursorPos");
    let (px, py) = with(|s| s.window(window).map(|w| w.cursor_pos).unwrap_or_default());
    out(x, px);
    out(y, py);
}

unsafe extern "C" fn set_cursor_pos(window: *mut GLFWwindow, x: c_double, y: c_double) {
    enter("glfwSetCursorPos");
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.cursor_pos = (x, y);
        }
    });
}

unsafe extern "C" fn create_cursor(image: *const GLFWimage, xhot: c_int, yhot: c_int) -> *mut GLFWcursor {
    if enter("glfwCreateCursor") {
        return ptr::null_mut();
    }
    let Some(image) = image.as_ref() else {
        report_code(ErrorCode::InvalidValue, "Missing cursor image");
        return ptr::null_mut();
    };
    let geometry = (image.width, image.height, xhot, yhot);
    with(|s| {
        let handle = s.handle();
        s.cursors.push(FakeCursor {
            handle,
            shape: None,
            image: Some(geometry),
        });
        handle
    })
}

unsafe extern "C" fn create_standard_cursor(shape: c_int) -> *mut GLFWcursor {
    enter("glfwCreateStandardCursor");
    if !(0x0003_6001..=0x0003_6006).contains(&shape) {
        report_code(ErrorCode::InvalidEnum, &format!("Invalid standard cursor 0x{:08X}", shape));
        return ptr::null_mut();
    }
    with(|s| {
        let handle = s.handle();
        s.cursors.push(FakeCursor {
            handle,
            shape: Some(shape),
            image: None,
        });
        handle
    })
}

unsafe extern "C" fn destroy_cursor(cursor: *mut GLFWcursor) {
    enter("glfwDestroyCursor");
    with(|s| {
        s.cursors.retain(|c| c.handle != cursor);
        for window in s.windows.iter_mut().filter(|w| w.cursor == cursor) {
            window.cursor = ptr::null_mut();
        }
    });
}

unsafe extern "C" fn set_cursor(window: *mut GLFWwindow, cursor: *mut GLFWcursor) {
    enter("glfwSetCursor");
    with(|s| {
        if let Some(w) = s.window_mut(window) {
            w.cursor = cursor;
        }
    });
}

// === Joysticks and gamepads ===

fn valid_jid(jid: c_int) -> bool {
    if (0..16).contains(&jid) {
        true
    } else {
        report_code(ErrorCode::InvalidEnum, &format!("Invalid joystick ID {}", jid));
        false
    }
}

unsafe extern "C" fn joystick_present(jid: c_int) -> c_int {
    enter("glfwJoystickPresent");
    if !valid_jid(jid) {
        return GLFW_FALSE;
    }
    with(|s| if s.joysticks.contains_key(&jid) { GLFW_TRUE } else { GLFW_FALSE })
}

unsafe extern "C" fn get_joystick_axes(jid: c_int, count: *mut c_int) -> *const c_float {
    enter("glfwGetJoystickAxes");
    out(count, 0);
    if !valid_jid(jid) {
        return ptr::null();
    }
    let (len, axes) = with(|s| match s.joysticks.get(&jid) {
        Some(j) => (j.axes.len() as c_int, j.axes.as_ptr()),
        None => (0, ptr::null()),
    });
    out(count, len);
    axes
}

unsafe extern "C" fn get_joystick_buttons(jid: c_int, count: *mut c_int) -> *const c_uchar {
    enter("glfwGetJoystickButtons");
    out(count, 0);
    if !valid_jid(jid) {
        return ptr::null();
    }
    let (len, buttons) = with(|s| match s.joysticks.get(&jid) {
        Some(j) => (j.buttons.len() as c_int, j.buttons.as_ptr()),
        None => (0, ptr::null()),
    });
    out(count, len);
    buttons
}

unsafe extern "C" fn get_joystick_hats(jid: c_int, count: *mut c_int) -> *const c_uchar {
    enter("glfwGetJoystickHats");
    out(count, 0);
    if !valid_jid(jid) {
        return ptr::null();
    }
    let (len, hats) = with(|s| match s.joysticks.get(&jid) {
        Some(j) => (j.hats.len() as c_int, j.hats.as_ptr()),
        None => (0, ptr::null()),
    });
    out(count, len);
    hats
}

unsafe extern "C" fn get_joystick_name(jid: c_int) -> *const c_char {
    enter("glfwGetJoystickName");
    if !valid_jid(jid) {
        return ptr::null();
    }
    with(|s| s.joysticks.get(&jid).map(|j| j.name.as_ptr()).unwrap_or(ptr::null()))
}

unsafe extern "C" fn get_joystick_guid(jid: c_int) -> *const c_char {
    enter("glfwGetJoystickGUID");
    if !valid_jid(jid) {
        return ptr::null();
    }
    with(|s| s.joysticks.get(&jid).map(|j| j.guid.as_ptr()).unwrap_or(ptr::null()))
}

unsafe extern "C" fn joystick_is_gamepad(jid: c_int) -> c_int {
    enter("glfwJoystickIsGamepad");
    if !valid_jid(jid) {
        return GLFW_FALSE;
    }
    with(|s| match s.joysticks.get(&jid) {
        Some(j) if j.gamepad.is_some() => GLFW_TRUE,
        _ => GLFW_FALSE,
    })
}

unsafe extern "C" fn set_joystick_callback(callback: Option<GLFWjoystickfun>) -> Option<GLFWjoystickfun> {
    enter("glfwSetJoystickCallback");
    with(|s| std::mem::replace(&mut s.joystick_callback, callback))
}

unsafe extern "C" fn update_gamepad_mappings(mappings: *const c_char) -> c_int {
    enter("glfwUpdateGamepadMappings");
    let mappings = text(mappings);
    if mappings.lines().any(|line| !line.is_empty() && line.split(',').count() < 3) {
        report_code(ErrorCode::InvalidValue, "Invalid gamepad mapping");
        return GLFW_FALSE;
    }
    with(|s| s.mappings.extend(mappings.lines().filter(|l| !l.is_empty()).map(str::to_string)));
    GLFW_TRUE
}

unsafe extern "C" fn get_gamepad_name(jid: c_int) -> *const c_char {
    enter("glfwGetGamepadName");
    if !valid_jid(jid) {
        return ptr::null();
    }
    with(|s| {
        s.joysticks
            .get(&jid)
            .and_then(|j| j.gamepad.as_ref())
            .map(|(name, _)| name.as_ptr())
            .unwrap_or(ptr::null())
    })
}

unsafe extern "C" fn get_gamepad_state(jid: c_int, state: *mut GamepadState) -> c_int {
    enter("glfwGetGamepadState");
    if !valid_jid(jid) {
        return GLFW_FALSE;
    }
    let pad = with(|s| s.joysticks.get(&jid).and_then(|j| j.gamepad.as_ref()).map(|(_, pad)| *pad));
    match pad {
        Some(pad) => {
            out(state, pad);
            GLFW_TRUE
        }
        None => GLFW_FALSE,
    }
}

// === Clipboard and time ===

unsafe extern "C" fn set_clipboard_string(_window: *mut GLFWwindow, value: *const c_char) {
    enter("glfwSetClipboardString");
    let value = if value.is_null() {
        CString::default()
    } else {
        CStr::from_ptr(value).to_owned()
    };
    with(|s| s.clipboard = Some(value));
}

unsafe extern "C" fn get_clipboard_string(_window: *mut GLFWwindow) -> *const c_char {
    enter("glfwGetClipboardString");
    let text = with(|s| s.clipboard.as_ref().map(|c| c.as_ptr()));
    match text {
        Some(text) => text,
        None => {
            report_code(ErrorCode::FormatUnavailable, "Clipboard is empty");
            ptr::null()
        }
    }
}

unsafe extern "C" fn get_time() -> c_double {
    enter("glfwGetTime");
    with(|s| s.time)
}

unsafe extern "C" fn set_time(time: c_double) {
    enter("glfwSetTime");
    if !time.is_finite() || time < 0.0 {
        report_code(ErrorCode::InvalidValue, &format!("Invalid time {}", time));
        return;
    }
    with(|s| s.time = time);
}

unsafe extern "C" fn get_timer_value() -> u64 {
    enter("glfwGetTimerValue");
    with(|s| (s.time * 1_000_000.0) as u64)
}

unsafe extern "C" fn get_timer_frequency() -> u64 {
    enter("glfwGetTimerFrequency");
    1_000_000
}

// === Contexts ===

unsafe extern "C" fn make_context_current(window: *mut GLFWwindow) {
    enter("glfwMakeContextCurrent");
    let has_context = window.is_null() || with(|s| s.window(window).map(FakeWindow::has_context).unwrap_or(false));
    if !has_context {
        report_code(ErrorCode::NoWindowContext, "Cannot make current with a window that has no OpenGL or OpenGL ES context");
        return;
    }
    with(|s| s.current_context = window);
}

unsafe extern "C" fn get_current_context() -> *mut GLFWwindow {
    enter("glfwGetCurrentContext");
    with(|s| s.current_context)
}

unsafe extern "C" fn swap_buffers(window: *mut GLFWwindow) {
    enter("glfwSwapBuffers");
    let swapped = with(|s| match s.window_mut(window) {
        Some(w) if w.has_context() => {
            w.swaps += 1;
            true
        }
        _ => false,
    });
    if !swapped {
        report_code(ErrorCode::NoWindowContext, "Cannot swap buffers of a window that has no OpenGL or OpenGL ES context");
    }
}

unsafe extern "C" fn swap_interval(interval: c_int) {
    enter("glfwSwapInterval");
    let current = with(|s| !s.current_context.is_null());
    if !current {
        report_code(ErrorCode::NoCurrentContext, "Cannot set swap interval without a current OpenGL or OpenGL ES context");
        return;
    }
    with(|s| s.swap_interval = Some(interval));
}

unsafe extern "C" fn extension_supported(extension: *const c_char) -> c_int {
    enter("glfwExtensionSupported");
    if with(|s| s.current_context.is_null()) {
        report_code(ErrorCode::NoCurrentContext, "Cannot query extension without a current OpenGL or OpenGL ES context");
        return GLFW_FALSE;
    }
    let extension = text(extension);
    with(|s| if s.extensions.contains(&extension) { GLFW_TRUE } else { GLFW_FALSE })
}

extern "C" fn fake_gl_clear(_mask: c_uint) {}

unsafe extern "C" fn get_proc_address(name: *const c_char) -> *const c_void {
    enter("glfwGetProcAddress");
    if with(|s| s.current_context.is_null()) {
        report_code(ErrorCode::NoCurrentContext, "Cannot query entry point without a current OpenGL or OpenGL ES context");
        return ptr::null();
    }
    if text(name) == "glClear" {
        fake_gl_clear as *const c_void
    } else {
        ptr::null()
    }
}

// === Export table ===

macro_rules! exports {
    ($($symbol:literal => $function:ident,)+) => {
        /// Every symbol the fake library exports.
        pub const EXPORTED: &[&str] = &[$($symbol),+];

        fn lookup(name: &str) -> Option<*const c_void> {
            match name {
                $($symbol => Some($function as *const c_void),)+
                _ => None,
            }
        }
    };
}

exports! {
    "glfwInit" => init,
    "glfwTerminate" => terminate,
    "glfwInitHint" => init_hint,
    "glfwGetVersion" => get_version,
    "glfwGetVersionString" => get_version_string,
    "glfwGetError" => get_error,
    "glfwSetErrorCallback" => set_error_callback,
    "glfwGetMonitors" => get_monitors,
    "glfwGetPrimaryMonitor" => get_primary_monitor,
    "glfwGetMonitorPos" => get_monitor_pos,
    "glfwGetMonitorWorkarea" => get_monitor_workarea,
    "glfwGetMonitorPhysicalSize" => get_monitor_physical_size,
    "glfwGetMonitorContentScale" => get_monitor_content_scale,
    "glfwGetMonitorName" => get_monitor_name,
    "glfwSetMonitorCallback" => set_monitor_callback,
    "glfwGetVideoModes" => get_video_modes,
    "glfwGetVideoMode" => get_video_mode,
    "glfwSetGamma" => set_gamma,
    "glfwGetGammaRamp" => get_gamma_ramp,
    "glfwSetGammaRamp" => set_gamma_ramp,
    "glfwDefaultWindowHints" => default_window_hints,
    "glfwWindowHint" => window_hint,
    "glfwWindowHintString" => window_hint_string,
    "glfwCreateWindow" => create_window,
    "glfwDestroyWindow" => destroy_window,
    "glfwWindowShouldClose" => window_should_close,
    "glfwSetWindowShouldClose" => set_window_should_close,
    "glfwSetWindowTitle" => set_window_title,
    "glfwSetWindowIcon" => set_window_icon,
    "glfwGetWindowPos" => get_window_pos,
    "glfwSetWindowPos" => set_window_pos,
    "glfwGetWindowSize" => get_window_size,
    "glfwSetWindowSizeLimits" => set_window_size_limits,
    "glfwSetWindowAspectRatio" => set_window_aspect_ratio,
    "glfwSetWindowSize" => set_window_size,
    "glfwGetFramebufferSize" => get_framebuffer_size,
    "glfwGetWindowFrameSize" => get_window_frame_size,
    "glfwGetWindowContentScale" => get_window_content_scale,
    "glfwGetWindowOpacity" => get_window_opacity,
    "glfwSetWindowOpacity" => set_window_opacity,
    "glfwIconifyWindow" => iconify_window,
    "glfwRestoreWindow" => restore_window,
    "glfwMaximizeWindow" => maximize_window,
    "glfwShowWindow" => show_window,
    "glfwHideWindow" => hide_window,
    "glfwFocusWindow" => focus_window,
    "glfwRequestWindowAttention" => request_window_attention,
    "glfwGetWindowMonitor" => get_window_monitor,
    "glfwSetWindowMonitor" => set_window_monitor,
    "glfwGetWindowAttrib" => get_window_attrib,
    "glfwSetWindowAttrib" => set_window_attrib,
    "glfwSetWindowPosCallback" => set_window_pos_callback,
    "glfwSetWindowSizeCallback" => set_window_size_callback,
    "glfwSetWindowCloseCallback" => set_window_close_callback,
    "glfwSetWindowRefreshCallback" => set_window_refresh_callback,
    "glfwSetWindowFocusCallback" => set_window_focus_callback,
    "glfwSetWindowIconifyCallback" => set_window_iconify_callback,
    "glfwSetWindowMaximizeCallback" => set_window_maximize_callback,
    "glfwSetFramebufferSizeCallback" => set_framebuffer_size_callback,
    "glfwSetWindowContentScaleCallback" => set_window_content_scale_callback,
    "glfwPollEvents" => poll_events,
    "glfwWaitEvents" => wait_events,
    "glfwWaitEventsTimeout" => wait_events_timeout,
    "glfwPostEmptyEvent" => post_empty_event,
    "glfwGetInputMode" => get_input_mode,
    "glfwSetInputMode" => set_input_mode,
    "glfwRawMouseMotionSupported" => raw_mouse_motion_supported,
    "glfwGetKeyName" => get_key_name,
    "glfwGetKeyScancode" => get_key_scancode,
    "glfwGetKey" => get_key,
    "glfwGetMouseButton" => get_mouse_button,
    "glfwGetCursorPos" => get_cursor_pos,
    "glfwSetCursorPos" => set_cursor_pos,
    "glfwCreateCursor" => create_cursor,
    "glfwCreateStandardCursor" => create_standard_cursor,
    "glfwDestroyCursor" => destroy_cursor,
    "glfwSetCursor" => set_cursor,
    "glfwSetKeyCallback" => set_key_callback,
    "glfwSetCharCallback" => set_char_callback,
    "glfwSetCharModsCallback" => set_char_mods_callback,
    "glfwSetMouseButtonCallback" => set_mouse_button_callback,
    "glfwSetCursorPosCallback" => set_cursor_pos_callback,
    "glfwSetCursorEnterCallback" => set_cursor_enter_callback,
    "glfwSetScrollCallback" => set_scroll_callback,
    "glfwSetDropCallback" => set_drop_callback,
    "glfwJoystickPresent" => joystick_present,
    "glfwGetJoystickAxes" => get_joystick_axes,
    "glfwGetJoystickButtons" => get_joystick_buttons,
    "glfwGetJoystickHats" => get_joystick_hats,
    "glfwGetJoystickName" => get_joystick_name,
    "glfwGetJoystickGUID" => get_joystick_guid,
    "glfwJoystickIsGamepad" => joystick_is_gamepad,
    "glfwSetJoystickCallback" => set_joystick_callback,
    "glfwUpdateGamepadMappings" => update_gamepad_mappings,
    "glfwGetGamepadName" => get_gamepad_name,
    "glfwGetGamepadState" => get_gamepad_state,
    "glfwSetClipboardString" => set_clipboard_string,
    "glfwGetClipboardString" => get_clipboard_string,
    "glfwGetTime" => get_time,
    "glfwSetTime" => set_time,
    "glfwGetTimerValue" => get_timer_value,
    "glfwGetTimerFrequency" => get_timer_frequency,
    "glfwMakeContextCurrent" => make_context_current,
    "glfwGetCurrentContext" => get_current_context,
    "glfwSwapBuffers" => swap_buffers,
    "glfwSwapInterval" => swap_interval,
    "glfwExtensionSupported" => extension_supported,
    "glfwGetProcAddress" => get_proc_address,
}
