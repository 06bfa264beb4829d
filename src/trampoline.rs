//! `extern "C"` trampolines and the thread-local routing state behind them.
//!
//! Native GLFW only knows these functions. Each one finds the `Glfw` instance that
//! owns the window (or every live instance, for library-wide events), moves the
//! registered closure out of its slot, runs it, and puts it back. Panics never
//! cross the native frames: they are parked here and resumed by the facade once
//! the native call that dispatched them returns.

use std::any::Any;
use std::cell::RefCell;
use std::os::raw::{c_char, c_double, c_float, c_int, c_uint};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::callbacks::{CallbackSlot, GlobalCallbacks, WindowCallbacks};
use crate::error::{ErrorCode, NativeError};
use crate::ffi::{GLFWmonitor, GLFWwindow, GLFW_TRUE};
use crate::glfw::Shared;
use crate::handle::{Monitor, Window};
use crate::marshal;
use crate::types::{Action, ConnectionEvent, Joystick, Key, Modifiers, MouseButton};

thread_local! {
    static CONTEXTS: RefCell<Vec<Weak<Shared>>> = const { RefCell::new(Vec::new()) };
    static ERROR_FRAMES: RefCell<Vec<Option<NativeError>>> = const { RefCell::new(Vec::new()) };
    static PENDING_PANIC: RefCell<Option<Box<dyn Any + Send>>> = const { RefCell::new(None) };
}

/// Makes `shared` reachable from trampolines running on this thread.
pub(crate) fn register(shared: &Rc<Shared>) {
    CONTEXTS.with(|contexts| {
        let mut contexts = contexts.borrow_mut();
        contexts.retain(|weak| weak.strong_count() > 0);
        contexts.push(Rc::downgrade(shared));
    });
}

pub(crate) fn unregister(shared: &Rc<Shared>) {
    CONTEXTS.with(|contexts| {
        contexts
            .borrow_mut()
            .retain(|weak| weak.strong_count() > 0 && !std::ptr::eq(weak.as_ptr(), Rc::as_ptr(shared)));
    });
}

pub(crate) fn live_contexts() -> Vec<Rc<Shared>> {
    CONTEXTS.with(|contexts| contexts.borrow().iter().filter_map(Weak::upgrade).collect())
}

/// Live instances on this thread driving the same native library as `shared`, itself included.
pub(crate) fn siblings(shared: &Shared) -> Vec<Rc<Shared>> {
    live_contexts()
        .into_iter()
        .filter(|other| other.same_library(shared))
        .collect()
}

fn owner_of(window: Window) -> Option<Rc<Shared>> {
    live_contexts().into_iter().find(|shared| {
        shared
            .registry
            .try_borrow()
            .map(|registry| registry.contains_window(window))
            .unwrap_or(false)
    })
}

/// Runs `call` in its own error frame and returns the first native error reported
/// during it.
///
/// Frames nest: a facade call made from a callback dispatched inside `call` gets a
/// frame of its own and cannot see or consume the outer call's error.
pub(crate) fn capture<T>(call: impl FnOnce() -> T) -> (T, Option<NativeError>) {
    ERROR_FRAMES.with(|frames| frames.borrow_mut().push(None));
    let value = call();
    let error = ERROR_FRAMES.with(|frames| frames.borrow_mut().pop().flatten());
    (value, error)
}

/// Errors raised outside any native call reach only the error closures.
fn record_error(error: NativeError) {
    ERROR_FRAMES.with(|frames| {
        if let Some(frame) = frames.borrow_mut().last_mut() {
            frame.get_or_insert(error);
        }
    });
}

fn stash_panic(payload: Box<dyn Any + Send>) {
    PENDING_PANIC.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            log::warn!("dropping a second panic raised inside a GLFW callback");
        } else {
            *slot = Some(payload);
        }
    });
}

pub(crate) fn take_panic() -> Option<Box<dyn Any + Send>> {
    PENDING_PANIC.with(|slot| slot.borrow_mut().take())
}

/// Re-raises a panic caught inside a callback during the last native call.
pub(crate) fn resume_pending_panic() {
    if let Some(payload) = take_panic() {
        panic::resume_unwind(payload);
    }
}

fn guard(body: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(body)) {
        stash_panic(payload);
    }
}

fn dispatch_window<F: ?Sized>(
    raw: *mut GLFWwindow,
    slot: fn(&mut WindowCallbacks) -> &mut CallbackSlot<F>,
    invoke: impl FnOnce(&mut F, Window),
) {
    guard(|| {
        let window = Window::from_raw(raw);
        let Some(shared) = owner_of(window) else {
            return;
        };

        let callback = match shared.registry.try_borrow_mut() {
            Ok(mut registry) => registry.window_mut(window).ok().and_then(|slots| slot(slots).begin()),
            Err(_) => {
                log::warn!("registry busy, dropping event for {:?}", window);
                None
            }
        };
        let Some(mut callback) = callback else {
            return;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| invoke(&mut *callback, window)));

        // The closure may have destroyed its window or terminated the library.
        let leftover = match shared.registry.try_borrow_mut() {
            Ok(mut registry) => match registry.window_mut(window) {
                Ok(slots) => slot(slots).finish(callback),
                Err(_) => Some(callback),
            },
            Err(_) => Some(callback),
        };
        drop(leftover);

        if let Err(payload) = outcome {
            stash_panic(payload);
        }
    });
}

fn dispatch_global<F: ?Sized>(
    slot: fn(&mut GlobalCallbacks) -> &mut CallbackSlot<F>,
    mut invoke: impl FnMut(&mut F),
) {
    for shared in live_contexts() {
        let callback = match shared.globals.try_borrow_mut() {
            Ok(mut globals) => slot(&mut *globals).begin(),
            Err(_) => None,
        };
        let Some(mut callback) = callback else {
            continue;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| invoke(&mut *callback)));

        let leftover = match shared.globals.try_borrow_mut() {
            Ok(mut globals) => slot(&mut *globals).finish(callback),
            Err(_) => Some(callback),
        };
        drop(leftover);

        if let Err(payload) = outcome {
            stash_panic(payload);
        }
    }
}

pub(crate) unsafe extern "C" fn error_callback(code: c_int, description: *const c_char) {
    let description = marshal::decode_or_empty(description);
    guard(|| {
        let error = NativeError::new(ErrorCode::from_raw(code), description);
        log::debug!("GLFW error {}", error);
        dispatch_global(|globals| &mut globals.error, |callback| {
            callback(error.code, &error.description)
        });
        record_error(error);
    });
}

pub(crate) unsafe extern "C" fn monitor_callback(monitor: *mut GLFWmonitor, event: c_int) {
    guard(|| {
        let Some(event) = ConnectionEvent::from_raw(event) else {
            return;
        };
        let monitor = Monitor::from_raw(monitor);
        dispatch_global(|globals| &mut globals.monitor, |callback| callback(monitor, event));
    });
}

pub(crate) unsafe extern "C" fn joystick_callback(jid: c_int, event: c_int) {
    guard(|| {
        let (Some(joystick), Some(event)) = (Joystick::from_raw(jid), ConnectionEvent::from_raw(event)) else {
            return;
        };
        dispatch_global(|globals| &mut globals.joystick, |callback| callback(joystick, event));
    });
}

pub(crate) unsafe extern "C" fn window_pos(window: *mut GLFWwindow, x: c_int, y: c_int) {
    dispatch_window(window, |slots| &mut slots.pos, |callback, window| callback(window, x, y));
}

pub(crate) unsafe extern "C" fn window_size(window: *mut GLFWwindow, width: c_int, height: c_int) {
    dispatch_window(window, |slots| &mut slots.size, |callback, window| {
        callback(window, width, height)
    });
}

pub(crate) unsafe extern "C" fn window_close(window: *mut GLFWwindow) {
    dispatch_window(window, |slots| &mut slots.close, |callback, window| callback(window));
}

pub(crate) unsafe extern "C" fn window_refresh(window: *mut GLFWwindow) {
    dispatch_window(window, |slots| &mut slots.refresh, |callback, window| callback(window));
}

pub(crate) unsafe extern "C" fn window_focus(window: *mut GLFWwindow, focused: c_int) {
    dispatch_window(window, |slots| &mut slots.focus, |callback, window| {
        callback(window, focused == GLFW_TRUE)
    });
}

pub(crate) unsafe extern "C" fn window_iconify(window: *mut GLFWwindow, iconified: c_int) {
    dispatch_window(window, |slots| &mut slots.iconify, |callback, window| {
        callback(window, iconified == GLFW_TRUE)
    });
}

pub(crate) unsafe extern "C" fn window_maximize(window: *mut GLFWwindow, maximized: c_int) {
    dispatch_window(window, |slots| &mut slots.maximize, |callback, window| {
        callback(window, maximized == GLFW_TRUE)
    });
}

pub(crate) unsafe extern "C" fn framebuffer_size(window: *mut GLFWwindow, width: c_int, height: c_int) {
    dispatch_window(window, |slots| &mut slots.framebuffer_size, |callback, window| {
        callback(window, width, height)
    });
}

pub(crate) unsafe extern "C" fn window_content_scale(window: *mut GLFWwindow, xscale: c_float, yscale: c_float) {
    dispatch_window(window, |slots| &mut slots.content_scale, |callback, window| {
        callback(window, xscale, yscale)
    });
}

pub(crate) unsafe extern "C" fn key(window: *mut GLFWwindow, key: c_int, scancode: c_int, action: c_int, mods: c_int) {
    let Some(action) = Action::from_raw(action) else {
        return;
    };
    let key = Key::from_raw_or_unknown(key);
    let mods = Modifiers::from_bits(mods);
    dispatch_window(window, |slots| &mut slots.key, |callback, window| {
        callback(window, key, scancode, action, mods)
    });
}

pub(crate) unsafe extern "C" fn char_input(window: *mut GLFWwindow, codepoint: c_uint) {
    let Some(ch) = marshal::codepoint_to_char(codepoint) else {
        return;
    };
    dispatch_window(window, |slots| &mut slots.char, |callback, window| callback(window, ch));
}

pub(crate) unsafe extern "C" fn char_mods(window: *mut GLFWwindow, codepoint: c_uint, mods: c_int) {
    let Some(ch) = marshal::codepoint_to_char(codepoint) else {
        return;
    };
    let mods = Modifiers::from_bits(mods);
    dispatch_window(window, |slots| &mut slots.char_mods, |callback, window| {
        callback(window, ch, mods)
    });
}

pub(crate) unsafe extern "C" fn mouse_button(window: *mut GLFWwindow, button: c_int, action: c_int, mods: c_int) {
    let (Some(button), Some(action)) = (MouseButton::from_raw(button), Action::from_raw(action)) else {
        return;
    };
    let mods = Modifiers::from_bits(mods);
    dispatch_window(window, |slots| &mut slots.mouse_button, |callback, window| {
        callback(window, button, action, mods)
    });
}

pub(crate) unsafe extern "C" fn cursor_pos(window: *mut GLFWwindow, x: c_double, y: c_double) {
    dispatch_window(window, |slots| &mut slots.cursor_pos, |callback, window| callback(window, x, y));
}

pub(crate) unsafe extern "C" fn cursor_enter(window: *mut GLFWwindow, entered: c_int) {
    dispatch_window(window, |slots| &mut slots.cursor_enter, |callback, window| {
        callback(window, entered == GLFW_TRUE)
    });
}

pub(crate) unsafe extern "C" fn scroll(window: *mut GLFWwindow, x: c_double, y: c_double) {
    dispatch_window(window, |slots| &mut slots.scroll, |callback, window| callback(window, x, y));
}

pub(crate) unsafe extern "C" fn file_drop(window: *mut GLFWwindow, count: c_int, paths: *mut *const c_char) {
    // The path strings are only valid until this function returns.
    let paths = marshal::copy_paths(paths.cast_const(), count);
    dispatch_window(window, |slots| &mut slots.drop, move |callback, window| callback(window, paths));
}
