//! The safe facade over one loaded GLFW library.
//!
//! [`Glfw`] owns the resolved symbol table and the registry of the handles and
//! callbacks it created. Every instance on a thread that drives the same native
//! library shares one [`Lifecycle`], so terminating through one instance is seen
//! by all of them. `Glfw` is `!Send`: native GLFW expects window and event calls
//! on the thread that initialized it.

mod context;
mod input;
mod joystick;
mod monitor;
mod window;

use std::cell::{Cell, RefCell};
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::ptr;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::callbacks::{CallbackSlot, ErrorCallback, GlobalCallbacks, Registry, WindowCallbacks};
use crate::commands::Commands;
use crate::error::{Error, ErrorCode, NativeError, Result};
use crate::ffi::{GLFWwindow, GLFW_TRUE};
use crate::handle::{Cursor, Window};
use crate::loader::{NativeLibrary, SymbolSource};
use crate::marshal;
use crate::trampoline;
use crate::types::{InitHint, Version};

/// Lifecycle of the native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryState {
    Uninitialized,
    Initialized,
    Terminated,
}

/// Lifecycle of one native library, shared by every instance driving it.
pub(crate) struct Lifecycle {
    state: Cell<LibraryState>,
    awake: Arc<RwLock<bool>>,
}

impl Lifecycle {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            state: Cell::new(LibraryState::Uninitialized),
            awake: Arc::new(RwLock::new(false)),
        })
    }

    fn set(&self, state: LibraryState) {
        self.state.set(state);
        *self.awake.write().unwrap_or_else(PoisonError::into_inner) = state == LibraryState::Initialized;
    }
}

/// State shared between a `Glfw` and the trampolines that route into it.
pub(crate) struct Shared {
    pub(crate) commands: Commands,
    pub(crate) registry: RefCell<Registry>,
    pub(crate) globals: RefCell<GlobalCallbacks>,
    lifecycle: Rc<Lifecycle>,
    library: Option<Arc<NativeLibrary>>,
}

impl Shared {
    /// Whether both tables drive the same native library.
    pub(crate) fn same_library(&self, other: &Shared) -> bool {
        Rc::ptr_eq(&self.lifecycle, &other.lifecycle)
    }
}

/// A loaded GLFW library and everything created through it.
pub struct Glfw {
    shared: Rc<Shared>,
}

impl Glfw {
    /// Load GLFW from `path` and resolve its full symbol table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_library(NativeLibrary::open(path)?)
    }

    /// Load GLFW from `$GLFW_LIBRARY` or the platform's conventional library names.
    pub fn load_default() -> Result<Self> {
        Self::from_library(NativeLibrary::open_default()?)
    }

    fn from_library(library: NativeLibrary) -> Result<Self> {
        let library = Arc::new(library);
        // Safety: the addresses come from a library exporting the GLFW API, and the
        // `Arc` stored alongside the table keeps it mapped.
        let commands = unsafe { Commands::resolve(library.as_ref())? };
        Ok(Self::with_commands(commands, Some(library)))
    }

    /// Build a facade over an arbitrary symbol source, such as a statically linked
    /// GLFW or an in-process test double.
    ///
    /// # Safety
    ///
    /// Every symbol must be a function with the matching GLFW prototype and must
    /// remain callable until the returned `Glfw` and all its wakers are dropped.
    pub unsafe fn from_symbols(source: &dyn SymbolSource) -> Result<Self> {
        let commands = Commands::resolve(source)?;
        Ok(Self::with_commands(commands, None))
    }

    fn with_commands(commands: Commands, library: Option<Arc<NativeLibrary>>) -> Self {
        // One library, one `glfwInit` export: instances resolving the same address
        // share a lifecycle.
        let entry = commands.init as usize;
        let lifecycle = trampoline::live_contexts()
            .into_iter()
            .find(|other| other.commands.init as usize == entry)
            .map(|other| other.lifecycle.clone())
            .unwrap_or_else(Lifecycle::new);

        let shared = Rc::new(Shared {
            commands,
            registry: RefCell::new(Registry::new()),
            globals: RefCell::new(GlobalCallbacks::default()),
            lifecycle,
            library,
        });
        trampoline::register(&shared);

        // Errors are captured from the moment the library is loaded, init included.
        unsafe { (shared.commands.set_error_callback)(Some(trampoline::error_callback)) };

        Self { shared }
    }

    pub fn state(&self) -> LibraryState {
        self.shared.lifecycle.state.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.state() == LibraryState::Initialized
    }

    pub(crate) fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Runs one native call, converting any error reported during it into `Err`.
    ///
    /// Panics raised by callbacks dispatched during the call resume here.
    pub(crate) fn native<T>(&self, f: impl FnOnce(&Commands) -> T) -> Result<T> {
        let (value, error) = trampoline::capture(|| f(&self.shared.commands));
        trampoline::resume_pending_panic();
        match error {
            Some(error) => Err(Error::Native(error)),
            None => Ok(value),
        }
    }

    /// [`native`](Self::native), gated on the library being initialized.
    pub(crate) fn call<T>(&self, f: impl FnOnce(&Commands) -> T) -> Result<T> {
        self.ensure_initialized()?;
        self.native(f)
    }

    /// Native call on a live window created by this instance.
    pub(crate) fn with_window<T>(
        &self,
        window: Window,
        f: impl FnOnce(&Commands, *mut GLFWwindow) -> T,
    ) -> Result<T> {
        self.ensure_initialized()?;
        self.shared.registry.borrow().check_window(window)?;
        self.native(|commands| f(commands, window.as_ptr()))
    }

    /// Sets an init hint. Only meaningful before [`init`](Self::init).
    pub fn init_hint(&self, hint: InitHint, value: bool) -> Result<()> {
        self.native(|c| unsafe { (c.init_hint)(hint.to_raw(), c_int::from(value)) })
    }

    /// Initialize the library. Succeeds without a native call if already
    /// initialized, through this instance or another one over the same library.
    pub fn init(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let (ok, error) = trampoline::capture(|| unsafe { (self.shared.commands.init)() });
        trampoline::resume_pending_panic();

        if ok != GLFW_TRUE {
            return Err(error.map(Error::Native).unwrap_or(Error::InitFailed));
        }
        if let Some(error) = error {
            log::warn!("glfwInit succeeded with error: {}", error);
        }

        self.shared.lifecycle.set(LibraryState::Initialized);
        log::info!("GLFW {} initialized", self.version());
        Ok(())
    }

    /// Terminate the library, destroying every window and cursor and dropping
    /// their callbacks. A no-op unless initialized.
    ///
    /// Termination is library-wide: other instances over the same library lose
    /// their handles and callbacks too and report [`LibraryState::Terminated`].
    pub fn terminate(&self) -> Result<()> {
        if !self.is_initialized() {
            return Ok(());
        }
        let result = self.shutdown();
        trampoline::resume_pending_panic();
        result
    }

    fn shutdown(&self) -> Result<()> {
        self.shared.lifecycle.set(LibraryState::Terminated);
        let ((), error) = trampoline::capture(|| unsafe { (self.shared.commands.terminate)() });

        let mut windows = Vec::new();
        let mut globals = Vec::new();
        for shared in trampoline::siblings(&self.shared) {
            windows.extend(shared.registry.borrow_mut().clear());
            let mut slots = shared.globals.borrow_mut();
            globals.push((slots.monitor.replace(None), slots.joystick.replace(None)));
        }
        log::info!(
            "GLFW terminated, released callbacks of {} window(s)",
            windows.len()
        );
        drop(windows);
        drop(globals);

        match error {
            Some(error) => Err(Error::Native(error)),
            None => Ok(()),
        }
    }

    /// Destroys the windows and cursors this instance created, leaving the
    /// library initialized for the other instances driving it.
    fn release_handles(&self) -> Result<()> {
        let (windows, cursors, callbacks) = {
            let mut registry = self.shared.registry.borrow_mut();
            let windows: Vec<Window> = registry.windows().collect();
            let cursors: Vec<Cursor> = registry.cursors().collect();
            (windows, cursors, registry.clear())
        };

        let commands = &self.shared.commands;
        let ((), error) = trampoline::capture(|| unsafe {
            for cursor in &cursors {
                (commands.destroy_cursor)(cursor.as_ptr());
            }
            for window in &windows {
                (commands.destroy_window)(window.as_ptr());
            }
        });
        log::debug!(
            "released {} window(s) and {} cursor(s), library left to other instances",
            windows.len(),
            cursors.len()
        );
        drop(callbacks);

        match error {
            Some(error) => Err(Error::Native(error)),
            None => Ok(()),
        }
    }

    /// Version of the loaded library. Callable at any time.
    pub fn version(&self) -> Version {
        let (mut major, mut minor, mut revision) = (0, 0, 0);
        unsafe { (self.shared.commands.get_version)(&mut major, &mut minor, &mut revision) };
        Version {
            major,
            minor,
            revision,
        }
    }

    /// Compile-time configuration string of the library. Callable at any time.
    pub fn version_string(&self) -> String {
        unsafe { marshal::decode_or_empty((self.shared.commands.get_version_string)()) }
    }

    /// Returns and clears the last error recorded by native GLFW on this thread.
    pub fn get_error(&self) -> Option<NativeError> {
        let mut description: *const c_char = ptr::null();
        let code = unsafe { (self.shared.commands.get_error)(&mut description) };
        if code == 0 {
            return None;
        }
        let description = unsafe { marshal::decode_or_empty(description) };
        Some(NativeError::new(ErrorCode::from_raw(code), description))
    }

    /// Registers a closure for every native error, returning the previous one.
    ///
    /// Errors are still returned from the failing call; this is an additional observer.
    pub fn set_error_callback(&self, callback: Option<Box<ErrorCallback>>) -> Option<Box<ErrorCallback>> {
        self.shared.globals.borrow_mut().error.replace(callback)
    }

    pub fn poll_events(&self) -> Result<()> {
        self.call(|c| unsafe { (c.poll_events)() })
    }

    /// Blocks until at least one event is queued, then processes all of them.
    pub fn wait_events(&self) -> Result<()> {
        self.call(|c| unsafe { (c.wait_events)() })
    }

    /// Like [`wait_events`](Self::wait_events) but returns after `timeout` at the latest.
    pub fn wait_events_timeout(&self, timeout: Duration) -> Result<()> {
        let seconds = timeout.as_secs_f64();
        self.call(|c| unsafe { (c.wait_events_timeout)(seconds) })
    }

    /// Wakes a thread blocked in `wait_events`.
    pub fn post_empty_event(&self) -> Result<()> {
        self.call(|c| unsafe { (c.post_empty_event)() })
    }

    /// A handle other threads can use to wake the event loop.
    pub fn waker(&self) -> EventWaker {
        EventWaker {
            post: self.shared.commands.post_empty_event,
            awake: self.shared.lifecycle.awake.clone(),
            _library: self.shared.library.clone(),
        }
    }

    /// Installs or clears a per-window closure and the matching native trampoline.
    pub(crate) fn set_window_callback<F: ?Sized>(
        &self,
        window: Window,
        slot: fn(&mut WindowCallbacks) -> &mut CallbackSlot<F>,
        callback: Option<Box<F>>,
        install: impl FnOnce(&Commands, *mut GLFWwindow, bool),
    ) -> Result<Option<Box<F>>> {
        self.ensure_initialized()?;
        let enable = callback.is_some();
        let previous = {
            let mut registry = self.shared.registry.borrow_mut();
            slot(registry.window_mut(window)?).replace(callback)
        };
        if let Err(err) = self.native(|commands| install(commands, window.as_ptr(), enable)) {
            let rejected = match self.shared.registry.borrow_mut().window_mut(window) {
                Ok(slots) => slot(slots).replace(previous),
                Err(_) => None,
            };
            drop(rejected);
            return Err(err);
        }
        Ok(previous)
    }

    /// Installs or clears a library-wide closure and the matching native trampoline.
    pub(crate) fn set_global_callback<F: ?Sized>(
        &self,
        slot: fn(&mut GlobalCallbacks) -> &mut CallbackSlot<F>,
        callback: Option<Box<F>>,
        install: impl FnOnce(&Commands, bool),
    ) -> Result<Option<Box<F>>> {
        self.ensure_initialized()?;
        let enable = callback.is_some();
        let previous = slot(&mut *self.shared.globals.borrow_mut()).replace(callback);
        if let Err(err) = self.native(|commands| install(commands, enable)) {
            let rejected = slot(&mut *self.shared.globals.borrow_mut()).replace(previous);
            drop(rejected);
            return Err(err);
        }
        Ok(previous)
    }
}

impl Drop for Glfw {
    /// The last instance over a library terminates it; earlier ones only release
    /// their own handles.
    fn drop(&mut self) {
        if self.is_initialized() {
            let result = if trampoline::siblings(&self.shared).len() > 1 {
                self.release_handles()
            } else {
                self.shutdown()
            };
            if let Err(err) = result {
                log::warn!("error while releasing GLFW: {}", err);
            }
        }
        if trampoline::take_panic().is_some() {
            log::warn!("discarded a callback panic raised while dropping GLFW");
        }
        trampoline::unregister(&self.shared);
    }
}

/// Cross-thread wakeup for a blocked event loop.
///
/// Cheap to clone and `Send + Sync`. Inert once the library is terminated.
#[derive(Clone)]
pub struct EventWaker {
    post: unsafe extern "C" fn(),
    awake: Arc<RwLock<bool>>,
    _library: Option<Arc<NativeLibrary>>,
}

impl EventWaker {
    /// Posts an empty event. Returns `false` if the library is not initialized.
    pub fn wake(&self) -> bool {
        let awake = self.awake.read().unwrap_or_else(PoisonError::into_inner);
        if *awake {
            unsafe { (self.post)() };
        }
        *awake
    }
}

impl std::fmt::Debug for EventWaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventWaker")
            .field("awake", &*self.awake.read().unwrap_or_else(PoisonError::into_inner))
            .finish()
    }
}
