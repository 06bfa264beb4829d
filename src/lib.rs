pub mod callbacks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod demo;
pub mod error;
pub mod events;
pub mod ffi;
pub mod glfw;
pub mod handle;
pub mod input;
pub mod loader;
pub mod marshal;
pub mod types;

mod trampoline;

pub use config::WindowConfig;
pub use error::{Error, ErrorCode, HandleKind, LoadError, NativeError, Result};
pub use events::{EventQueue, WindowEvent};
pub use glfw::{EventWaker, Glfw, LibraryState};
pub use handle::{Cursor, Monitor, Window};
pub use loader::{NativeLibrary, SymbolSource};
