//! Native library loading.
//!
//! Opens the GLFW shared library with `libloading` and exposes it as a
//! [`SymbolSource`], the one seam the symbol table resolves against.

use std::ffi::{c_void, CString};
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::error::LoadError;

/// Environment variable that overrides the default library search.
pub const LIBRARY_ENV: &str = "GLFW_LIBRARY";

/// Anything that can map exported symbol names to addresses.
pub trait SymbolSource {
    /// Address of `name`, or `None` if the symbol is not exported.
    fn symbol(&self, name: &str) -> Option<*const c_void>;

    /// Human-readable origin, used in error messages.
    fn describe(&self) -> String;
}

/// A dynamically opened GLFW shared library.
pub struct NativeLibrary {
    path: PathBuf,
    library: Library,
}

impl NativeLibrary {
    /// Open the library at `path` (a file path or a bare name for the system loader).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref().to_path_buf();

        // Safety: opening a library runs its initializers. We trust the caller
        // to point us at a genuine GLFW build.
        let library = unsafe { Library::new(&path) }.map_err(|source| LoadError::Open {
            path: path.clone(),
            source,
        })?;

        log::debug!("opened native library {}", path.display());
        Ok(Self { path, library })
    }

    /// Open GLFW from `$GLFW_LIBRARY` or the platform's conventional names.
    pub fn open_default() -> Result<Self, LoadError> {
        let mut tried = Vec::new();

        let candidates = std::env::var_os(LIBRARY_ENV)
            .map(|path| vec![PathBuf::from(path)])
            .unwrap_or_else(|| default_names().iter().map(PathBuf::from).collect());

        for candidate in candidates {
            match Self::open(&candidate) {
                Ok(library) => return Ok(library),
                Err(err) => {
                    log::debug!("{}", err);
                    tried.push(candidate.display().to_string());
                }
            }
        }

        Err(LoadError::LibraryNotFound { tried })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SymbolSource for NativeLibrary {
    fn symbol(&self, name: &str) -> Option<*const c_void> {
        let c_name = CString::new(name).ok()?;

        // Safety: the address is only reinterpreted by the symbol table, which
        // pairs each name with its C prototype.
        let symbol = unsafe { self.library.get::<*const c_void>(c_name.as_bytes_with_nul()) };
        symbol.ok().map(|s| *s).filter(|addr| !addr.is_null())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Conventional library names for the current platform, most specific first.
pub fn default_names() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["glfw3.dll", "glfw.dll"]
    } else if cfg!(target_os = "macos") {
        &["libglfw.3.dylib", "libglfw.dylib", "libglfw3.dylib"]
    } else {
        &["libglfw.so.3", "libglfw.so"]
    }
}
