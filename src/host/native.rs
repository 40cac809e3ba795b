use super::{detect, package, Host, PackageError};
use crate::prelude::*;
use std::sync::{Arc, Mutex};

use libloading::{Library, Symbol};

/// A native library that's been loaded into this process. Dropping the last reference
/// unloads it, so hold on to it for as long as you use anything you got out of it.
#[derive(Debug)]
pub struct Binding {
    path: PathBuf,
    library: Library,
}

impl Binding {
    pub fn open(path: &Path) -> Result<Binding> {
        // Safety: this runs the library's initializers; we trust whatever the resolver
        // picked.
        let library = unsafe { Library::new(path) }
            .wrap_err_with(|| format!("loading {}", path.display()))?;
        Ok(Binding {
            path: path.to_path_buf(),
            library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an exported symbol.
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the export.
    pub unsafe fn symbol<T>(&self, name: &str) -> Result<Symbol<'_, T>> {
        self.library
            .get(name.as_bytes())
            .wrap_err_with(|| format!("looking up {name:?} in {}", self.path.display()))
    }
}

/// The real thing: reports the platform we were built for, probes the actual
/// filesystem, and loads libraries with the system dynamic loader.
///
/// Loaded libraries are cached by canonical path, so resolving the same binding twice
/// hands back the same `Binding` instead of loading it again.
#[derive(Debug, Default)]
pub struct NativeHost {
    loaded: Mutex<HashMap<PathBuf, Arc<Binding>>>,
}

impl NativeHost {
    pub fn new() -> NativeHost {
        Default::default()
    }
}

impl Host for NativeHost {
    type Binding = Arc<Binding>;

    fn platform(&self) -> String {
        detect::current_platform().into()
    }

    fn arch(&self) -> String {
        detect::current_arch().into()
    }

    fn is_file(&self, path: &Path) -> bool {
        let exists = path.is_file();
        trace!("probed {}: {}", path.display(), exists);
        exists
    }

    fn load_package(
        &self,
        name: &PackageName,
        roots: &[PathBuf],
    ) -> Result<Arc<Binding>, PackageError> {
        let dir = package::find_package_dir(name, roots)
            .ok_or_else(|| PackageError::NotFound { name: name.clone() })?;
        debug!("found package {} at {}", name, dir.display());
        let load = || -> Result<Arc<Binding>> {
            let manifest = package::PackageManifest::from_dir(&dir)?;
            if let Some(declared) = manifest.name.as_deref().filter(|n| *n != name.as_str()) {
                warn!(
                    "{} is installed as {}, but calls itself {}",
                    dir.display(),
                    name,
                    declared
                );
            }
            let main = manifest.main_path(&dir)?;
            if !main.is_file() {
                bail!("{} points at {}, which doesn't exist", name, main.display());
            }
            self.load_file(&main)
        };
        load().map_err(|source| PackageError::Broken {
            name: name.clone(),
            source,
        })
    }

    fn load_file(&self, path: &Path) -> Result<Arc<Binding>> {
        let key = path
            .canonicalize()
            .wrap_err_with(|| format!("resolving {}", path.display()))?;
        let mut loaded = self
            .loaded
            .lock()
            .map_err(|_| eyre!("binding cache poisoned"))?;
        if let Some(binding) = loaded.get(&key) {
            debug!("{} already loaded", key.display());
            return Ok(binding.clone());
        }
        let binding = Arc::new(Binding::open(&key)?);
        loaded.insert(key, binding.clone());
        Ok(binding)
    }
}
