//! Everything the resolver needs from the outside world: what platform we're on, whether
//! a file exists, and how to turn a file or package into a loaded binding.
//!
//! The resolver only ever talks to a `Host`, so it can be driven by a fake in tests and
//! by `NativeHost` for real.

mod detect;
mod native;
mod package;

use crate::prelude::*;
use auto_impl::auto_impl;
use thiserror::Error;

pub use detect::{current_arch, current_platform};
pub use native::{Binding, NativeHost};
pub use package::{find_package_dir, PackageManifest};

#[derive(Error, Debug)]
pub enum PackageError {
    /// Nothing by this name is installed anywhere we looked. The resolver moves on to
    /// the next candidate.
    #[error("package {name} is not installed")]
    NotFound { name: PackageName },
    /// Something by this name is installed, but we couldn't load it.
    #[error("package {name} is installed but could not be loaded")]
    Broken {
        name: PackageName,
        #[source]
        source: eyre::Report,
    },
}

#[auto_impl(&, Box)]
pub trait Host {
    type Binding;

    /// OS family of the running process, in catalog vocabulary ("linux", "win32", ...)
    fn platform(&self) -> String;

    /// CPU architecture of the running process, in catalog vocabulary ("x64", ...)
    fn arch(&self) -> String;

    fn is_file(&self, path: &Path) -> bool;

    /// Find `name` starting from each of `roots` and load it.
    fn load_package(
        &self,
        name: &PackageName,
        roots: &[PathBuf],
    ) -> Result<Self::Binding, PackageError>;

    fn load_file(&self, path: &Path) -> Result<Self::Binding>;
}
