//! Find and load the prebuilt native binding that matches the running platform.
//!
//! Bindings are built once per target and shipped either as files next to each other
//! (`index.linux-x64-gnu.so`, `index.linux-x64-musl.so`, ...) or as one package per
//! target (`scanner-linux-x64-gnu`, ...). At startup we look up which targets could run
//! here, in order of preference, and load the first one that's actually present.
//!
//! ```no_run
//! use nativebind::{NativeHost, Resolver, SearchConfig};
//!
//! let resolver = Resolver::new(NativeHost::new());
//! let resolved = resolver.resolve(&SearchConfig::new("/opt/scanner"))?;
//! println!("loaded {}", resolved.binding.path().display());
//! # Ok::<(), nativebind::ResolveError>(())
//! ```

mod prelude;
mod util;

pub mod catalog;
pub mod error;
pub mod host;
pub mod output;
pub mod resolver;
pub mod vocab;

#[cfg(test)]
mod test_util;

pub use catalog::{Catalog, TargetDescriptor};
pub use error::ResolveError;
pub use host::{Binding, Host, NativeHost, PackageError};
pub use resolver::{Attempt, Resolved, Resolver, SearchConfig, DEFAULT_FILENAME_STEM};
pub use vocab::PackageName;
