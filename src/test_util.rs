use crate::host::{Host, PackageError};
use crate::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;

/// Everything a `FakeHost` was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    IsFile(PathBuf),
    LoadPackage(String, Vec<PathBuf>),
    LoadFile(PathBuf),
}

/// What the fake "loads": just the thing it was asked to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeBinding {
    File(PathBuf),
    Package(String),
}

/// A host with a made-up filesystem and package set, which records every call.
pub struct FakeHost {
    platform: String,
    arch: String,
    files: HashSet<PathBuf>,
    broken_files: HashSet<PathBuf>,
    packages: HashSet<String>,
    broken_packages: HashSet<String>,
    calls: RefCell<Vec<Call>>,
}

impl FakeHost {
    pub fn new(platform: &str, arch: &str) -> FakeHost {
        FakeHost {
            platform: platform.into(),
            arch: arch.into(),
            files: Default::default(),
            broken_files: Default::default(),
            packages: Default::default(),
            broken_packages: Default::default(),
            calls: Default::default(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> FakeHost {
        self.files.insert(path.into());
        self
    }

    pub fn with_broken_file(mut self, path: impl Into<PathBuf>) -> FakeHost {
        let path = path.into();
        self.files.insert(path.clone());
        self.broken_files.insert(path);
        self
    }

    pub fn with_package(mut self, name: &str) -> FakeHost {
        self.packages.insert(name.into());
        self
    }

    pub fn with_broken_package(mut self, name: &str) -> FakeHost {
        self.broken_packages.insert(name.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Host for FakeHost {
    type Binding = FakeBinding;

    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn arch(&self) -> String {
        self.arch.clone()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.calls.borrow_mut().push(Call::IsFile(path.into()));
        self.files.contains(path)
    }

    fn load_package(
        &self,
        name: &PackageName,
        roots: &[PathBuf],
    ) -> Result<FakeBinding, PackageError> {
        self.calls
            .borrow_mut()
            .push(Call::LoadPackage(name.to_string(), roots.to_vec()));
        if self.broken_packages.contains(name.as_str()) {
            Err(PackageError::Broken {
                name: name.clone(),
                source: eyre!("invalid ELF header"),
            })
        } else if self.packages.contains(name.as_str()) {
            Ok(FakeBinding::Package(name.to_string()))
        } else {
            Err(PackageError::NotFound { name: name.clone() })
        }
    }

    fn load_file(&self, path: &Path) -> Result<FakeBinding> {
        self.calls.borrow_mut().push(Call::LoadFile(path.into()));
        if self.broken_files.contains(path) {
            bail!("invalid ELF header");
        }
        Ok(FakeBinding::File(path.into()))
    }
}
