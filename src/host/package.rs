use crate::prelude::*;
use std::fs;

// Bindings distributed as packages follow the node_modules layout: from a starting
// directory, look in ./node_modules/<name>, then ../node_modules/<name>, and so on up to
// the filesystem root. A package is recognized by its package.json.

const MODULES_DIR: &str = "node_modules";
const MANIFEST: &str = "package.json";

/// The only bit of package.json we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub main: Option<String>,
}

impl PackageManifest {
    pub fn from_dir(dir: &Path) -> Result<PackageManifest> {
        let path = dir.join(MANIFEST);
        let contents =
            fs::read(&path).wrap_err_with(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&contents)
            .wrap_err_with(|| format!("parsing {}", path.display()))
    }

    /// The artifact this package points at, relative to `dir`.
    pub fn main_path(&self, dir: &Path) -> Result<PathBuf> {
        match &self.main {
            Some(main) => Ok(dir.join(main)),
            None => bail!("{} has no \"main\" entry", dir.join(MANIFEST).display()),
        }
    }
}

pub fn find_package_dir(name: &PackageName, roots: &[PathBuf]) -> Option<PathBuf> {
    for root in roots {
        for ancestor in root.ancestors() {
            let mut candidate = ancestor.join(MODULES_DIR);
            candidate.extend(name.components());
            trace!("looking for {} in {}", name, candidate.display());
            if candidate.join(MANIFEST).is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
