use crate::prelude::*;

/// An npm-style package name, possibly scoped (`@scope/name`). Prebuilt bindings are
/// distributed as one package per target, named `{prefix}-{short_id}`, so the same
/// rules apply to the prefix on its own.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct PackageName(String);

impl PackageName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name of the per-target package, e.g. `@scope/foo` + `linux-x64-gnu` gives
    /// `@scope/foo-linux-x64-gnu`.
    pub fn for_target(&self, short_id: &str) -> PackageName {
        PackageName(format!("{}-{}", self.0, short_id))
    }

    /// Path components under `node_modules`. Scoped names nest one directory deeper.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for PackageName {
    type Error = eyre::Report;

    fn try_from(as_given: &str) -> Result<Self, Self::Error> {
        // https://github.com/npm/validate-npm-package-name, minus the legacy
        // uppercase allowance
        static NAME_VALIDATE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$").unwrap()
        });

        if as_given.len() > 214 || !NAME_VALIDATE.is_match(as_given) {
            bail!("Invalid package name {:?}", as_given);
        }
        Ok(PackageName(as_given.to_owned()))
    }
}

try_from_str_boilerplate!(PackageName);
