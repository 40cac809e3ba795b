use thiserror::Error;

fn one_per_line(attempted: &[String]) -> String {
    attempted
        .iter()
        .map(|a| format!("  {a}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// No catalog entry for this platform/arch pair. Nothing could ever be loaded
    /// here; the catalog needs a new entry.
    #[error("unsupported target: no native bindings are built for platform {platform:?}, architecture {arch:?}")]
    UnsupportedTarget { platform: String, arch: String },
    /// Every candidate was tried and none was present. `attempted` lists the
    /// package names or file paths in the order they were tried.
    #[error("cannot find native binding; tried:\n{}", one_per_line(.attempted))]
    BindingNotFound { attempted: Vec<String> },
    /// A candidate was present but couldn't be loaded. We stop here instead of
    /// falling back, since a lower-priority candidate would hide the breakage.
    #[error("found native binding {candidate}, but failed to load it")]
    Resolution {
        candidate: String,
        #[source]
        source: eyre::Report,
    },
}
