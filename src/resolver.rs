use crate::catalog::{Catalog, TargetDescriptor};
use crate::host::{Host, PackageError};
use crate::prelude::*;

pub const DEFAULT_FILENAME_STEM: &str = "index";

/// File extension the platform's dynamic loader expects for a shared library.
///
/// Node addons use `.node` everywhere instead; set that with [`SearchConfig::extension`]
/// when resolving those.
pub fn native_extension(platform: &str) -> &'static str {
    match platform {
        "win32" => "dll",
        "darwin" | "ios" => "dylib",
        "emscripten" | "wasi" | "unknown" => "wasm",
        _ => "so",
    }
}

/// Where to look for a binding, and what it's called.
///
/// If `package_prefix` is set, each candidate is looked up as the installed package
/// `{prefix}-{short_id}`; otherwise as the file `{search_dir}/{stem}.{short_id}.{ext}`.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    search_dir: PathBuf,
    filename_stem: String,
    package_prefix: Option<PackageName>,
    extension: Option<String>,
    target: Option<(String, String)>,
}

impl SearchConfig {
    pub fn new(search_dir: impl Into<PathBuf>) -> SearchConfig {
        SearchConfig {
            search_dir: search_dir.into(),
            filename_stem: DEFAULT_FILENAME_STEM.into(),
            package_prefix: None,
            extension: None,
            target: None,
        }
    }

    pub fn filename_stem(mut self, stem: impl Into<String>) -> SearchConfig {
        self.filename_stem = stem.into();
        self
    }

    pub fn package_prefix(mut self, prefix: PackageName) -> SearchConfig {
        self.package_prefix = Some(prefix);
        self
    }

    /// Use this extension instead of the platform's native one.
    pub fn extension(mut self, extension: impl Into<String>) -> SearchConfig {
        self.extension = Some(extension.into());
        self
    }

    /// Resolve for this platform/arch instead of asking the host.
    pub fn target(mut self, platform: impl Into<String>, arch: impl Into<String>) -> SearchConfig {
        self.target = Some((platform.into(), arch.into()));
        self
    }

    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }
}

/// One place a binding might be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Package(PackageName),
    File(PathBuf),
}

impl Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attempt::Package(name) => write!(f, "{}", name),
            Attempt::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug)]
pub struct Resolved<B> {
    pub binding: B,
    pub target: TargetDescriptor,
    pub attempt: Attempt,
}

pub struct Resolver<'c, H> {
    catalog: &'c Catalog,
    host: H,
}

impl<H: Host> Resolver<'static, H> {
    pub fn new(host: H) -> Resolver<'static, H> {
        Resolver::with_catalog(Catalog::global(), host)
    }
}

impl<'c, H: Host> Resolver<'c, H> {
    pub fn with_catalog(catalog: &'c Catalog, host: H) -> Resolver<'c, H> {
        Resolver { catalog, host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn target(&self, config: &SearchConfig) -> (String, String) {
        match &config.target {
            Some((platform, arch)) => (platform.clone(), arch.clone()),
            None => (self.host.platform(), self.host.arch()),
        }
    }

    fn plan(
        &self,
        platform: &str,
        arch: &str,
        config: &SearchConfig,
    ) -> Result<Vec<(&'c TargetDescriptor, Attempt)>, ResolveError> {
        let descriptors = self.catalog.lookup(platform, arch)?;
        let extension = config
            .extension
            .as_deref()
            .unwrap_or_else(|| native_extension(platform));
        Ok(descriptors
            .iter()
            .map(|target| {
                let attempt = match &config.package_prefix {
                    Some(prefix) => Attempt::Package(prefix.for_target(target.short_id())),
                    None => Attempt::File(config.search_dir.join(format!(
                        "{}.{}.{}",
                        config.filename_stem,
                        target.short_id(),
                        extension
                    ))),
                };
                (target, attempt)
            })
            .collect())
    }

    /// Everything `resolve` would try, in the order it would try it, without touching
    /// the filesystem.
    pub fn candidates(
        &self,
        config: &SearchConfig,
    ) -> Result<Vec<(&'c TargetDescriptor, Attempt)>, ResolveError> {
        let (platform, arch) = self.target(config);
        self.plan(&platform, &arch, config)
    }

    /// Find and load the binding for this platform.
    ///
    /// Candidates are tried in catalog order and the first one present wins. A candidate
    /// that's present but fails to load is an error right away; we don't fall back past
    /// it. If nothing is present, the error lists everything we tried.
    pub fn resolve(
        &self,
        config: &SearchConfig,
    ) -> Result<Resolved<H::Binding>, ResolveError> {
        let (platform, arch) = self.target(config);
        context!("resolving native binding for {}/{}", platform, arch);
        self.walk(&platform, &arch, config)
    }

    /// Same as [`resolve`](Self::resolve), but a failure comes back as an `eyre::Report`
    /// created inside the resolve context, so the report handler can say what we were
    /// doing.
    pub fn resolve_report(&self, config: &SearchConfig) -> Result<Resolved<H::Binding>> {
        let (platform, arch) = self.target(config);
        context!("resolving native binding for {}/{}", platform, arch);
        self.walk(&platform, &arch, config).map_err(eyre::Report::new)
    }

    fn walk(
        &self,
        platform: &str,
        arch: &str,
        config: &SearchConfig,
    ) -> Result<Resolved<H::Binding>, ResolveError> {
        let candidates = self.plan(platform, arch, config)?;
        let roots = vec![config.search_dir.clone()];

        let mut attempted = Vec::with_capacity(candidates.len());
        for (target, attempt) in candidates {
            debug!("trying {} for {}", attempt, target);
            let loaded = match &attempt {
                Attempt::Package(name) => match self.host.load_package(name, &roots) {
                    Ok(binding) => Some(binding),
                    Err(PackageError::NotFound { .. }) => None,
                    Err(err) => {
                        return Err(ResolveError::Resolution {
                            candidate: attempt.to_string(),
                            source: eyre::Report::new(err),
                        })
                    }
                },
                Attempt::File(path) => {
                    if self.host.is_file(path) {
                        let binding = self.host.load_file(path).map_err(|source| {
                            ResolveError::Resolution {
                                candidate: attempt.to_string(),
                                source,
                            }
                        })?;
                        Some(binding)
                    } else {
                        None
                    }
                }
            };
            match loaded {
                Some(binding) => {
                    info!("loaded native binding {} ({})", attempt, target.raw_triple());
                    return Ok(Resolved {
                        binding,
                        target: target.clone(),
                        attempt,
                    });
                }
                None => attempted.push(attempt.to_string()),
            }
        }
        Err(ResolveError::BindingNotFound { attempted })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::{Call, FakeBinding, FakeHost};

    fn gnu() -> PathBuf {
        Path::new("/opt/app").join("index.linux-x64-gnu.so")
    }

    fn gnux32() -> PathBuf {
        Path::new("/opt/app").join("index.linux-x64-gnux32.so")
    }

    fn musl() -> PathBuf {
        Path::new("/opt/app").join("index.linux-x64-musl.so")
    }

    #[test]
    fn test_falls_back_in_catalog_order() {
        let host = FakeHost::new("linux", "x64").with_file(musl());
        let resolver = Resolver::new(&host);
        let resolved = resolver.resolve(&SearchConfig::new("/opt/app")).unwrap();

        assert_eq!(resolved.binding, FakeBinding::File(musl()));
        assert_eq!(resolved.target.short_id(), "linux-x64-musl");
        assert_eq!(resolved.attempt, Attempt::File(musl()));
        assert_eq!(
            host.calls(),
            vec![
                Call::IsFile(gnu()),
                Call::IsFile(gnux32()),
                Call::IsFile(musl()),
                Call::LoadFile(musl()),
            ]
        );
    }

    #[test]
    fn test_first_present_candidate_wins() {
        let host = FakeHost::new("linux", "x64")
            .with_file(gnu())
            .with_file(musl());
        let resolved = Resolver::new(&host)
            .resolve(&SearchConfig::new("/opt/app"))
            .unwrap();
        assert_eq!(resolved.binding, FakeBinding::File(gnu()));
        assert_eq!(
            host.calls(),
            vec![Call::IsFile(gnu()), Call::LoadFile(gnu())]
        );
    }

    #[test]
    fn test_not_found_lists_every_path() {
        let host = FakeHost::new("linux", "x64");
        let err = Resolver::new(&host)
            .resolve(&SearchConfig::new("/opt/app"))
            .unwrap_err();

        let expected: Vec<String> = [gnu(), gnux32(), musl()]
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        match &err {
            ResolveError::BindingNotFound { attempted } => assert_eq!(attempted, &expected),
            other => panic!("expected BindingNotFound, got {:?}", other),
        }
        let message = err.to_string();
        for path in &expected {
            assert_eq!(message.matches(path.as_str()).count(), 1, "{message}");
        }
        let positions: Vec<_> = expected
            .iter()
            .map(|p| message.find(p.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(message.lines().count(), 1 + expected.len());
        assert!(!host.calls().iter().any(|c| matches!(c, Call::LoadFile(_))));
    }

    #[test]
    fn test_unsupported_target_does_no_io() {
        let host = FakeHost::new("haiku", "x64").with_file("/opt/app/index.haiku-x64.so");
        let err = Resolver::new(&host)
            .resolve(&SearchConfig::new("/opt/app").package_prefix("scanner".parse().unwrap()))
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnsupportedTarget { ref platform, ref arch }
                if platform == "haiku" && arch == "x64"
        ));
        assert!(host.calls().is_empty());

        let host = FakeHost::new("linux", "loong64");
        let err = Resolver::new(&host)
            .resolve(&SearchConfig::new("/opt/app"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedTarget { .. }));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_packages() {
        let host = FakeHost::new("win32", "x64").with_package("@acme/scanner-win32-x64-msvc");
        let config = SearchConfig::new("/opt/app").package_prefix("@acme/scanner".parse().unwrap());
        let resolved = Resolver::new(&host).resolve(&config).unwrap();

        assert_eq!(
            resolved.binding,
            FakeBinding::Package("@acme/scanner-win32-x64-msvc".into())
        );
        let roots = vec![PathBuf::from("/opt/app")];
        assert_eq!(
            host.calls(),
            vec![
                Call::LoadPackage("@acme/scanner-win32-x64-gnu".into(), roots.clone()),
                Call::LoadPackage("@acme/scanner-win32-x64-msvc".into(), roots),
            ]
        );
    }

    #[test]
    fn test_packages_not_found() {
        let host = FakeHost::new("linux", "arm64").with_file("/opt/app/index.linux-arm64-gnu.so");
        let config = SearchConfig::new("/opt/app").package_prefix("scanner".parse().unwrap());
        let err = Resolver::new(&host).resolve(&config).unwrap_err();
        match err {
            ResolveError::BindingNotFound { attempted } => assert_eq!(
                attempted,
                vec!["scanner-linux-arm64-gnu", "scanner-linux-arm64-musl"]
            ),
            other => panic!("expected BindingNotFound, got {:?}", other),
        }
        // with a package prefix, files aren't looked at at all
        assert!(!host.calls().iter().any(|c| matches!(c, Call::IsFile(_))));
    }

    #[test]
    fn test_broken_candidate_stops_the_walk() {
        let host = FakeHost::new("linux", "x64")
            .with_broken_file(gnu())
            .with_file(musl());
        let err = Resolver::new(&host)
            .resolve(&SearchConfig::new("/opt/app"))
            .unwrap_err();
        match err {
            ResolveError::Resolution { candidate, source } => {
                assert_eq!(candidate, gnu().display().to_string());
                assert_eq!(source.to_string(), "invalid ELF header");
            }
            other => panic!("expected Resolution, got {:?}", other),
        }
        assert_eq!(host.calls(), vec![Call::IsFile(gnu()), Call::LoadFile(gnu())]);

        let host = FakeHost::new("linux", "x64")
            .with_broken_package("scanner-linux-x64-gnu")
            .with_package("scanner-linux-x64-musl");
        let config = SearchConfig::new("/opt/app").package_prefix("scanner".parse().unwrap());
        let err = Resolver::new(&host).resolve(&config).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Resolution { ref candidate, .. } if candidate == "scanner-linux-x64-gnu"
        ));
        assert_eq!(host.calls().len(), 1);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let host = FakeHost::new("linux", "x64").with_file(gnux32());
        let resolver = Resolver::new(&host);
        let config = SearchConfig::new("/opt/app");

        let first = resolver.resolve(&config).unwrap();
        let calls_after_first = host.calls();
        let second = resolver.resolve(&config).unwrap();

        assert_eq!(first.binding, second.binding);
        assert_eq!(first.target, second.target);
        let all_calls = host.calls();
        assert_eq!(&all_calls[calls_after_first.len()..], calls_after_first.as_slice());

        let missing = FakeHost::new("darwin", "arm64");
        let resolver = Resolver::new(&missing);
        let a = resolver.resolve(&config).unwrap_err().to_string();
        let b = resolver.resolve(&config).unwrap_err().to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_candidates_and_overrides() {
        let host = FakeHost::new("linux", "x64");
        let resolver = Resolver::new(&host);

        let config = SearchConfig::new("build")
            .filename_stem("scanner")
            .target("win32", "ia32");
        let planned: Vec<_> = resolver
            .candidates(&config)
            .unwrap()
            .into_iter()
            .map(|(target, attempt)| (target.short_id().to_owned(), attempt))
            .collect();
        assert_eq!(
            planned,
            vec![
                (
                    "win32-ia32-gnu".to_owned(),
                    Attempt::File(Path::new("build").join("scanner.win32-ia32-gnu.dll"))
                ),
                (
                    "win32-ia32-msvc".to_owned(),
                    Attempt::File(Path::new("build").join("scanner.win32-ia32-msvc.dll"))
                ),
            ]
        );

        let config = SearchConfig::new("build").extension("node").target("darwin", "x64");
        let planned = resolver.candidates(&config).unwrap();
        assert_eq!(
            planned[0].1,
            Attempt::File(Path::new("build").join("index.darwin-x64.node"))
        );

        // planning never touches the host's filesystem
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_custom_catalog() {
        use crate::catalog::RawTriple;

        let catalog = Catalog::from_triples(&[
            RawTriple {
                platform: "linux",
                arch: "x64",
                abi: Some("musl"),
                raw: "x86_64-unknown-linux-musl",
            },
            RawTriple {
                platform: "linux",
                arch: "x64",
                abi: Some("gnu"),
                raw: "x86_64-unknown-linux-gnu",
            },
        ]);
        let host = FakeHost::new("linux", "x64").with_file(gnu()).with_file(musl());
        let resolved = Resolver::with_catalog(&catalog, &host)
            .resolve(&SearchConfig::new("/opt/app"))
            .unwrap();
        assert_eq!(resolved.binding, FakeBinding::File(musl()));
    }

    #[test]
    fn test_native_extensions() {
        assert_eq!(native_extension("linux"), "so");
        assert_eq!(native_extension("android"), "so");
        assert_eq!(native_extension("win32"), "dll");
        assert_eq!(native_extension("darwin"), "dylib");
        assert_eq!(native_extension("wasi"), "wasm");
    }

    #[test]
    fn test_resolve_report_keeps_the_error() {
        let host = FakeHost::new("linux", "x64");
        let report = Resolver::new(&host)
            .resolve_report(&SearchConfig::new("/opt/app"))
            .unwrap_err();
        match report.downcast_ref::<ResolveError>() {
            Some(ResolveError::BindingNotFound { attempted }) => assert_eq!(
                attempted,
                &vec![
                    gnu().display().to_string(),
                    gnux32().display().to_string(),
                    musl().display().to_string(),
                ]
            ),
            other => panic!("expected BindingNotFound, got {:?}", other),
        }

        let host = FakeHost::new("linux", "x64").with_file(gnu());
        let resolved = Resolver::new(&host)
            .resolve_report(&SearchConfig::new("/opt/app"))
            .unwrap();
        assert_eq!(resolved.binding, FakeBinding::File(gnu()));
    }
}
