//! The table of targets we know how to name prebuilt bindings for, indexed the way we
//! query it at runtime: first by platform, then by architecture, giving an ordered list
//! of ABI variants to try.
//!
//! The same build can go by several toolchain triples (e.g. "arm-" vs "armv7-"
//! prefixes); those are aliases and get folded into a single `TargetDescriptor`. What
//! identifies a build is its platform/arch/abi, and the "short id" derived from them
//! is what artifact files and packages get named after.

mod triples;

use crate::prelude::*;
use indexmap::IndexMap;

/// One row of the raw target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTriple {
    pub platform: &'static str,
    pub arch: &'static str,
    pub abi: Option<&'static str>,
    pub raw: &'static str,
}

#[derive(Debug, Clone, Serialize, Derivative)]
#[derivative(Hash, PartialEq, Eq)]
pub struct TargetDescriptor {
    platform: &'static str,
    arch: &'static str,
    abi: Option<&'static str>,
    #[derivative(Hash = "ignore", PartialEq = "ignore")]
    short_id: String,
    #[derivative(Hash = "ignore", PartialEq = "ignore")]
    raw_triples: Vec<&'static str>,
}

impl TargetDescriptor {
    fn new(raw: &RawTriple) -> TargetDescriptor {
        let mut short_id = format!("{}-{}", raw.platform, raw.arch);
        if let Some(abi) = raw.abi {
            short_id.push('-');
            short_id.push_str(abi);
        }
        TargetDescriptor {
            platform: raw.platform,
            arch: raw.arch,
            abi: raw.abi,
            short_id,
            raw_triples: vec![raw.raw],
        }
    }

    pub fn platform(&self) -> &'static str {
        self.platform
    }

    pub fn arch(&self) -> &'static str {
        self.arch
    }

    pub fn abi(&self) -> Option<&'static str> {
        self.abi
    }

    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    /// The first triple listed for this build.
    pub fn raw_triple(&self) -> &'static str {
        self.raw_triples[0]
    }

    /// All triples that name this build, in table order.
    pub fn raw_triples(&self) -> &[&'static str] {
        &self.raw_triples
    }
}

impl Display for TargetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.short_id, self.raw_triples.join(", "))
    }
}

pub struct Catalog {
    platforms: IndexMap<&'static str, IndexMap<&'static str, Vec<TargetDescriptor>>>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::from_triples(triples::RAW_TRIPLES));

impl Catalog {
    /// The built-in catalog.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    pub fn from_triples(raw_triples: &[RawTriple]) -> Catalog {
        let mut platforms: IndexMap<_, IndexMap<_, Vec<TargetDescriptor>>> =
            IndexMap::new();
        for raw in raw_triples {
            let descriptors = platforms
                .entry(raw.platform)
                .or_default()
                .entry(raw.arch)
                .or_default();
            match descriptors.iter_mut().find(|d| d.abi == raw.abi) {
                Some(existing) => {
                    if !existing.raw_triples.contains(&raw.raw) {
                        existing.raw_triples.push(raw.raw);
                    }
                }
                None => descriptors.push(TargetDescriptor::new(raw)),
            }
        }
        Catalog { platforms }
    }

    /// All the builds that could run on `platform`/`arch`, most preferred first.
    ///
    /// Keys are matched exactly; there's no normalization or partial matching.
    pub fn lookup(
        &self,
        platform: &str,
        arch: &str,
    ) -> Result<&[TargetDescriptor], ResolveError> {
        self.platforms
            .get(platform)
            .and_then(|arches| arches.get(arch))
            .map(|descriptors| descriptors.as_slice())
            .ok_or_else(|| ResolveError::UnsupportedTarget {
                platform: platform.into(),
                arch: arch.into(),
            })
    }

    pub fn platforms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.platforms.keys().copied()
    }

    pub fn architectures(
        &self,
        platform: &str,
    ) -> impl Iterator<Item = &'static str> + '_ {
        self.platforms
            .get(platform)
            .into_iter()
            .flat_map(|arches| arches.keys().copied())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TargetDescriptor> {
        self.platforms
            .values()
            .flat_map(|arches| arches.values())
            .flatten()
    }

    pub fn find_short_id(&self, short_id: &str) -> Option<&TargetDescriptor> {
        self.descriptors().find(|d| d.short_id == short_id)
    }

    pub fn find_raw_triple(&self, raw: &str) -> Option<&TargetDescriptor> {
        self.descriptors()
            .find(|d| d.raw_triples.iter().any(|r| *r == raw))
    }
}
