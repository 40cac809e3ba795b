use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use nativebind::{
    output, Catalog, Host, NativeHost, PackageName, Resolver, SearchConfig,
    DEFAULT_FILENAME_STEM,
};
use tracing::info;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    output: output::OutputArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the targets bindings can be built for
    Targets {
        /// Only list targets for this platform
        #[arg(long)]
        platform: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show where `resolve` would look, in order, without looking
    Candidates(SearchArgs),
    /// Find and load the binding for this machine
    Resolve(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Directory to search in
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// Artifact file names are {stem}.{target}.{ext}
    #[arg(long, default_value = DEFAULT_FILENAME_STEM)]
    stem: String,
    /// Look for installed packages named {prefix}-{target} instead of files
    #[arg(long)]
    package_prefix: Option<PackageName>,
    /// Artifact file extension [default: the platform's shared library extension]
    #[arg(long)]
    ext: Option<String>,
    /// Pretend to be on this platform
    #[arg(long, requires = "arch")]
    platform: Option<String>,
    /// Pretend to be on this architecture
    #[arg(long, requires = "platform")]
    arch: Option<String>,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        let mut config = SearchConfig::new(&self.dir).filename_stem(&self.stem);
        if let Some(prefix) = &self.package_prefix {
            config = config.package_prefix(prefix.clone());
        }
        if let Some(ext) = &self.ext {
            config = config.extension(ext);
        }
        if let (Some(platform), Some(arch)) = (&self.platform, &self.arch) {
            config = config.target(platform, arch);
        }
        config
    }
}

fn targets(platform: Option<&str>, json: bool) -> Result<()> {
    let catalog = Catalog::global();
    let descriptors: Vec<_> = catalog
        .descriptors()
        .filter(|d| platform.map_or(true, |p| d.platform() == p))
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
    } else {
        for d in descriptors {
            println!("{:<28} {}", d.short_id(), d.raw_triples().join(" "));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    output::init(&cli.output)?;

    match cli.command {
        Command::Targets { platform, json } => targets(platform.as_deref(), json)?,
        Command::Candidates(args) => {
            let resolver = Resolver::new(NativeHost::new());
            for (target, attempt) in resolver.candidates(&args.config())? {
                println!("{:<28} {}", target.short_id(), attempt);
            }
        }
        Command::Resolve(args) => {
            let host = NativeHost::new();
            info!("running on {}/{}", host.platform(), host.arch());
            let resolved = Resolver::new(host).resolve_report(&args.config())?;
            println!(
                "{} {}",
                resolved.target.short_id(),
                resolved.binding.path().display()
            );
        }
    }
    Ok(())
}
