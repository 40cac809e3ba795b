// Rust's own names for the OS and CPU don't line up with the catalog's vocabulary, which
// follows Node (x64, ia32, win32, darwin, ...) for the common cases and the toolchain
// cpu names for everything else.

fn platform_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        "solaris" => "sunos",
        "" => "unknown",
        other => other,
    }
}

fn arch_name<'a>(arch: &'a str, os: &str, little_endian: bool) -> &'a str {
    match (arch, little_endian) {
        ("x86_64", _) => "x64",
        ("x86", _) => "ia32",
        ("aarch64", _) => "arm64",
        ("riscv64", _) => "riscv64gc",
        ("powerpc64", true) => "powerpc64le",
        ("mips", true) => "mipsel",
        ("mips64", true) => "mips64el",
        ("sparc64", _) if os == "solaris" => "sparcv9",
        (other, _) => other,
    }
}

pub fn current_platform() -> &'static str {
    platform_name(std::env::consts::OS)
}

pub fn current_arch() -> &'static str {
    arch_name(
        std::env::consts::ARCH,
        std::env::consts::OS,
        cfg!(target_endian = "little"),
    )
}
