use super::RawTriple;

const fn t(
    platform: &'static str,
    arch: &'static str,
    abi: Option<&'static str>,
    raw: &'static str,
) -> RawTriple {
    RawTriple {
        platform,
        arch,
        abi,
        raw,
    }
}

const GNU: Option<&str> = Some("gnu");
const MUSL: Option<&str> = Some("musl");
const MSVC: Option<&str> = Some("msvc");
const EABI: Option<&str> = Some("eabi");
const EABIHF: Option<&str> = Some("eabihf");
const ELF: Option<&str> = Some("elf");

// Every target we know how to name a binding for.
//
// Within one platform/arch pair, rows are ordered from most-preferred to
// least-preferred, and that's the order the resolver tries them in. Rows that share
// platform/arch/abi are aliases: they get folded into one descriptor, but we keep the
// raw triples around so error messages can mention all of them.
pub(super) static RAW_TRIPLES: &[RawTriple] = &[
    t("android", "arm64", None, "aarch64-linux-android"),
    t("android", "arm", EABI, "arm-linux-androideabi"),
    t("android", "arm", EABI, "armv7-linux-androideabi"),
    t("android", "arm", EABI, "thumbv7neon-linux-androideabi"),
    t("android", "ia32", None, "i686-linux-android"),
    t("android", "x64", None, "x86_64-linux-android"),
    t("cuda", "nvptx64", None, "nvptx64-nvidia-cuda"),
    t("darwin", "arm64", None, "aarch64-apple-darwin"),
    t("darwin", "x64", None, "x86_64-apple-darwin"),
    t("emscripten", "asmjs", None, "asmjs-unknown-emscripten"),
    t("emscripten", "wasm32", None, "wasm32-unknown-emscripten"),
    t("freebsd", "ia32", None, "i686-unknown-freebsd"),
    t("freebsd", "x64", None, "x86_64-unknown-freebsd"),
    t("fuchsia", "arm64", None, "aarch64-fuchsia"),
    t("fuchsia", "x64", None, "x86_64-fuchsia"),
    t("illumos", "x64", None, "x86_64-unknown-illumos"),
    t("ios", "arm64", None, "aarch64-apple-ios"),
    t("ios", "arm64", Some("sim"), "aarch64-apple-ios-sim"),
    t("ios", "x64", None, "x86_64-apple-ios"),
    t("linux", "arm64", GNU, "aarch64-unknown-linux-gnu"),
    t("linux", "arm64", MUSL, "aarch64-unknown-linux-musl"),
    t("linux", "arm", Some("gnueabi"), "arm-unknown-linux-gnueabi"),
    t("linux", "arm", Some("gnueabihf"), "arm-unknown-linux-gnueabihf"),
    t("linux", "arm", Some("musleabi"), "arm-unknown-linux-musleabi"),
    t("linux", "arm", Some("musleabihf"), "arm-unknown-linux-musleabihf"),
    t("linux", "arm", Some("gnueabi"), "armv7-unknown-linux-gnueabi"),
    t("linux", "arm", Some("gnueabihf"), "armv7-unknown-linux-gnueabihf"),
    t("linux", "arm", Some("musleabi"), "armv7-unknown-linux-musleabi"),
    t("linux", "arm", Some("musleabihf"), "armv7-unknown-linux-musleabihf"),
    t("linux", "arm", Some("gnueabihf"), "thumbv7neon-unknown-linux-gnueabihf"),
    t("linux", "armv5te", Some("gnueabi"), "armv5te-unknown-linux-gnueabi"),
    t("linux", "armv5te", Some("musleabi"), "armv5te-unknown-linux-musleabi"),
    t("linux", "ia32", GNU, "i586-unknown-linux-gnu"),
    t("linux", "ia32", MUSL, "i586-unknown-linux-musl"),
    t("linux", "ia32", GNU, "i686-unknown-linux-gnu"),
    t("linux", "ia32", MUSL, "i686-unknown-linux-musl"),
    t("linux", "mips", GNU, "mips-unknown-linux-gnu"),
    t("linux", "mips", MUSL, "mips-unknown-linux-musl"),
    t("linux", "mips64", Some("gnuabi64"), "mips64-unknown-linux-gnuabi64"),
    t("linux", "mips64", Some("muslabi64"), "mips64-unknown-linux-muslabi64"),
    t("linux", "mips64el", Some("gnuabi64"), "mips64el-unknown-linux-gnuabi64"),
    t("linux", "mips64el", Some("muslabi64"), "mips64el-unknown-linux-muslabi64"),
    t("linux", "mipsel", GNU, "mipsel-unknown-linux-gnu"),
    t("linux", "mipsel", MUSL, "mipsel-unknown-linux-musl"),
    t("linux", "powerpc", GNU, "powerpc-unknown-linux-gnu"),
    t("linux", "powerpc64", GNU, "powerpc64-unknown-linux-gnu"),
    t("linux", "powerpc64le", GNU, "powerpc64le-unknown-linux-gnu"),
    t("linux", "riscv64gc", GNU, "riscv64gc-unknown-linux-gnu"),
    t("linux", "s390x", GNU, "s390x-unknown-linux-gnu"),
    t("linux", "sparc64", GNU, "sparc64-unknown-linux-gnu"),
    t("linux", "x64", GNU, "x86_64-unknown-linux-gnu"),
    t("linux", "x64", Some("gnux32"), "x86_64-unknown-linux-gnux32"),
    t("linux", "x64", MUSL, "x86_64-unknown-linux-musl"),
    t("netbsd", "x64", None, "x86_64-unknown-netbsd"),
    t("none", "arm64", None, "aarch64-unknown-none"),
    t("none", "arm64", Some("softfloat"), "aarch64-unknown-none-softfloat"),
    t("none", "armebv7r", EABI, "armebv7r-none-eabi"),
    t("none", "armebv7r", EABIHF, "armebv7r-none-eabihf"),
    t("none", "armv7a", EABI, "armv7a-none-eabi"),
    t("none", "armv7r", EABI, "armv7r-none-eabi"),
    t("none", "armv7r", EABIHF, "armv7r-none-eabihf"),
    t("none", "riscv32i", ELF, "riscv32i-unknown-none-elf"),
    t("none", "riscv32imac", ELF, "riscv32imac-unknown-none-elf"),
    t("none", "riscv32imc", ELF, "riscv32imc-unknown-none-elf"),
    t("none", "riscv64gc", ELF, "riscv64gc-unknown-none-elf"),
    t("none", "riscv64imac", ELF, "riscv64imac-unknown-none-elf"),
    t("none", "thumbv6m", EABI, "thumbv6m-none-eabi"),
    t("none", "thumbv7em", EABI, "thumbv7em-none-eabi"),
    t("none", "thumbv7em", EABIHF, "thumbv7em-none-eabihf"),
    t("none", "thumbv7m", EABI, "thumbv7m-none-eabi"),
    t("none", "thumbv8m.base", EABI, "thumbv8m.base-none-eabi"),
    t("none", "thumbv8m.main", EABI, "thumbv8m.main-none-eabi"),
    t("none", "thumbv8m.main", EABIHF, "thumbv8m.main-none-eabihf"),
    t("redox", "x64", None, "x86_64-unknown-redox"),
    t("sunos", "sparcv9", None, "sparcv9-sun-solaris"),
    t("sunos", "x64", None, "x86_64-pc-solaris"),
    t("sunos", "x64", None, "x86_64-sun-solaris"),
    t("unknown", "wasm32", None, "wasm32-unknown-unknown"),
    t("unknown", "x64", Some("sgx"), "x86_64-fortanix-unknown-sgx"),
    t("wasi", "wasm32", None, "wasm32-wasi"),
    // gnu ahead of msvc on every windows arch
    t("win32", "arm64", MSVC, "aarch64-pc-windows-msvc"),
    t("win32", "ia32", GNU, "i686-pc-windows-gnu"),
    t("win32", "ia32", MSVC, "i586-pc-windows-msvc"),
    t("win32", "ia32", MSVC, "i686-pc-windows-msvc"),
    t("win32", "x64", GNU, "x86_64-pc-windows-gnu"),
    t("win32", "x64", MSVC, "x86_64-pc-windows-msvc"),
];
