//! Build-time SIMD capability flags.
//!
//! Emits `rawmem_has_*` cfg flags describing the baseline instruction sets of
//! the target architecture. These are coarse build-time hints only; the actual
//! implementation tier is chosen at runtime from detected CPU features, so no
//! compile probing or RUSTFLAGS mutation happens here.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");

    declare_cfgs();

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    match target_arch.as_str() {
        "x86_64" => configure_x86_64(),
        "aarch64" => configure_aarch64(),
        _ => {
            println!(
                "cargo:warning=rawmem: no SIMD baseline for target architecture {}, using scalar loops",
                target_arch
            );
            println!("cargo:rustc-cfg=rawmem_scalar_only");
        }
    }
}

/// Declare every cfg this script can emit so check-cfg lints stay quiet.
fn declare_cfgs() {
    for cfg in [
        "rawmem_simd",
        "rawmem_has_sse2",
        "rawmem_has_avx2",
        "rawmem_has_neon",
        "rawmem_scalar_only",
    ] {
        println!("cargo::rustc-check-cfg=cfg({})", cfg);
    }
}

fn configure_x86_64() {
    if cfg!(feature = "simd") {
        println!("cargo:rustc-cfg=rawmem_simd");
        // SSE2 is part of the x86_64 baseline; AVX2 still needs the runtime check.
        println!("cargo:rustc-cfg=rawmem_has_sse2");
        println!("cargo:rustc-cfg=rawmem_has_avx2");
    } else {
        println!("cargo:rustc-cfg=rawmem_scalar_only");
    }
}

fn configure_aarch64() {
    if cfg!(feature = "simd") {
        println!("cargo:rustc-cfg=rawmem_simd");
        // NEON is standard on AArch64.
        println!("cargo:rustc-cfg=rawmem_has_neon");
    } else {
        println!("cargo:rustc-cfg=rawmem_scalar_only");
    }
}
