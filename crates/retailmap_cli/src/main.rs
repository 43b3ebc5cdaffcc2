//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `retailmap_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("retailmap_core version={}", retailmap_core::core_version());
    println!(
        "retailmap_core schema_version={}",
        retailmap_core::db::migrations::latest_version()
    );
}
