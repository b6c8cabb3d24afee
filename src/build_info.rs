//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `rpg-adventure <version> (<date>, <commit>)`, as printed by `--version`.
pub fn version_string() -> String {
    format!(
        "rpg-adventure {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
