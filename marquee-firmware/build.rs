//! Build script for marquee-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml and emits it as Rust constants

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    setup_linker(&out_dir);
    generate_panel_config(&out_dir);
}

/// Copy memory.x where the linker can find it
fn setup_linker(out_dir: &Path) {
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x"))
        .expect("failed to write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated contents of panel.toml
struct PanelConfig {
    tile_width: i64,
    tile_height: i64,
    tile_count: i64,
    spi_frequency_hz: i64,
    baud_rate: i64,
}

fn generate_panel_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=panel.toml");

    let content = fs::read_to_string("panel.toml")
        .unwrap_or_else(|e| fail("Failed to read panel.toml", &[e.to_string()]));

    let value: toml::Value = toml::from_str(&content).unwrap_or_else(|e| {
        fail(
            "Invalid TOML syntax in panel.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        )
    });

    let mut errors = Vec::new();
    let mut field = |section: &str, key: &str, range: std::ops::RangeInclusive<i64>| -> i64 {
        match value.get(section).and_then(|s| s.get(key)) {
            Some(toml::Value::Integer(n)) if range.contains(n) => *n,
            Some(toml::Value::Integer(n)) => {
                errors.push(format!(
                    "[{section}] {key} = {n} is outside {}..={}",
                    range.start(),
                    range.end()
                ));
                0
            }
            Some(_) => {
                errors.push(format!("[{section}] {key} must be an integer"));
                0
            }
            None => {
                errors.push(format!("[{section}] missing '{key}'"));
                0
            }
        }
    };

    let config = PanelConfig {
        tile_width: field("panel", "tile_width", 1..=32),
        tile_height: field("panel", "tile_height", 1..=32),
        tile_count: field("panel", "tile_count", 1..=16),
        spi_frequency_hz: field("strip", "spi_frequency_hz", 2_000_000..=3_800_000),
        baud_rate: field("link", "baud_rate", 1_200..=1_000_000),
    };

    if errors.is_empty() && config.tile_width != config.tile_height {
        errors.push(format!(
            "[panel] tiles must be square, got {}x{}",
            config.tile_width, config.tile_height
        ));
    }

    if !errors.is_empty() {
        fail("Invalid panel.toml", &errors);
    }

    let generated = format!(
        "// Generated from panel.toml by build.rs\n\
         pub const TILE_WIDTH: u16 = {};\n\
         pub const TILE_HEIGHT: u16 = {};\n\
         pub const TILE_COUNT: u16 = {};\n\
         pub const STRIP_SPI_FREQUENCY_HZ: u32 = {};\n\
         pub const LINK_BAUD_RATE: u32 = {};\n",
        config.tile_width,
        config.tile_height,
        config.tile_count,
        config.spi_frequency_hz,
        config.baud_rate,
    );
    fs::write(out_dir.join("panel_config.rs"), generated).expect("failed to write panel_config.rs");

    println!("cargo:warning=panel.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let line = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
