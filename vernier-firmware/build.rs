//! Build script for vernier-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sampler.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Shape of sampler.toml, used to reject typos and wrong types early
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)] // fields are only type-checked
struct SamplerFile {
    bus: Option<BusSection>,
    adc: Option<AdcSection>,
    input: Option<InputSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct BusSection {
    block: Option<u8>,
    sda: Option<u8>,
    scl: Option<u8>,
    frequency: Option<u32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct AdcSection {
    chip: Option<String>,
    address: Option<u8>,
    gain: Option<toml::Value>,
    data_rate: Option<u16>,
    mode: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct InputSection {
    channel: Option<u8>,
    positive: Option<u8>,
    negative: Option<u8>,
}

/// Validate sampler.toml configuration at compile time
fn validate_config() {
    // Re-run if sampler.toml changes
    println!("cargo:rerun-if-changed=sampler.toml");

    let config_path = Path::new("sampler.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: sampler.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a sampler.toml configuration file.          ║\n\
            ║  Please create one in the vernier-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read sampler.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse TOML syntax and check keys/types
    if let Err(e) = toml::from_str::<SamplerFile>(&config_content) {
        let error_msg = e.to_string();
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid sampler.toml                                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║                                                                  ║\n\
            {}\n\
            ║                                                                  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&error_msg)
        );
    }

    // Run the same parser the firmware uses, so the embedded file is
    // guaranteed to load on the device
    if let Err(e) = vernier_core::config::parse_config(&config_content) {
        let error_msg = if e.line == 0 {
            format!("{:?}", e.kind)
        } else {
            format!("line {}: {:?}", e.line, e.kind)
        };
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: sampler.toml rejected by the firmware parser             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&error_msg)
        );
    }

    println!("cargo:warning=sampler.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
