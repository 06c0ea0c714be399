//! Configuration loading
//!
//! The sampler config is compiled in from sampler.toml. build.rs has
//! already run the same parser over it, so the fallback only triggers if
//! the file and the parser drift apart.

use defmt::*;

use vernier_core::config::{parse_config, SamplerConfig};

/// Parse the embedded config, falling back to defaults on error
pub fn load(source: &str) -> SamplerConfig {
    match parse_config(source) {
        Ok(config) => {
            info!("Loaded configuration: {}", config);
            config
        }
        Err(e) => {
            warn!("Invalid embedded configuration ({}), using defaults", e);
            SamplerConfig::default()
        }
    }
}
