//! Build script for kyber-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates saber.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest blade the firmware frame buffer holds
const MAX_PIXELS: i64 = 144;

/// Largest palette the firmware accepts
const MAX_PALETTE: usize = 8;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate saber.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=saber.toml");

    let config_path = Path::new("saber.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: saber.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds saber.toml from the kyber-firmware          ║\n\
            ║  directory. Create one (an empty file selects all defaults).     ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read saber.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in saber.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_motion(&config, &mut errors);
    validate_blade(&config, &mut errors);
    validate_palette(&config, &mut errors);
    validate_levels(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid saber configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=saber.toml validated successfully");
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

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

/// Only known sections, and every section a table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };
    for (key, value) in root {
        match key.as_str() {
            "tick_ms" => {
                if !matches!(value, toml::Value::Integer(t) if *t > 0) {
                    errors.push("tick_ms must be a positive integer".to_string());
                }
            }
            "motion" | "button" | "blade" | "palette" | "effects" => {
                if !value.is_table() {
                    errors.push(format!("[{}] must be a table", key));
                }
            }
            _ => errors.push(format!("unknown key or section '{}'", key)),
        }
    }
}

fn validate_motion(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(motion) = config.get("motion") else {
        return;
    };
    let swing = motion.get("swing_threshold").map(number).unwrap_or(Some(15.0));
    let clash = motion.get("clash_threshold").map(number).unwrap_or(Some(20.0));

    match (swing, clash) {
        (Some(swing), Some(clash)) => {
            if swing < 0.0 {
                errors.push("[motion] swing_threshold must not be negative".to_string());
            }
            if clash <= swing {
                errors.push("[motion] clash_threshold must exceed swing_threshold".to_string());
            }
        }
        _ => errors.push("[motion] thresholds must be numbers".to_string()),
    }
}

fn validate_blade(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(count) = config.get("blade").and_then(|b| b.get("pixel_count")) {
        if !matches!(count, toml::Value::Integer(n) if (1..=MAX_PIXELS).contains(n)) {
            errors.push(format!("[blade] pixel_count must be 1-{}", MAX_PIXELS));
        }
    }
}

fn validate_palette(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(palette) = config.get("palette").and_then(|p| p.as_table()) else {
        return;
    };
    if palette.is_empty() {
        errors.push("[palette] needs at least one color".to_string());
    }
    if palette.len() > MAX_PALETTE {
        errors.push(format!("[palette] holds at most {} colors", MAX_PALETTE));
    }
    for (name, color) in palette {
        let valid = color.as_str().is_some_and(|c| {
            c.len() == 7 && c.starts_with('#') && c[1..].chars().all(|h| h.is_ascii_hexdigit())
        });
        if !valid {
            errors.push(format!("[palette] {} must be \"#RRGGBB\"", name));
        }
    }
}

/// Brightness and voice levels are fractions of full scale
fn validate_levels(config: &toml::Value, errors: &mut Vec<String>) {
    let levels = [
        ("blade", "brightness"),
        ("effects", "hum_level"),
        ("effects", "effect_level"),
    ];
    for (section, key) in levels {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        if !number(value).is_some_and(|v| (0.0..=1.0).contains(&v)) {
            errors.push(format!("[{}] {} must be 0.0-1.0", section, key));
        }
    }
}
