//! Build script for monodash-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates dashboard.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

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

/// Validate dashboard.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=dashboard.toml");

    let config_path = Path::new("dashboard.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: dashboard.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds dashboard.toml from the crate directory.    ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read dashboard.toml                            ║\n\
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
                ║  ERROR: Invalid TOML syntax in dashboard.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_battery(&config, &mut errors);
    validate_sensor(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid dashboard configuration                          ║\n\
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

    println!("cargo:warning=dashboard.toml validated successfully");
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

/// Known keys per section; the firmware parser rejects anything else
const SECTIONS: &[(&str, &[&str])] = &[
    (
        "display",
        &["width", "height", "buffer_rows", "strategy", "i2c_address", "invert"],
    ),
    ("timing", &["tick_ms", "status_period_ms"]),
    ("battery", &["divider", "vref", "correction"]),
    ("sensor", &["full_scale"]),
];

fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, section) in root {
        let Some(keys) = SECTIONS.iter().find(|(s, _)| s == name).map(|(_, k)| *k) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn int_in(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match config.get(section).and_then(|s| s.get(key)) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn positive_float(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    let value = match config.get(section).and_then(|s| s.get(key)) {
        None => return,
        Some(toml::Value::Float(v)) => *v,
        Some(toml::Value::Integer(v)) => *v as f64,
        Some(_) => {
            errors.push(format!("[{}] {} must be a number", section, key));
            return;
        }
    };
    if !(value.is_finite() && value > 0.0) {
        errors.push(format!("[{}] {} must be positive", section, key));
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    int_in(config, "display", "width", 1, 128, errors);
    int_in(config, "display", "height", 1, 64, errors);
    int_in(config, "display", "buffer_rows", 1, 16, errors);
    int_in(config, "display", "i2c_address", 0, 0x7F, errors);

    match config.get("display").and_then(|d| d.get("strategy")) {
        None => {}
        Some(toml::Value::String(s)) if s == "clear-and-set" || s == "page-packed" => {}
        Some(_) => errors.push("[display] strategy must be 'clear-and-set' or 'page-packed'".into()),
    }

    if let Some(invert) = config.get("display").and_then(|d| d.get("invert")) {
        if !invert.is_bool() {
            errors.push("[display] invert must be true or false".into());
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    int_in(config, "timing", "tick_ms", 1, u32::MAX as i64, errors);
    int_in(config, "timing", "status_period_ms", 1, u32::MAX as i64, errors);
}

fn validate_battery(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["divider", "vref", "correction"] {
        positive_float(config, "battery", key, errors);
    }
}

fn validate_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    int_in(config, "sensor", "full_scale", 1, 4095, errors);
}
