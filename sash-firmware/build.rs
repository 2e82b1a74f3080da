//! Build script for sash-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates greenhouse.toml at compile time

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs routed to the window headers (keep in sync with src/board.rs)
const HEADER_GPIOS: std::ops::RangeInclusive<u64> = 2..=17;

/// Maximum number of windows (keep in sync with sash-core)
const MAX_WINDOWS: usize = 4;

/// Maximum window label length in bytes (keep in sync with sash-core)
const MAX_LABEL_LEN: usize = 24;

const PIN_KEYS: [&str; 4] = ["direction_pin", "motor_pin", "opened_pin", "closed_pin"];

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

/// Validate greenhouse.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=greenhouse.toml");

    let config_path = Path::new("greenhouse.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: greenhouse.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a greenhouse.toml configuration file      ║\n\
            ║  in the sash-firmware directory.                                 ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read greenhouse.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in greenhouse.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_windows(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid window configuration in greenhouse.toml          ║\n\
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

    println!("cargo:warning=greenhouse.toml validated successfully");
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

/// Validate the [window.*] sections
fn validate_windows(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(table) = config.as_table() {
        for key in table.keys() {
            if key != "window" {
                errors.push(format!("unknown section [{}]", key));
            }
        }
    }

    let windows = match config.get("window") {
        Some(toml::Value::Table(t)) if !t.is_empty() => t,
        _ => {
            errors.push("Missing [window.*] section - at least one window is required".into());
            return errors;
        }
    };

    if windows.len() > MAX_WINDOWS {
        errors.push(format!("at most {} windows are supported", MAX_WINDOWS));
    }

    let mut used_pins = HashSet::new();

    for (name, window) in windows {
        if let Some(problem) = label_problem(name) {
            errors.push(format!("[window.{}] label {}", name, problem));
        }

        let window = match window {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[window.{}] must be a table", name));
                continue;
            }
        };

        for key in window.keys() {
            if !PIN_KEYS.contains(&key.as_str()) && key != "move_timeout_ms" {
                errors.push(format!("[window.{}] unknown key '{}'", name, key));
            }
        }

        for key in PIN_KEYS {
            match window.get(key) {
                Some(toml::Value::String(s)) => match parse_gpio(s) {
                    Some(pin) if HEADER_GPIOS.contains(&pin) => {
                        if !used_pins.insert(pin) {
                            errors.push(format!("[window.{}] gpio{} used twice", name, pin));
                        }
                    }
                    Some(pin) => errors.push(format!(
                        "[window.{}] gpio{} is not on a window header",
                        name, pin
                    )),
                    None => errors.push(format!("[window.{}] {} is not a pin", name, key)),
                },
                Some(_) => errors.push(format!("[window.{}] {} must be a string", name, key)),
                None => errors.push(format!("[window.{}] missing '{}'", name, key)),
            }
        }

        match window.get("move_timeout_ms") {
            Some(toml::Value::Integer(ms)) if *ms > 0 && *ms <= u32::MAX as i64 => {}
            Some(_) => errors.push(format!(
                "[window.{}] move_timeout_ms must be a positive integer",
                name
            )),
            None => errors.push(format!("[window.{}] missing 'move_timeout_ms'", name)),
        }
    }

    errors
}

/// Check a window label the way the firmware's config parser does
fn label_problem(label: &str) -> Option<String> {
    if label.trim().is_empty() {
        Some("must not be empty".into())
    } else if label.contains('.') {
        Some("must not contain '.'".into())
    } else if label.len() > MAX_LABEL_LEN {
        Some(format!("is longer than {} bytes", MAX_LABEL_LEN))
    } else {
        None
    }
}

/// Parse "gpioNN" with optional ^ and ! prefixes
fn parse_gpio(s: &str) -> Option<u64> {
    let s = s.trim_start_matches(['^', '!']);
    let num = s.strip_prefix("gpio")?;
    if num.is_empty() || !num.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    num.parse().ok()
}
