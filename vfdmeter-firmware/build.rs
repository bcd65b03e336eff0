//! Build script for vfdmeter-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Cells on the display
const NUM_CELLS: i64 = 8;

/// Segment columns on the display
const MAX_COLUMNS: i64 = 40;

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
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    // Re-run if display.toml changes
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a display.toml configuration file.          ║\n\
            ║  Please create one in the vfdmeter-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
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
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
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
    validate_transport(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_bars(&config, &mut errors);
    validate_jobs(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display.toml configuration                       ║\n\
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

    println!("cargo:warning=display.toml validated successfully");
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

/// Check an optional integer key against an inclusive range
fn check_int(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Check an optional string key against a set of choices
fn check_choice(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    choices: &[&str],
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::String(s)) if choices.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be one of {}",
            section,
            key,
            choices.join(", ")
        )),
    }
}

/// Check an optional string key fits on the display
fn check_text(table: &toml::value::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    match table.get(key) {
        None => {}
        Some(toml::Value::String(s)) if s.is_ascii() && s.len() <= NUM_CELLS as usize => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be ASCII, at most {} chars",
            section, key, NUM_CELLS
        )),
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|v| v.as_table())
}

fn validate_transport(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(t) = section(config, "transport") else {
        return;
    };
    check_int(t, "transport", "frequency_hz", 2_000, 62_500_000, errors);
    check_int(t, "transport", "mode", 0, 3, errors);
    check_choice(t, "transport", "bit_order", &["lsb", "msb"], errors);
    check_int(t, "transport", "cs_setup_us", 0, u16::MAX as i64, errors);
    check_int(t, "transport", "cs_hold_us", 0, u16::MAX as i64, errors);
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(d) = section(config, "display") else {
        return;
    };
    check_int(d, "display", "dimming", 0, 255, errors);
    check_int(d, "display", "lightness", 0, 255, errors);
    check_text(d, "display", "greeting", errors);
    check_int(d, "display", "greeting_pause_ms", 0, u32::MAX as i64, errors);
}

fn validate_bars(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(b) = section(config, "bars") else {
        return;
    };
    check_int(b, "bars", "columns", 1, MAX_COLUMNS, errors);
    check_choice(b, "bars", "layout", &["simple", "packed"], errors);

    // Packed is the default layout; past one column per cell the count must
    // fill every cell equally
    let packed = !matches!(b.get("layout"), Some(toml::Value::String(l)) if l == "simple");
    let columns = match b.get("columns") {
        Some(toml::Value::Integer(c)) => *c,
        _ => 2 * NUM_CELLS,
    };
    if packed && columns > NUM_CELLS && columns % NUM_CELLS != 0 {
        errors.push(format!(
            "[bars] packed columns must be 1-{} or a multiple of {}",
            NUM_CELLS, NUM_CELLS
        ));
    }
    check_int(b, "bars", "seed", 0, u32::MAX as i64, errors);
}

/// Validate job sections
fn validate_jobs(config: &toml::Value, errors: &mut Vec<String>) {
    let jobs = match config.get("job") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[job] must contain [job.<name>] tables".to_string());
            return;
        }
        None => return,
    };

    if jobs.len() > 16 {
        errors.push(format!("at most 16 jobs allowed, found {}", jobs.len()));
    }

    for (name, job) in jobs {
        let section = format!("job.{}", name);
        if name.len() > 16 {
            errors.push(format!("[{}] name longer than 16 chars", section));
        }
        let Some(job) = job.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        match job.get("kind") {
            Some(toml::Value::String(kind)) => {
                if kind == "blink" && !job.contains_key("text") {
                    errors.push(format!("[{}] blink job needs 'text'", section));
                }
            }
            _ => errors.push(format!("[{}] missing 'kind'", section)),
        }
        check_choice(job, &section, "kind", &["bars", "blank", "blink"], errors);
        check_text(job, &section, "text", errors);
        check_int(job, &section, "position", 0, NUM_CELLS - 1, errors);
        check_int(job, &section, "repeat", 0, u32::MAX as i64, errors);
        check_int(job, &section, "inter_delay_ms", 0, u32::MAX as i64, errors);
        check_int(job, &section, "post_delay_ms", 0, u32::MAX as i64, errors);
    }
}
