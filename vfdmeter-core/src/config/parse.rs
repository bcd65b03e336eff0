//! Minimal TOML parser for the meter configuration
//!
//! Handles only the subset `display.toml` uses. It does NOT support the full
//! TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - [job.name] headers, in file order
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys outside section headers
//! - Digit separators in integers

use heapless::String as HString;
use vfdmeter_hal::{BitOrder, Mode};

use super::types::{JobConfig, JobKind, MeterConfig, MAX_LABEL_LEN};
use crate::workload::{packs_evenly, Layout, MAX_COLUMNS};
use vfdmeter_protocol::NUM_CELLS;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type or out of range
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Job `kind` missing or not one of bars, blank, blink
    UnknownJobKind,
    /// Blink job without text
    MissingText,
}

/// Current parsing context
#[derive(Debug, Clone)]
enum Section {
    Root,
    Transport,
    Display,
    Bars,
    Job(HString<MAX_LABEL_LEN>),
}

/// Job being built, plus whether its kind was given
struct PendingJob {
    job: JobConfig,
    has_kind: bool,
}

/// Parse TOML configuration into MeterConfig
///
/// Keys that are absent keep their defaults. Unknown keys are ignored. The
/// first `[job.*]` section replaces the default worklist.
pub fn parse_config(input: &str) -> Result<MeterConfig, ParseError> {
    let mut config = MeterConfig::default();
    let mut section = Section::Root;
    let mut current_job: Option<PendingJob> = None;
    let mut jobs_replaced = false;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            save_job(&mut config, &mut current_job)?;

            section = parse_section_header(&line[1..line.len() - 1])?;

            if let Section::Job(name) = &section {
                if !jobs_replaced {
                    config.jobs.clear();
                    jobs_replaced = true;
                }
                let job = JobConfig {
                    name: name.clone(),
                    ..JobConfig::default()
                };
                current_job = Some(PendingJob {
                    job,
                    has_kind: false,
                });
            }
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(&section, key, value, &mut config, &mut current_job)?;
        }
    }

    save_job(&mut config, &mut current_job)?;

    // Layout and columns may come in either order
    if config.bars.layout == Layout::Packed && !packs_evenly(config.bars.columns as usize) {
        return Err(ParseError::InvalidValue);
    }

    Ok(config)
}

/// Parse section header like "display" or "job.bars"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some((kind, name)) = header.split_once('.') {
        if kind != "job" || name.is_empty() || name.contains('.') {
            return Err(ParseError::InvalidSection);
        }
        let name = HString::try_from(name).map_err(|_| ParseError::InvalidSection)?;
        return Ok(Section::Job(name));
    }

    match header {
        "transport" => Ok(Section::Transport),
        "display" => Ok(Section::Display),
        "bars" => Ok(Section::Bars),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = strip_comment(value);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove an inline comment: the first `#` outside a quoted string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (pos, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..pos].trim(),
            _ => {}
        }
    }
    value
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a string value into fixed-capacity storage
fn parse_text<const N: usize>(value: &str) -> Result<HString<N>, ParseError> {
    HString::try_from(parse_string(value)).map_err(|_| ParseError::InvalidValue)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_mode(value: &str) -> Result<Mode, ParseError> {
    Mode::from_number(parse_int(value)?).ok_or(ParseError::InvalidValue)
}

fn parse_bit_order(value: &str) -> Result<BitOrder, ParseError> {
    match parse_string(value) {
        "lsb" => Ok(BitOrder::LsbFirst),
        "msb" => Ok(BitOrder::MsbFirst),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_layout(value: &str) -> Result<Layout, ParseError> {
    match parse_string(value) {
        "simple" => Ok(Layout::Simple),
        "packed" => Ok(Layout::Packed),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_job_kind(value: &str) -> Result<JobKind, ParseError> {
    match parse_string(value) {
        "bars" => Ok(JobKind::Bars),
        "blank" => Ok(JobKind::Blank),
        "blink" => Ok(JobKind::Blink),
        _ => Err(ParseError::UnknownJobKind),
    }
}

/// Apply a key-value pair to the current section
fn apply_value(
    section: &Section,
    key: &str,
    value: &str,
    config: &mut MeterConfig,
    current_job: &mut Option<PendingJob>,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Transport => {
            let t = &mut config.transport;
            match key {
                "frequency_hz" => {
                    t.frequency_hz = parse_int(value)?;
                    if t.frequency_hz == 0 {
                        return Err(ParseError::InvalidValue);
                    }
                }
                "mode" => t.mode = parse_mode(value)?,
                "bit_order" => t.bit_order = parse_bit_order(value)?,
                "cs_setup_us" => t.cs_setup_us = parse_int(value)?,
                "cs_hold_us" => t.cs_hold_us = parse_int(value)?,
                _ => {}
            }
        }
        Section::Display => {
            let d = &mut config.display;
            match key {
                "dimming" => d.dimming = parse_int(value)?,
                "lightness" => d.lightness = parse_int(value)?,
                "greeting" => d.greeting = parse_text(value)?,
                "greeting_pause_ms" => d.greeting_pause_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Bars => {
            let b = &mut config.bars;
            match key {
                "columns" => {
                    let columns: u8 = parse_int(value)?;
                    if columns == 0 || columns as usize > MAX_COLUMNS {
                        return Err(ParseError::InvalidValue);
                    }
                    b.columns = columns;
                }
                "layout" => b.layout = parse_layout(value)?,
                "seed" => b.seed = parse_int(value)?,
                _ => {}
            }
        }
        Section::Job(_) => {
            if let Some(pending) = current_job {
                let job = &mut pending.job;
                match key {
                    "kind" => {
                        job.kind = parse_job_kind(value)?;
                        pending.has_kind = true;
                    }
                    "repeat" => job.repeat = parse_int(value)?,
                    "inter_delay_ms" => job.inter_delay_ms = parse_int(value)?,
                    "post_delay_ms" => job.post_delay_ms = parse_int(value)?,
                    "text" => job.text = parse_text(value)?,
                    "position" => {
                        let position: u8 = parse_int(value)?;
                        if position as usize >= NUM_CELLS {
                            return Err(ParseError::InvalidValue);
                        }
                        job.position = position;
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

/// Validate and store the job being built, if any
fn save_job(
    config: &mut MeterConfig,
    current_job: &mut Option<PendingJob>,
) -> Result<(), ParseError> {
    if let Some(pending) = current_job.take() {
        if !pending.has_kind {
            return Err(ParseError::UnknownJobKind);
        }
        if pending.job.kind == JobKind::Blink && pending.job.text.is_empty() {
            return Err(ParseError::MissingText);
        }
        config
            .jobs
            .push(pending.job)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &str = include_str!("../../../vfdmeter-firmware/display.toml");

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = parse_config(SHIPPED).unwrap();
        assert_eq!(config, MeterConfig::default());
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), MeterConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            MeterConfig::default()
        );
    }

    #[test]
    fn test_parse_sections() {
        let input = r#"
[transport]
frequency_hz = 500000
mode = 0
bit_order = "msb"   # wired straight

[display]
dimming = 3
greeting = "Hi"

[bars]
columns = 24
layout = "simple"
seed = 99
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.transport.frequency_hz, 500_000);
        assert_eq!(config.transport.mode, Mode::Mode0);
        assert_eq!(config.transport.bit_order, BitOrder::MsbFirst);
        assert_eq!(config.transport.cs_setup_us, 2);
        assert_eq!(config.display.dimming, 3);
        assert_eq!(config.display.lightness, 63);
        assert_eq!(config.display.greeting.as_str(), "Hi");
        assert_eq!(config.bars.columns, 24);
        assert_eq!(config.bars.layout, Layout::Simple);
        assert_eq!(config.bars.seed, 99);
        // No job sections: default worklist stays
        assert_eq!(config.jobs.len(), 4);
    }

    #[test]
    fn test_jobs_replace_defaults_in_order() {
        let input = r#"
[job.first]
kind = "blink"
text = "OK"
position = 3
repeat = 4

[job.second]
kind = "blank"
post_delay_ms = 50
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.jobs.len(), 2);

        let first = &config.jobs[0];
        assert_eq!(first.name.as_str(), "first");
        assert_eq!(first.kind, JobKind::Blink);
        assert_eq!(first.text.as_str(), "OK");
        assert_eq!(first.position, 3);
        assert_eq!(first.repeat, 4);

        let second = &config.jobs[1];
        assert_eq!(second.kind, JobKind::Blank);
        assert_eq!(second.repeat, 1);
        assert_eq!(second.post_delay_ms, 50);
    }

    #[test]
    fn test_job_errors() {
        assert_eq!(
            parse_config("[job.a]\nrepeat = 2\n"),
            Err(ParseError::UnknownJobKind)
        );
        assert_eq!(
            parse_config("[job.a]\nkind = \"spin\"\n"),
            Err(ParseError::UnknownJobKind)
        );
        assert_eq!(
            parse_config("[job.a]\nkind = \"blink\"\n"),
            Err(ParseError::MissingText)
        );
        assert_eq!(
            parse_config("[job.a]\nkind = \"blink\"\ntext = \"way too long\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_too_many_jobs() {
        let mut input = std::string::String::new();
        for i in 0..=crate::config::MAX_JOBS {
            input.push_str(&std::format!("[job.j{}]\nkind = \"blank\"\n", i));
        }
        assert_eq!(parse_config(&input), Err(ParseError::TooManyItems));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[transport]\nmode = 4\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[transport]\nbit_order = \"middle\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[bars]\ncolumns = 41\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\ndimming = -1\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[heater]\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_config("[job.a.b]\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_hash_inside_quoted_string() {
        let config = parse_config("[display]\ngreeting = \"No#1\"\n").unwrap();
        assert_eq!(config.display.greeting.as_str(), "No#1");

        let config = parse_config("[display]\ngreeting = \"No#1\"  # shown first\n").unwrap();
        assert_eq!(config.display.greeting.as_str(), "No#1");

        let config = parse_config("[job.a]\nkind = \"blink\"\ntext = \"#1\" # c\n").unwrap();
        assert_eq!(config.jobs[0].text.as_str(), "#1");
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("3 # three"), "3");
        assert_eq!(strip_comment("\"a#b\""), "\"a#b\"");
        assert_eq!(strip_comment("\"a#b\" #c \"d\""), "\"a#b\"");
        assert_eq!(strip_comment("\"#\"#\"#\""), "\"#\"");
    }

    #[test]
    fn test_packed_columns_must_fill_cells() {
        assert_eq!(
            parse_config("[bars]\ncolumns = 12\n"),
            Err(ParseError::InvalidValue)
        );
        // Layout given after columns is still checked
        assert_eq!(
            parse_config("[bars]\ncolumns = 20\nlayout = \"packed\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[bars]\ncolumns = 20\nlayout = \"simple\"\n")
                .unwrap()
                .bars
                .columns,
            20
        );
        assert_eq!(parse_config("[bars]\ncolumns = 5\n").unwrap().bars.columns, 5);
        assert_eq!(parse_config("[bars]\ncolumns = 24\n").unwrap().bars.columns, 24);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[display]\nsparkle = true\n").unwrap();
        assert_eq!(config, MeterConfig::default());
    }
}
