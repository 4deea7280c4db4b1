//! Parameter Store output formatting

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde_json::{Map, Value};
use std::fmt::Write;
use unicode_general_category::{get_general_category, GeneralCategory};

use super::params::full_name;
use super::types::{OutputFormat, Param};


/// Quote a string the way Go's `%q` verb does
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\x7f' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }

    out.push('"');
    out
}

/// Letters, marks, numbers, punctuation, symbols and the ASCII space
fn is_printable(c: char) -> bool {
    c == ' '
        || !matches!(
            get_general_category(c),
            GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::SpaceSeparator
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
                | GeneralCategory::PrivateUse
                | GeneralCategory::Unassigned
        )
}

/// Mask a value with one `*` per character
pub fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Render parameters for `ssm read`
pub fn render_params(params: &[Param], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Dotenv => {
            let mut out = String::new();
            for param in params {
                let _ = writeln!(out, "{}={}", param.name, quote(&param.value));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let map: Map<String, Value> = params
                .iter()
                .map(|p| (p.name.clone(), Value::String(p.value.clone())))
                .collect();
            let mut json = serde_json::to_string_pretty(&Value::Object(map))
                .context("Failed to serialize parameters")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Table of parameters that `ssm load` would write
pub fn load_plan_table(path: &str, params: &[Param]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["PARAMETER", "VALUE", "TYPE"]);

    for param in params {
        let value = if param.value.is_empty() {
            Cell::new("(empty, skipped)").fg(Color::DarkGrey)
        } else {
            Cell::new(mask(&param.value))
        };
        table.add_row(vec![
            Cell::new(full_name(path, &param.name)).fg(Color::Cyan),
            value,
            Cell::new(param.type_name()),
        ]);
    }

    table
}

/// Table of parameters found under a path
pub fn params_table(params: &[Param]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["NAME", "SECURE"]);

    for param in params {
        let secure = if param.secure {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("no")
        };
        table.add_row(vec![Cell::new(&param.name).fg(Color::Cyan), secure]);
    }

    table
}

/// Print the `ssm load` dry-run plan
pub fn output_load_plan(path: &str, params: &[Param]) {
    if params.is_empty() {
        println!("No parameters in file.");
        return;
    }
    println!("{}", load_plan_table(path, params));
    println!("\n{} parameters (dry run)", params.len());
}

/// Print parameters found under a path
pub fn output_found(params: &[Param]) {
    if params.is_empty() {
        println!("No parameters found.");
        return;
    }
    println!("{}", params_table(params));
    println!("\n{} parameters", params.len());
}
