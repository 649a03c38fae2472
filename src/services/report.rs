// src/services/report.rs
use log::{error, info};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{Result, ValuationError};
use crate::models::ValuationResult;

pub const DEFAULT_EXTENSION: &str = "txt";
const PER_SHARE_UNAVAILABLE: &str = "N/A (shares outstanding not available)";

/// Format a monetary amount with thousands separators and two decimals.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    if !value.is_finite() {
        return fixed;
    }

    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, fraction)
}

fn projection_lines(out: &mut String, result: &ValuationResult) {
    for p in &result.projections {
        let _ = writeln!(
            out,
            "Year {}: Projected FCF = {}, Discounted Value = {}",
            p.year,
            format_amount(p.projected),
            format_amount(p.discounted)
        );
    }
}

/// Plain-text export report.
pub fn render_report(result: &ValuationResult) -> String {
    let a = &result.assumptions;
    let mut out = String::new();

    let _ = writeln!(out, "DCF Intrinsic Value Report for {}", result.ticker);
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "Free Cash Flow (Most Recent): {}", format_amount(result.free_cash_flow.value));
    let _ = writeln!(out, "Discount Rate: {}", a.discount_rate);
    let _ = writeln!(out, "Growth Rate: {}", a.growth_rate);
    let _ = writeln!(out, "Terminal Growth Rate: {}", a.terminal_growth_rate);
    let _ = writeln!(out, "Forecast Period: {} years\n", a.forecast_years);

    let _ = writeln!(out, "Yearly Projections:");
    projection_lines(&mut out, result);
    out.push('\n');

    let _ = writeln!(out, "Terminal Value: {}", format_amount(result.terminal_value));
    let _ = writeln!(out, "Discounted Terminal Value: {}\n", format_amount(result.discounted_terminal_value));
    let _ = writeln!(out, "Enterprise Value (Intrinsic Value): {}", format_amount(result.enterprise_value));
    match result.per_share_value {
        Some(value) => {
            let _ = writeln!(out, "Intrinsic Value per Share: {}", format_amount(value));
        }
        None => {
            let _ = writeln!(out, "Intrinsic Value per Share: {}", PER_SHARE_UNAVAILABLE);
        }
    }
    out.push('\n');

    let _ = writeln!(out, "Company Info (Partial):");
    for (key, value) in result.company.fields() {
        let _ = writeln!(out, "{}: {}", key, value);
    }

    out
}

/// On-screen summary shown right after a calculation.
pub fn render_summary(result: &ValuationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Most recent Free Cash Flow: {}\n", format_amount(result.free_cash_flow.value));
    projection_lines(&mut out, result);
    let _ = writeln!(
        out,
        "\nTerminal Value: {}, Discounted Terminal Value = {}",
        format_amount(result.terminal_value),
        format_amount(result.discounted_terminal_value)
    );
    let _ = writeln!(out, "\nEnterprise Value (Intrinsic Value): {}", format_amount(result.enterprise_value));
    match result.per_share_value {
        Some(value) => {
            let _ = writeln!(out, "Intrinsic Value per Share: {}", format_amount(value));
        }
        None => {
            let _ = writeln!(out, "Shares outstanding data not available for per-share valuation.");
        }
    }

    out
}

/// Append `.txt` when the chosen path has no extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    path
}

/// Resolve a bare report file name inside `dir`. Names that could escape the
/// directory are rejected.
pub fn report_path_in(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let name = file_name.trim();
    if name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(ValuationError::input(format!(
            "'{}' is not a valid report file name.",
            file_name
        )));
    }
    Ok(with_default_extension(&dir.join(name)))
}

fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write the text report for `result` to `path`, all or nothing.
///
/// `result` is `None` when no calculation has completed yet. Returns the
/// path actually written, which has the default extension applied.
pub fn export_report(result: Option<&ValuationResult>, path: &Path) -> Result<PathBuf> {
    let result = result.ok_or(ValuationError::NoResultToExport)?;
    let path = with_default_extension(path);

    write_atomically(&path, &render_report(result)).map_err(|source| {
        error!("Error exporting report to {}: {}", path.display(), source);
        ValuationError::ExportWrite {
            path: path.clone(),
            source,
        }
    })?;

    info!("Report for {} exported to {}", result.ticker, path.display());
    Ok(path)
}
