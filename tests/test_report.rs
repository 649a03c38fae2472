//! Report rendering and file export.

mod common;

use common::acme_profile;
use dcf_valuation::compute_valuation;
use dcf_valuation::models::{FreeCashFlowBase, ValuationAssumptions, ValuationResult};
use dcf_valuation::services::report::{export_report, render_report, render_summary};
use dcf_valuation::ValuationError;
use std::fs;

fn flat_result(shares: Option<f64>) -> ValuationResult {
    compute_valuation(
        "ACME",
        FreeCashFlowBase::reported(100.0),
        ValuationAssumptions {
            discount_rate: 0.10,
            growth_rate: 0.0,
            terminal_growth_rate: 0.02,
            forecast_years: 1,
        },
        shares,
        acme_profile(),
    )
    .unwrap()
}

const EXPECTED_REPORT: &str = "\
DCF Intrinsic Value Report for ACME
==================================================
Free Cash Flow (Most Recent): 100.00
Discount Rate: 0.1
Growth Rate: 0
Terminal Growth Rate: 0.02
Forecast Period: 1 years

Yearly Projections:
Year 1: Projected FCF = 100.00, Discounted Value = 90.91

Terminal Value: 1,275.00
Discounted Terminal Value: 1,159.09

Enterprise Value (Intrinsic Value): 1,250.00
Intrinsic Value per Share: N/A (shares outstanding not available)

Company Info (Partial):
longName: Acme Corporation
sector: Industrials
country: United States
website: https://acme.example
";

// ---------------------------------------------------------------------------
// rendering
// ---------------------------------------------------------------------------

#[test]
fn report_layout_without_shares() {
    assert_eq!(render_report(&flat_result(None)), EXPECTED_REPORT);
}

#[test]
fn report_includes_per_share_value_when_known() {
    let report = render_report(&flat_result(Some(10.0)));
    assert!(report.contains("Intrinsic Value per Share: 125.00\n"));
    assert!(!report.contains("N/A"));
}

#[test]
fn summary_explains_missing_shares() {
    let summary = render_summary(&flat_result(None));
    assert!(summary.starts_with("Most recent Free Cash Flow: 100.00\n\n"));
    assert!(summary.contains("Year 1: Projected FCF = 100.00, Discounted Value = 90.91\n"));
    assert!(summary.contains("Terminal Value: 1,275.00, Discounted Terminal Value = 1,159.09"));
    assert!(summary.ends_with("Shares outstanding data not available for per-share valuation.\n"));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_writes_the_rendered_report() {
    let dir = tempfile::tempdir().unwrap();
    let result = flat_result(None);

    let written = export_report(Some(&result), &dir.path().join("acme")).unwrap();

    assert_eq!(written, dir.path().join("acme.txt"));
    assert_eq!(fs::read_to_string(&written).unwrap(), EXPECTED_REPORT);
    // Only the report itself is left behind.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn export_replaces_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("report.txt");
    fs::write(&target, "stale contents that are much longer than nothing at all\n".repeat(100)).unwrap();

    export_report(Some(&flat_result(None)), &target).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), EXPECTED_REPORT);
}

#[test]
fn export_to_missing_directory_leaves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing").join("report.txt");

    let err = export_report(Some(&flat_result(None)), &target).unwrap_err();

    assert!(matches!(err, ValuationError::ExportWrite { .. }));
    assert_eq!(err.kind(), "ExportError");
    assert!(!target.exists());
}

#[test]
fn export_requires_a_result() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("report.txt");

    let err = export_report(None, &target).unwrap_err();

    assert!(matches!(err, ValuationError::NoResultToExport));
    assert!(!target.exists());
}
