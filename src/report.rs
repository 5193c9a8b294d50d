/*!
 * Scan summary reporting
 *
 * Renders the scanner statistics as a table using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::scanner::ScanStatistics;

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Number of root paths scanned
    pub roots: usize,
    /// Wall time of the run
    pub duration: Duration,
    pub statistics: ScanStatistics,
}

/// Report generator for scan results
pub struct Reporter;

impl Reporter {
    /// Format a number with human-readable units
    fn format_number(num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate the summary table
    pub fn generate_report(report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let rows = vec![
            SummaryRow {
                key: "Roots scanned",
                value: report.roots.to_string(),
            },
            SummaryRow {
                key: "Files rendered",
                value: Self::format_number(stats.files_rendered),
            },
            SummaryRow {
                key: "Skipped (gitignored)",
                value: Self::format_number(stats.skipped_gitignore),
            },
            SummaryRow {
                key: "Skipped (filters)",
                value: Self::format_number(stats.skipped_criteria),
            },
            SummaryRow {
                key: "Failed",
                value: Self::format_number(stats.failed),
            },
            SummaryRow {
                key: "Output size",
                value: format!("{} bytes", Self::format_number(stats.bytes_emitted)),
            },
            SummaryRow {
                key: "Process time",
                value: format!("{:.4?}", report.duration),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    /// Print the report to stderr so it never mixes with the scan output
    pub fn print_report(report: &ScanReport) {
        eprintln!("\n{}", Self::generate_report(report));
    }
}
