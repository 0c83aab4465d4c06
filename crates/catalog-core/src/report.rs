//! # Sales Report Table
//!
//! Renders the top-customers aggregation as a fixed-width text table.
//!
//! ## Layout
//! ```text
//! Laporan Penjualan — Total penjualan per pelanggan (nilai transaksi tertinggi):
//! Top 10 Pelanggan:
//! +------------------------+---------+-----------------+
//! | Company Name           | Country | Total Penjualan |
//! +------------------------+---------+-----------------+
//! | QUICK-Stop             | Germany |     $117,483.39 |
//! | Ernst Handel Sonder... | Austria |     $115,673.39 |
//! +------------------------+---------+-----------------+
//! ```
//!
//! ## Column Widths
//! 1. Start at the header label length.
//! 2. Grow to the longest value in the column (the total column is measured
//!    on its formatted `$1,234.50` string).
//! 3. Cap at [`TableLimits`] (22 / 15 / 18 by default).
//!
//! Values longer than the final width are cut to `width - 3` characters plus
//! `...`. A width of 3 or less keeps the first `width` characters and drops
//! the marker.
//!
//! Widths count `char`s, so multi-byte company names are never split inside
//! a code point.

use crate::types::CustomerSale;

/// Maximum number of customers in the report.
pub const TOP_CUSTOMER_LIMIT: i64 = 10;

pub const REPORT_TITLE: &str =
    "Laporan Penjualan — Total penjualan per pelanggan (nilai transaksi tertinggi):";
pub const REPORT_SUBTITLE: &str = "Top 10 Pelanggan:";

pub const HEADER_COMPANY: &str = "Company Name";
pub const HEADER_COUNTRY: &str = "Country";
pub const HEADER_TOTAL: &str = "Total Penjualan";

const ELLIPSIS: &str = "...";

// =============================================================================
// Currency
// =============================================================================

/// Formats an amount as `$` + comma-grouped integer part + two decimals.
///
/// ```rust
/// use catalog_core::report::format_currency;
///
/// assert_eq!(format_currency(0.0), "$0.00");
/// assert_eq!(format_currency(1234.5), "$1,234.50");
/// assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = match fixed.find('.') {
        Some(i) => fixed.split_at(i),
        None => (fixed.as_str(), ""),
    };

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}{dec_part}", group_thousands(int_part))
}

/// Inserts a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Cell Helpers
// =============================================================================

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn take_chars(value: &str, n: usize) -> String {
    value.chars().take(n).collect()
}

/// Shortens `value` to fit `width`, marking the cut with `...`.
///
/// ```rust
/// use catalog_core::report::truncate;
///
/// assert_eq!(truncate("Alfreds Futterkiste", 10), "Alfreds...");
/// assert_eq!(truncate("Alfreds", 10), "Alfreds");
/// assert_eq!(truncate("Alfreds", 2), "Al");
/// ```
pub fn truncate(value: &str, width: usize) -> String {
    if char_len(value) <= width {
        return value.to_string();
    }
    if width <= ELLIPSIS.len() {
        return take_chars(value, width);
    }
    let mut cut = take_chars(value, width - ELLIPSIS.len());
    cut.push_str(ELLIPSIS);
    cut
}

/// Left-aligns `value` in `width` columns, cutting anything longer.
fn pad_right(value: &str, width: usize) -> String {
    let len = char_len(value);
    if len >= width {
        return take_chars(value, width);
    }
    format!("{value}{}", " ".repeat(width - len))
}

/// Right-aligns `value` in `width` columns, cutting anything longer.
fn pad_left(value: &str, width: usize) -> String {
    let len = char_len(value);
    if len >= width {
        return take_chars(value, width);
    }
    format!("{}{value}", " ".repeat(width - len))
}

// =============================================================================
// Table
// =============================================================================

/// Maximum width of each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLimits {
    pub company: usize,
    pub country: usize,
    pub total: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        TableLimits {
            company: 22,
            country: 15,
            total: 18,
        }
    }
}

/// Final widths of the three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub company: usize,
    pub country: usize,
    pub total: usize,
}

impl ColumnWidths {
    /// Computes widths from headers and data, then applies the caps.
    pub fn measure(rows: &[CustomerSale], limits: TableLimits) -> Self {
        let mut widths = ColumnWidths {
            company: char_len(HEADER_COMPANY),
            country: char_len(HEADER_COUNTRY),
            total: char_len(HEADER_TOTAL),
        };

        for row in rows {
            widths.company = widths.company.max(char_len(&row.company_name));
            widths.country = widths.country.max(char_len(&row.country));
            widths.total = widths
                .total
                .max(char_len(&format_currency(row.total_purchases)));
        }

        ColumnWidths {
            company: widths.company.min(limits.company),
            country: widths.country.min(limits.country),
            total: widths.total.min(limits.total),
        }
    }

    fn separator(&self) -> String {
        format!(
            "+{}+{}+{}+\n",
            "-".repeat(self.company + 2),
            "-".repeat(self.country + 2),
            "-".repeat(self.total + 2)
        )
    }
}

/// Renders the report with the default column caps.
pub fn format_top_customers_by_sales(rows: &[CustomerSale]) -> String {
    format_top_customers_with_limits(rows, TableLimits::default())
}

/// Renders the report with explicit column caps.
pub fn format_top_customers_with_limits(rows: &[CustomerSale], limits: TableLimits) -> String {
    let widths = ColumnWidths::measure(rows, limits);
    let sep = widths.separator();

    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(REPORT_SUBTITLE);
    out.push('\n');

    out.push_str(&sep);
    out.push_str(&format!(
        "| {} | {} | {} |\n",
        pad_right(HEADER_COMPANY, widths.company),
        pad_right(HEADER_COUNTRY, widths.country),
        pad_right(HEADER_TOTAL, widths.total)
    ));
    out.push_str(&sep);

    for row in rows {
        let company = truncate(&row.company_name, widths.company);
        let country = truncate(&row.country, widths.country);
        let total = truncate(&format_currency(row.total_purchases), widths.total);
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            pad_right(&company, widths.company),
            pad_right(&country, widths.country),
            pad_left(&total, widths.total)
        ));
    }

    out.push_str(&sep);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
