//! Dashboard handler: revenue, expiries and package mix at a glance.

use std::fmt::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use streamline_core::DashboardSummary;

use crate::cli::{ChartView, DashboardArgs, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

const BAR_WIDTH: usize = 24;

/// Horizontal bar scaled against the largest value in the series.
fn bar(amount: Decimal, max: Decimal) -> String {
    if max.is_zero() {
        return String::new();
    }
    let cells = (amount / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0);
    "█".repeat(cells)
}

fn chart(
    out: &mut String,
    rows: impl Iterator<Item = (String, Decimal)> + Clone,
    currency: &str,
) {
    let max = rows.clone().map(|(_, v)| v).max().unwrap_or_default();
    for (label, amount) in rows {
        let _ = writeln!(
            out,
            "  {label:<10} {:<BAR_WIDTH$} {}",
            bar(amount, max),
            output::money(currency, amount),
        );
    }
}

fn detail(summary: &DashboardSummary, view: ChartView, currency: &str, color: bool) -> String {
    let mut out = String::new();
    let revenue = &summary.revenue;

    let _ = writeln!(
        out,
        "Total revenue   {}  ({} active)",
        output::money(currency, revenue.total_revenue),
        revenue.active_count
    );
    let _ = writeln!(
        out,
        "Today           {}",
        output::money(currency, revenue.today_revenue)
    );
    let _ = writeln!(out, "Clients         {}", summary.client_count);

    let _ = writeln!(out);
    for window in &summary.expiring {
        let label = format!("Expiring ≤{}d", window.days);
        let count = if color && window.count > 0 {
            window.count.yellow().to_string()
        } else {
            window.count.to_string()
        };
        let _ = writeln!(out, "{label:<15} {count}");
    }

    let _ = writeln!(out);
    let packages = &summary.packages;
    let _ = writeln!(
        out,
        "Packages        Diamond {} · Lion {} · VIP {}",
        packages.diamond, packages.lion, packages.vip
    );

    let _ = writeln!(out);
    match view {
        ChartView::Week => {
            let _ = writeln!(out, "Revenue by start date, last 7 days");
            chart(
                &mut out,
                summary
                    .weekly
                    .iter()
                    .map(|d| (format!("{} {}", d.label, d.date.format("%m-%d")), d.amount)),
                currency,
            );
        }
        ChartView::Today => {
            let _ = writeln!(out, "Today's revenue by time of day (estimated)");
            chart(
                &mut out,
                summary.hourly.iter().map(|h| (h.time.to_owned(), h.amount)),
                currency,
            );
        }
    }

    out.trim_end().to_owned()
}

pub fn handle(
    args: DashboardArgs,
    data_file: &Path,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let session = util::open_session(data_file)?;
    let snap = session.store().clients_snapshot();
    let summary = DashboardSummary::build(&snap, &cfg.business.expiring_windows, session.now());

    let currency = cfg.business.currency.as_str();
    let color = output::should_color(global.color_mode());
    let out = output::render_single(
        global.output_format(),
        &summary,
        |s| detail(s, args.view, currency, color),
        |s| s.revenue.total_revenue.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_largest_value() {
        let max = Decimal::new(100, 0);
        assert_eq!(bar(max, max).chars().count(), 24);
        assert_eq!(bar(Decimal::new(50, 0), max).chars().count(), 12);
        assert!(bar(Decimal::ZERO, max).is_empty());
        assert!(bar(Decimal::ZERO, Decimal::ZERO).is_empty());
    }
}
