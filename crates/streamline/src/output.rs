//! Rendering for `--output`: tables and detail views for people, serde
//! formats for scripts, bare keys for shell pipelines.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use streamline_core::SubscriptionStatus;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Status label, colored like the dashboard badges when enabled.
pub fn paint_status(status: SubscriptionStatus, color: bool) -> String {
    let label = status.to_string();
    if !color {
        return label;
    }
    match status {
        SubscriptionStatus::Active => label.green().to_string(),
        SubscriptionStatus::ExpiringSoon => label.yellow().to_string(),
        SubscriptionStatus::Expired => label.red().to_string(),
        SubscriptionStatus::Suspended => label.dimmed().to_string(),
    }
}

/// `€39.99`: currency symbol followed by the amount at two decimals.
pub fn money(currency: &str, amount: Decimal) -> String {
    format!("{currency}{:.2}", amount.round_dp(2))
}

// ── Rendering ────────────────────────────────────────────────────────

/// Serialize `data` for the machine-readable formats. `None` for the
/// human formats (`table`, `plain`), which each caller renders itself.
fn structured<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Option<String> {
    const INFALLIBLE: &str = "serialization should not fail";
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).expect(INFALLIBLE),
        OutputFormat::JsonCompact => serde_json::to_string(data).expect(INFALLIBLE),
        OutputFormat::Yaml => serde_yaml::to_string(data).expect(INFALLIBLE),
        OutputFormat::Table | OutputFormat::Plain => return None,
    };
    Some(text)
}

/// Render a collection: a rounded table of `to_row` rows, serde output of
/// the records themselves, or one `key` per line for `plain`.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    key: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    if let Some(text) = structured(format, data) {
        return text;
    }
    if format == OutputFormat::Plain {
        return data.iter().map(key).collect::<Vec<_>>().join("\n");
    }
    let rows: Vec<R> = data.iter().map(to_row).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render one record: `detail` builds the human view, `key` the plain one.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail: impl Fn(&T) -> String,
    key: impl Fn(&T) -> String,
) -> String
where
    T: Serialize + ?Sized,
{
    match structured(format, data) {
        Some(text) => text,
        None if format == OutputFormat::Plain => key(data),
        None => detail(data),
    }
}

/// Write rendered output to stdout unless `--quiet`.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let _ = writeln!(io::stdout().lock(), "{output}");
}

/// Status lines go to stderr so stdout stays parseable.
pub fn print_notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(money("€", Decimal::new(8998, 2)), "€89.98");
        assert_eq!(money("$", Decimal::new(5, 0)), "$5.00");
        assert_eq!(money("€", Decimal::new(39_9975, 4)), "€40.00");
    }

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
    }

    #[derive(Tabled)]
    struct Cells {
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![Row { name: "Maria" }, Row { name: "Luca" }]
    }

    fn render(format: OutputFormat) -> String {
        render_list(format, &rows(), |r| Cells { name: r.name }, |r| r.name.to_owned())
    }

    #[test]
    fn list_formats() {
        assert_eq!(render(OutputFormat::Plain), "Maria\nLuca");
        assert_eq!(
            render(OutputFormat::JsonCompact),
            r#"[{"name":"Maria"},{"name":"Luca"}]"#
        );
        assert!(render(OutputFormat::Yaml).starts_with("- name: Maria"));
        let table = render(OutputFormat::Table);
        assert!(table.contains("Name"));
        assert!(table.contains("Luca"));
    }

    #[test]
    fn single_uses_detail_for_tables() {
        let row = Row { name: "Maria" };
        let detail = |r: &Row| format!("Name: {}", r.name);
        let key = |r: &Row| r.name.to_owned();
        assert_eq!(render_single(OutputFormat::Table, &row, detail, key), "Name: Maria");
        assert_eq!(render_single(OutputFormat::Plain, &row, detail, key), "Maria");
    }

    #[test]
    fn plain_status_has_no_escape_codes() {
        assert_eq!(
            paint_status(SubscriptionStatus::ExpiringSoon, false),
            "Expiring Soon"
        );
        assert!(paint_status(SubscriptionStatus::Expired, true).contains("\u{1b}["));
    }
}
