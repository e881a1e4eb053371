use credo_core::{Claim, TrustReport};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a trust report; the table form is a headline, one row per claim,
/// and the recommendations.
pub fn output_report(report: &TrustReport, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Table => render_report_table(report),
        OutputFormat::Json | OutputFormat::Raw => render(report, format)?,
    };
    println!("{rendered}");
    Ok(())
}

fn render_report_table(report: &TrustReport) -> String {
    let mut out = format!(
        "trust score {}/100 ({})\n{}\n",
        report.trust_score, report.risk_level, report.summary
    );

    if !report.claims.is_empty() {
        let headers = ["id", "status", "confidence", "source", "claim"];
        let rows: Vec<Vec<String>> = report.claims.iter().map(claim_row).collect();
        out.push('\n');
        out.push_str(&table::render_table(&headers, &rows, table_options()));
        out.push('\n');
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nrecommendations:\n");
        for recommendation in &report.recommendations {
            out.push_str("  - ");
            out.push_str(recommendation);
            out.push('\n');
        }
    }

    out.trim_end().to_string()
}

fn claim_row(claim: &Claim) -> Vec<String> {
    vec![
        claim.id.clone(),
        claim.status.to_string(),
        claim.confidence.to_string(),
        claim
            .evidence
            .as_ref()
            .map_or_else(|| String::from("-"), |e| e.source_name.clone()),
        claim.text.clone(),
    ]
}

fn render_value_table(value: &Value) -> anyhow::Result<String> {
    let options = table_options();
    match value {
        Value::Array(items) => Ok(render_array_table(items, options)),
        Value::Object(map) => {
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&["key", "value"], &rows, options))
        }
        scalar => Ok(table::render_table(
            &["value"],
            &[vec![value_to_cell(scalar)]],
            options,
        )),
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options);
    }

    // Column order follows the first object's field order.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
