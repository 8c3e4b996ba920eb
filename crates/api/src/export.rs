//! CSV report export
//!
//! Two columns, `Parameter,Value`: the result and its references first, then
//! the echoed inputs.

use lab_validator::LabField;
use pleural_engine::{ClassificationResult, LabInput};
use std::fmt::Write;

/// Download file name
pub const REPORT_FILE_NAME: &str = "pleural_workup_report.csv";

/// Render the report for one evaluation
pub fn render_report(input: &LabInput, result: &ClassificationResult) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_row(&mut out, "Parameter", "Value")?;

    let exudate = match result.is_exudate() {
        Some(true) => "True",
        Some(false) => "False",
        None => "Unknown",
    };
    write_row(&mut out, "Exudate?", exudate)?;
    write_row(&mut out, "Pseudo-exudate?", bool_label(result.is_pseudo_exudate()))?;
    write_row(&mut out, "SPAG", &gradient(result.gradients.spag))?;
    write_row(&mut out, "SPG", &gradient(result.gradients.spg))?;
    write_row(&mut out, "RAPID score", &result.rapid.value().to_string())?;

    let alerts: Vec<&str> = result.alerts.iter().map(|a| a.message()).collect();
    write_row(&mut out, "Alerts", &alerts.join("\n"))?;
    let recommendations: Vec<String> = result.recommendations.iter().map(|r| r.text()).collect();
    write_row(&mut out, "Recommendations", &recommendations.join("\n"))?;
    let references: Vec<String> = result.references().into_iter().map(|r| r.display()).collect();
    write_row(&mut out, "References", &references.join("\n"))?;

    for field in LabField::ALL {
        let value = input.get(field).map(|v| v.to_string()).unwrap_or_default();
        write_row(&mut out, &field.label_with_unit(), &value)?;
    }
    write_row(&mut out, "Beta-2 transferrin", input.beta2_transferrin.label())?;
    for (label, answer) in input.rapid.components() {
        write_row(&mut out, label, answer.label())?;
    }

    Ok(out)
}

fn bool_label(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn gradient(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn write_row(out: &mut String, key: &str, value: &str) -> std::fmt::Result {
    writeln!(out, "{},{}", quote(key), quote(value))
}

/// RFC 4180 quoting
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
