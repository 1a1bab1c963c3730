//! Output rendering
//!
//! Commands hand records to a [`Sink`] one at a time. The terminal sink
//! collects them and renders a table, a JSON array, or a YAML list when the
//! command finishes. Status messages go to stderr so stdout stays parseable.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::io::Write;

use crate::error::CommandResult;
use crate::projection::AlertRuleRecord;

/// Output format for emitted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON array
    Json,
    /// YAML list
    Yaml,
}

/// Receives records as a command produces them
pub trait Sink<R> {
    fn emit(&mut self, record: R) -> CommandResult<()>;
}

impl<R> Sink<R> for Vec<R> {
    fn emit(&mut self, record: R) -> CommandResult<()> {
        self.push(record);
        Ok(())
    }
}

/// A record that can be shown as a table row
pub trait TableRow {
    fn headers(&self) -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

/// Sink that renders records to a writer
pub struct Renderer<W: Write, R> {
    out: W,
    format: OutputFormat,
    records: Vec<R>,
}

impl<W: Write, R: Serialize + TableRow> Renderer<W, R> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            records: Vec::new(),
        }
    }

    /// Write everything emitted so far and return the record count
    pub fn finish(mut self) -> CommandResult<usize> {
        let count = self.records.len();

        match self.format {
            OutputFormat::Table => {
                if let Some(first) = self.records.first() {
                    let mut table = Table::new();
                    table.load_preset(UTF8_FULL).set_header(first.headers());
                    for record in &self.records {
                        table.add_row(record.cells());
                    }
                    writeln!(self.out, "{}", table)?;
                } else {
                    print_info("No results");
                }
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(&self.records)?)?;
            }
            OutputFormat::Yaml => {
                write!(self.out, "{}", serde_yaml::to_string(&self.records)?)?;
            }
        }

        self.out.flush()?;
        Ok(count)
    }
}

impl<W: Write, R> Sink<R> for Renderer<W, R> {
    fn emit(&mut self, record: R) -> CommandResult<()> {
        self.records.push(record);
        Ok(())
    }
}

impl TableRow for AlertRuleRecord {
    fn headers(&self) -> Vec<&'static str> {
        match self {
            AlertRuleRecord::Summary(_) => vec!["NAME", "LOCATION", "ENABLED", "ID"],
            AlertRuleRecord::Full(_) => vec![
                "NAME",
                "LOCATION",
                "ENABLED",
                "CONDITION",
                "ACTIONS",
                "LAST UPDATED",
                "DESCRIPTION",
            ],
        }
    }

    fn cells(&self) -> Vec<String> {
        match self {
            AlertRuleRecord::Summary(s) => vec![
                s.name.clone(),
                s.location.clone(),
                s.enabled.to_string(),
                s.id.clone(),
            ],
            AlertRuleRecord::Full(d) => {
                let c = &d.condition;
                let mut condition = short_type(&c.odata_type).to_string();
                if let (Some(op), Some(threshold)) = (&c.operator, c.threshold) {
                    condition = format!("{} {} {}", condition, op, threshold);
                }
                if let Some(metric) = c
                    .data_source
                    .as_ref()
                    .and_then(|ds| ds.metric_name.as_ref())
                {
                    condition = format!("{} ({})", condition, metric);
                }

                let actions = d
                    .actions
                    .iter()
                    .map(|a| short_type(&a.odata_type))
                    .collect::<Vec<_>>()
                    .join(", ");

                vec![
                    d.name.clone(),
                    d.location.clone(),
                    d.enabled.to_string(),
                    condition,
                    actions,
                    d.last_updated_time
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_default(),
                    d.description.clone().unwrap_or_default(),
                ]
            }
        }
    }
}

/// Last dotted segment of an `odata.type` value
fn short_type(odata_type: &str) -> &str {
    odata_type.rsplit('.').next().unwrap_or(odata_type)
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{fixtures::rule, project};

    fn render(records: Vec<AlertRuleRecord>, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        let mut renderer: Renderer<_, AlertRuleRecord> = Renderer::new(&mut buf, format);
        for r in records {
            renderer.emit(r).unwrap();
        }
        renderer.finish().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_json_preserves_order() {
        let out = render(
            vec![project(rule("b"), false), project(rule("a"), false)],
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let names: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_json_is_empty_array() {
        let out = render(Vec::new(), OutputFormat::Json);
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn test_empty_table_writes_nothing_to_stdout() {
        let out = render(Vec::new(), OutputFormat::Table);
        assert!(out.is_empty());
    }

    #[test]
    fn test_summary_table() {
        let out = render(vec![project(rule("cpu-high"), false)], OutputFormat::Table);
        assert!(out.contains("NAME"));
        assert!(out.contains("cpu-high"));
        assert!(!out.contains("CONDITION"));
    }

    #[test]
    fn test_full_table_describes_condition() {
        let out = render(vec![project(rule("cpu-high"), true)], OutputFormat::Table);
        assert!(out.contains("CONDITION"));
        assert!(out.contains("GreaterThan"));
        assert!(out.contains("CpuTime"));
    }

    #[test]
    fn test_yaml_output() {
        let out = render(vec![project(rule("r1"), false)], OutputFormat::Yaml);
        assert!(out.contains("name: r1"));
    }

    #[test]
    fn test_short_type() {
        assert_eq!(
            short_type("Microsoft.Azure.Management.Insights.Models.RuleEmailAction"),
            "RuleEmailAction"
        );
        assert_eq!(short_type("Plain"), "Plain");
    }
}
