//! JSON report adapter.
//!
//! Serializes the full simulation payload (prices, signals, trades, equity
//! curve, metrics) for a charting or display layer. Every numeric value is
//! finite by construction; degenerate statistics are already reported as 0.

use crate::domain::error::SmacrossError;
use crate::domain::simulation::SimulationReport;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

pub struct JsonReportAdapter {
    pretty: bool,
}

impl JsonReportAdapter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn render(&self, report: &SimulationReport) -> Result<String, SmacrossError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| SmacrossError::Data {
            reason: format!("failed to serialize report: {e}"),
        })
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &SimulationReport, output_path: &Path) -> Result<(), SmacrossError> {
        let rendered = self.render(report)?;
        fs::write(output_path, rendered)?;
        Ok(())
    }
}
