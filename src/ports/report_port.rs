//! Report generation port trait.

use crate::domain::error::SmacrossError;
use crate::domain::simulation::SimulationReport;
use std::path::Path;

/// Port for handing simulation results to the presentation layer.
pub trait ReportPort {
    fn write(&self, report: &SimulationReport, output_path: &Path) -> Result<(), SmacrossError>;
}
