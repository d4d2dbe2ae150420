//! JSON output formatter

use crate::cluster::ClusterReport;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::route::RoutePlan;

/// JSON formatter - outputs the full structure as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON response"
    }

    fn format_report(&self, report: &ClusterReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_route(&self, plan: &RoutePlan, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(plan)?)
    }
}
