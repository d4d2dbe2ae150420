//! URL output formatter

use crate::cluster::ClusterReport;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::route::RoutePlan;

/// URL formatter - map links for cluster centroids, directions for routes
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format centroid links with optional provider override
    pub fn format_report_with_provider(
        &self,
        report: &ClusterReport,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let mut lines = Vec::with_capacity(report.clusters.len());
        for cluster in &report.clusters {
            let url = config.format_url(provider, cluster.centroid.lat, cluster.centroid.lng)?;
            lines.push(format!("{}\t{}", cluster.id, url));
        }
        Ok(lines.join("\n"))
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map links (centroids or directions)"
    }

    fn format_report(&self, report: &ClusterReport, config: &Config) -> Result<String> {
        self.format_report_with_provider(report, config, None)
    }

    fn format_route(&self, plan: &RoutePlan, _config: &Config) -> Result<String> {
        plan.directions_url
            .clone()
            .ok_or_else(|| Error::Format(format!("Route {} has no stops", plan.cluster_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn test_url_report_default_provider() {
        let report = fixtures::report();
        let output = UrlFormatter.format_report(&report, &Config::default()).unwrap();

        assert_eq!(output.lines().count(), report.clusters.len());
        assert!(output.contains("google.com/maps"));
    }

    #[test]
    fn test_url_report_with_provider() {
        let output = UrlFormatter
            .format_report_with_provider(&fixtures::report(), &Config::default(), Some("openstreetmap"))
            .unwrap();
        assert!(output.contains("openstreetmap.org"));
    }

    #[test]
    fn test_url_route() {
        let plan = fixtures::route();
        let output = UrlFormatter.format_route(&plan, &Config::default()).unwrap();
        assert!(output.starts_with("https://www.google.com/maps/dir/"));
    }

    #[test]
    fn test_url_route_without_stops() {
        let mut plan = fixtures::route();
        plan.stops.clear();
        plan.directions_url = None;
        assert!(UrlFormatter.format_route(&plan, &Config::default()).is_err());
    }
}
