//! Human-readable text output formatter

use crate::cluster::ClusterReport;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::route::RoutePlan;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_report(&self, report: &ClusterReport, _config: &Config) -> Result<String> {
        let mut output = String::new();
        let stats = &report.stats;

        output.push_str(&format!("Pickup clusters ({})\n", report.id));
        output.push_str(&format!("Generated: {}\n", report.generated_at.to_rfc3339()));
        output.push_str(&format!(
            "Clusters: {}  Customers: {}  Revenue: ${}\n",
            stats.total_clusters, stats.total_customers, stats.total_revenue
        ));
        output.push_str(&format!(
            "Available: {}  Completed: {}\n",
            stats.available_clusters, stats.completed_today
        ));

        for cluster in &report.clusters {
            output.push_str(&format!(
                "\n{} [{}] - {} customers, ${}, {}\n",
                cluster.name,
                cluster.id,
                cluster.total_customers,
                cluster.estimated_revenue,
                cluster.status
            ));
            output.push_str(&format!(
                "  Centroid: ({:.6}, {:.6})\n",
                cluster.centroid.lat, cluster.centroid.lng
            ));
            if let Some(last) = cluster.last_pickup_date {
                output.push_str(&format!("  Last pickup: {}\n", last.to_rfc3339()));
            }
            for address in &cluster.addresses {
                output.push_str(&format!(
                    "  - {} ({}, {} bags)\n",
                    address.address, address.username, address.bag_count
                ));
            }
        }

        Ok(output)
    }

    fn format_route(&self, plan: &RoutePlan, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("Route for {} [{}]\n", plan.cluster_name, plan.cluster_id));
        output.push_str(&format!(
            "Stops: {}  Distance: {:.2} mi\n\n",
            plan.stops.len(),
            plan.total_distance_miles
        ));

        for stop in &plan.stops {
            output.push_str(&format!(
                "{:>3}. {} ({}) +{:.2} mi\n",
                stop.order, stop.address.address, stop.address.username, stop.leg_miles
            ));
        }

        if let Some(url) = &plan.directions_url {
            output.push_str(&format!("\nDirections: {}\n", url));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn test_text_report() {
        let output = TextFormatter
            .format_report(&fixtures::report(), &Config::default())
            .unwrap();

        assert!(output.contains("Pickup clusters"));
        assert!(output.contains("Customers: 4"));
        assert!(output.contains("Revenue: $20"));
        assert!(output.contains("1234 Market Street"));
    }

    #[test]
    fn test_text_route() {
        let plan = fixtures::route();
        let output = TextFormatter.format_route(&plan, &Config::default()).unwrap();

        assert!(output.contains("Route for"));
        assert!(output.contains("  1. "));
        assert!(output.contains("Directions: https://www.google.com/maps/dir/"));
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
