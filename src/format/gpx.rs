//! GPX output formatter

use crate::cluster::ClusterReport;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::route::RoutePlan;

/// GPX formatter - cluster centroids as waypoints, routes as `<rte>`
pub struct GpxFormatter;

fn header(out: &mut String, name: &str, time: Option<String>) {
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(r#"<gpx version="1.1" creator="pickup-clusters">"#);
    out.push('\n');
    out.push_str("  <metadata>\n");
    out.push_str(&format!("    <name>{}</name>\n", escape(name)));
    if let Some(time) = time {
        out.push_str(&format!("    <time>{}</time>\n", time));
    }
    out.push_str("  </metadata>\n");
}

/// Escape XML special characters
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoints / route"
    }

    fn format_report(&self, report: &ClusterReport, _config: &Config) -> Result<String> {
        let mut gpx = String::new();
        header(
            &mut gpx,
            &format!("Pickup clusters {}", report.id),
            Some(report.generated_at.to_rfc3339()),
        );

        for cluster in &report.clusters {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                cluster.centroid.lat, cluster.centroid.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&cluster.name)));
            gpx.push_str(&format!(
                "    <desc>{} customers, ${}, {}</desc>\n",
                cluster.total_customers, cluster.estimated_revenue, cluster.status
            ));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }

    fn format_route(&self, plan: &RoutePlan, _config: &Config) -> Result<String> {
        let mut gpx = String::new();
        header(&mut gpx, &format!("Route {}", plan.cluster_name), None);

        gpx.push_str("  <rte>\n");
        gpx.push_str(&format!("    <name>{}</name>\n", escape(&plan.cluster_name)));
        for stop in &plan.stops {
            gpx.push_str(&format!(
                r#"    <rtept lat="{}" lon="{}">"#,
                stop.address.coordinates.lat, stop.address.coordinates.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!(
                "      <name>{}. {}</name>\n",
                stop.order,
                escape(&stop.address.address)
            ));
            gpx.push_str("    </rtept>\n");
        }
        gpx.push_str("  </rte>\n");

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
