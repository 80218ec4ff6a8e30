//! Terminal report: engine statistics followed by clustering metrics.

use colored::Colorize;

use crate::engine::EngineStats;
use crate::metrics::MetricsReport;

pub fn print_report(stats: &EngineStats, metrics: &MetricsReport) {
    println!("{}", render_statistics(stats));
    println!("{}", render_metrics(metrics));
}

pub fn render_statistics(stats: &EngineStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("📊 {} Summary\n", "ENGINE".bold()));
    out.push_str(&format!("{}\n", "─────────────────────────────".cyan()));
    out.push_str(&format!("  Summaries processed: {}\n", stats.total_summaries));
    out.push_str(&format!("  Commits resolved:    {}\n", stats.total_commits));
    out.push_str(&format!("  Definitions:         {}\n", stats.total_definitions));
    out.push_str(&format!("  Files:               {}\n", stats.total_files));
    out.push_str(&format!("  Connections:         {}\n", stats.total_connections));
    out.push_str(&format!("  Clusters:            {}\n", stats.total_clusters));
    out.push_str(&format!(
        "  Average occurrence:  {:.4}\n",
        stats.average_occurrence
    ));
    out.push_str(&format!(
        "  Average chronic point: {:.4}\n",
        stats.average_chronic_point
    ));
    out.push_str(&format!(
        "  Connections per definition: {:.2}\n",
        stats.average_connections_per_definition
    ));
    out
}

pub fn render_metrics(metrics: &MetricsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("📈 {} Quality\n", "CLUSTERING".bold()));
    out.push_str(&format!("{}\n", "─────────────────────────────".cyan()));
    out.push_str(&format!("  Entropy gain:       {:.4}\n", metrics.entropy_gain));
    out.push_str(&format!("  Variance gain:      {:.4}\n", metrics.variance_gain));
    out.push_str(&format!(
        "  Silhouette score:   {:.4} ({})\n",
        metrics.silhouette,
        silhouette_status(metrics.silhouette)
    ));
    out.push_str(&format!(
        "  Average cluster size: {:.2}\n",
        metrics.average_cluster_size
    ));
    out
}

fn silhouette_status(score: f64) -> &'static str {
    match score {
        s if s > 0.6 => "excellent",
        s if s > 0.4 => "good",
        s if s > 0.2 => "fair",
        _ => "poor",
    }
}
