//! Rendering of a [`PointsBreakdown`] for stdout.

use points_core::PointsBreakdown;
use serde::Serialize;

use crate::config::OutputFormat;

/// JSON response body, matching what an HTTP front-end would return.
#[derive(Debug, Serialize)]
struct ScoreResponse<'a> {
    points: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a [String]>,
}

/// Renders a breakdown in the requested format.
pub fn render(
    breakdown: &PointsBreakdown,
    format: OutputFormat,
    total_only: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text if total_only => Ok(breakdown.total_points.to_string()),
        OutputFormat::Text => Ok(breakdown.breakdown_lines.join("\n")),
        OutputFormat::Json => {
            let response = ScoreResponse {
                points: breakdown.total_points,
                breakdown: (!total_only).then_some(breakdown.breakdown_lines.as_slice()),
            };
            serde_json::to_string_pretty(&response)
        }
    }
}
