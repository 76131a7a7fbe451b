//! Aggregation report written to stdout

use serde::Serialize;
use std::io::Write;
use trade_route_lib::{Arrow, ArrowStyle, CollectionInfo, RouteCollection};

/// Everything a renderer needs to draw the aggregated routes
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub info: CollectionInfo,
    pub style: ArrowStyle,
    pub arrows: Vec<Arrow>,
}

impl Report {
    pub fn new(collection: &RouteCollection, style: ArrowStyle) -> Self {
        Self {
            info: collection.get_info(),
            arrows: collection.arrows(&style),
            style,
        }
    }

    /// Human-readable summary, one line per arrow, heaviest first
    pub fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "Routes:       {}", self.info.route_count)?;
        writeln!(out, "Total weight: {}", self.info.total_weight)?;
        writeln!(out, "Max weight:   {}", self.info.max_weight)?;

        let mut arrows: Vec<&Arrow> = self.arrows.iter().collect();
        arrows.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        for arrow in arrows {
            writeln!(
                out,
                "{:>10} {:>6.2}px  {}",
                arrow.weight, arrow.stroke_width, arrow.identity
            )?;
        }
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        // Trailing newline for terminals
        writeln!(out).map_err(serde_json::Error::io)
    }
}
