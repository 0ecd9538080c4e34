//! Document export
//!
//! Renders an itinerary view into a paginated plain-text document. The
//! export works from the same view the screen shows, so the caller
//! force-expands every section before calling in and restores the previous
//! states afterwards, on every path; this module only lays out and writes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::{debug, info};

use crate::render::{ItineraryView, MEAL_LABELS};

/// Width of a document line
const PAGE_WIDTH: usize = 72;

/// Errors from writing the export document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

/// Derive the document file name from the destination
///
/// Whitespace and commas collapse to underscores.
pub fn export_file_name(destination_name: &str) -> String {
    let sanitized: String = destination_name
        .chars()
        .map(|c| if c.is_whitespace() || c == ',' { '_' } else { c })
        .collect();
    format!("Voyage-{}-Itinerary.txt", sanitized)
}

/// Write the paginated document and return its path
pub fn export_document(
    view: &ItineraryView,
    output_dir: &Path,
    page_lines: usize,
) -> Result<PathBuf, ExportError> {
    debug!(sections = view.sections.len(), "export_document: called");
    let path = output_dir.join(export_file_name(&view.destination_name));

    let lines = document_lines(view);
    let content = paginate(&lines, page_lines.max(1));
    fs::write(&path, content)?;

    info!(path = %path.display(), "export_document: wrote document");
    Ok(path)
}

/// Lay the view out as document lines
///
/// The document prints every section in full; the on-screen expansion dance
/// happens in the caller.
fn document_lines(view: &ItineraryView) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(view.trip_title.clone());
    lines.push("=".repeat(view.trip_title.chars().count().clamp(4, PAGE_WIDTH)));
    lines.push(format!("Generated on {}", Local::now().format("%Y-%m-%d")));
    lines.push(String::new());
    lines.extend(wrap(&view.summary, PAGE_WIDTH));
    lines.push(String::new());

    for section in &view.sections {
        lines.push(section.header());
        lines.push("-".repeat(section.header().chars().count().min(PAGE_WIDTH)));

        lines.push("Activities:".to_string());
        for activity in &section.activities {
            for (i, wrapped) in wrap(activity, PAGE_WIDTH - 4).into_iter().enumerate() {
                if i == 0 {
                    lines.push(format!("  - {}", wrapped));
                } else {
                    lines.push(format!("    {}", wrapped));
                }
            }
        }

        lines.push("Dining:".to_string());
        for (label, meal) in MEAL_LABELS.iter().zip(section.meals.iter()) {
            lines.push(format!("  {}: {}", label, meal));
        }

        lines.push(format!("Accommodation: {}", section.accommodation));
        lines.push(String::new());
    }

    lines
}

/// Split lines into pages with a footer line per page
fn paginate(lines: &[String], page_lines: usize) -> String {
    let total_pages = lines.len().div_ceil(page_lines).max(1);
    let mut out = String::new();

    for (page_idx, chunk) in lines.chunks(page_lines).enumerate() {
        for line in chunk {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!(
            "{:>width$}\n",
            format!("- Page {} of {} -", page_idx + 1, total_pages),
            width = PAGE_WIDTH
        ));
        if page_idx + 1 < total_pages {
            out.push('\u{000C}');
            out.push('\n');
        }
    }

    out
}

/// Greedy word wrap
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
