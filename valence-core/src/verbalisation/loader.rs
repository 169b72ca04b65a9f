//! Template file parsing.
//!
//! Files are line oriented: `goal|utterance`, or
//! `goal|utterance|counterfactual|explanation` with boolean flags.
//! Lines without a `|` are ignored.

use std::path::Path;

use tracing::{debug, info};

use super::store::{Template, TemplateStore};
use crate::types::{DialogueError, Result};

/// Parse template file contents into a store.
pub fn parse_templates(contents: &str) -> TemplateStore {
    let mut skipped = 0usize;
    let entries: Vec<(String, Template)> = contents
        .lines()
        .filter_map(|line| {
            let entry = parse_line(line);
            if entry.is_none() && !line.trim().is_empty() {
                skipped += 1;
            }
            entry
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, "Skipped template lines without a separator");
    }
    TemplateStore::from_entries(entries)
}

/// Read and parse a template file.
pub fn load_templates(path: impl AsRef<Path>) -> Result<TemplateStore> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| DialogueError::TemplateLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let store = parse_templates(&contents);
    info!(
        path = %path.display(),
        patterns = store.pattern_count(),
        templates = store.template_count(),
        "Loaded templates"
    );
    Ok(store)
}

fn parse_line(line: &str) -> Option<(String, Template)> {
    if !line.contains('|') {
        return None;
    }
    let mut fields = line.split('|').map(str::trim);
    let goal = fields.next()?;
    let text = fields.next()?;
    if goal.is_empty() || text.is_empty() {
        return None;
    }
    let counterfactual = fields.next().map(parse_flag).unwrap_or(false);
    let explanation = fields.next().map(parse_flag).unwrap_or(false);

    Some((
        goal.to_string(),
        Template {
            text: text.to_string(),
            counterfactual,
            explanation,
        },
    ))
}

fn parse_flag(field: &str) -> bool {
    matches!(
        field.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}
