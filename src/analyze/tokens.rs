use crate::oracle::{ComplexityOracle, Tokenizer};
use crate::scan::filesystem::read_to_string_if_exists;
use crate::scan::ProjectLayout;
use crate::types::config::TOKEN_ALERT_THRESHOLD;
use crate::types::report::TokenAnalysis;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Documents an agent reads before touching code.
const CRITICAL_DOCS: [&str; 2] = ["README.md", "AGENTS.md"];

fn doc_search_dirs(layout: &ProjectLayout) -> Vec<PathBuf> {
    let mut dirs = vec![layout.root.clone()];
    if layout.single_file {
        if let Some(parent) = layout
            .root
            .canonicalize()
            .ok()
            .and_then(|root| root.parent().map(|parent| parent.to_path_buf()))
        {
            dirs.push(parent);
        }
    }
    dirs
}

/// Builds the "skeleton" text: critical docs followed by every
/// function and class signature in file order.
pub fn skeleton_text(layout: &ProjectLayout, oracle: &dyn ComplexityOracle) -> String {
    let mut content = String::new();
    let mut seen: Vec<PathBuf> = Vec::new();
    for dir in doc_search_dirs(layout) {
        for name in CRITICAL_DOCS {
            let path = dir.join(name);
            let key = path.canonicalize().unwrap_or_else(|_| path.clone());
            if seen.contains(&key) {
                continue;
            }
            if let Some(doc) = read_to_string_if_exists(&path) {
                content.push_str(&doc);
                content.push('\n');
                seen.push(key);
            }
        }
    }

    let signatures: Vec<String> = layout
        .files
        .par_iter()
        .map(|file| {
            read_to_string_if_exists(file)
                .map(|source| oracle.signatures(&source).join("\n"))
                .unwrap_or_default()
        })
        .collect();
    for block in signatures {
        content.push_str(&block);
        content.push('\n');
    }
    content
}

pub fn context_token_budget(
    layout: &ProjectLayout,
    oracle: &dyn ComplexityOracle,
    tokenizer: &dyn Tokenizer,
) -> TokenAnalysis {
    let text = skeleton_text(layout, oracle);
    match tokenizer.count(&text) {
        Some(token_count) => {
            debug!(token_count, "skeleton token budget");
            TokenAnalysis {
                token_count,
                alert: token_count > TOKEN_ALERT_THRESHOLD,
                available: true,
            }
        }
        None => {
            warn!("tokenizer unavailable; token budget not measured");
            TokenAnalysis::default()
        }
    }
}
