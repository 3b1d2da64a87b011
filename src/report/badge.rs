use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const BADGE_FILE: &str = "agent_score.svg";

pub fn badge_color(score: f64) -> &'static str {
    if score >= 90.0 {
        "#4c1"
    } else if score >= 70.0 {
        "#97ca00"
    } else if score >= 50.0 {
        "#dfb317"
    } else {
        "#e05d44"
    }
}

pub fn generate_badge(score: f64) -> String {
    let color = badge_color(score);
    let label = format!("{score:.1}");
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="20">
    <linearGradient id="b" x2="0" y2="100%">
        <stop offset="0" stop-color="#bbb" stop-opacity=".1"/>
        <stop offset="1" stop-opacity=".1"/>
    </linearGradient>
    <mask id="a">
        <rect width="120" height="20" rx="3" fill="#fff"/>
    </mask>
    <g mask="url(#a)">
        <path fill="#555" d="M0 0h80v20H0z"/>
        <path fill="{color}" d="M80 0h40v20H80z"/>
        <path fill="url(#b)" d="M0 0h120v20H0z"/>
    </g>
    <g fill="#fff" text-anchor="middle" font-family="DejaVu Sans,Verdana,Geneva,sans-serif" font-size="11">
        <text x="40" y="15" fill="#010101" fill-opacity=".3">Agent Score</text>
        <text x="40" y="14">Agent Score</text>
        <text x="100" y="15" fill="#010101" fill-opacity=".3">{label}</text>
        <text x="100" y="14">{label}</text>
    </g>
</svg>"##
    )
}

/// Writes the badge into `dir`, returning its path.
pub fn write_badge(dir: &Path, score: f64) -> Result<PathBuf> {
    let path = dir.join(BADGE_FILE);
    fs::write(&path, generate_badge(score))?;
    Ok(path)
}
