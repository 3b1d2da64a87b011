use crate::types::config::Thresholds;

/// Lines per unit of "forgetting" in the cognitive load formula.
const LINES_PER_LOAD_UNIT: f64 = 20.0;

/// Agent Cognitive Load: `complexity + loc / 20`.
pub fn calculate_acl(complexity: f64, loc: usize) -> f64 {
    complexity + loc as f64 / LINES_PER_LOAD_UNIT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AclTier {
    Green,
    Yellow,
    Red,
}

impl AclTier {
    /// Boundary values land in the lower tier.
    pub fn classify(acl: f64, thresholds: &Thresholds) -> Self {
        if acl > thresholds.acl_red {
            AclTier::Red
        } else if acl > thresholds.acl_yellow {
            AclTier::Yellow
        } else {
            AclTier::Green
        }
    }
}

fn is_code_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Non-blank, non-comment lines in the whole source.
pub fn count_loc(source: &str) -> usize {
    source.lines().filter(|line| is_code_line(line)).count()
}

/// Non-blank, non-comment lines in `start_line..=end_line` (1-based).
pub fn count_loc_in_span(source: &str, start_line: usize, end_line: usize) -> usize {
    if end_line < start_line || start_line == 0 {
        return 0;
    }
    source
        .lines()
        .skip(start_line - 1)
        .take(end_line - start_line + 1)
        .filter(|line| is_code_line(line))
        .count()
}
