use serde::Serialize;

pub type Score = u32;

/// Per-function metrics produced fresh on every scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionMetric {
    pub name: String,
    pub start_line: usize,
    pub loc: usize,
    pub complexity: f64,
    pub acl: f64,
    pub is_typed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileAnalysisResult {
    pub file: String,
    pub loc: usize,
    pub function_metrics: Vec<FunctionMetric>,
    pub score: Score,
    pub issues: String,
    pub avg_complexity: f64,
    pub type_coverage: f64,
    pub tokens: usize,
    /// Highest function ACL in the file, 0 when it has no functions.
    pub acl: f64,
}
