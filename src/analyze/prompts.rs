use crate::error::Result;
use regex::Regex;
use serde::Serialize;

pub const PROMPT_PASS_THRESHOLD: u32 = 80;

struct Heuristic {
    key: &'static str,
    label: &'static str,
    pattern: &'static str,
    improvement: &'static str,
}

const POSITIVE_WEIGHT: i32 = 25;
const NEGATIVE_PENALTY: i32 = 10;

static POSITIVE: [Heuristic; 4] = [
    Heuristic {
        key: "role_definition",
        label: "Role Definition",
        pattern: r"(?i)(you are|act as|your role)",
        improvement: "Add a clear persona (e.g., 'You are a Python Expert') to ground the model's latent space.",
    },
    Heuristic {
        key: "cognitive_scaffolding",
        label: "Cognitive Scaffolding",
        pattern: r"(?i)(step by step|reasoning|think)",
        improvement: "Add Chain-of-Thought instructions ('Think step by step') to improve complex reasoning.",
    },
    Heuristic {
        key: "delimiter_hygiene",
        label: "Delimiter Hygiene",
        pattern: r#"(<[^>]+>|'''|"""|```|\{\{.*?\}\})"#,
        improvement: "Use delimiters (like XML tags or triple quotes) to separate instructions from input data.",
    },
    Heuristic {
        key: "few_shot",
        label: "Few Shot",
        pattern: r"(?i)(example:|input:.*?output:)",
        improvement: "Include 1-3 examples (Few-Shot) to guide the model on format and style.",
    },
];

static NEGATIVE: Heuristic = Heuristic {
    key: "negative_constraints",
    label: "Negative Constraints",
    pattern: r"(?i)(don't|do not|never)",
    improvement: "Refactor negative constraints ('Don't do X') into positive instructions ('Do Y instead') for better adherence.",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeuristicResult {
    pub key: &'static str,
    pub label: &'static str,
    /// For negative constraints, `true` means none were found.
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptAnalysis {
    pub score: u32,
    pub results: Vec<HeuristicResult>,
    pub improvements: Vec<String>,
}

impl PromptAnalysis {
    pub fn passed(&self) -> bool {
        self.score >= PROMPT_PASS_THRESHOLD
    }
}

/// Scores prompt text against prompt-engineering heuristics.
pub struct PromptAnalyzer {
    positive: Vec<(&'static Heuristic, Regex)>,
    negative: Regex,
}

impl PromptAnalyzer {
    pub fn new() -> Result<Self> {
        let positive = POSITIVE
            .iter()
            .map(|heuristic| -> Result<(&'static Heuristic, Regex)> {
                Ok((heuristic, Regex::new(heuristic.pattern)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            positive,
            negative: Regex::new(NEGATIVE.pattern)?,
        })
    }

    pub fn analyze(&self, text: &str) -> PromptAnalysis {
        let mut score: i32 = 0;
        let mut results = Vec::new();
        let mut improvements = Vec::new();

        for (heuristic, pattern) in &self.positive {
            let passed = pattern.is_match(text);
            if passed {
                score += POSITIVE_WEIGHT;
            } else {
                improvements.push(heuristic.improvement.to_string());
            }
            results.push(HeuristicResult {
                key: heuristic.key,
                label: heuristic.label,
                passed,
            });
        }

        let flagged = self.negative.is_match(text);
        if flagged {
            score -= NEGATIVE_PENALTY;
            improvements.push(NEGATIVE.improvement.to_string());
        }
        results.push(HeuristicResult {
            key: NEGATIVE.key,
            label: NEGATIVE.label,
            passed: !flagged,
        });

        PromptAnalysis {
            score: score.clamp(0, 100) as u32,
            results,
            improvements,
        }
    }
}
