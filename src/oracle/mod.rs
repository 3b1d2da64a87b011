//! Source-level oracles consumed by the scoring engine.
//!
//! The engine never looks at syntax trees directly. It asks a
//! [`ComplexityOracle`] for per-function seeds, import references and
//! signatures, and a [`Tokenizer`] for token counts. Both fail soft: a
//! source unit that cannot be parsed yields no data instead of an error.

pub mod python;
pub mod tokenizer;

pub use python::PythonOracle;
#[cfg(test)]
pub use tokenizer::ApproxTokenizer;
pub use tokenizer::BpeTokenizer;

/// Raw per-function data as reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSeed {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub complexity: u32,
    pub has_return_annotation: bool,
    pub has_param_annotation: bool,
}

/// One import statement target. `level` is 0 for absolute imports and the
/// number of leading dots for relative ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportRef {
    pub module: String,
    pub level: usize,
}

impl ImportRef {
    pub fn absolute(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            level: 0,
        }
    }

    pub fn relative(module: impl Into<String>, level: usize) -> Self {
        Self {
            module: module.into(),
            level,
        }
    }
}

pub trait ComplexityOracle: Sync {
    /// Source file extension this oracle understands, without the dot.
    fn extension(&self) -> &'static str;

    /// Entry-module file stem for packages (`__init__` for Python).
    fn entry_module(&self) -> &'static str;

    fn analyze(&self, source: &str) -> Vec<FunctionSeed>;

    fn imports(&self, source: &str) -> Vec<ImportRef>;

    /// Function and class headers with bodies elided.
    fn signatures(&self, source: &str) -> Vec<String>;
}

pub trait Tokenizer: Sync {
    /// Returns `None` when the tokenizer is unavailable.
    fn count(&self, text: &str) -> Option<usize>;
}
