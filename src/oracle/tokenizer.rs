use super::Tokenizer;
use tiktoken_rs::CoreBPE;
use tracing::warn;

/// BPE token counter over the `cl100k_base` encoding (GPT-4 family).
pub struct BpeTokenizer {
    bpe: Option<CoreBPE>,
}

impl BpeTokenizer {
    /// Loads `cl100k_base`. A load failure leaves the tokenizer unavailable
    /// rather than failing the run.
    pub fn cl100k() -> Self {
        match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Self { bpe: Some(bpe) },
            Err(err) => {
                warn!(error = %err, "cl100k_base tokenizer unavailable; token counts disabled");
                Self::unavailable()
            }
        }
    }

    pub fn unavailable() -> Self {
        Self { bpe: None }
    }
}

impl Tokenizer for BpeTokenizer {
    fn count(&self, text: &str) -> Option<usize> {
        self.bpe
            .as_ref()
            .map(|bpe| bpe.encode_with_special_tokens(text).len())
    }
}

/// Deterministic four-characters-per-token stand-in for unit tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTokenizer;

#[cfg(test)]
impl Tokenizer for ApproxTokenizer {
    fn count(&self, text: &str) -> Option<usize> {
        Some(text.chars().count() / 4)
    }
}
