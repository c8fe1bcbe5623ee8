//! Weighted risk patterns.
//!
//! A file's score is the sum over patterns of `weight * occurrences`. The
//! score is used for ranking only.

use regex::Regex;

use crate::error::{Error, Result};

/// Built-in pattern table: dynamic evaluation, shell execution, raw file
/// access, and self-modification hints.
pub const DEFAULT_RISK_PATTERNS: &[(&str, u64)] = &[
    (r"\beval\(", 10),
    (r"\bexec\(", 10),
    // Bare calls only; `os.open(` and `f.open(` are attribute calls
    (r"(?m)(?:^|[^.\w])open\(", 5),
    (r"\bsubprocess\.(run|Popen)", 10),
    (r"\bos\.system", 10),
    (r"\b__import__\(", 8),
    (r"@codex", 7),
    (r"#\s*(evolve|mutate|hallucinate)", 4),
    (r"openai\.api_key", 5),
];

#[derive(Debug, Clone)]
struct RiskPattern {
    regex: Regex,
    weight: u64,
}

/// A compiled pattern table.
#[derive(Debug, Clone, Default)]
pub struct RiskPatterns {
    patterns: Vec<RiskPattern>,
}

impl RiskPatterns {
    /// Compile a `(regex, weight)` table.
    pub fn new<I, S>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let patterns = table
            .into_iter()
            .map(|(pattern, weight)| {
                let pattern = pattern.as_ref();
                Regex::new(pattern)
                    .map(|regex| RiskPattern { regex, weight })
                    .map_err(|source| Error::InvalidRiskPattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The built-in table.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_RISK_PATTERNS.iter().copied()).expect("Invalid default risk pattern")
    }

    /// Weighted match count, saturating at `u64::MAX`.
    pub fn score(&self, text: &str) -> u64 {
        self.patterns.iter().fold(0u64, |total, p| {
            let count = p.regex.find_iter(text).count() as u64;
            total.saturating_add(p.weight.saturating_mul(count))
        })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
