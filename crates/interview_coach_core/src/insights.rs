//! crates/interview_coach_core/src/insights.rs
//!
//! Derives keyword, strength and weakness signals from raw résumé text.
//!
//! This is a shallow substring heuristic meant for display next to the interview,
//! not a ranking model. All rules live in the tables below so new signals can be
//! added without touching the control flow.

use crate::domain::Insights;

/// Maximum number of keywords reported for a résumé.
pub const MAX_KEYWORDS: usize = 5;

/// Résumés shorter than this many characters are flagged as thin.
pub const DETAIL_THRESHOLD_CHARS: usize = 500;

/// Emitted when no strength rule matches.
pub const DEFAULT_STRENGTH: &str = "adequate technical foundation";

/// Skill vocabulary, in reporting order. Matching is case-sensitive substring
/// containment, so "SQL" also matches inside "PostgreSQL".
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "SQL",
    "AWS",
    "Leadership",
    "Project Management",
];

/// A concept that is satisfied when any of its indicator substrings is present.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorRule {
    pub indicators: &'static [&'static str],
    pub emits: &'static str,
}

impl IndicatorRule {
    fn matches(&self, text: &str) -> bool {
        self.indicators.iter().any(|indicator| text.contains(indicator))
    }
}

pub const STRENGTH_RULES: &[IndicatorRule] = &[
    IndicatorRule {
        indicators: &["lead", "Lead", "led", "Led"],
        emits: "Leadership experience",
    },
    IndicatorRule {
        indicators: &["project", "Project"],
        emits: "Project management",
    },
    IndicatorRule {
        indicators: &["team", "Team"],
        emits: "Team collaboration",
    },
];

/// Heuristics that flag a gap in the résumé.
#[derive(Debug, Clone, Copy)]
pub enum WeaknessRule {
    /// Fires when none of the indicators appear in the text.
    Missing(IndicatorRule),
    /// Fires when the text has fewer than `min_chars` characters.
    ShorterThan {
        min_chars: usize,
        emits: &'static str,
    },
}

impl WeaknessRule {
    fn evaluate(&self, text: &str) -> Option<&'static str> {
        match self {
            WeaknessRule::Missing(rule) => (!rule.matches(text)).then_some(rule.emits),
            WeaknessRule::ShorterThan { min_chars, emits } => {
                (text.chars().count() < *min_chars).then_some(*emits)
            }
        }
    }
}

pub const WEAKNESS_RULES: &[WeaknessRule] = &[
    WeaknessRule::Missing(IndicatorRule {
        indicators: &["certification", "Certification"],
        emits: "Consider adding certifications",
    }),
    WeaknessRule::ShorterThan {
        min_chars: DETAIL_THRESHOLD_CHARS,
        emits: "Resume could be more detailed",
    },
];

/// Extracts display insights from a résumé. Never fails; no match yields empty
/// collections (or the default strength).
pub fn extract(resume: &str) -> Insights {
    Insights {
        keywords: extract_keywords(resume),
        strengths: extract_strengths(resume),
        weaknesses: identify_weaknesses(resume),
    }
}

fn extract_keywords(text: &str) -> Vec<String> {
    KEYWORD_VOCABULARY
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .take(MAX_KEYWORDS)
        .map(|keyword| keyword.to_string())
        .collect()
}

fn extract_strengths(text: &str) -> Vec<String> {
    let strengths: Vec<String> = STRENGTH_RULES
        .iter()
        .filter(|rule| rule.matches(text))
        .map(|rule| rule.emits.to_string())
        .collect();

    if strengths.is_empty() {
        vec![DEFAULT_STRENGTH.to_string()]
    } else {
        strengths
    }
}

fn identify_weaknesses(text: &str) -> Vec<String> {
    WEAKNESS_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(text))
        .map(str::to_string)
        .collect()
}
