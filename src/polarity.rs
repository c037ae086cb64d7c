//! Polarity and subjectivity scoring over normalized review text.
//!
//! The built-in [`PatternScorer`] assesses adjectives and a few verbs from a
//! small lexicon, lets intensifiers scale the word that follows them, halves
//! and flips negated words, then averages the assessments.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Negated assessments are multiplied by this factor.
const NEGATION_FACTOR: f64 = -0.5;
/// A pending negation survives only unknown words up to this many chars.
const NEGATION_REACH: usize = 1;
/// A pending intensifier survives only unknown words up to this many chars.
const MODIFIER_REACH: usize = 2;

/// Output of a polarity scorer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScore {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (factual) to 1.0 (opinionated)
    pub subjectivity: f64,
}

/// Anything that can score polarity and subjectivity of normalized text.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> PolarityScore;
}

/// Lexicon entry: polarity, subjectivity and intensity of one word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    /// Multiplier applied to the following word; 1.0 for plain words
    pub intensity: f64,
}

impl PatternEntry {
    pub const fn word(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
            intensity: 1.0,
        }
    }

    pub const fn modifier(polarity: f64, subjectivity: f64, intensity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
            intensity,
        }
    }

    fn is_modifier(&self) -> bool {
        self.intensity != 1.0
    }
}

const DEFAULT_ENTRIES: &[(&str, PatternEntry)] = &[
    // Positive
    ("good", PatternEntry::word(0.7, 0.6)),
    ("great", PatternEntry::word(0.8, 0.75)),
    ("excellent", PatternEntry::word(1.0, 1.0)),
    ("amazing", PatternEntry::word(0.6, 0.9)),
    ("awesome", PatternEntry::word(1.0, 1.0)),
    ("fantastic", PatternEntry::word(0.4, 0.9)),
    ("wonderful", PatternEntry::word(1.0, 1.0)),
    ("perfect", PatternEntry::word(1.0, 1.0)),
    ("best", PatternEntry::word(1.0, 0.3)),
    ("better", PatternEntry::word(0.5, 0.5)),
    ("nice", PatternEntry::word(0.6, 1.0)),
    ("love", PatternEntry::word(0.5, 0.6)),
    ("loved", PatternEntry::word(0.7, 0.8)),
    ("lovely", PatternEntry::word(0.5, 0.75)),
    ("happy", PatternEntry::word(0.8, 1.0)),
    ("glad", PatternEntry::word(0.5, 1.0)),
    ("pleased", PatternEntry::word(0.5, 1.0)),
    ("satisfied", PatternEntry::word(0.5, 1.0)),
    ("beautiful", PatternEntry::word(0.85, 1.0)),
    ("impressive", PatternEntry::word(1.0, 1.0)),
    ("superb", PatternEntry::word(1.0, 1.0)),
    ("brilliant", PatternEntry::word(0.9, 1.0)),
    ("outstanding", PatternEntry::word(0.5, 0.5)),
    ("fine", PatternEntry::word(0.417, 0.5)),
    ("ok", PatternEntry::word(0.5, 0.5)),
    ("okay", PatternEntry::word(0.5, 0.5)),
    ("decent", PatternEntry::word(0.167, 0.667)),
    ("easy", PatternEntry::word(0.433, 0.833)),
    ("comfortable", PatternEntry::word(0.4, 0.7)),
    ("useful", PatternEntry::word(0.3, 0.0)),
    ("helpful", PatternEntry::word(0.5, 0.5)),
    ("reliable", PatternEntry::word(0.5, 0.5)),
    ("sturdy", PatternEntry::word(0.4, 0.6)),
    ("cheap", PatternEntry::word(0.4, 0.7)),
    ("fast", PatternEntry::word(0.2, 0.6)),
    ("quick", PatternEntry::word(0.333, 0.5)),
    ("fun", PatternEntry::word(0.3, 0.2)),
    ("cool", PatternEntry::word(0.35, 0.65)),
    ("favorite", PatternEntry::word(0.5, 1.0)),
    ("recommend", PatternEntry::word(0.4, 0.5)),
    ("worth", PatternEntry::word(0.3, 0.1)),
    // Negative
    ("bad", PatternEntry::word(-0.7, 0.667)),
    ("terrible", PatternEntry::word(-1.0, 1.0)),
    ("awful", PatternEntry::word(-1.0, 1.0)),
    ("horrible", PatternEntry::word(-1.0, 1.0)),
    ("worst", PatternEntry::word(-1.0, 1.0)),
    ("worse", PatternEntry::word(-0.4, 0.6)),
    ("poor", PatternEntry::word(-0.4, 0.6)),
    ("disappointing", PatternEntry::word(-0.6, 0.7)),
    ("disappointed", PatternEntry::word(-0.75, 0.75)),
    ("broken", PatternEntry::word(-0.4, 0.4)),
    ("useless", PatternEntry::word(-0.5, 0.2)),
    ("slow", PatternEntry::word(-0.3, 0.4)),
    ("expensive", PatternEntry::word(-0.5, 0.7)),
    ("overpriced", PatternEntry::word(-0.5, 0.8)),
    ("difficult", PatternEntry::word(-0.5, 1.0)),
    ("hate", PatternEntry::word(-0.8, 0.9)),
    ("boring", PatternEntry::word(-1.0, 1.0)),
    ("ugly", PatternEntry::word(-0.7, 1.0)),
    ("sad", PatternEntry::word(-0.5, 1.0)),
    ("unhappy", PatternEntry::word(-0.6, 0.9)),
    ("angry", PatternEntry::word(-0.5, 1.0)),
    ("annoying", PatternEntry::word(-0.8, 0.9)),
    ("stupid", PatternEntry::word(-0.8, 1.0)),
    ("wrong", PatternEntry::word(-0.5, 0.9)),
    ("fake", PatternEntry::word(-0.5, 1.0)),
    ("dirty", PatternEntry::word(-0.6, 0.8)),
    ("rude", PatternEntry::word(-0.3, 0.6)),
    ("late", PatternEntry::word(-0.3, 0.6)),
    ("damaged", PatternEntry::word(-0.4, 0.5)),
    ("defective", PatternEntry::word(-0.6, 0.6)),
    ("mediocre", PatternEntry::word(-0.5, 0.7)),
    ("flimsy", PatternEntry::word(-0.4, 0.7)),
    ("unreliable", PatternEntry::word(-0.5, 0.6)),
    // Modifiers
    ("very", PatternEntry::modifier(0.2, 0.3, 1.3)),
    ("really", PatternEntry::modifier(0.2, 0.2, 1.2)),
    ("extremely", PatternEntry::modifier(0.0, 0.6, 1.5)),
    ("incredibly", PatternEntry::modifier(0.9, 0.9, 1.5)),
    ("absolutely", PatternEntry::modifier(0.2, 0.9, 1.4)),
    ("totally", PatternEntry::modifier(0.0, 0.75, 1.3)),
    ("highly", PatternEntry::modifier(0.16, 0.54, 1.3)),
    ("quite", PatternEntry::modifier(0.0, 0.0, 1.1)),
    ("somewhat", PatternEntry::modifier(0.0, 0.0, 0.7)),
    ("slightly", PatternEntry::modifier(-0.167, 0.167, 0.5)),
];

// Apostrophes are gone after normalization, so contractions appear fused.
static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "not", "no", "never", "nor", "dont", "doesnt", "didnt", "isnt", "wasnt",
        "arent", "werent", "cant", "cannot", "couldnt", "wont", "wouldnt",
        "shouldnt", "aint", "havent", "hasnt", "hadnt",
    ]
    .into_iter()
    .collect()
});

/// Lexicon-driven polarity scorer.
#[derive(Debug, Clone)]
pub struct PatternScorer {
    words: HashMap<String, PatternEntry>,
}

impl Default for PatternScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternScorer {
    /// Scorer with the built-in lexicon.
    pub fn new() -> Self {
        Self::with_entries(
            DEFAULT_ENTRIES
                .iter()
                .map(|(word, entry)| (word.to_string(), *entry)),
        )
    }

    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, PatternEntry)>,
    {
        Self {
            words: entries
                .into_iter()
                .map(|(word, entry)| (word.to_lowercase(), entry))
                .collect(),
        }
    }

    pub fn add_word(&mut self, word: &str, entry: PatternEntry) {
        self.words.insert(word.to_lowercase(), entry);
    }

    pub fn entry(&self, word: &str) -> Option<&PatternEntry> {
        self.words.get(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(word)
    }
}

impl PolarityScorer for PatternScorer {
    fn score(&self, text: &str) -> PolarityScore {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        let mut assessments: Vec<(f64, f64)> = Vec::new();

        let mut negated = false;
        let mut multiplier = 1.0;

        for (i, token) in tokens.iter().enumerate() {
            if Self::is_negation(token) {
                negated = true;
                continue;
            }

            let Some(entry) = self.entry(token) else {
                let len = token.chars().count();
                if len > NEGATION_REACH {
                    negated = false;
                }
                if len > MODIFIER_REACH {
                    multiplier = 1.0;
                }
                continue;
            };

            // Intensifiers modify the next lexicon word, looking past short filler
            let next_is_assessed = tokens[i + 1..]
                .iter()
                .find(|next| {
                    self.words.contains_key(next.as_str()) || next.chars().count() > MODIFIER_REACH
                })
                .map_or(false, |next| self.words.contains_key(next.as_str()));
            if entry.is_modifier() && next_is_assessed {
                multiplier *= entry.intensity;
                continue;
            }

            let mut polarity = entry.polarity * multiplier;
            let subjectivity = (entry.subjectivity * multiplier).clamp(0.0, 1.0);
            if negated {
                polarity *= NEGATION_FACTOR;
            }
            assessments.push((polarity.clamp(-1.0, 1.0), subjectivity));

            negated = false;
            multiplier = 1.0;
        }

        if assessments.is_empty() {
            return PolarityScore::default();
        }

        let n = assessments.len() as f64;
        PolarityScore {
            polarity: assessments.iter().map(|(p, _)| p).sum::<f64>() / n,
            subjectivity: assessments.iter().map(|(_, s)| s).sum::<f64>() / n,
        }
    }
}
