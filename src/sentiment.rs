//! Sentiment labels, result values and the two threshold rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compound scores at or beyond this magnitude leave the valence dead zone.
pub const COMPOUND_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Label for a polarity score. Only an exact zero is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Label for a compound valence score, with a neutral band of
    /// `(-0.05, 0.05)`. Both edges belong to the outer labels.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= COMPOUND_THRESHOLD {
            Sentiment::Positive
        } else if compound <= -COMPOUND_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Sentiment::Neutral
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("Unknown sentiment label: {}", other)),
        }
    }
}

/// Round to three decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Polarity-backed classification of one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// Polarity in [-1, 1], rounded to 3 decimals
    pub polarity: f64,
    /// Subjectivity in [0, 1], rounded to 3 decimals
    pub subjectivity: f64,
}

impl SentimentResult {
    /// Label from the unrounded polarity, then round both measures.
    pub fn from_scores(polarity: f64, subjectivity: f64) -> Self {
        Self {
            sentiment: Sentiment::from_polarity(polarity),
            polarity: round3(polarity),
            subjectivity: round3(subjectivity),
        }
    }
}

/// Valence-backed classification of one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltSentimentResult {
    pub sentiment: Sentiment,
    #[serde(rename = "compound_score")]
    pub compound: f64,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

/// A batch entry: the polarity result plus the raw review it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    #[serde(flatten)]
    pub result: SentimentResult,
    pub review: String,
}

impl ReviewAnalysis {
    pub fn sentiment(&self) -> Sentiment {
        self.result.sentiment
    }
}
