//! Sentiment distribution across a set of classified reviews.

use crate::sentiment::{AltSentimentResult, ReviewAnalysis, Sentiment, SentimentResult};
use serde::{Deserialize, Serialize};

/// Anything carrying a sentiment label. `None` means the label is missing
/// or unrecognised and is counted as neutral.
pub trait HasSentiment {
    fn sentiment_label(&self) -> Option<Sentiment>;
}

impl HasSentiment for Sentiment {
    fn sentiment_label(&self) -> Option<Sentiment> {
        Some(*self)
    }
}

impl HasSentiment for Option<Sentiment> {
    fn sentiment_label(&self) -> Option<Sentiment> {
        *self
    }
}

impl HasSentiment for SentimentResult {
    fn sentiment_label(&self) -> Option<Sentiment> {
        Some(self.sentiment)
    }
}

impl HasSentiment for AltSentimentResult {
    fn sentiment_label(&self) -> Option<Sentiment> {
        Some(self.sentiment)
    }
}

impl HasSentiment for ReviewAnalysis {
    fn sentiment_label(&self) -> Option<Sentiment> {
        Some(self.result.sentiment)
    }
}

/// Loosely shaped records, e.g. rows decoded from JSON.
impl HasSentiment for serde_json::Value {
    fn sentiment_label(&self) -> Option<Sentiment> {
        self.get("sentiment")?.as_str()?.parse().ok()
    }
}

impl<T: HasSentiment + ?Sized> HasSentiment for &T {
    fn sentiment_label(&self) -> Option<Sentiment> {
        (**self).sentiment_label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Distribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Fraction of all results carrying `sentiment`; 0.0 when empty.
    pub fn share(&self, sentiment: Sentiment) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(sentiment) as f64 / total as f64,
        }
    }

    /// Most frequent label. Ties go positive, then negative, then neutral.
    pub fn dominant(&self) -> Option<Sentiment> {
        if self.total() == 0 {
            return None;
        }
        let mut best = Sentiment::Positive;
        for label in Sentiment::ALL {
            if self.get(label) > self.get(best) {
                best = label;
            }
        }
        Some(best)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sentiment, usize)> + '_ {
        Sentiment::ALL.into_iter().map(move |label| (label, self.get(label)))
    }
}

impl<T: HasSentiment> FromIterator<T> for Distribution {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut distribution = Distribution::new();
        for item in iter {
            distribution.record(item.sentiment_label().unwrap_or_default());
        }
        distribution
    }
}

/// Count results per label. Every input is counted exactly once.
pub fn distribution<I>(results: I) -> Distribution
where
    I: IntoIterator,
    I::Item: HasSentiment,
{
    results.into_iter().collect()
}
