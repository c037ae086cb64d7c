//! The sentiment analyzer service handle.
//!
//! Construct one at startup and share it: it owns the polarity and valence
//! scorers and is immutable afterwards, so `&SentimentAnalyzer` can be used
//! from any request handler or worker thread.

use crate::config::Config;
use crate::error::Result;
use crate::polarity::{PatternScorer, PolarityScorer};
use crate::sentiment::{round3, AltSentimentResult, ReviewAnalysis, Sentiment, SentimentResult};
use crate::text::{coerce, normalize, ReviewInput};
use crate::vader::{VaderScorer, ValenceScorer};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct SentimentAnalyzer {
    polarity: Arc<dyn PolarityScorer>,
    valence: Arc<dyn ValenceScorer>,
}

impl fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentAnalyzer").finish_non_exhaustive()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(PatternScorer::new()), Arc::new(VaderScorer::new()))
    }
}

impl SentimentAnalyzer {
    pub fn new(polarity: Arc<dyn PolarityScorer>, valence: Arc<dyn ValenceScorer>) -> Self {
        Self { polarity, valence }
    }

    /// Build the analyzer for this process. A configured valence lexicon that
    /// cannot be read is a startup failure, not something to paper over.
    pub fn from_config(config: &Config) -> Result<Self> {
        let valence = match &config.vader_lexicon_path {
            Some(path) => VaderScorer::from_path(path)?,
            None => {
                info!("No VADER_LEXICON_PATH set, using built-in valence lexicon");
                VaderScorer::new()
            }
        };
        Ok(Self::new(Arc::new(PatternScorer::new()), Arc::new(valence)))
    }

    /// Normalize the text, score polarity and label it: above zero is
    /// positive, below zero negative, exactly zero neutral.
    pub fn classify<T: ReviewInput + ?Sized>(&self, text: &T) -> SentimentResult {
        let prepared = normalize(text);
        let score = self.polarity.score(&prepared);
        SentimentResult::from_scores(score.polarity, score.subjectivity)
    }

    /// Score the raw text with the valence scorer and label it by compound
    /// score, using the ±0.05 neutral band.
    pub fn classify_alt<T: ReviewInput + ?Sized>(&self, text: &T) -> AltSentimentResult {
        let raw = coerce(text);
        let scores = self.valence.polarity_scores(&raw);

        AltSentimentResult {
            sentiment: Sentiment::from_compound(scores.compound),
            compound: round3(scores.compound),
            pos: scores.pos,
            neg: scores.neg,
            neu: scores.neu,
        }
    }

    /// Classify every non-blank review in order, keeping the raw review
    /// alongside its result.
    pub fn classify_batch<I>(&self, reviews: I) -> Vec<ReviewAnalysis>
    where
        I: IntoIterator,
        I::Item: ReviewInput,
    {
        let mut results = Vec::new();
        let mut skipped = 0usize;

        for review in reviews {
            if review.is_blank() {
                skipped += 1;
                continue;
            }
            results.push(ReviewAnalysis {
                result: self.classify(&review),
                review: coerce(&review),
            });
        }

        debug!("Classified {} reviews, skipped {} blank", results.len(), skipped);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polarity::PolarityScore;
    use crate::vader::ValenceScores;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Valence scorer that returns a fixed compound score.
    struct FixedValence(f64);

    impl ValenceScorer for FixedValence {
        fn polarity_scores(&self, _text: &str) -> ValenceScores {
            ValenceScores {
                compound: self.0,
                neu: 1.0,
                ..Default::default()
            }
        }
    }

    /// Polarity scorer that records what text it was given.
    #[derive(Default)]
    struct RecordingPolarity {
        seen: Mutex<Vec<String>>,
    }

    impl PolarityScorer for RecordingPolarity {
        fn score(&self, text: &str) -> PolarityScore {
            self.seen.lock().unwrap().push(text.to_string());
            PolarityScore::default()
        }
    }

    fn with_compound(compound: f64) -> SentimentAnalyzer {
        SentimentAnalyzer::new(Arc::new(PatternScorer::new()), Arc::new(FixedValence(compound)))
    }

    #[test]
    fn test_classify_empty_is_neutral() {
        let analyzer = SentimentAnalyzer::default();
        let result = analyzer.classify("");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.subjectivity, 0.0);
    }

    #[test]
    fn test_classify_labels() {
        let analyzer = SentimentAnalyzer::default();
        let label = |review: &str| analyzer.classify(review).sentiment;
        assert_eq!(label("Great product, works perfectly!"), Sentiment::Positive);
        assert_eq!(label("Terrible. Broke after a day."), Sentiment::Negative);
        assert_eq!(label("Arrived on Tuesday."), Sentiment::Neutral);
    }

    #[test]
    fn test_classify_negation_does_not_leak() {
        let analyzer = SentimentAnalyzer::default();
        for review in [
            "I did not expect much but it is great",
            "Never had any issue with it, good product",
            "No complaints at all, the fit is perfect",
        ] {
            assert_eq!(analyzer.classify(review).sentiment, Sentiment::Positive, "{}", review);
        }
        assert_eq!(analyzer.classify("Not a good idea.").sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_classify_rounds_to_three_places() {
        let analyzer = SentimentAnalyzer::default();
        let result = analyzer.classify("very good");
        assert_eq!(result.polarity, 0.91);
        assert_eq!(result.subjectivity, 0.78);
    }

    #[test]
    fn test_classify_normalizes_before_scoring() {
        let recorder = Arc::new(RecordingPolarity::default());
        let analyzer = SentimentAnalyzer::new(recorder.clone(), Arc::new(VaderScorer::new()));
        analyzer.classify("  It's GREAT!!  ");
        assert_eq!(recorder.seen.lock().unwrap().as_slice(), ["its great"]);
    }

    #[test]
    fn test_classify_alt_uses_raw_text() {
        let analyzer = SentimentAnalyzer::default();
        let plain = analyzer.classify_alt("This is good");
        let shouted = analyzer.classify_alt("This is GOOD!!");
        assert_eq!(plain.sentiment, Sentiment::Positive);
        assert!(shouted.compound > plain.compound);
    }

    #[test]
    fn test_classify_alt_result_fields() {
        let analyzer = SentimentAnalyzer::default();
        let result = analyzer.classify_alt("good product");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.compound, 0.44);
        assert_eq!(result.pos, 0.744);
        assert_eq!(result.neu, 0.256);
        assert_eq!(result.neg, 0.0);
    }

    #[test]
    fn test_classify_alt_dead_zone() {
        assert_eq!(with_compound(0.05).classify_alt("x").sentiment, Sentiment::Positive);
        assert_eq!(with_compound(-0.05).classify_alt("x").sentiment, Sentiment::Negative);
        assert_eq!(with_compound(0.0499).classify_alt("x").sentiment, Sentiment::Neutral);
        assert_eq!(with_compound(-0.0499).classify_alt("x").sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_classify_alt_null_is_neutral() {
        let analyzer = SentimentAnalyzer::default();
        let result = analyzer.classify_alt(&None::<&str>);
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.compound, 0.0);
    }

    #[test]
    fn test_batch_skips_blank_entries() {
        let analyzer = SentimentAnalyzer::default();
        let reviews = [Some(""), None, Some("  "), Some("good product")];
        let results = analyzer.classify_batch(reviews);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].review, "good product");
        assert_eq!(results[0].sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_batch_keeps_raw_review_and_order() {
        let analyzer = SentimentAnalyzer::default();
        let reviews = vec![
            "Awful, AWFUL service!".to_string(),
            String::new(),
            "Nice fit.".to_string(),
        ];
        let results = analyzer.classify_batch(&reviews);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].review, "Awful, AWFUL service!");
        assert_eq!(results[0].sentiment(), Sentiment::Negative);
        assert_eq!(results[1].review, "Nice fit.");
        assert_eq!(results[1].sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_batch_empty_input() {
        let analyzer = SentimentAnalyzer::default();
        assert!(analyzer.classify_batch(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_batch_numeric_entries() {
        let analyzer = SentimentAnalyzer::default();
        let results = analyzer.classify_batch([0_i64, 5]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].review, "5");
        assert_eq!(results[0].sentiment(), Sentiment::Neutral);
    }

    #[test]
    fn test_from_config_missing_lexicon_fails() {
        let mut config = Config::from_lookup(|_| None);
        config.vader_lexicon_path = Some(PathBuf::from("/nonexistent/vader_lexicon.txt"));
        assert!(SentimentAnalyzer::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_default_lexicon() {
        let config = Config::from_lookup(|_| None);
        let analyzer = SentimentAnalyzer::from_config(&config).unwrap();
        assert_eq!(analyzer.classify_alt("good product").sentiment, Sentiment::Positive);
    }
}
