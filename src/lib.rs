//! Review sentiment classification.
//!
//! Reviews are labelled positive, negative or neutral by two independent
//! lexicon scorers:
//!
//! - [`SentimentAnalyzer::classify`] normalizes the text and labels it by the
//!   sign of its polarity.
//! - [`SentimentAnalyzer::classify_alt`] scores the raw text with VADER-style
//!   valence rules and labels it by compound score with a ±0.05 neutral band.
//!
//! Batches of reviews go through [`SentimentAnalyzer::classify_batch`] or a
//! [`Predictor`], and [`distribution`] tallies the labels.
//!
//! ```
//! use review_sentiment::{distribution, Sentiment, SentimentAnalyzer};
//!
//! let analyzer = SentimentAnalyzer::default();
//! let results = analyzer.classify_batch(["Great value!", "", "Awful fit."]);
//! assert_eq!(results.len(), 2);
//!
//! let dist = distribution(&results);
//! assert_eq!(dist.get(Sentiment::Positive), 1);
//! assert_eq!(dist.get(Sentiment::Negative), 1);
//! ```

pub mod analyzer;
pub mod config;
pub mod distribution;
pub mod error;
pub mod polarity;
pub mod predictor;
pub mod sentiment;
pub mod text;
pub mod vader;

pub use analyzer::SentimentAnalyzer;
pub use config::{Config, ModelArtifacts};
pub use distribution::{distribution, Distribution, HasSentiment};
pub use error::{Error, Result};
pub use polarity::{PatternScorer, PolarityScore, PolarityScorer};
pub use predictor::{ModelLoader, Predictor, PredictorKind, SentimentModel};
pub use sentiment::{AltSentimentResult, ReviewAnalysis, Sentiment, SentimentResult};
pub use text::{normalize, ReviewInput};
pub use vader::{ValenceScorer, ValenceScores, VaderScorer};
