//! Batch label prediction.
//!
//! A trained classifier (model plus text vectorizer) can back predictions
//! when one is deployed. Without one, predictions come from the valence
//! lexicon rule. The choice is made once, at startup, and is visible in the
//! [`Predictor`] variant rather than hidden behind a runtime fallback.

use crate::analyzer::SentimentAnalyzer;
use crate::config::ModelArtifacts;
use crate::error::Result;
use crate::sentiment::Sentiment;
use crate::text::{coerce, ReviewInput};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// A fitted classifier that labels raw review text.
pub trait SentimentModel: Send + Sync {
    fn predict(&self, text: &str) -> Result<Sentiment>;
}

/// Loads a fitted model and its matching vectorizer from disk.
pub trait ModelLoader {
    fn load(&self, model_path: &Path, vectorizer_path: &Path) -> Result<Box<dyn SentimentModel>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorKind {
    LexiconFallback,
    TrainedModel,
}

pub enum Predictor {
    /// Valence lexicon rule, label only
    LexiconFallback(SentimentAnalyzer),
    TrainedModel(Box<dyn SentimentModel>),
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predictor::LexiconFallback(analyzer) => {
                f.debug_tuple("LexiconFallback").field(analyzer).finish()
            }
            Predictor::TrainedModel(_) => f.write_str("TrainedModel(..)"),
        }
    }
}

impl Predictor {
    /// Pick the predictor for this process.
    ///
    /// The trained model is used only when both artefacts exist and a loader
    /// is available; a loader that fails is an error. Every other case selects
    /// the lexicon fallback and says so in the log.
    pub fn select(
        artifacts: &ModelArtifacts,
        analyzer: SentimentAnalyzer,
        loader: Option<&dyn ModelLoader>,
    ) -> Result<Self> {
        match (artifacts.available(), loader) {
            (true, Some(loader)) => {
                let model = loader.load(&artifacts.model_path, &artifacts.vectorizer_path)?;
                info!(
                    "Loaded trained sentiment model from {}",
                    artifacts.model_path.display()
                );
                Ok(Predictor::TrainedModel(model))
            }
            (true, None) => {
                warn!(
                    "Model artefacts found at {} but no loader is available, \
                     using lexicon fallback",
                    artifacts.model_path.display()
                );
                Ok(Predictor::LexiconFallback(analyzer))
            }
            (false, _) => {
                if artifacts.partially_present() {
                    warn!(
                        "Incomplete model artefacts (model: {}, vectorizer: {}), \
                         using lexicon fallback",
                        artifacts.model_path.display(),
                        artifacts.vectorizer_path.display()
                    );
                } else {
                    info!("No trained sentiment model, using lexicon fallback");
                }
                Ok(Predictor::LexiconFallback(analyzer))
            }
        }
    }

    pub fn kind(&self) -> PredictorKind {
        match self {
            Predictor::LexiconFallback(_) => PredictorKind::LexiconFallback,
            Predictor::TrainedModel(_) => PredictorKind::TrainedModel,
        }
    }

    pub fn predict<T: ReviewInput + ?Sized>(&self, text: &T) -> Result<Sentiment> {
        match self {
            Predictor::LexiconFallback(analyzer) => Ok(analyzer.classify_alt(text).sentiment),
            Predictor::TrainedModel(model) => model.predict(&coerce(text)),
        }
    }

    /// One label per input, in input order. Blank entries are not skipped.
    pub fn predict_batch<I>(&self, texts: I) -> Result<Vec<Sentiment>>
    where
        I: IntoIterator,
        I::Item: ReviewInput,
    {
        let labels = texts
            .into_iter()
            .map(|text| self.predict(&text))
            .collect::<Result<Vec<_>>>()?;
        debug!("Predicted {} labels with {:?}", labels.len(), self.kind());
        Ok(labels)
    }
}
