//! Valence-aware lexicon scoring (VADER rules) over raw review text.
//!
//! Raw text matters here: capitalisation, exclamation marks and contrastive
//! "but" all shift the score, so callers must not normalize first.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
/// Approximates the max expected value of the summed valence
const ALPHA: f64 = 15.0;

const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

/// Per-category valence scores for one text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValenceScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Normalized sum of valences in [-1, 1]
    pub compound: f64,
}

/// Anything that can produce valence scores for raw text.
pub trait ValenceScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> ValenceScores;
}

const DEFAULT_LEXICON: &[(&str, f64)] = &[
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("fantastic", 2.6),
    ("wonderful", 2.7),
    ("perfect", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("nice", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("lovely", 2.8),
    ("like", 2.0),
    ("liked", 1.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("happy", 2.7),
    ("glad", 2.0),
    ("pleased", 1.9),
    ("satisfied", 1.8),
    ("beautiful", 2.9),
    ("impressive", 2.3),
    ("superb", 3.1),
    ("brilliant", 2.8),
    ("fine", 0.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("easy", 1.9),
    ("comfortable", 1.5),
    ("useful", 1.9),
    ("helpful", 1.8),
    ("recommend", 1.5),
    ("recommended", 1.5),
    ("fun", 2.3),
    ("cool", 1.3),
    ("win", 2.8),
    ("worth", 0.9),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("yes", 1.7),
    ("smile", 1.5),
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("poor", -2.1),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("broken", -2.1),
    ("useless", -1.8),
    ("hate", -2.7),
    ("hated", -3.2),
    ("boring", -1.3),
    ("ugly", -2.3),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("stupid", -2.4),
    ("wrong", -2.1),
    ("fake", -2.1),
    ("dirty", -1.9),
    ("rude", -2.0),
    ("waste", -1.8),
    ("problem", -1.7),
    ("problems", -1.7),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("damaged", -2.2),
    ("defective", -1.9),
    ("scam", -2.6),
    ("fraud", -2.8),
    ("sucks", -1.5),
    ("crap", -1.6),
    ("no", -1.2),
    (":)", 2.0),
    (":(", -1.9),
    ("<3", 1.9),
];

static NEGATE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
        "ain't", "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't",
        "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
        "don't", "hadn't", "hasn't", "haven't", "isn't", "mightn't", "mustn't",
        "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
        "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
        "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't",
        "without", "wont", "wouldnt", "won't", "wouldn't", "rarely", "seldom",
        "despite",
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let increments = [
        "absolutely", "amazingly", "awfully", "completely", "considerable",
        "considerably", "decidedly", "deeply", "enormous", "enormously",
        "entirely", "especially", "exceptional", "exceptionally", "extreme",
        "extremely", "fabulously", "fully", "greatly", "hella", "highly",
        "hugely", "incredible", "incredibly", "intensely", "major", "majorly",
        "more", "most", "particularly", "purely", "quite", "really",
        "remarkably", "so", "substantially", "thoroughly", "total", "totally",
        "tremendous", "tremendously", "uber", "unbelievably", "unusually",
        "utter", "utterly", "very",
    ];
    let decrements = [
        "almost", "barely", "hardly", "kinda", "kindof", "kind-of", "less",
        "little", "marginal", "marginally", "occasional", "occasionally",
        "partly", "scarce", "scarcely", "slight", "slightly", "somewhat",
        "sorta", "sortof", "sort-of",
    ];

    let mut boosters = HashMap::new();
    boosters.extend(increments.into_iter().map(|w| (w, B_INCR)));
    boosters.extend(decrements.into_iter().map(|w| (w, B_DECR)));
    boosters
});

fn is_negation(word: &str) -> bool {
    let lower = word.to_lowercase();
    NEGATE.contains(lower.as_str()) || lower.contains("n't")
}

/// At least one uppercase char and no lowercase ones.
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Normalize a raw valence sum into [-1, 1].
pub fn normalize_score(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Split on whitespace and strip surrounding punctuation from words, but
/// leave short tokens such as emoticons untouched.
fn words_and_emoticons(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .collect()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = if questions > 1 {
        if questions <= 3 {
            questions as f64 * QUESTION_WEIGHT
        } else {
            MAX_QUESTION_EMPHASIS
        }
    } else {
        0.0
    };

    exclamations as f64 * EXCLAMATION_WEIGHT + question_emphasis
}

/// Valence lexicon scorer following the VADER heuristics.
#[derive(Debug, Clone)]
pub struct VaderScorer {
    lexicon: HashMap<String, f64>,
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl VaderScorer {
    /// Scorer with the built-in lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(
            DEFAULT_LEXICON
                .iter()
                .map(|(word, valence)| (word.to_string(), *valence))
                .collect(),
        )
    }

    pub fn with_lexicon(lexicon: HashMap<String, f64>) -> Self {
        Self { lexicon }
    }

    /// Load a full lexicon file (`token<TAB>mean<TAB>stddev<TAB>raw`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let lexicon = parse_lexicon(BufReader::new(file))?;
        info!("Loaded {} valence lexicon entries from {}", lexicon.len(), path.display());
        Ok(Self::with_lexicon(lexicon))
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn valence_of(&self, word: &str) -> Option<f64> {
        self.lexicon.get(&word.to_lowercase()).copied()
    }

    fn in_lexicon(&self, word: &str) -> bool {
        self.valence_of(word).is_some()
    }

    /// Booster contribution of `word` towards a word with `valence`.
    fn scalar_inc_dec(word: &str, valence: f64, is_cap_diff: bool) -> f64 {
        let Some(&boost) = BOOSTERS.get(word.to_lowercase().as_str()) else {
            return 0.0;
        };

        let mut scalar = if valence < 0.0 { -boost } else { boost };
        if is_all_caps(word) && is_cap_diff {
            scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
        }
        scalar
    }

    fn negation_check(valence: f64, lower: &[String], start_i: usize, i: usize) -> f64 {
        let so_or_this = |w: &str| w == "so" || w == "this";
        match start_i {
            0 => {
                if is_negation(&lower[i - 1]) {
                    return valence * N_SCALAR;
                }
            }
            1 => {
                if lower[i - 2] == "never" && so_or_this(&lower[i - 1]) {
                    return valence * 1.25;
                } else if lower[i - 2] == "without" && lower[i - 1] == "doubt" {
                    return valence;
                } else if is_negation(&lower[i - 2]) {
                    return valence * N_SCALAR;
                }
            }
            2 => {
                if lower[i - 3] == "never"
                    && (so_or_this(&lower[i - 2]) || so_or_this(&lower[i - 1]))
                {
                    return valence * 1.25;
                } else if lower[i - 3] == "without"
                    && (lower[i - 2] == "doubt" || lower[i - 1] == "doubt")
                {
                    return valence;
                } else if is_negation(&lower[i - 3]) {
                    return valence * N_SCALAR;
                }
            }
            _ => {}
        }
        valence
    }

    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i > 1 && !self.in_lexicon(&lower[i - 1]) && lower[i - 1] == "least" {
            if lower[i - 2] != "at" && lower[i - 2] != "very" {
                return valence * N_SCALAR;
            }
        } else if i > 0 && !self.in_lexicon(&lower[i - 1]) && lower[i - 1] == "least" {
            return valence * N_SCALAR;
        }
        valence
    }

    fn sentiment_valence(
        &self,
        words: &[&str],
        lower: &[String],
        i: usize,
        is_cap_diff: bool,
    ) -> f64 {
        let item = words[i];
        let Some(base) = self.valence_of(item) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another lexicon word acts as a negator only
        if lower[i] == "no" && i + 1 < words.len() && self.in_lexicon(&lower[i + 1]) {
            valence = 0.0;
        }
        if (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && (lower[i - 1] == "or" || lower[i - 1] == "nor"))
        {
            valence = base * N_SCALAR;
        }

        if is_all_caps(item) && is_cap_diff {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for start_i in 0..3 {
            if i > start_i && !self.in_lexicon(&lower[i - (start_i + 1)]) {
                let mut s = Self::scalar_inc_dec(words[i - (start_i + 1)], valence, is_cap_diff);
                if start_i == 1 && s != 0.0 {
                    s *= 0.95;
                }
                if start_i == 2 && s != 0.0 {
                    s *= 0.9;
                }
                valence += s;
                valence = Self::negation_check(valence, lower, start_i, i);
            }
        }

        self.least_check(valence, lower, i)
    }

    /// Dampen everything before the first "but" and amplify everything after.
    fn but_check(lower: &[String], sentiments: &mut [f64]) {
        let Some(bi) = lower.iter().position(|w| w == "but") else {
            return;
        };
        for (si, sentiment) in sentiments.iter_mut().enumerate() {
            if si < bi {
                *sentiment *= 0.5;
            } else if si > bi {
                *sentiment *= 1.5;
            }
        }
    }

    fn score_valence(sentiments: &[f64], text: &str) -> ValenceScores {
        if sentiments.is_empty() {
            return ValenceScores::default();
        }

        let emphasis = punctuation_emphasis(text);
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize_score(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &s in sentiments {
            if s > 0.0 {
                // +1 compensates for neutral words counting as 1 each
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        ValenceScores {
            neg: round_to((neg_sum / total).abs(), 3),
            neu: round_to((neu_count / total).abs(), 3),
            pos: round_to((pos_sum / total).abs(), 3),
            compound: round_to(compound, 4),
        }
    }
}

impl ValenceScorer for VaderScorer {
    fn polarity_scores(&self, text: &str) -> ValenceScores {
        let words = words_and_emoticons(text);
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let caps = words.iter().filter(|w| is_all_caps(w)).count();
        let is_cap_diff = caps > 0 && caps < words.len();

        let mut sentiments = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            let is_booster = BOOSTERS.contains_key(lower[i].as_str());
            let is_kind_of = lower[i] == "kind" && lower.get(i + 1).map_or(false, |w| w == "of");
            if is_booster || is_kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.sentiment_valence(&words, &lower, i, is_cap_diff));
        }

        Self::but_check(&lower, &mut sentiments);
        Self::score_valence(&sentiments, text)
    }
}

/// Parse a tab-separated valence lexicon. Blank lines are skipped; every other
/// line needs a token and a numeric mean valence.
pub fn parse_lexicon<R: BufRead>(reader: R) -> Result<HashMap<String, f64>> {
    let mut lexicon = HashMap::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let token = fields
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::lexicon(line_no, "missing token"))?;
        let mean = fields
            .next()
            .ok_or_else(|| Error::lexicon(line_no, "missing mean valence"))?;
        let mean: f64 = mean
            .trim()
            .parse()
            .map_err(|_| Error::lexicon(line_no, format!("invalid valence: {}", mean)))?;

        lexicon.insert(token.to_string(), mean);
    }
    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_empty_text() {
        let vader = VaderScorer::new();
        assert_eq!(vader.polarity_scores(""), ValenceScores::default());
    }

    #[test]
    fn test_simple_positive() {
        let vader = VaderScorer::new();
        let scores = vader.polarity_scores("good product");
        assert_eq!(scores.compound, 0.4404);
        assert_eq!(scores.pos, 0.744);
        assert_eq!(scores.neu, 0.256);
        assert_eq!(scores.neg, 0.0);
    }

    #[test]
    fn test_simple_negative() {
        let vader = VaderScorer::new();
        let scores = vader.polarity_scores("This is bad");
        assert_eq!(scores.compound, -0.5423);
        assert_eq!(scores.neg, 0.636);
    }

    #[test]
    fn test_negation() {
        let vader = VaderScorer::new();
        assert_eq!(vader.polarity_scores("not good").compound, -0.3412);
        assert!(vader.polarity_scores("It isn't bad").compound > 0.0);
    }

    #[test]
    fn test_booster() {
        let vader = VaderScorer::new();
        assert_eq!(vader.polarity_scores("very good").compound, 0.4927);
        let damped = vader.polarity_scores("slightly good").compound;
        assert!(damped < 0.4404 && damped > 0.0);
    }

    #[test]
    fn test_caps_emphasis_needs_mixed_case() {
        let vader = VaderScorer::new();
        let plain = vader.polarity_scores("This is good").compound;
        let shouted = vader.polarity_scores("This is GOOD").compound;
        assert!(shouted > plain);
        // all-caps text has no differential
        assert_eq!(
            vader.polarity_scores("THIS IS GOOD").compound,
            vader.polarity_scores("this is good").compound
        );
    }

    #[test]
    fn test_exclamation_amplifies() {
        let vader = VaderScorer::new();
        let calm = vader.polarity_scores("good").compound;
        let excited = vader.polarity_scores("good!!!").compound;
        assert!(excited > calm);
        // capped at four marks
        assert_eq!(
            vader.polarity_scores("good!!!!").compound,
            vader.polarity_scores("good!!!!!!!").compound
        );
    }

    #[test]
    fn test_but_shifts_weight() {
        let vader = VaderScorer::new();
        let scores = vader.polarity_scores("The food was good but the service was terrible");
        assert!(scores.compound < 0.0);
    }

    #[test]
    fn test_least_dampens() {
        let vader = VaderScorer::new();
        assert!(vader.polarity_scores("the least good option").compound < 0.0);
        assert!(vader.polarity_scores("at least good").compound > 0.0);
    }

    #[test]
    fn test_emoticon_kept() {
        let vader = VaderScorer::new();
        assert!(vader.polarity_scores("arrived today :)").compound > 0.0);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let vader = VaderScorer::new();
        let s = vader.polarity_scores("Great price, but the strap broke and support was rude.");
        assert!((s.pos + s.neg + s.neu - 1.0).abs() <= 0.002);
    }

    #[test]
    fn test_normalize_score_bounds() {
        assert_eq!(normalize_score(0.0), 0.0);
        assert!(normalize_score(1000.0) <= 1.0);
        assert!(normalize_score(-1000.0) >= -1.0);
    }

    #[test]
    fn test_parse_lexicon() {
        let data = "good\t1.9\t0.9434\t[2, 1, 2]\n\n$:\t-1.5\t0.80623\t[-1, -1]\n";
        let lexicon = parse_lexicon(Cursor::new(data)).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon["good"], 1.9);
        assert_eq!(lexicon["$:"], -1.5);
    }

    #[test]
    fn test_parse_lexicon_reports_line() {
        let data = "good\t1.9\nbroken\tnot-a-number\n";
        match parse_lexicon(Cursor::new(data)) {
            Err(Error::Lexicon { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected lexicon error, got {:?}", other.map(|l| l.len())),
        }
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "splendid\t2.5\t0.5\t[3, 2]").unwrap();
        let vader = VaderScorer::from_path(file.path()).unwrap();
        assert_eq!(vader.len(), 1);
        assert!(vader.polarity_scores("splendid").compound > 0.0);
        assert_eq!(vader.polarity_scores("good").compound, 0.0);
    }

    #[test]
    fn test_from_missing_path() {
        let result = VaderScorer::from_path(Path::new("/nonexistent/vader_lexicon.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
