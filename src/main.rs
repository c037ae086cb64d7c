use anyhow::{Context, Result};
use review_sentiment::{distribution, Config, Predictor, SentimentAnalyzer};
use serde_json::json;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::info;

/// Classify one review per line from a file (or stdin) and print a JSON report.
fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = Config::from_env();
    config
        .ensure_instance_dir()
        .context("Failed to prepare instance directory")?;
    let analyzer =
        SentimentAnalyzer::from_config(&config).context("Failed to build sentiment analyzer")?;
    let predictor = Predictor::select(&config.artifacts, analyzer.clone(), None)?;

    let reviews = match env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
            read_lines(BufReader::new(file))?
        }
        None => read_lines(io::stdin().lock())?,
    };
    info!("Read {} reviews", reviews.len());

    let analyses = analyzer.classify_batch(&reviews);
    let predictions = predictor.predict_batch(&reviews)?;
    let dist = distribution(&analyses);

    let report = json!({
        "analyses": analyses,
        "predictions": predictions,
        "distribution": dist,
        "predictor": format!("{:?}", predictor.kind()),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("Failed to read reviews")
}
