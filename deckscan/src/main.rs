//! deckscan.
//!
//! Reads OCR text boxes from a decklist screenshot and prints the deck as JSON.

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use data::{Dataset, Dictionary};
use engine::{BoxTextList, Deck, Recognition};

mod config;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "deckscan", about = "Turn OCR text boxes into a Magic: The Gathering deck", long_about = None)]
struct Cli {
    /// JSON array of text boxes (`{ "box": ..., "text": ... }`)
    input: PathBuf,

    /// Local MTGJSON Atomic file instead of the cached or downloaded dataset
    #[arg(long, requires = "keywords")]
    cards: Option<PathBuf>,

    /// Local MTGJSON Keywords file
    #[arg(long, requires = "cards")]
    keywords: Option<PathBuf>,

    /// Dataset cache location
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Download the dataset even when a cache exists
    #[arg(long)]
    refresh: bool,

    /// Edit budget for card names, as a fraction of the fragment length
    #[arg(long)]
    name_ratio: Option<f64>,

    /// Edit budget for keywords, as a fraction of the fragment length
    #[arg(long)]
    keyword_ratio: Option<f64>,

    /// Deck JSON to compare the result with
    #[arg(long)]
    expected: Option<PathBuf>,

    /// Write the effective settings to the config file
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(ratio) = self.name_ratio {
            config.engine.name_ratio = ratio;
        }
        if let Some(ratio) = self.keyword_ratio {
            config.engine.keyword_ratio = ratio;
        }
        if let Some(cache) = &self.cache {
            config.cache = Some(cache.clone());
        }
    }

    fn dataset(&self, config: &Config) -> Result<Dataset> {
        if let (Some(cards), Some(keywords)) = (&self.cards, &self.keywords) {
            return Dataset::from_files(cards, keywords);
        }
        Ok(Dataset::try_populated(config.cache.as_deref(), self.refresh)?)
    }
}

fn main() -> Result<()> {
    // Structured logging. Use `RUST_LOG=info` etc.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::load_or_default();
    cli.apply(&mut config);
    if cli.save_config {
        config.save(&Config::path()?)?;
    }

    let dataset = cli.dataset(&config)?;
    let dictionary = Arc::new(Dictionary::new(&dataset));
    let recognition = Recognition::new(dictionary, config.engine);

    let box_texts = BoxTextList::load(&cli.input)?;
    tracing::info!(boxes = box_texts.len(), input = %cli.input.display(), "scanning");
    let scan = recognition.box_texts_to_deck(box_texts);

    let unassigned = scan.assignments.iter().filter(|v| v.target.is_none()).count();
    tracing::info!(
        cards = scan.cards.len(),
        maindeck = scan.deck.maindeck.total(),
        sideboard = scan.deck.sideboard.total(),
        labels = scan.assignments.len(),
        unassigned,
        "scan complete"
    );

    println!("{}", serde_json::to_string_pretty(&scan.deck).context("serialize deck")?);

    if let Some(path) = &cli.expected {
        let json = fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
        let expected: Deck = serde_json::from_str(&json).with_context(|| format!("parse {:?}", path))?;
        eprintln!(
            "{} cards differ from {} ({:.1}%)",
            scan.deck.diff(&expected),
            path.display(),
            100.0 * scan.deck.error_ratio(&expected)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["deckscan", "boxes.json", "--name-ratio", "0.25", "--cache", "/tmp/ds.json"]);
        let mut config = Config::default();

        cli.apply(&mut config);

        assert_eq!(config.engine.name_ratio, 0.25);
        assert_eq!(config.engine.keyword_ratio, 0.2);
        assert_eq!(config.cache, Some(PathBuf::from("/tmp/ds.json")));
    }

    #[test]
    fn test_local_files_need_both() {
        assert!(Cli::try_parse_from(["deckscan", "boxes.json", "--cards", "AtomicCards.json"]).is_err());
        assert!(
            Cli::try_parse_from([
                "deckscan",
                "boxes.json",
                "--cards",
                "AtomicCards.json",
                "--keywords",
                "Keywords.json",
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_dataset_from_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let cards = dir.path().join("cards.json");
        let keywords = dir.path().join("keywords.json");
        fs::write(&cards, r#"{ "data": { "Opt": [], "Fire // Ice": [] } }"#).unwrap();
        fs::write(&keywords, r#"{ "data": { "keywordAbilities": ["Flying"] } }"#).unwrap();
        let cli = Cli::parse_from([
            "deckscan",
            "boxes.json",
            "--cards",
            cards.to_str().unwrap(),
            "--keywords",
            keywords.to_str().unwrap(),
        ]);

        let dataset = cli.dataset(&Config::default()).unwrap();

        assert_eq!(dataset.cards, vec!["Fire".to_string(), "Opt".to_string()]);
        assert!(dataset.keywords.contains(&"Flying".to_string()));
    }
}
