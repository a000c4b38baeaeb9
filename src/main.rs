//!
//! src/main.rs
//!
//! Entry point of the emotion/genre aggregator. Reads the emotion-tags
//! and social-tags sources, builds the treemap tree and writes it out.
//!
//!

mod config;
mod errors;
mod logging;

mod aggregator;
mod sink;
mod source;
mod types;
mod vocabulary;

use std::path::PathBuf;

use crate::aggregator::EmotionGenreAggregator;
use crate::config::AppConfig;
use crate::errors::AggregatorError;
use crate::vocabulary::{EmotionPalette, GenreVocabulary};

fn main() -> Result<(), AggregatorError> {
    let cfgs    = config::load_config()?;
    let _logger = logging::init_logging(&cfgs.logging)?;

    tracing::info!(
        service="emotion-genre-map",
        version=%env!("CARGO_PKG_VERSION"),
        emotion_tags=%cfgs.paths.emotion_tags.display(),
        social_tags=%cfgs.paths.social_tags.display(),
        "starting"
    );

    let vocabulary = GenreVocabulary::builtin();
    let palette    = EmotionPalette::builtin();
    tracing::debug!(genres = vocabulary.genres().len(), "vocabulary.loaded");

    match run(&cfgs, &vocabulary, &palette) {
        Ok(path) => {
            tracing::info!(output=%path.display(), "results saved");
            Ok(())
        },
        Err(e) => {
            tracing::error!(error=%e, "error during processing");
            Err(e)
        }
    }
}

/// One full pass: load both sources, aggregate, write the tree
fn run(
    cfgs: &AppConfig,
    vocabulary: &GenreVocabulary,
    palette: &EmotionPalette
) -> Result<PathBuf, AggregatorError> {
    let emotion_tags = source::load_emotion_tags(&cfgs.paths.emotion_tags)?;
    let social_tags  = source::load_social_tags(&cfgs.paths.social_tags)?;

    let aggregator = EmotionGenreAggregator::new(vocabulary, palette, &cfgs.aggregation);
    let tree = aggregator.run(&emotion_tags, &social_tags);

    let sink = sink::JsonFileSink::new(&cfgs.paths.output);
    let path = sink.write(&tree)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::{AggregationConfig, LoggingConfig, PathConfig};

    struct Workspace {
        dir: tempfile::TempDir,
        cfgs: AppConfig
    }

    fn workspace(emotions: &str, socials: &str) -> Result<Workspace, AggregatorError> {
        let dir = tempfile::tempdir()?;
        let paths = PathConfig {
            emotion_tags: dir.path().join("emotion-tags.json"),
            social_tags: dir.path().join("social-tags.json"),
            output: dir.path().join("out/emotion_genre_map.json")
        };
        fs::write(&paths.emotion_tags, emotions)?;
        fs::write(&paths.social_tags, socials)?;

        let cfgs = AppConfig {
            paths,
            aggregation: AggregationConfig::default(),
            logging: LoggingConfig::default()
        };
        Ok( Workspace { dir, cfgs } )
    }

    #[test]
    fn end_to_end_writes_treemap_document() -> Result<(), AggregatorError> {
        let ws = workspace(
            r#"[{"emotions":[{"emotion_tag":"Happy","nbr_tags":5},
                             {"emotion_tag":"sad","nbr_tags":0}]}]"#,
            r#"[{"socials":[{"social_tag":"Happy","nbr_tags":2},
                            {"social_tag":"rock anthem","nbr_tags":10}]},
                {"socials":[{"social_tag":"sad","nbr_tags":7},
                            {"social_tag":"blues","nbr_tags":1}]}]"#
        )?;

        let path = run(&ws.cfgs, &GenreVocabulary::builtin(), &EmotionPalette::builtin())?;
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;

        assert_eq!(written, serde_json::json!({
            "name": "Music Emotions and Genres",
            "children": [{
                "name": "happy",
                "color": "#FFD700",
                "children": [{"name": "rock", "value": 6.0, "emotion": "happy"}]
            }]
        }));
        Ok(())
    }

    #[test]
    fn repeated_runs_produce_identical_bytes() -> Result<(), AggregatorError> {
        let ws = workspace(
            r#"[{"emotions":[{"emotion_tag":"dark","nbr_tags":3},{"emotion_tag":"calm","nbr_tags":1}]},
                {"emotions":[{"emotion_tag":"mellow","nbr_tags":2}]}]"#,
            r#"[{"socials":[{"social_tag":"dark","nbr_tags":4},{"social_tag":"Black Metal","nbr_tags":9},
                            {"social_tag":"doom metal","nbr_tags":3},{"social_tag":"ambient","nbr_tags":1}]},
                {"socials":[{"social_tag":"calm","nbr_tags":2},{"social_tag":"mellow","nbr_tags":5},
                            {"social_tag":"smooth jazz","nbr_tags":2},{"social_tag":"chillout","nbr_tags":8}]},
                {"socials":[]}]"#
        )?;
        let vocabulary = GenreVocabulary::builtin();
        let palette = EmotionPalette::builtin();

        let first = fs::read(run(&ws.cfgs, &vocabulary, &palette)?)?;
        let second = fs::read(run(&ws.cfgs, &vocabulary, &palette)?)?;

        assert_eq!(first, second);
        assert!(!first.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_source_leaves_no_output() -> Result<(), AggregatorError> {
        let ws = workspace(
            r#"[{"emotions":[{"emotion_tag":"happy","nbr_tags":1}]}]"#,
            r#"[{"socials":[{"social_tag":"rock"}]}]"#
        )?;

        let result = run(&ws.cfgs, &GenreVocabulary::builtin(), &EmotionPalette::builtin());

        assert!(matches!(result, Err(AggregatorError::InputMalformed { .. })));
        assert!(!ws.cfgs.paths.output.exists());
        assert!(!ws.dir.path().join("out").exists());
        Ok(())
    }

    #[test]
    fn missing_source_is_reported() -> Result<(), AggregatorError> {
        let ws = workspace("[]", "[]")?;
        fs::remove_file(&ws.cfgs.paths.social_tags)?;

        let result = run(&ws.cfgs, &GenreVocabulary::builtin(), &EmotionPalette::builtin());

        assert!(matches!(result, Err(AggregatorError::InputNotFound { .. })));
        Ok(())
    }

    #[test]
    fn empty_sources_produce_empty_tree() -> Result<(), AggregatorError> {
        let ws = workspace("[]", "[]")?;

        let path = run(&ws.cfgs, &GenreVocabulary::builtin(), &EmotionPalette::builtin())?;
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;

        assert_eq!(written, serde_json::json!({
            "name": "Music Emotions and Genres",
            "children": []
        }));
        Ok(())
    }
}
