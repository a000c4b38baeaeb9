//!
//! src/aggregator.rs
//!
//! Builds the emotion -> genre association tree in three passes:
//! collect the valid emotion vocabulary, accumulate per-song co-occurrence
//! scores from social tags, then rank and truncate into the output tree.
//!
//!

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::config::AggregationConfig;
use crate::types::{EmotionNode, GenreLeaf, ResultTree, SongTags};
use crate::vocabulary::{EmotionPalette, GenreVocabulary};

/// emotion -> genre -> accumulated score
pub type AssociationMap = BTreeMap<String, BTreeMap<String, f64>>;

/// Emotions seen with a positive count in the emotion-tags source
#[derive(Debug, Clone, Default)]
pub struct ValidEmotions {
    pub emotions: BTreeSet<String>,
    pub counts: BTreeMap<String, i64>   // diagnostics only
}

impl ValidEmotions {
    pub fn contains(&self, tag: &str) -> bool {
        self.emotions.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }

    /// Most used emotions, ties by name
    pub fn top(&self, n: usize) -> Vec<(&str, i64)> {
        let mut ranked: Vec<(&str, i64)> = self.counts.iter()
            .map(|(emotion, count)| (emotion.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, Default)]
pub struct Accumulation {
    pub associations: AssociationMap,
    pub processed: usize,
    pub skipped: usize
}

pub struct EmotionGenreAggregator<'a> {
    vocabulary: &'a GenreVocabulary,
    palette: &'a EmotionPalette,
    config: &'a AggregationConfig
}

impl<'a> EmotionGenreAggregator<'a> {
    pub fn new(
        vocabulary: &'a GenreVocabulary,
        palette: &'a EmotionPalette,
        config: &'a AggregationConfig
    ) -> Self {
        Self { vocabulary, palette, config }
    }

    pub fn run(&self, emotion_tags: &[SongTags], social_tags: &[SongTags]) -> ResultTree {
        let valid = self.extract_valid_emotions(emotion_tags);
        if valid.is_empty() {
            warn!("no emotion has a positive count, every song will be skipped");
        }
        let accumulation = self.accumulate(social_tags, &valid);
        self.shape(&accumulation.associations)
    }

    /// Phase 1
    pub fn extract_valid_emotions(&self, entries: &[SongTags]) -> ValidEmotions {
        let mut valid = ValidEmotions::default();

        for tag in entries.iter().flat_map(|song| song.tags.iter()) {
            if tag.count > 0 {
                valid.emotions.insert(tag.tag.clone());
                let total = valid.counts.entry(tag.tag.clone()).or_insert(0);
                *total = total.saturating_add(tag.count);
            }
        }

        info!(unique = valid.len(), "emotions.extracted");
        for (emotion, count) in valid.top(self.config.top_summary) {
            info!(emotion, count, "emotions.top");
        }
        valid
    }

    /// Phase 2
    pub fn accumulate(&self, entries: &[SongTags], valid: &ValidEmotions) -> Accumulation {
        let mut acc = Accumulation::default();

        for (index, song) in entries.iter().enumerate() {
            let mut song_emotions: BTreeMap<&str, i64> = BTreeMap::new();
            let mut song_genres: BTreeMap<&str, i64> = BTreeMap::new();

            for tag in song.tags.iter().filter(|t| t.count != 0) {
                if valid.contains(&tag.tag) {
                    let count = song_emotions.entry(tag.tag.as_str()).or_insert(0);
                    *count = count.saturating_add(tag.count);
                }
                if let Some(genre) = self.vocabulary.classify(&tag.tag) {
                    let count = song_genres.entry(genre).or_insert(0);
                    *count = count.saturating_add(tag.count);
                    debug!(song = index, tag = %tag.tag, genre,
                        category = self.vocabulary.category_of(genre).unwrap_or("-"),
                        "tag.genre");
                }
            }

            if song_emotions.is_empty() || song_genres.is_empty() {
                acc.skipped += 1;
                continue;
            }

            for (emotion, emotion_count) in &song_emotions {
                let genres = acc.associations.entry(emotion.to_string()).or_default();
                for (genre, genre_count) in &song_genres {
                    let strength = (*emotion_count as f64 + *genre_count as f64) / 2.0;
                    *genres.entry(genre.to_string()).or_insert(0.0) += strength;
                }
            }
            acc.processed += 1;
        }

        info!(processed = acc.processed, skipped = acc.skipped, "songs.accumulated");
        acc
    }

    /// Phase 3
    pub fn shape(&self, associations: &AssociationMap) -> ResultTree {
        let mut ranked: Vec<(&String, &BTreeMap<String, f64>, f64)> = associations.iter()
            .map(|(emotion, genres)| (emotion, genres, genres.values().sum::<f64>()))
            .collect();
        ranked.sort_by(|a, b| by_score_then_name((a.0, a.2), (b.0, b.2)));

        let children: Vec<EmotionNode> = ranked.into_iter()
            .map(|(emotion, genres, _)| self.emotion_node(emotion, genres))
            .collect();

        info!(emotions = children.len(), "tree.shaped");
        for node in children.iter().take(self.config.top_summary) {
            let total = format!("{:.2}", node.total());
            info!(emotion = %node.name, total = %total, color = %node.color, "tree.top");
        }

        ResultTree { name: self.config.root_name.clone(), children }
    }

    fn emotion_node(&self, emotion: &str, genres: &BTreeMap<String, f64>) -> EmotionNode {
        let mut leaves: Vec<(&String, f64)> = genres.iter()
            .map(|(genre, score)| (genre, *score))
            .collect();
        leaves.sort_by(|a, b| by_score_then_name(*a, *b));
        leaves.truncate(self.config.top_genres);

        EmotionNode {
            name: emotion.to_string(),
            color: self.palette.color_for(emotion).to_string(),
            children: leaves.into_iter()
                .map(|(genre, value)| GenreLeaf {
                    name: genre.clone(),
                    value,
                    emotion: emotion.to_string()
                })
                .collect()
        }
    }
}

/// Descending score, then ascending name
fn by_score_then_name(a: (&String, f64), b: (&String, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}
