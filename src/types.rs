use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// Tag counts as written by the dumps: plain integers, integral floats
/// such as `3.0`, or integers past the i64 range, which saturate
fn tag_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>
{
    let n = serde_json::Number::deserialize(deserializer)?;

    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match n.as_f64() {
        // `as` saturates at the i64 bounds
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("nbr_tags must be a whole number (got {n})")))
    }
}

/// One entry of the emotion-tags source, as it appears on disk
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionTagEntry {
    #[serde(default)]
    pub emotions: Vec<EmotionTag>
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmotionTag {
    pub emotion_tag: String,
    #[serde(default, deserialize_with = "tag_count")]
    pub nbr_tags: i64
}

/// One entry of the social-tags source. Unlike emotions, a social tag
/// without a count is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialTagEntry {
    #[serde(default)]
    pub socials: Vec<SocialTag>
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialTag {
    pub social_tag: String,
    #[serde(deserialize_with = "tag_count")]
    pub nbr_tags: i64
}

/// A lowercased tag and how many times it was applied to a song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: i64
}

impl TagCount {
    pub fn new(tag: &str, count: i64) -> Self {
        Self { tag: tag.to_lowercase(), count }
    }
}

/// Normalized view of a song's tags, whichever source it came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongTags {
    pub tags: Vec<TagCount>
}

impl From<EmotionTagEntry> for SongTags {
    fn from(entry: EmotionTagEntry) -> Self {
        let tags = entry.emotions.iter()
            .map(|e| TagCount::new(&e.emotion_tag, e.nbr_tags))
            .collect();
        Self { tags }
    }
}

impl From<SocialTagEntry> for SongTags {
    fn from(entry: SocialTagEntry) -> Self {
        let tags = entry.socials.iter()
            .map(|s| TagCount::new(&s.social_tag, s.nbr_tags))
            .collect();
        Self { tags }
    }
}

///
/// Output tree consumed by the treemap
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTree {
    pub name: String,
    pub children: Vec<EmotionNode>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionNode {
    pub name: String,
    pub color: String,
    pub children: Vec<GenreLeaf>
}

impl EmotionNode {
    /// Sum of the kept genre values
    pub fn total(&self) -> f64 {
        self.children.iter().map(|g| g.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreLeaf {
    pub name: String,
    pub value: f64,
    pub emotion: String
}
