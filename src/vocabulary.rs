//!
//! src/vocabulary.rs
//!
//! Static genre vocabulary and emotion color table. Built once at start
//! and handed to the aggregator by reference.
//!
//!

use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_COLOR: &str = "#808080";

pub const GENRE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Rock", &[
        "rock", "hard rock", "classic rock", "alternative rock", "punk rock",
        "progressive rock", "psychedelic rock", "indie rock", "garage rock",
        "art rock", "folk rock", "blues rock", "post rock", "southern rock",
    ]),
    ("Metal", &[
        "metal", "heavy metal", "black metal", "death metal", "thrash metal",
        "doom metal", "power metal", "progressive metal", "gothic metal",
        "symphonic metal", "folk metal", "industrial metal",
    ]),
    ("Electronic", &[
        "electronic", "electronica", "techno", "house", "trance", "ambient",
        "drum and bass", "dubstep", "idm", "synthpop", "electro", "industrial",
        "dance", "edm",
    ]),
    ("Pop", &[
        "pop", "indie pop", "synth pop", "power pop", "dream pop", "baroque pop",
        "art pop", "chamber pop", "dance pop", "electropop",
    ]),
    ("Hip-Hop", &[
        "hip hop", "hip-hop", "rap", "gangsta rap", "underground hip hop",
        "conscious hip hop", "trap", "grime",
    ]),
    ("Jazz", &[
        "jazz", "fusion", "bebop", "swing", "free jazz", "acid jazz",
        "contemporary jazz", "smooth jazz", "latin jazz",
    ]),
    ("Blues", &[
        "blues", "delta blues", "chicago blues", "rhythm and blues", "rnb",
        "contemporary blues",
    ]),
    ("Folk and Country", &[
        "folk", "contemporary folk", "traditional folk", "country",
        "americana", "bluegrass", "singer-songwriter",
    ]),
    ("World", &[
        "world", "latin", "reggae", "ska", "afrobeat", "bossa nova", "samba",
        "salsa", "flamenco", "celtic",
    ]),
    ("Classical", &[
        "classical", "contemporary classical", "baroque", "opera", "chamber music",
        "symphony", "orchestral",
    ]),
    ("Other", &[
        "experimental", "avant-garde", "indie", "alternative", "fusion",
        "instrumental", "acoustic", "soul", "funk", "disco", "gospel",
        "soundtrack", "ambient", "new age",
    ]),
];

pub const EMOTION_COLORS: &[(&str, &str)] = &[
    // calm / peaceful
    ("mellow", "#89CFF0"),
    ("calm", "#7CB9E8"),
    ("relaxing", "#73C2FB"),
    ("relax", "#73C2FB"),
    ("peaceful", "#B6D0E2"),
    ("tranquil", "#A5D7E8"),
    ("serene", "#89CFF0"),
    ("serenity", "#89CFF0"),
    ("gentle", "#B6D0E2"),
    ("quiet", "#D6E2E9"),
    ("soft", "#C3E0E5"),
    ("soothing", "#A5D7E8"),
    // sad / melancholic
    ("sad", "#4B0082"),
    ("melancholy", "#483D8B"),
    ("melancholic", "#483D8B"),
    ("blue", "#4169E1"),
    ("heartbreak", "#2E4053"),
    ("gloomy", "#34495E"),
    ("sorrow", "#4B0082"),
    ("grief", "#2C3E50"),
    ("depressive", "#2C3E50"),
    ("bleak", "#34495E"),
    // happy / joyful
    ("happy", "#FFD700"),
    ("fun", "#FFB347"),
    ("joyful", "#FFC30B"),
    ("cheerful", "#FFD700"),
    ("bright", "#FFE87C"),
    ("lively", "#FFB347"),
    // energetic / intense
    ("energetic", "#FF4500"),
    ("intense", "#FF4500"),
    ("passionate", "#FF0000"),
    ("fierce", "#FF0000"),
    ("exciting", "#FF4500"),
    ("fiery", "#FF0000"),
    // dark / angry
    ("dark", "#1A1A1A"),
    ("angry", "#8B0000"),
    ("aggressive", "#8B0000"),
    ("rage", "#8B0000"),
    // romantic
    ("romantic", "#FF69B4"),
    ("sexy", "#FF1493"),
    ("tender", "#DDA0DD"),
    ("passion", "#FF1493"),
    ("desire", "#FF69B4"),
    // dreamy
    ("dreamy", "#E6E6FA"),
    ("bittersweet", "#DDA0DD"),
    ("poignant", "#D8BFD8"),
    ("delicate", "#E6E6FA"),
    // playful
    ("funny", "#FFA07A"),
    ("humor", "#FFA07A"),
    ("playful", "#FFB347"),
    ("silly", "#FFA07A"),
    ("party", "#FF69B4"),
];

/// Genres in scan order: longest first, then lexicographic. A tag is
/// credited to the first genre that occurs in it, so "hard rock" is
/// found before "rock".
#[derive(Debug, Clone)]
pub struct GenreVocabulary {
    ordered: Vec<String>,
    categories: HashMap<String, String>
}

impl GenreVocabulary {
    pub fn builtin() -> Self {
        let mut categories: HashMap<String, String> = HashMap::new();
        for (category, genres) in GENRE_CATEGORIES {
            for genre in *genres {
                // first listing wins for genres filed twice
                categories.entry(genre.to_lowercase())
                    .or_insert_with(|| category.to_string());
            }
        }
        Self::from_categories(categories)
    }

    /// Flat vocabulary without categories
    #[cfg(test)]
    pub fn from_genres<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let categories = genres.into_iter()
            .map(|g| (g.as_ref().to_lowercase(), String::new()))
            .collect();
        Self::from_categories(categories)
    }

    fn from_categories(categories: HashMap<String, String>) -> Self {
        let mut ordered: Vec<String> = categories.keys().cloned().collect();
        ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { ordered, categories }
    }

    /// First genre in scan order that is a substring of `tag`
    pub fn classify(&self, tag: &str) -> Option<&str> {
        self.ordered.iter()
            .find(|genre| tag.contains(genre.as_str()))
            .map(String::as_str)
    }

    pub fn category_of(&self, genre: &str) -> Option<&str> {
        self.categories.get(genre)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }

    pub fn genres(&self) -> &[String] {
        &self.ordered
    }
}

/// Display color per emotion with a gray fallback
#[derive(Debug, Clone)]
pub struct EmotionPalette {
    colors: BTreeMap<String, String>,
    default: String
}

impl EmotionPalette {
    pub fn builtin() -> Self {
        let colors = EMOTION_COLORS.iter()
            .map(|(emotion, color)| (emotion.to_string(), color.to_string()))
            .collect();
        Self { colors, default: DEFAULT_COLOR.to_string() }
    }

    pub fn color_for(&self, emotion: &str) -> &str {
        self.colors.get(emotion).unwrap_or(&self.default)
    }
}
