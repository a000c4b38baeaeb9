use std::path::PathBuf;

use crate::errors::AggregatorError;

/// Defaults for input/output locations, relative to the scripts directory
pub const EMOTION_TAGS_PATH: &str = "../data/emotion-tags.json";
pub const SOCIAL_TAGS_PATH: &str = "../data/social-tags.json";
pub const OUTPUT_PATH: &str = "../data/emotion_genre_map.json";

pub const TOP_GENRES: usize = 20;
pub const TOP_SUMMARY: usize = 10;
pub const ROOT_NAME: &str = "Music Emotions and Genres";

/// Wrapper over a lookup that treats blank values as unset
fn env_value<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>
{
    env(key).filter(|v| !v.trim().is_empty())
}

fn env_path<F>(env: &F, key: &str, default: &str) -> Result<PathBuf, AggregatorError>
where
    F: Fn(&str) -> Option<String>
{
    match env(key) {
        Some(v) if v.trim().is_empty() => Err(AggregatorError::Config(
            format!("{key} is set but empty")
        )),
        Some(v) => Ok(PathBuf::from(v.trim())),
        None => Ok(PathBuf::from(default))
    }
}

fn env_usize<F>(env: &F, key: &str, default: usize) -> Result<usize, AggregatorError>
where
    F: Fn(&str) -> Option<String>
{
    match env_value(env, key) {
        Some(v) => v.trim().parse::<usize>().map_err(|e| AggregatorError::Config(
            format!("{key} invalid ({v}): {e}")
        )),
        None => Ok(default)
    }
}

///
/// Where the two sources are read from and where the tree is written
///
#[derive(Debug, Clone)]
pub struct PathConfig {
    pub emotion_tags: PathBuf,
    pub social_tags: PathBuf,
    pub output: PathBuf
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            emotion_tags: PathBuf::from(EMOTION_TAGS_PATH),
            social_tags: PathBuf::from(SOCIAL_TAGS_PATH),
            output: PathBuf::from(OUTPUT_PATH)
        }
    }
}

fn build_paths<F>(env: &F) -> Result<PathConfig, AggregatorError>
where
    F: Fn(&str) -> Option<String>
{
    let emotion_tags = env_path(env, "EMOTION_TAGS_PATH", EMOTION_TAGS_PATH)?;
    let social_tags  = env_path(env, "SOCIAL_TAGS_PATH", SOCIAL_TAGS_PATH)?;
    let output       = env_path(env, "EMOTION_GENRE_OUTPUT", OUTPUT_PATH)?;

    Ok( PathConfig { emotion_tags, social_tags, output } )
}

///
/// Knobs for result shaping and the diagnostic summaries
///
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    pub root_name: String,
    pub top_genres: usize,   // genre leaves kept per emotion
    pub top_summary: usize   // rows printed in phase summaries
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            root_name: ROOT_NAME.to_string(),
            top_genres: TOP_GENRES,
            top_summary: TOP_SUMMARY
        }
    }
}

fn build_aggregation<F>(env: &F) -> Result<AggregationConfig, AggregatorError>
where
    F: Fn(&str) -> Option<String>
{
    let top_genres  = env_usize(env, "TOP_GENRES", TOP_GENRES)?;
    let top_summary = env_usize(env, "TOP_SUMMARY", TOP_SUMMARY)?;

    if top_genres == 0 {
        return Err(AggregatorError::Config("TOP_GENRES must be at least 1".into()));
    }

    Ok( AggregationConfig {
        root_name: ROOT_NAME.to_string(),
        top_genres,
        top_summary
    })
}

///
/// Configuration for Logger
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter_directives: String,
    pub format: LogFormat,
    pub include_file_line: bool,
    pub include_target: bool
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter_directives: "info,emotion_genre_map=debug".to_string(),
            format: LogFormat::Pretty,
            include_file_line: false,
            include_target: true
        }
    }
}

fn build_logging<F>(env: &F) -> Result<LoggingConfig, AggregatorError>
where
    F: Fn(&str) -> Option<String>
{
    let mut logging = LoggingConfig::default();

    if let Some(format) = env_value(env, "LOG_FORMAT") {
        logging.format = match format.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json"   => LogFormat::Json,
            other    => return Err(AggregatorError::Config(
                format!("LOG_FORMAT must be pretty or json (got {other})")
            ))
        };
    }

    // json lines are usually shipped somewhere, keep the call site
    logging.include_file_line = logging.format == LogFormat::Json;
    Ok(logging)
}

///
/// AppConfig holding everything the run needs
///
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: PathConfig,
    pub aggregation: AggregationConfig,
    pub logging: LoggingConfig
}

///
/// Reads `.env` if present, then the process environment.
///
pub fn load_config() -> Result<AppConfig, AggregatorError> {
    dotenvy::dotenv().ok();
    load_config_from(|key| std::env::var(key).ok())
}

pub fn load_config_from<F>(env: F) -> Result<AppConfig, AggregatorError>
where
    F: Fn(&str) -> Option<String>
{
    let paths       = build_paths(&env)?;
    let aggregation = build_aggregation(&env)?;
    let logging     = build_logging(&env)?;

    Ok( AppConfig { paths, aggregation, logging } )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() -> Result<(), AggregatorError> {
        let cfgs = load_config_from(lookup(&[]))?;

        assert_eq!(cfgs.paths.emotion_tags, PathBuf::from(EMOTION_TAGS_PATH));
        assert_eq!(cfgs.paths.social_tags, PathBuf::from(SOCIAL_TAGS_PATH));
        assert_eq!(cfgs.paths.output, PathBuf::from(OUTPUT_PATH));
        assert_eq!(cfgs.aggregation.top_genres, 20);
        assert_eq!(cfgs.aggregation.top_summary, 10);
        assert_eq!(cfgs.aggregation.root_name, "Music Emotions and Genres");
        assert_eq!(cfgs.logging.format, LogFormat::Pretty);
        Ok(())
    }

    #[test]
    fn overrides_are_applied() -> Result<(), AggregatorError> {
        let cfgs = load_config_from(lookup(&[
            ("EMOTION_TAGS_PATH", "/tmp/e.json"),
            ("SOCIAL_TAGS_PATH", " /tmp/s.json "),
            ("EMOTION_GENRE_OUTPUT", "/tmp/out.json"),
            ("TOP_GENRES", "5"),
            ("LOG_FORMAT", "JSON"),
        ]))?;

        assert_eq!(cfgs.paths.emotion_tags, PathBuf::from("/tmp/e.json"));
        assert_eq!(cfgs.paths.social_tags, PathBuf::from("/tmp/s.json"));
        assert_eq!(cfgs.paths.output, PathBuf::from("/tmp/out.json"));
        assert_eq!(cfgs.aggregation.top_genres, 5);
        assert_eq!(cfgs.logging.format, LogFormat::Json);
        assert!(cfgs.logging.include_file_line);
        Ok(())
    }

    #[test]
    fn bad_values_are_config_errors() {
        let cases: [&[(&str, &str)]; 4] = [
            &[("TOP_GENRES", "twenty")],
            &[("TOP_GENRES", "0")],
            &[("LOG_FORMAT", "xml")],
            &[("EMOTION_GENRE_OUTPUT", "  ")],
        ];

        for pairs in cases {
            let result = load_config_from(lookup(pairs));
            assert!(
                matches!(result, Err(AggregatorError::Config(_))),
                "expected config error for {pairs:?}"
            );
        }
    }
}
