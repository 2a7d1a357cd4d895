//! Assembly configuration.
//!
//! Settings can be built in code or read from environment variables prefixed
//! with `FEATUREDOC_`. A [`Configuration`] is immutable once built and can be
//! shared by any number of concurrent assemblies.
//!
//! # Environment Variables
//!
//! - `FEATUREDOC_HIDE_TAGS`: `;`-separated tags removed from visible output
//! - `FEATUREDOC_EXCLUDE_TAGS`: `;`-separated tags that drop a scenario, or
//!   the whole feature when declared at feature level
//! - `FEATUREDOC_KEEP_COMMENTS`: keep source comments for rendering
//! - `FEATUREDOC_COMMENT_PARSING`: comment parsing selector; `RCIS.CIMax`
//!   derives theme and story tags from comments
//! - `FEATUREDOC_LOG_LEVEL`: trace, debug, info, warn or error; `RUST_LOG`
//!   directives take precedence when set

use std::env;
use std::str::FromStr;

use tracing::Level;

use crate::error::ConfigError;

const HIDE_TAGS_VAR: &str = "FEATUREDOC_HIDE_TAGS";
const EXCLUDE_TAGS_VAR: &str = "FEATUREDOC_EXCLUDE_TAGS";
const KEEP_COMMENTS_VAR: &str = "FEATUREDOC_KEEP_COMMENTS";
const COMMENT_PARSING_VAR: &str = "FEATUREDOC_COMMENT_PARSING";
const LOG_LEVEL_VAR: &str = "FEATUREDOC_LOG_LEVEL";

/// Comment parsing selector that enables theme and story tag derivation.
pub const REFERENCE_TAG_SELECTOR: &str = "RCIS.CIMax";

/// A case-insensitive set of tag names.
///
/// Entries are stored without the leading `@`, so `exclude-tag` and
/// `@Exclude-Tag` configure the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet {
    names: Vec<String>,
}

impl TagSet {
    /// Parse a `;`- or `,`-separated list of tag names.
    ///
    /// Blank entries are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc::config::TagSet;
    ///
    /// let set = TagSet::parse("TagsToHideFeature; @exclude-tag;;");
    /// assert!(set.contains_tag("@EXCLUDE-TAG"));
    /// assert!(set.contains_tag("@tagstohidefeature"));
    /// assert!(!set.contains_tag("@other"));
    /// ```
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split([';', ','])
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// Whether `tag` (with or without `@`) matches an entry, ignoring case.
    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        let name = strip_at(tag.trim());
        self.names.iter().any(|entry| entry.eq_ignore_ascii_case(name))
    }

    /// Whether any of `tags` matches an entry.
    #[must_use]
    pub fn matches_any<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        !self.is_empty() && tags.into_iter().any(|tag| self.contains_tag(tag))
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entry names without `@`, in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names: Vec<String> = Vec::new();
        for entry in iter {
            let name = strip_at(entry.as_ref().trim());
            if name.is_empty() || names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                continue;
            }
            names.push(name.to_string());
        }
        Self { names }
    }
}

fn strip_at(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}

/// What happens to source comments during assembly.
///
/// Replaces the pair "keep comments" / "comment parsing selector"; see
/// [`CommentMode::from_settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentMode {
    /// Comments are not collected.
    #[default]
    Ignore,
    /// Comments are collected and attached to steps for rendering.
    Retain,
    /// Comments are collected to derive tags, then discarded.
    DeriveTags,
    /// Comments are collected, tags are derived, and comments are kept.
    DeriveTagsAndRetain,
}

impl CommentMode {
    /// Map the legacy pair of settings onto a mode.
    ///
    /// An empty `selector` disables parsing; [`REFERENCE_TAG_SELECTOR`] enables
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for any other selector.
    pub fn from_settings(retain: bool, selector: &str) -> Result<Self, ConfigError> {
        let derive = match selector.trim() {
            "" => false,
            REFERENCE_TAG_SELECTOR => true,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: COMMENT_PARSING_VAR,
                    value: other.to_string(),
                    expected: "an empty value or RCIS.CIMax",
                });
            }
        };
        Ok(match (retain, derive) {
            (false, false) => Self::Ignore,
            (true, false) => Self::Retain,
            (false, true) => Self::DeriveTags,
            (true, true) => Self::DeriveTagsAndRetain,
        })
    }

    /// Whether comments are collected at all.
    #[must_use]
    pub const fn collects(self) -> bool {
        !matches!(self, Self::Ignore)
    }

    /// Whether theme and story tags are derived.
    #[must_use]
    pub const fn derives_tags(self) -> bool {
        matches!(self, Self::DeriveTags | Self::DeriveTagsAndRetain)
    }

    /// Whether comments survive into the finished model.
    #[must_use]
    pub const fn retains(self) -> bool {
        matches!(self, Self::Retain | Self::DeriveTagsAndRetain)
    }
}

/// Verbosity of the stderr subscriber installed by
/// [`init_logging`](crate::logging::init_logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every derived tag and unattached comment.
    Trace,
    /// Exclusion decisions and per-feature summaries.
    Debug,
    /// Quiet unless something is wrong.
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::TRACE => Self::Trace,
            Level::DEBUG => Self::Debug,
            Level::INFO => Self::Info,
            Level::WARN => Self::Warn,
            Level::ERROR => Self::Error,
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Level>()
            .map(Self::from)
            .map_err(|_| ConfigError::InvalidValue {
                key: LOG_LEVEL_VAR,
                value: s.to_string(),
                expected: "one of trace, debug, info, warn, error",
            })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected: "a boolean (true/false, yes/no, on/off, 1/0)",
        }),
    }
}

/// Settings that shape the assembled model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    /// Tags removed from visible tag lists.
    pub hide_tags: TagSet,
    /// Tags that suppress a scenario or a whole feature.
    pub exclude_tags: TagSet,
    /// Comment collection and tag derivation behaviour.
    pub comment_mode: CommentMode,
    /// Verbosity used by [`crate::logging::init_logging`].
    pub log_level: LogLevel,
}

impl Configuration {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable holds a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Missing variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hide_tags = lookup(HIDE_TAGS_VAR)
            .map(|v| TagSet::parse(&v))
            .unwrap_or_default();
        let exclude_tags = lookup(EXCLUDE_TAGS_VAR)
            .map(|v| TagSet::parse(&v))
            .unwrap_or_default();
        let retain = match lookup(KEEP_COMMENTS_VAR) {
            Some(value) => parse_bool(KEEP_COMMENTS_VAR, &value)?,
            None => false,
        };
        let selector = lookup(COMMENT_PARSING_VAR).unwrap_or_default();
        let comment_mode = CommentMode::from_settings(retain, &selector)?;
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(value) => value.parse()?,
            None => LogLevel::default(),
        };

        Ok(Self {
            hide_tags,
            exclude_tags,
            comment_mode,
            log_level,
        })
    }

    /// Replace the hidden tags.
    #[must_use]
    pub fn with_hide_tags(mut self, tags: TagSet) -> Self {
        self.hide_tags = tags;
        self
    }

    /// Replace the excluded tags.
    #[must_use]
    pub fn with_exclude_tags(mut self, tags: TagSet) -> Self {
        self.exclude_tags = tags;
        self
    }

    /// Replace the comment mode.
    #[must_use]
    pub fn with_comment_mode(mut self, mode: CommentMode) -> Self {
        self.comment_mode = mode;
        self
    }

    /// Replace the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn tag_set_ignores_case_and_at_prefix() {
        let set = TagSet::parse("Exclude-Tag");
        assert!(set.contains_tag("@exclude-tag"));
        assert!(set.contains_tag("@EXCLUDE-TAG"));
        assert!(set.contains_tag("exclude-tag"));
        assert!(!set.contains_tag("@exclude"));
    }

    #[test]
    fn tag_set_skips_blanks_and_duplicates() {
        let set = TagSet::parse(" a ;; ,@A; b ");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn empty_tag_set_matches_nothing() {
        let tags = vec!["@anything".to_string()];
        assert!(!TagSet::default().matches_any(&tags));
    }

    #[rstest]
    #[case(false, "", CommentMode::Ignore)]
    #[case(true, "", CommentMode::Retain)]
    #[case(false, "RCIS.CIMax", CommentMode::DeriveTags)]
    #[case(true, " RCIS.CIMax ", CommentMode::DeriveTagsAndRetain)]
    fn comment_mode_from_settings(
        #[case] retain: bool,
        #[case] selector: &str,
        #[case] expected: CommentMode,
    ) {
        assert_eq!(CommentMode::from_settings(retain, selector).unwrap(), expected);
    }

    #[test]
    fn unknown_selector_is_rejected() {
        let result = CommentMode::from_settings(false, "Other.Mode");
        assert!(result.unwrap_err().to_string().contains("Other.Mode"));
    }

    #[rstest]
    #[case(CommentMode::Ignore, false, false, false)]
    #[case(CommentMode::Retain, true, false, true)]
    #[case(CommentMode::DeriveTags, true, true, false)]
    #[case(CommentMode::DeriveTagsAndRetain, true, true, true)]
    fn comment_mode_flags(
        #[case] mode: CommentMode,
        #[case] collects: bool,
        #[case] derives: bool,
        #[case] retains: bool,
    ) {
        assert_eq!(mode.collects(), collects);
        assert_eq!(mode.derives_tags(), derives);
        assert_eq!(mode.retains(), retains);
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!("TRACE".parse::<LogLevel>().ok(), Some(LogLevel::Trace));
        assert_eq!(" Warn ".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Configuration::from_lookup(|_| None).unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.comment_mode, CommentMode::Ignore);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn reads_every_setting_from_lookup() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("FEATUREDOC_HIDE_TAGS", "TagsToHideFeature;TagsToHideScenario"),
            ("FEATUREDOC_EXCLUDE_TAGS", "exclude-tag"),
            ("FEATUREDOC_KEEP_COMMENTS", "yes"),
            ("FEATUREDOC_COMMENT_PARSING", "RCIS.CIMax"),
            ("FEATUREDOC_LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert!(config.hide_tags.contains_tag("@tagstohidescenario"));
        assert!(config.exclude_tags.contains_tag("@Exclude-Tag"));
        assert_eq!(config.comment_mode, CommentMode::DeriveTagsAndRetain);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn rejects_invalid_boolean() {
        let result =
            Configuration::from_lookup(lookup_from(&[("FEATUREDOC_KEEP_COMMENTS", "maybe")]));
        assert!(result.unwrap_err().to_string().contains("FEATUREDOC_KEEP_COMMENTS"));
    }

    #[test]
    fn builders_replace_selected_fields() {
        let config = Configuration::default()
            .with_exclude_tags(TagSet::parse("wip"))
            .with_comment_mode(CommentMode::Retain)
            .with_log_level(LogLevel::Error);
        assert!(config.exclude_tags.contains_tag("@WIP"));
        assert!(config.hide_tags.is_empty());
        assert_eq!(config.comment_mode, CommentMode::Retain);
        assert_eq!(config.log_level, LogLevel::Error);
    }
}
