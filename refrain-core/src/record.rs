//! Song record, the unit of indexing.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use refrain_types::RecordSummary;

use crate::analyzer::Analyzer;

/// A song: title (primary key), release year, optional album, raw lyrics and
/// the filtered lyrics that get indexed.
///
/// Equality, hashing and ordering compare titles case-insensitively. The
/// title keeps its original case for display.
#[derive(Debug, Clone)]
pub struct Record {
    title: String,
    year: i32,
    album: Option<String>,
    lyrics: String,
    filtered: String,
}

impl Record {
    /// Creates a record, filtering the lyrics with the default analyzer.
    pub fn new(
        title: impl Into<String>,
        year: i32,
        album: Option<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self::with_analyzer(title, year, album, lyrics, &Analyzer::default())
    }

    /// Creates a record, filtering the lyrics with `analyzer`.
    pub fn with_analyzer(
        title: impl Into<String>,
        year: i32,
        album: Option<String>,
        lyrics: impl Into<String>,
        analyzer: &Analyzer,
    ) -> Self {
        let lyrics = lyrics.into();
        let filtered = analyzer.filter(&lyrics);
        Self {
            title: title.into(),
            year,
            album,
            lyrics,
            filtered,
        }
    }

    /// Key-only record used to look up or order by title.
    pub(crate) fn key_only(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            year: 0,
            album: None,
            lyrics: String::new(),
            filtered: String::new(),
        }
    }

    /// Recomputes the filtered lyrics with `analyzer`.
    pub(crate) fn refilter(&mut self, analyzer: &Analyzer) {
        self.filtered = analyzer.filter(&self.lyrics);
    }

    /// Primary key, in its original case.
    #[inline(always)]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year.
    #[inline(always)]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Album name, if known.
    #[inline(always)]
    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    /// Lyrics exactly as imported.
    #[inline(always)]
    pub fn lyrics(&self) -> &str {
        &self.lyrics
    }

    /// Lowercased lyrics with punctuation and stop words removed.
    #[inline(always)]
    pub fn filtered(&self) -> &str {
        &self.filtered
    }

    /// Orders two records by title, ignoring case.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        fold(&self.title).cmp(fold(&other.title))
    }

    /// Owned snapshot for export.
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            title: self.title.clone(),
            year: self.year,
            album: self.album.clone(),
            lyrics: self.lyrics.clone(),
        }
    }
}

#[inline]
fn fold(title: &str) -> impl Iterator<Item = char> + '_ {
    title.chars().flat_map(char::to_lowercase)
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Equal
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in fold(&self.title) {
            state.write_u32(c as u32);
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Album: {}, Year: {}",
            self.title,
            self.album.as_deref().unwrap_or("N/A"),
            self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxBuildHasher;
    use std::hash::BuildHasher;

    fn song(title: &str) -> Record {
        Record::new(title, 2011, Some("21".into()), "We could have had it all, rolling in the deep")
    }

    #[test]
    fn filtered_on_construction() {
        let r = song("Rolling in the Deep");
        assert!(r.filtered().ends_with("rolling deep"));
        assert!(!r.filtered().split(' ').any(|w| w == "we" || w == "the"));
        assert_eq!(r.lyrics(), "We could have had it all, rolling in the deep");
    }

    #[test]
    fn key_equality_ignores_case() {
        let a = song("Hello");
        let b = Record::key_only("HELLO");
        assert_eq!(a, b);
        assert_eq!(FxBuildHasher.hash_one(&a), FxBuildHasher.hash_one(&b));
        assert_ne!(a, Record::key_only("Hello Again"));
    }

    #[test]
    fn ordering_by_title() {
        assert_eq!(song("apple").cmp_key(&song("Banana")), Ordering::Less);
        assert_eq!(song("Zebra").cmp_key(&song("apple")), Ordering::Greater);
        assert_eq!(song("Skyfall").cmp_key(&song("SKYFALL")), Ordering::Equal);
        assert_eq!(song("Hell").cmp_key(&song("hello")), Ordering::Less);
    }

    #[test]
    fn display_line() {
        assert_eq!(
            song("Someone Like You").to_string(),
            "Title: Someone Like You, Album: 21, Year: 2011"
        );
        let single = Record::new("Skyfall", 2012, None, "This is the end");
        assert_eq!(single.to_string(), "Title: Skyfall, Album: N/A, Year: 2012");
    }

    #[test]
    fn summary_copies_fields() {
        let s = song("Hello").summary();
        assert_eq!(s.title, "Hello");
        assert_eq!(s.year, 2011);
        assert_eq!(s.album.as_deref(), Some("21"));
        assert_eq!(s.lyrics, "We could have had it all, rolling in the deep");
    }

    #[test]
    fn refilter_with_other_analyzer() {
        let mut r = song("Hello");
        r.refilter(&Analyzer::new(&refrain_types::EngineConfig::unfiltered()));
        assert_eq!(r.filtered(), "we could have had it all rolling in the deep");
    }
}
