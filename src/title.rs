//! Title and year extraction from movie folder names.
//!
//! Release folders name the same movie in many ways:
//!
//! - `The Matrix (1999)`
//! - `The.Matrix.1999.1080p.BluRay.x264`
//! - `The Matrix - 1999 - Remastered`
//!
//! [`normalize`] reduces all of them to one [`NormalizedKey`],
//! `"The Matrix (1999)"`, which is what the grouping engine buckets on.
//!
//! # Rules
//!
//! 1. A parenthesized four digit year (`( 1999 )`, inner spaces allowed) wins.
//! 2. Otherwise a bare four digit year preceded by `.`, `-` or whitespace and
//!    followed by `.`, `-`, whitespace or the end of the name.
//! 3. Everything before the year is the title, trimmed of ` .,-`. A title
//!    written scene-style (dots between words, no whitespace) has its dots
//!    read as spaces.
//!
//! Only the leftmost match of each pattern is used. Case and diacritics are
//! kept as-is, so `the matrix (1999)` and `The Matrix (1999)` are different
//! keys.
//!
//! # Example
//!
//! ```
//! use movie_dupecheck::title::normalize;
//!
//! assert_eq!(normalize("The Matrix (1999)").as_str(), "The Matrix (1999)");
//! assert_eq!(normalize("The.Matrix.1999.1080p").as_str(), "The Matrix (1999)");
//! assert_eq!(normalize(None).as_str(), "");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// `( 1999 )` style year, inner whitespace allowed.
static RE_PAREN_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*(\d{4})\s*\)").expect("Invalid parenthesized year regex"));

/// `.1999.` / `-1999` / ` 1999` style year. The trailing separator is consumed,
/// which is harmless because only the match start and the capture are used.
static RE_BARE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\-\s](\d{4})(?:[.\-\s]|$)").expect("Invalid bare year regex"));

/// Canonical grouping key: `"<title> (<year>)"` or `"<title>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what the cross-collection filter compares.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Check if the key is empty (empty or absent input).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title-cased title without the year, for display.
    #[must_use]
    pub fn display_title(&self) -> String {
        display_title(&self.0)
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Title and optional year pulled out of a raw name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleYear<'a> {
    /// Title span with surrounding ` .,-` removed
    pub title: &'a str,
    /// Four digit year, if one was found
    pub year: Option<&'a str>,
}

/// Split a raw name into title and year.
///
/// The parenthesized form has priority over the bare form. If neither is
/// present the whole name is the title.
#[must_use]
pub fn split_title_year(name: &str) -> TitleYear<'_> {
    let found = RE_PAREN_YEAR
        .captures(name)
        .or_else(|| RE_BARE_YEAR.captures(name))
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let year = caps.get(1)?;
            Some((whole.start(), year.as_str()))
        });

    let (title_end, year) = match found {
        Some((start, year)) => (start, Some(year)),
        None => (name.len(), None),
    };

    TitleYear {
        title: trim_title(&name[..title_end]),
        year,
    }
}

/// Title with scene-style dots turned into spaces.
///
/// `The.Matrix` reads as `The Matrix`; `Mr. Smith` already has spaces and is
/// left alone.
fn title_words(title: &str) -> Cow<'_, str> {
    if title.contains('.') && !title.contains(char::is_whitespace) {
        Cow::Owned(title.replace('.', " "))
    } else {
        Cow::Borrowed(title)
    }
}

/// Normalize a raw folder or manifest name into its grouping key.
///
/// Accepts `&str` or `Option<&str>`; absent and empty input both yield the
/// empty key.
#[must_use]
pub fn normalize<'a>(name: impl Into<Option<&'a str>>) -> NormalizedKey {
    let Some(name) = name.into().filter(|n| !n.is_empty()) else {
        return NormalizedKey::default();
    };

    let parts = split_title_year(name);
    let title = title_words(parts.title);
    let key = match parts.year {
        Some(year) => format!("{} ({})", title, year),
        None => title.into_owned(),
    };

    log::trace!("Normalized '{}' -> '{}'", name, key);
    NormalizedKey(key)
}

/// Display form of a key: text before the first `(`, trimmed, word-initial
/// capitalized.
///
/// A letter that follows a non-letter is uppercased, every other letter is
/// lowercased, so `"o'neil"` becomes `"O'Neil"` and `"3d"` becomes `"3D"`.
#[must_use]
pub fn display_title(key: &str) -> String {
    let head = key.split('(').next().unwrap_or_default().trim();

    let mut out = String::with_capacity(head.len());
    let mut prev_cased = false;
    for c in head.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && !prev_cased {
            out.extend(c.to_uppercase());
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

fn trim_title(span: &str) -> &str {
    span.trim_matches(|c| matches!(c, ' ' | '.' | ',' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_parenthesized_year() {
        assert_eq!(normalize("The Matrix (1999)").as_str(), "The Matrix (1999)");
        assert_eq!(normalize("Alien ( 1979 )").as_str(), "Alien (1979)");
        assert_eq!(
            normalize("Blade Runner (1982) Final Cut 2160p").as_str(),
            "Blade Runner (1982)"
        );
    }

    #[test]
    fn test_normalize_dotted_release_name() {
        assert_eq!(normalize("The.Matrix.1999.1080p").as_str(), "The Matrix (1999)");
        assert_eq!(normalize("The Matrix (1999)"), normalize("The.Matrix.1999.1080p"));
    }

    #[test]
    fn test_normalize_keeps_dots_in_spaced_titles() {
        assert_eq!(normalize("Mr. Smith Goes (1939)").as_str(), "Mr. Smith Goes (1939)");
        assert_eq!(normalize("Dr. Strangelove").as_str(), "Dr. Strangelove");
    }

    #[test]
    fn test_normalize_matches_across_styles() {
        assert_eq!(normalize("Alien.1979.Extended").as_str(), "Alien (1979)");
        assert_eq!(normalize("Alien (1979)"), normalize("Alien.1979.Extended"));
        assert_eq!(normalize("Alien - 1979 - Remastered").as_str(), "Alien (1979)");
        assert_eq!(normalize("Alien 1979").as_str(), "Alien (1979)");
    }

    #[test]
    fn test_normalize_parenthesized_beats_bare() {
        // The bare year comes first, but the parenthesized one wins.
        assert_eq!(normalize("Movie 2001 Edition (1984)").as_str(), "Movie 2001 Edition (1984)");
    }

    #[test]
    fn test_normalize_leftmost_year_wins() {
        assert_eq!(normalize("Movie (1984) (2019 Remaster)").as_str(), "Movie (1984)");
        assert_eq!(normalize("Blade.Runner.2049.2017.2160p").as_str(), "Blade Runner (2049)");
    }

    #[test]
    fn test_normalize_no_year() {
        assert_eq!(normalize("Some Documentary").as_str(), "Some Documentary");
        assert_eq!(normalize("  Trailing dots... ").as_str(), "Trailing dots");
        assert_eq!(normalize("-Weird, Name-").as_str(), "Weird, Name");
    }

    #[test]
    fn test_normalize_year_not_isolated() {
        // Five digits or glued digits are not years.
        assert_eq!(normalize("Area51999").as_str(), "Area51999");
        assert_eq!(normalize("Movie (19999)").as_str(), "Movie (19999)");
        assert_eq!(normalize("Movie-1999x").as_str(), "Movie-1999x");
    }

    #[test]
    fn test_normalize_empty_and_absent() {
        assert_eq!(normalize("").as_str(), "");
        assert_eq!(normalize(None).as_str(), "");
        assert!(normalize(None).is_empty());
    }

    #[test]
    fn test_normalize_keeps_case() {
        assert_ne!(normalize("the matrix (1999)"), normalize("The Matrix (1999)"));
    }

    #[test]
    fn test_normalize_year_only() {
        // Empty title, the key is still built from the year.
        assert_eq!(normalize("(1999)").as_str(), " (1999)");
    }

    #[test]
    fn test_split_title_year() {
        let parts = split_title_year("Heat.1995.REMASTERED.1080p");
        assert_eq!(parts.title, "Heat");
        assert_eq!(parts.year, Some("1995"));

        let parts = split_title_year("Heat");
        assert_eq!(parts.title, "Heat");
        assert_eq!(parts.year, None);
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(normalize("Amélie").char_len(), 6);
        assert_eq!(normalize("Be").char_len(), 2);
    }

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("the matrix (1999)"), "The Matrix");
        assert_eq!(display_title("ALIEN (1979)"), "Alien");
        assert_eq!(display_title("o'neil"), "O'Neil");
        assert_eq!(display_title("jaws 3d"), "Jaws 3D");
        assert_eq!(display_title(""), "");
        assert_eq!(normalize("Heat.1995").display_title(), "Heat");
    }
}
