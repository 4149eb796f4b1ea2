//! The closed genre vocabulary and the free-text normalizer that maps
//! model answers onto it.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A movie genre known to the catalog service.
///
/// Every genre carries a fixed TMDB numeric id; resolution and lookup only
/// ever exchange values of this enum, so an out-of-vocabulary genre cannot
/// reach the catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    Romance,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::Romance,
        Genre::Thriller,
        Genre::SciFi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
        }
    }

    /// TMDB genre id used by the discover endpoint
    pub fn tmdb_id(&self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Comedy => 35,
            Genre::Drama => 18,
            Genre::Horror => 27,
            Genre::Romance => 10749,
            Genre::Thriller => 53,
            Genre::SciFi => 878,
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alias table for normalization, in priority order.
///
/// When cleaned input contains several alias tokens, the first table entry
/// that matches wins, regardless of where its token sits in the input. The
/// order here is the documented tie-break, not an accident of map iteration.
pub const GENRE_ALIASES: &[(&str, Genre)] = &[
    ("action", Genre::Action),
    ("comedy", Genre::Comedy),
    ("drama", Genre::Drama),
    ("horror", Genre::Horror),
    ("romance", Genre::Romance),
    ("thriller", Genre::Thriller),
    ("scifi", Genre::SciFi),
    ("sci fi", Genre::SciFi),
    ("sci-fi", Genre::SciFi),
];

lazy_static! {
    /// Everything that is not a letter, whitespace or hyphen gets replaced by a space
    static ref NON_GENRE_CHARS_RE: Regex = Regex::new(r"[^a-zA-Z\s-]").unwrap();

    /// Internal whitespace runs collapse to single spaces
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();

    /// Whole-word patterns per alias, same order as the alias table
    static ref ALIAS_WORD_PATTERNS: Vec<(Regex, Genre)> = GENRE_ALIASES
        .iter()
        .map(|(alias, genre)| {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(alias))).unwrap();
            (pattern, *genre)
        })
        .collect();
}

/// Canonicalize free-form genre text into a [`Genre`].
///
/// Returns `None` when nothing matches; that is a normal outcome the caller
/// handles, not an error.
pub fn normalize_genre(raw: &str) -> Option<Genre> {
    if raw.is_empty() {
        return None;
    }

    let cleaned = NON_GENRE_CHARS_RE.replace_all(raw, " ").to_lowercase();
    let cleaned = WHITESPACE_RE
        .replace_all(cleaned.trim(), " ")
        .into_owned();

    if cleaned.is_empty() {
        return None;
    }

    for (alias, genre) in GENRE_ALIASES {
        if cleaned == *alias {
            return Some(*genre);
        }
    }

    for (pattern, genre) in ALIAS_WORD_PATTERNS.iter() {
        if pattern.is_match(&cleaned) {
            return Some(*genre);
        }
    }

    None
}
