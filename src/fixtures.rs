//! Fixture construction.
//!
//! Nested fixtures encode `MediaTypes -> Movies -> <title> -> {Director, TagLine}`
//! twice: once as a dynamic [`Value`] tree and once as a typed [`MoviesMap`].
//! Both are derived from the same movie table so timings compare like for like.
//!
//! Shallow fixtures are single-level maps with marker keys (`Test1`, `Test2`,
//! ...) spread between blocks of random UUID filler entries.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::value::Value;

pub const MEDIA_TYPES_KEY: &str = "MediaTypes";
pub const MOVIES_KEY: &str = "Movies";
pub const DIRECTOR_KEY: &str = "Director";
pub const TAGLINE_KEY: &str = "TagLine";

/// The movie every traversal accessor reads.
pub const TARGET_MOVIE: &str = "Die Hard 2";
/// Tagline stored under [`TARGET_MOVIE`].
pub const TARGET_TAGLINE: &str = "Die Harder.";
/// Dotted path to the target tagline.
pub const TARGET_KEY_PATH: &str = "MediaTypes.Movies.Die Hard 2.TagLine";

pub const DEFAULT_MARKER_COUNT: usize = 3;
pub const DEFAULT_FILLER_COUNT: usize = 100;

/// Strongly typed four-level map: media type -> movie -> field -> text.
pub type MoviesMap = HashMap<String, HashMap<String, HashMap<String, HashMap<String, String>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movie {
    pub title: &'static str,
    pub director: Option<&'static str>,
    pub tagline: &'static str,
}

pub const MOVIES: [Movie; 4] = [
    Movie {
        title: "Die Hard",
        director: Some("John McTiernan"),
        tagline: "40 Stories of Sheer Adventure!",
    },
    Movie {
        title: TARGET_MOVIE,
        director: Some("Renny Harlin"),
        tagline: TARGET_TAGLINE,
    },
    Movie {
        title: "Die Hard 3",
        director: Some("John McTiernan"),
        tagline: "Fun with a vengeance!",
    },
    Movie {
        title: "Die Hard 4",
        director: Some("Len Wiseman"),
        tagline: "",
    },
];

/// Smallest table that still satisfies every traversal accessor.
pub const MINIMAL_MOVIES: [Movie; 1] = [Movie {
    title: TARGET_MOVIE,
    director: None,
    tagline: TARGET_TAGLINE,
}];

// ---------------------------------------------------------------------------
// Nested fixtures
// ---------------------------------------------------------------------------

/// The dynamic and the typed encoding of one movie table.
#[derive(Debug, Clone)]
pub struct NestedFixtures {
    pub dynamic: Value,
    pub typed: MoviesMap,
}

impl NestedFixtures {
    pub fn from_movies(movies: &[Movie]) -> Self {
        let fixtures = Self {
            dynamic: dynamic_tree(movies),
            typed: typed_tree(movies),
        };
        debug!(
            movies = movies.len(),
            leaves = fixtures.dynamic.leaf_count(),
            "built nested fixtures"
        );
        fixtures
    }

    /// Both encodings hold exactly the same leaves.
    pub fn is_consistent(&self) -> bool {
        let dynamic_leaves = self.dynamic.leaf_count();
        let typed_leaves: usize = self
            .typed
            .values()
            .flat_map(|kinds| kinds.values())
            .flat_map(|movies| movies.values())
            .map(|fields| fields.len())
            .sum();
        if dynamic_leaves != typed_leaves {
            return false;
        }

        self.typed.iter().all(|(media, kinds)| {
            kinds.iter().all(|(kind, movies)| {
                movies.iter().all(|(title, fields)| {
                    fields.iter().all(|(field, text)| {
                        let path = [media.as_str(), kind.as_str(), title.as_str(), field.as_str()];
                        let found = path
                            .iter()
                            .try_fold(&self.dynamic, |node, key| node.get(key))
                            .and_then(Value::as_str);
                        found == Some(text.as_str())
                    })
                })
            })
        })
    }
}

/// Build both nested encodings of the full [`MOVIES`] table.
pub fn build_nested_fixtures() -> NestedFixtures {
    NestedFixtures::from_movies(&MOVIES)
}

fn movie_fields(movie: &Movie) -> Vec<(&'static str, &'static str)> {
    let mut fields = vec![(TAGLINE_KEY, movie.tagline)];
    if let Some(director) = movie.director {
        fields.push((DIRECTOR_KEY, director));
    }
    fields
}

fn dynamic_tree(movies: &[Movie]) -> Value {
    let movies = Value::map(movies.iter().map(|movie| {
        let fields = movie_fields(movie)
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)));
        (movie.title, Value::map(fields))
    }));
    Value::map([(MEDIA_TYPES_KEY, Value::map([(MOVIES_KEY, movies)]))])
}

fn typed_tree(movies: &[Movie]) -> MoviesMap {
    let movies: HashMap<String, HashMap<String, String>> = movies
        .iter()
        .map(|movie| {
            let fields: HashMap<String, String> = movie_fields(movie)
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (movie.title.to_string(), fields)
        })
        .collect();
    HashMap::from([(
        MEDIA_TYPES_KEY.to_string(),
        HashMap::from([(MOVIES_KEY.to_string(), movies)]),
    )])
}

// ---------------------------------------------------------------------------
// Shallow fixtures
// ---------------------------------------------------------------------------

/// Name of the `n`th marker key, counting from 1.
pub fn marker_key(n: usize) -> String {
    format!("Test{}", n)
}

fn random_filler() -> (String, String) {
    (Uuid::new_v4().to_string(), Uuid::new_v4().to_string())
}

/// Markers `Test1..=Test{marker_count}`, each mapped to itself, with
/// `filler_count` random pairs between consecutive markers.
fn shallow_entries(marker_count: usize, filler_count: usize) -> Vec<(String, String)> {
    let gaps = marker_count.saturating_sub(1);
    let mut entries = Vec::with_capacity(marker_count + gaps * filler_count);
    for n in 1..=marker_count {
        let marker = marker_key(n);
        entries.push((marker.clone(), marker));
        if n < marker_count {
            entries.extend((0..filler_count).map(|_| random_filler()));
        }
    }
    entries
}

/// Flat typed map with marker keys spread through UUID filler.
pub fn build_shallow_fixture(marker_count: usize, filler_count: usize) -> HashMap<String, String> {
    shallow_entries(marker_count, filler_count)
        .into_iter()
        .collect()
}

/// Same layout as [`build_shallow_fixture`], stored as a dynamic map.
pub fn build_shallow_dynamic_fixture(marker_count: usize, filler_count: usize) -> Value {
    Value::map(
        shallow_entries(marker_count, filler_count)
            .into_iter()
            .map(|(k, v)| (k, Value::String(v))),
    )
}

/// Typed and dynamic flat fixtures. The filler differs between the two (it is
/// random), but markers and entry counts match.
#[derive(Debug, Clone)]
pub struct ShallowFixtures {
    pub dynamic: Value,
    pub typed: HashMap<String, String>,
}

impl ShallowFixtures {
    pub fn build(marker_count: usize, filler_count: usize) -> Self {
        let fixtures = Self {
            dynamic: build_shallow_dynamic_fixture(marker_count, filler_count),
            typed: build_shallow_fixture(marker_count, filler_count),
        };
        debug!(
            markers = marker_count,
            fillers = filler_count,
            entries = fixtures.typed.len(),
            "built shallow fixtures"
        );
        fixtures
    }
}

impl Default for ShallowFixtures {
    fn default() -> Self {
        Self::build(DEFAULT_MARKER_COUNT, DEFAULT_FILLER_COUNT)
    }
}
