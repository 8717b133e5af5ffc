//! Content database and post selection
//!
//! The content database is a JSON file mapping category names to arrays of
//! pre-authored post texts. It is loaded once at startup and read-only for
//! the life of the process. Key order is preserved because the round-robin
//! rotation follows the order categories appear in the file.

use indexmap::IndexMap;
use rand::Rng;
use std::path::Path;

use crate::error::{ContentError, Result};

/// In-memory content database: category name -> ordered post texts
#[derive(Debug, Clone, Default)]
pub struct ContentDb {
    categories: IndexMap<String, Vec<String>>,
}

impl ContentDb {
    /// Load the content database from a JSON file
    ///
    /// The file must contain a single JSON object whose values are arrays
    /// of strings. Empty arrays are permitted; they are handled at
    /// selection time.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if the file does not exist and
    /// `ContentError::ParseError` if it is not the expected shape.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ContentError::NotFound(path.display().to_string()).into());
        }

        let raw = std::fs::read_to_string(path).map_err(ContentError::ReadError)?;
        let categories: IndexMap<String, Vec<String>> =
            serde_json::from_str(&raw).map_err(ContentError::ParseError)?;

        Ok(Self { categories })
    }

    /// Build a database directly from category/posts pairs (used by tests
    /// and by callers that assemble content programmatically)
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let categories = pairs
            .into_iter()
            .map(|(name, posts)| {
                (
                    name.into(),
                    posts.into_iter().map(Into::into).collect::<Vec<_>>(),
                )
            })
            .collect();
        Self { categories }
    }

    /// Category names in file order
    pub fn category_names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    /// Posts for a category, if it exists
    pub fn posts(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Select one post from a category
    ///
    /// With an explicit index, returns exactly that post. Without one,
    /// returns a uniformly random post from the category.
    ///
    /// # Errors
    ///
    /// - `ContentError::UnknownCategory` if the category does not exist
    /// - `ContentError::EmptyCategory` if it has no posts
    /// - `ContentError::IndexOutOfRange` if the index is past the end
    pub fn select(&self, category: &str, index: Option<usize>) -> Result<&str> {
        let posts = self
            .categories
            .get(category)
            .ok_or_else(|| ContentError::UnknownCategory(category.to_string()))?;

        if posts.is_empty() {
            return Err(ContentError::EmptyCategory(category.to_string()).into());
        }

        let i = match index {
            Some(i) if i >= posts.len() => {
                return Err(ContentError::IndexOutOfRange {
                    index: i,
                    max: posts.len() - 1,
                }
                .into());
            }
            Some(i) => i,
            None => rand::thread_rng().gen_range(0..posts.len()),
        };

        Ok(&posts[i])
    }
}
