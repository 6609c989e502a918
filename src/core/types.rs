use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Identifier of a solution, unique within one discovery batch
pub type SolutionId = String;

/// A recently used Rider solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Unique identifier, taken from the key of the discovery output
    pub id: SolutionId,
    /// Display label
    pub name: String,
    /// Abbreviated location, used for matching and display
    pub path: String,
    /// Absolute location, only used to launch Rider
    pub abspath: PathBuf,
}

/// Solution fields as written by the discovery helper; the id is the outer key
#[derive(Debug, Deserialize)]
struct SolutionRecord {
    name: String,
    path: String,
    abspath: PathBuf,
}

/// Solutions from one discovery, in the order the helper listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionCollection {
    solutions: Vec<Solution>,
    index: HashMap<SolutionId, usize>,
}

impl SolutionCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON object printed by the discovery helper
    ///
    /// Keys are solution ids, values carry `name`, `path` and `abspath`.
    /// Any malformed entry fails the whole parse.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut collection = Self::new();
        for (id, value) in records {
            let record: SolutionRecord = serde_json::from_value(value)?;
            collection.insert(Solution {
                id,
                name: record.name,
                path: record.path,
                abspath: record.abspath,
            });
        }
        Ok(collection)
    }

    /// Render the collection in the format [`from_json`](Self::from_json) reads
    ///
    /// Each value repeats its id next to `name`, `path` and `abspath`.
    pub fn to_json(&self) -> Result<String> {
        let mut records = serde_json::Map::new();
        for solution in &self.solutions {
            records.insert(solution.id.clone(), serde_json::to_value(solution)?);
        }
        Ok(serde_json::to_string(&records)?)
    }

    /// Add a solution, replacing an existing one with the same id in place
    pub fn insert(&mut self, solution: Solution) {
        match self.index.get(&solution.id) {
            Some(&position) => self.solutions[position] = solution,
            None => {
                self.index.insert(solution.id.clone(), self.solutions.len());
                self.solutions.push(solution);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Solution> {
        self.index.get(id).map(|&position| &self.solutions[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.solutions.iter().map(|solution| solution.id.as_str())
    }
}

impl FromIterator<Solution> for SolutionCollection {
    fn from_iter<I: IntoIterator<Item = Solution>>(iter: I) -> Self {
        let mut collection = Self::new();
        for solution in iter {
            collection.insert(solution);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a SolutionCollection {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Icon of an application, either a theme icon name or an absolute file path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIcon {
    pub name: String,
}

impl AppIcon {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether the icon refers to a file rather than a theme icon
    pub fn is_file(&self) -> bool {
        self.name.starts_with('/')
    }
}

/// An application icon rendered at a concrete size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizedIcon {
    pub icon: AppIcon,
    pub size: u32,
}

/// Icon handed to the host; it picks the size when it renders the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyIcon {
    icon: AppIcon,
}

impl LazyIcon {
    pub fn new(icon: AppIcon) -> Self {
        Self { icon }
    }

    /// Create the icon at the requested size
    pub fn create(&self, size: u32) -> SizedIcon {
        SizedIcon {
            icon: self.icon.clone(),
            size,
        }
    }
}

/// Display metadata for one search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMeta {
    pub id: SolutionId,
    pub name: String,
    pub description: String,
    pub icon: Option<LazyIcon>,
}
