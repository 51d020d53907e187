use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::Value;

use crate::error::FetchError;

/// One named class of park information served by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Activities,
    Alerts,
    Events,
    FeesPasses,
    VisitorCenters,
    ThingsToDo,
    Videos,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Activities,
        Category::Alerts,
        Category::Events,
        Category::FeesPasses,
        Category::VisitorCenters,
        Category::ThingsToDo,
        Category::Videos,
    ];

    /// Upstream endpoint path, also used as the key in the merged response.
    pub fn path(&self) -> &'static str {
        match self {
            Category::Activities => "activities",
            Category::Alerts => "alerts",
            Category::Events => "events",
            Category::FeesPasses => "feespasses",
            Category::VisitorCenters => "visitorcenters",
            Category::ThingsToDo => "thingstodo",
            Category::Videos => "multimedia/videos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parses the upstream path form, e.g. `thingstodo` or `multimedia/videos`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.path().eq_ignore_ascii_case(raw))
            .ok_or_else(|| format!("unknown park category `{raw}`"))
    }
}

/// Per-request merge of every category fetch. Serializes as a JSON object with
/// one key per category; failed categories are `null`.
#[derive(Debug, Clone, Default)]
pub struct ParkDetail {
    sections: BTreeMap<Category, Result<Value, FetchError>>,
}

impl ParkDetail {
    pub fn insert(&mut self, category: Category, result: Result<Value, FetchError>) {
        self.sections.insert(category, result);
    }

    pub fn get(&self, category: Category) -> Option<&Result<Value, FetchError>> {
        self.sections.get(&category)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn is_available(&self, category: Category) -> bool {
        matches!(self.sections.get(&category), Some(Ok(_)))
    }

    pub fn unavailable(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(category, _)| *category)
    }
}

impl Serialize for ParkDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (category, result) in &self.sections {
            map.serialize_entry(category.path(), &result.as_ref().ok())?;
        }
        map.end()
    }
}
