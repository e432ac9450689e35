use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of service categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    #[serde(rename = "Community Service")]
    CommunityService,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Environment")]
    Environment,
    #[serde(rename = "Senior Care")]
    SeniorCare,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Animal Care")]
    AnimalCare,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::CommunityService,
        Category::Education,
        Category::Environment,
        Category::SeniorCare,
        Category::Healthcare,
        Category::AnimalCare,
        Category::Other,
    ];

    /// Display / DB label, e.g. "Community Service".
    pub fn label(&self) -> &'static str {
        match self {
            Category::CommunityService => "Community Service",
            Category::Education => "Education",
            Category::Environment => "Environment",
            Category::SeniorCare => "Senior Care",
            Category::Healthcare => "Healthcare",
            Category::AnimalCare => "Animal Care",
            Category::Other => "Other",
        }
    }

    /// Convert DB string → enum (exact label match)
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == s)
    }

    /// Lenient parsing for CLI input: case-insensitive, accepts
    /// "senior-care", "senior_care" or "seniorcare" for "Senior Care".
    pub fn from_code(code: &str) -> Option<Self> {
        let wanted = normalize(code);
        Self::ALL.into_iter().find(|c| normalize(c.label()) == wanted)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category filter for the log view: a concrete category or the synthetic `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        if code.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        Category::from_code(code).map(CategoryFilter::Only)
    }
}
