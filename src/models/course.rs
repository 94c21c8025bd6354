use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Medium,
    Advance,
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "beginner"),
            CourseLevel::Medium => write!(f, "medium"),
            CourseLevel::Advance => write!(f, "advance"),
        }
    }
}

impl FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "medium" => Ok(CourseLevel::Medium),
            "advance" | "advanced" => Ok(CourseLevel::Advance),
            other => Err(format!("unknown course level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i32,
    pub creator_id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub level: String,
    pub price: i32, // whole currency units
    pub thumbnail_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.creator_id == user_id
    }

    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// Amount in the currency's minor unit, as the payment gateway expects it.
    pub fn amount_minor(&self) -> i64 {
        i64::from(self.price) * 100
    }
}

/// Published course row joined with its creator's public fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseWithCreator {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub course: Course,
    pub creator_name: String,
    pub creator_photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSort {
    Low,
    High,
}

/// Filters applied to the published catalogue search.
#[derive(Debug, Clone, Default)]
pub struct CourseSearch {
    pub query: Option<String>,
    pub categories: Vec<String>,
    pub sort_by_price: Option<PriceSort>,
}

impl CourseSearch {
    /// `%term%` pattern for ILIKE, with LIKE wildcards in the user input escaped.
    pub fn like_pattern(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| {
                let escaped = q
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{}%", escaped)
            })
    }

    pub fn normalized_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_is_converted_to_minor_units() {
        let course = Course {
            price: 499,
            ..Default::default()
        };
        assert_eq!(course.amount_minor(), 49_900);
        assert!(!course.is_free());
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        let search = CourseSearch {
            query: Some(" 100%_rust ".to_string()),
            ..Default::default()
        };
        assert_eq!(search.like_pattern().unwrap(), "%100\\%\\_rust%");
    }

    #[test]
    fn blank_query_matches_everything() {
        let search = CourseSearch {
            query: Some("   ".to_string()),
            categories: vec![" Web ".to_string(), "".to_string()],
            sort_by_price: None,
        };
        assert!(search.like_pattern().is_none());
        assert_eq!(search.normalized_categories(), vec!["web".to_string()]);
    }

    #[test]
    fn level_parsing_accepts_legacy_spelling() {
        assert_eq!("Advanced".parse::<CourseLevel>().unwrap(), CourseLevel::Advance);
        assert_eq!(CourseLevel::Medium.to_string(), "medium");
        assert!("expert".parse::<CourseLevel>().is_err());
    }
}
