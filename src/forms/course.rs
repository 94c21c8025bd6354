use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Course {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub title: String,
    #[validate(max_length = 300)]
    pub subtitle: Option<String>,
    #[validate(max_length = 20000)]
    pub description: Option<String>,
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub category: String,
    pub level: Option<models::CourseLevel>,
    #[validate(minimum = 0)]
    #[validate(maximum = 1000000)]
    pub price: Option<i32>,
    #[validate(max_length = 2048)]
    pub thumbnail_url: Option<String>,
}

impl Course {
    /// Trims the free text fields so that validation sees what gets stored.
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.category = self.category.trim().to_string();
        self
    }

    pub fn into_model(self, creator_id: i32) -> models::Course {
        let mut course = models::Course::default();
        course.creator_id = creator_id;
        course.level = models::CourseLevel::Beginner.to_string();
        self.update(&mut course);
        course.created_at = chrono::Utc::now();
        course
    }

    pub fn update(self, course: &mut models::Course) {
        course.title = self.title.trim().to_string();
        course.subtitle = self.subtitle;
        course.description = self.description;
        course.category = self.category.trim().to_string();
        if let Some(level) = self.level {
            course.level = level.to_string();
        }
        if let Some(price) = self.price {
            course.price = price;
        }
        course.thumbnail_url = self.thumbnail_url;
        course.updated_at = chrono::Utc::now();
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PublishQuery {
    pub publish: bool,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SearchQuery {
    pub query: Option<String>,
    /// comma separated
    pub categories: Option<String>,
    pub sort_by_price: Option<models::PriceSort>,
}

impl From<SearchQuery> for models::CourseSearch {
    fn from(query: SearchQuery) -> Self {
        models::CourseSearch {
            query: query.query,
            categories: query
                .categories
                .map(|c| c.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            sort_by_price: query.sort_by_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Course {
        Course {
            title: " Rust for web ".to_string(),
            subtitle: None,
            description: None,
            category: "Web".to_string(),
            level: Some(models::CourseLevel::Medium),
            price: Some(499),
            thumbnail_url: None,
        }
    }

    #[test]
    fn blank_title_is_rejected_after_trimming() {
        let mut blank_title = form();
        blank_title.title = "   ".to_string();
        assert!(blank_title.validate().is_ok());
        assert!(blank_title.trimmed().validate().is_err());

        let mut blank_category = form();
        blank_category.category = "\t".to_string();
        assert!(blank_category.trimmed().validate().is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut form = form();
        form.price = Some(-1);
        assert!(form.validate().is_err());
    }

    #[test]
    fn new_course_is_unpublished_and_owned() {
        let course = form().into_model(7);
        assert_eq!(course.creator_id, 7);
        assert_eq!(course.title, "Rust for web");
        assert_eq!(course.level, "medium");
        assert_eq!(course.price, 499);
        assert!(!course.is_published);
    }

    #[test]
    fn update_keeps_price_when_omitted() {
        let mut course = form().into_model(7);
        let mut edit = form();
        edit.price = None;
        edit.level = None;
        edit.title = "Advanced Rust".to_string();
        edit.update(&mut course);
        assert_eq!(course.price, 499);
        assert_eq!(course.level, "medium");
        assert_eq!(course.title, "Advanced Rust");
    }

    #[test]
    fn search_query_splits_categories() {
        let search: models::CourseSearch = SearchQuery {
            query: Some("rust".to_string()),
            categories: Some("web,Systems".to_string()),
            sort_by_price: Some(models::PriceSort::Low),
        }
        .into();
        assert_eq!(search.normalized_categories(), vec!["web", "systems"]);
        assert_eq!(search.sort_by_price, Some(models::PriceSort::Low));
    }

    #[test]
    fn search_query_serializes_sort_in_lowercase() {
        let query = SearchQuery {
            query: None,
            categories: None,
            sort_by_price: Some(models::PriceSort::High),
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["sort_by_price"], "high");
    }
}
