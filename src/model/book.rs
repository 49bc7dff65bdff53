//! Book entity, its request shapes, and field rules.

use crate::service::{EntitySchema, FieldRule};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use utoipa::ToSchema;

pub const MIN_PUBLISHED_YEAR: i64 = 2000;
pub const MAX_PUBLISHED_YEAR: i64 = 2025;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: f64,
    pub published_year: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Create body. Any client-supplied `id` is ignored.
#[derive(Clone, Debug, PartialEq, Deserialize, ToSchema)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: f64,
    pub published_year: i64,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewBook {
    pub fn with_id(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            rating: self.rating,
            published_year: self.published_year,
            category: self.category,
        }
    }
}

/// Optional list filters; all present filters must match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookFilter {
    pub min_rating: Option<f64>,
    pub category: Option<String>,
    pub published_year: Option<i64>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        self.min_rating.map_or(true, |r| book.rating >= r)
            && self.published_year.map_or(true, |y| book.published_year == y)
            && self.category.as_deref().map_or(true, |c| {
                book.category
                    .as_deref()
                    .is_some_and(|own| same_text(own, c))
            })
    }
}

/// Case-insensitive comparison under full Unicode case folding, used for titles and categories.
pub fn same_text(a: &str, b: &str) -> bool {
    caseless::default_caseless_match_str(a, b)
}

pub fn book_schema() -> &'static EntitySchema {
    static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        EntitySchema::new("book")
            .field("id", FieldRule::integer().range(Some(1.0), None))
            .field("title", FieldRule::text().required().length(Some(3), None))
            .field("author", FieldRule::text().required().length(Some(1), None))
            .field(
                "description",
                FieldRule::text().required().length(Some(1), Some(100)),
            )
            .field("rating", FieldRule::number().required().range(Some(0.0), Some(5.0)))
            .field(
                "published_year",
                FieldRule::integer()
                    .required()
                    .range(Some(MIN_PUBLISHED_YEAR as f64), Some(MAX_PUBLISHED_YEAR as f64)),
            )
            .field("category", FieldRule::text().length(Some(1), None))
    })
}

/// Catalog contents at startup.
pub fn seed_books() -> Vec<Book> {
    let rows = [
        ("Title 1", "Author 1", "Science", "A tour of the physical sciences", 5.0, 2012),
        ("Title 2", "Author 2", "History", "Empires and their long decline", 3.0, 2015),
        ("Title 3", "Author 3", "Science", "Field notes from marine biology", 4.0, 2020),
        ("Title 4", "Author 4", "Thriller", "A heist that goes wrong twice", 2.5, 2020),
        ("Title 5", "Author 5", "Violence", "Crime stories from the docks", 1.0, 2023),
        ("Title 6", "Author 6", "Math", "Proofs without tears", 3.5, 2018),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((title, author, category, description, rating, year), id)| Book {
            id,
            title: title.into(),
            author: author.into(),
            description: description.into(),
            rating,
            published_year: year,
            category: Some(category.into()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> serde_json::Map<String, serde_json::Value> {
        json!({
            "title": "X1 title",
            "author": "A",
            "description": "d",
            "rating": 4,
            "published_year": 2020
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn seeded_books_satisfy_schema() {
        for book in seed_books() {
            let v = serde_json::to_value(&book).unwrap();
            book_schema().validate(v.as_object().unwrap()).unwrap();
        }
    }

    #[test]
    fn rejects_rating_above_five() {
        let mut b = valid_body();
        b.insert("rating".into(), json!(5.1));
        assert!(book_schema().validate(&b).is_err());
    }

    #[test]
    fn rejects_year_before_range() {
        let mut b = valid_body();
        b.insert("published_year".into(), json!(1999));
        assert!(book_schema().validate(&b).is_err());
        b.insert("published_year".into(), json!(2025));
        assert!(book_schema().validate(&b).is_ok());
    }

    #[test]
    fn same_text_folds_full_unicode_case() {
        assert!(same_text("Straße", "STRASSE"));
        assert!(same_text("ΣΟΦΙΑ", "σοφια"));
        assert!(!same_text("Title 1", "Title 2"));
    }

    #[test]
    fn filter_matches_conjunction() {
        let books = seed_books();
        let filter = BookFilter {
            min_rating: Some(3.0),
            category: Some("SCIENCE".into()),
            published_year: None,
        };
        let ids: Vec<_> = books.iter().filter(|b| filter.matches(b)).map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
