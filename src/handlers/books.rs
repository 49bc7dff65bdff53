//! Book catalog handlers.

use crate::error::{AppError, FieldError};
use crate::handlers::{body_to_map, parse_id};
use crate::model::{book_schema, Book, BookFilter, NewBook};
use crate::response::{success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

const NOT_FOUND: &str = "Book not found";

fn present<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Parse the optional list filters. Blank values count as absent.
fn parse_filter(params: &HashMap<String, String>) -> Result<BookFilter, AppError> {
    let schema = book_schema();
    let mut filter = BookFilter::default();
    let mut errors = Vec::new();

    if let Some(raw) = present(params, "rating") {
        match raw.parse::<f64>() {
            Ok(r) => match schema.validate_value("rating", &serde_json::json!(r)) {
                Ok(()) => filter.min_rating = Some(r),
                Err(AppError::Validation(mut e)) => errors.append(&mut e),
                Err(e) => return Err(e),
            },
            Err(_) => errors.push(FieldError::new("rating", "must be a number")),
        }
    }
    if let Some(raw) = present(params, "published_year") {
        match raw.parse::<i64>() {
            Ok(y) => match schema.validate_value("published_year", &Value::from(y)) {
                Ok(()) => filter.published_year = Some(y),
                Err(AppError::Validation(mut e)) => errors.append(&mut e),
                Err(e) => return Err(e),
            },
            Err(_) => errors.push(FieldError::new("published_year", "must be an integer")),
        }
    }
    filter.category = present(params, "category").map(str::to_string);

    if errors.is_empty() {
        Ok(filter)
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /books — all books, optionally narrowed by `rating` (minimum), `category` and `published_year`.
#[utoipa::path(
    get,
    path = "/books",
    params(
        ("rating" = Option<f64>, Query, description = "Minimum rating, 0 to 5"),
        ("category" = Option<String>, Query, description = "Category, case-insensitive"),
        ("published_year" = Option<i64>, Query, description = "Exact publication year")
    ),
    responses(
        (status = 200, description = "Matching books", body = [Book]),
        (status = 422, description = "Filter out of range")
    ),
    tag = "books"
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(&params)?;
    let books = state.books.search(&filter);
    Ok(success_many(books))
}

/// GET /books/:segment — an id match wins, otherwise the segment is matched as a title.
#[utoipa::path(
    get,
    path = "/books/{segment}",
    params(("segment" = String, Path, description = "Book id or title")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No such book")
    ),
    tag = "books"
)]
pub async fn read_book(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let book = state
        .books
        .find_by_id_or_title(&segment)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(success_one_ok(book))
}

#[utoipa::path(
    post,
    path = "/books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Created book with its assigned id", body = Book),
        (status = 422, description = "Invalid book")
    ),
    tag = "books"
)]
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    book_schema().validate(&body)?;
    let new_book: NewBook = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let book = state.books.create(new_book);
    Ok(success_one(book))
}

/// PUT /books — full replace of the book named by the body's `id`.
#[utoipa::path(
    put,
    path = "/books",
    request_body = Book,
    responses(
        (status = 200, description = "Updated book", body = Book),
        (status = 404, description = "No book with that id"),
        (status = 422, description = "Invalid book")
    ),
    tag = "books"
)]
pub async fn update_book(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    book_schema().validate(&body)?;
    if body.get("id").map_or(true, Value::is_null) {
        return Err(AppError::invalid("id", "field required"));
    }
    let book: Book = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let updated = state
        .books
        .update(book)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(success_one_ok(updated))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such book"),
        (status = 422, description = "Id not an integer")
    ),
    tag = "books"
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state
        .books
        .delete_by_id(id)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(StatusCode::NO_CONTENT)
}
