//! In-memory book catalog. One mutex serializes every read and write.

use crate::model::{same_text, Book, BookFilter, NewBook};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct BookStore {
    books: Mutex<Vec<Book>>,
}

impl BookStore {
    pub fn new(books: Vec<Book>) -> Self {
        BookStore {
            books: Mutex::new(books),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Book>> {
        // Mutations never panic partway, so a poisoned guard still holds consistent data.
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Book> {
        self.lock().clone()
    }

    /// First book whose title matches, ignoring case.
    pub fn find_by_title(&self, title: &str) -> Option<Book> {
        self.lock().iter().find(|b| same_text(&b.title, title)).cloned()
    }

    pub fn find_by_category(&self, category: Option<&str>) -> Vec<Book> {
        self.search(&BookFilter {
            category: category.map(str::to_string),
            ..Default::default()
        })
    }

    pub fn find_by_rating(&self, min_rating: Option<f64>) -> Vec<Book> {
        self.search(&BookFilter {
            min_rating,
            ..Default::default()
        })
    }

    pub fn find_by_published_year(&self, year: Option<i64>) -> Vec<Book> {
        self.search(&BookFilter {
            published_year: year,
            ..Default::default()
        })
    }

    /// Books matching every present filter, in stored order. An empty filter returns everything.
    pub fn search(&self, filter: &BookFilter) -> Vec<Book> {
        self.lock().iter().filter(|b| filter.matches(b)).cloned().collect()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Book> {
        self.lock().iter().find(|b| b.id == id).cloned()
    }

    /// Resolve a path segment under one lock: an existing id wins, otherwise the first title match.
    pub fn find_by_id_or_title(&self, segment: &str) -> Option<Book> {
        let books = self.lock();
        segment
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| books.iter().find(|b| b.id == id))
            .or_else(|| books.iter().find(|b| same_text(&b.title, segment)))
            .cloned()
    }

    /// Append with `id = max(id) + 1`, or 1 when empty.
    pub fn create(&self, book: NewBook) -> Book {
        let mut books = self.lock();
        let id = books.iter().map(|b| b.id).max().map_or(1, |max| max + 1);
        let book = book.with_id(id);
        books.push(book.clone());
        tracing::debug!(id, "book created");
        book
    }

    /// Replace the first book with the same id. Leaves the catalog untouched when none matches.
    pub fn update(&self, book: Book) -> Option<Book> {
        let mut books = self.lock();
        let slot = books.iter_mut().find(|b| b.id == book.id)?;
        *slot = book.clone();
        tracing::debug!(id = book.id, "book updated");
        Some(book)
    }

    /// Remove every book with this id and return the first one removed.
    pub fn delete_by_id(&self, id: i64) -> Option<Book> {
        let mut books = self.lock();
        let removed = books.iter().find(|b| b.id == id).cloned()?;
        books.retain(|b| b.id != id);
        tracing::debug!(id, "book deleted");
        Some(removed)
    }
}

impl Default for BookStore {
    fn default() -> Self {
        BookStore::new(crate::model::seed_books())
    }
}
