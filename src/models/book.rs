//! Book entity

use sqlx::FromRow;
use uuid::Uuid;

/// A catalogued book. Copy counters are only touched through the
/// increment/decrement methods, which keep `available_copies` inside
/// `0..=total_copies`.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    id: Uuid,
    title: String,
    author: String,
    code: String,
    publisher: String,
    genre: String,
    pages: i32,
    released_year: i32,
    total_copies: i32,
    available_copies: i32,
    total_number_of_lendings: i32,
    is_active: bool,
}

impl Book {
    /// A new book starts active with every copy on the shelf.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        author: &str,
        code: &str,
        publisher: &str,
        genre: &str,
        pages: i32,
        released_year: i32,
        total_copies: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.to_string(),
            code: code.to_string(),
            publisher: publisher.to_string(),
            genre: genre.to_string(),
            pages,
            released_year,
            total_copies,
            available_copies: total_copies,
            total_number_of_lendings: 0,
            is_active: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn pages(&self) -> i32 {
        self.pages
    }

    pub fn released_year(&self) -> i32 {
        self.released_year
    }

    pub fn total_copies(&self) -> i32 {
        self.total_copies
    }

    pub fn available_copies(&self) -> i32 {
        self.available_copies
    }

    pub fn total_number_of_lendings(&self) -> i32 {
        self.total_number_of_lendings
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_inactive(&mut self) {
        self.is_active = false;
    }

    pub fn set_active(&mut self) {
        self.is_active = true;
    }

    /// A returned copy goes back on the shelf, capped at the owned total.
    /// The lifetime lending counter advances even when the cap is hit.
    pub fn increment_available_copies(&mut self) {
        if self.available_copies < self.total_copies {
            self.available_copies += 1;
        }

        self.total_number_of_lendings += 1;
    }

    /// A lent copy leaves the shelf, floored at zero.
    pub fn decrement_available_copies(&mut self) {
        if self.available_copies > 0 {
            self.available_copies -= 1;
        }
    }
}
