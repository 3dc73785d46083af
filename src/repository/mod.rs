//! Persistence gateway over the three entity collections

pub mod memory;
pub mod postgres;

pub use memory::MemoryLibraryStore;
pub use postgres::PgLibraryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, User, UserBookLending},
};

/// A lending row joined to its book and user, the projection every
/// report reads from.
#[derive(Debug, Clone, FromRow)]
pub struct LendingRecord {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub lending_date: DateTime<Utc>,
    pub submitted_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub book_code: String,
    pub book_title: String,
    pub book_author: String,
    pub book_pages: i32,
    pub user_first_name: String,
    pub user_last_name: String,
    pub user_email: String,
    pub user_phone_number: String,
}

/// One generation's worth of seed rows, committed as a unit.
#[derive(Debug, Clone, Default)]
pub struct SeedBatch {
    pub books: Vec<Book>,
    pub users: Vec<User>,
    pub lendings: Vec<UserBookLending>,
}

/// Read and write access to the books, users and lendings collections.
///
/// The gateway only fetches and persists rows; grouping, ordering and
/// aggregation belong to the report handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn find_active_book(&self, book_id: Uuid) -> AppResult<Option<Book>>;

    async fn all_lendings(&self) -> AppResult<Vec<LendingRecord>>;
    async fn lendings_for_book(&self, book_id: Uuid) -> AppResult<Vec<LendingRecord>>;
    async fn lendings_for_user(&self, user_id: Uuid) -> AppResult<Vec<LendingRecord>>;

    async fn count_books(&self) -> AppResult<i64>;
    async fn count_users(&self) -> AppResult<i64>;
    async fn count_lendings(&self) -> AppResult<i64>;

    async fn insert_book(&self, book: &Book) -> AppResult<()>;
    async fn insert_user(&self, user: &User) -> AppResult<()>;
    async fn insert_lending(&self, lending: &UserBookLending) -> AppResult<()>;

    /// Persist a whole seed batch in one atomic commit.
    async fn insert_seed_batch(&self, batch: &SeedBatch) -> AppResult<()>;
}
