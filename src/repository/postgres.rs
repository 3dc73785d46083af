//! sqlx/Postgres implementation of the library store

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, User, UserBookLending},
    repository::{LendingRecord, LibraryStore, SeedBatch},
};

const LENDING_SELECT: &str = r#"
    SELECT l.id, l.book_id, l.user_id, l.lending_date, l.submitted_date, l.remarks,
           b.code AS book_code, b.title AS book_title,
           b.author AS book_author, b.pages AS book_pages,
           u.first_name AS user_first_name, u.last_name AS user_last_name,
           u.email AS user_email, u.phone_number AS user_phone_number
    FROM user_book_lendings l
    JOIN books b ON l.book_id = b.id
    JOIN users u ON l.user_id = u.id
"#;

const INSERT_BOOK: &str = r#"
    INSERT INTO books (id, title, author, code, publisher, genre, pages,
                       released_year, total_copies, available_copies,
                       total_number_of_lendings, is_active)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
"#;

const INSERT_USER: &str = r#"
    INSERT INTO users (id, first_name, last_name, birth_date, phone_number,
                       email, address, is_active, lending_book_count)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
"#;

const INSERT_LENDING: &str = r#"
    INSERT INTO user_book_lendings (id, book_id, user_id, lending_date,
                                    submitted_date, remarks)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

#[derive(Clone)]
pub struct PgLibraryStore {
    pool: Pool<Postgres>,
}

impl PgLibraryStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

async fn insert_book_with(
    executor: impl sqlx::PgExecutor<'_>,
    book: &Book,
) -> Result<(), sqlx::Error> {
    sqlx::query(INSERT_BOOK)
        .bind(book.id())
        .bind(book.title())
        .bind(book.author())
        .bind(book.code())
        .bind(book.publisher())
        .bind(book.genre())
        .bind(book.pages())
        .bind(book.released_year())
        .bind(book.total_copies())
        .bind(book.available_copies())
        .bind(book.total_number_of_lendings())
        .bind(book.is_active())
        .execute(executor)
        .await?;
    Ok(())
}

async fn insert_user_with(
    executor: impl sqlx::PgExecutor<'_>,
    user: &User,
) -> Result<(), sqlx::Error> {
    sqlx::query(INSERT_USER)
        .bind(user.id())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.birth_date())
        .bind(user.phone_number())
        .bind(user.email())
        .bind(user.address())
        .bind(user.is_active())
        .bind(user.lending_book_count())
        .execute(executor)
        .await?;
    Ok(())
}

async fn insert_lending_with(
    executor: impl sqlx::PgExecutor<'_>,
    lending: &UserBookLending,
) -> Result<(), sqlx::Error> {
    sqlx::query(INSERT_LENDING)
        .bind(lending.id())
        .bind(lending.book_id())
        .bind(lending.user_id())
        .bind(lending.lending_date())
        .bind(lending.submitted_date())
        .bind(lending.remarks())
        .execute(executor)
        .await?;
    Ok(())
}

#[async_trait::async_trait]
impl LibraryStore for PgLibraryStore {
    async fn find_active_book(&self, book_id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE id = $1 AND is_active",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn all_lendings(&self) -> AppResult<Vec<LendingRecord>> {
        let records = sqlx::query_as::<_, LendingRecord>(
            &format!("{LENDING_SELECT} ORDER BY l.lending_date"),
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn lendings_for_book(&self, book_id: Uuid) -> AppResult<Vec<LendingRecord>> {
        let records = sqlx::query_as::<_, LendingRecord>(
            &format!("{LENDING_SELECT} WHERE l.book_id = $1 ORDER BY l.lending_date"),
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn lendings_for_user(&self, user_id: Uuid) -> AppResult<Vec<LendingRecord>> {
        let records = sqlx::query_as::<_, LendingRecord>(
            &format!("{LENDING_SELECT} WHERE l.user_id = $1 ORDER BY l.lending_date"),
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn count_books(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_users(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_lendings(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_book_lendings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        insert_book_with(&self.pool, book).await?;
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        insert_user_with(&self.pool, user).await?;
        Ok(())
    }

    async fn insert_lending(&self, lending: &UserBookLending) -> AppResult<()> {
        insert_lending_with(&self.pool, lending).await?;
        Ok(())
    }

    async fn insert_seed_batch(&self, batch: &SeedBatch) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        for book in &batch.books {
            insert_book_with(&mut *tx, book).await?;
        }
        for user in &batch.users {
            insert_user_with(&mut *tx, user).await?;
        }
        for lending in &batch.lendings {
            insert_lending_with(&mut *tx, lending).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
