//! In-process implementation of the library store
//!
//! Backs the unit tests (state is arranged through the public entity
//! constructors instead of fixture trickery) and doubles as a storage
//! backend for demos without a database. Rows keep insertion order, so
//! first-appearance group ordering is deterministic.

use std::sync::RwLock;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, User, UserBookLending},
    repository::{LendingRecord, LibraryStore, SeedBatch},
};

#[derive(Debug, Default)]
struct State {
    books: Vec<Book>,
    users: Vec<User>,
    lendings: Vec<UserBookLending>,
}

#[derive(Debug, Default)]
pub struct MemoryLibraryStore {
    inner: RwLock<State>,
}

impl MemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    fn join(&self, lending: &UserBookLending) -> AppResult<LendingRecord> {
        let book = self
            .books
            .iter()
            .find(|book| book.id() == lending.book_id())
            .ok_or_else(|| AppError::Internal("lending references a missing book".into()))?;
        let user = self
            .users
            .iter()
            .find(|user| user.id() == lending.user_id())
            .ok_or_else(|| AppError::Internal("lending references a missing user".into()))?;

        Ok(LendingRecord {
            id: lending.id(),
            book_id: lending.book_id(),
            user_id: lending.user_id(),
            lending_date: lending.lending_date(),
            submitted_date: lending.submitted_date(),
            remarks: lending.remarks().map(str::to_string),
            book_code: book.code().to_string(),
            book_title: book.title().to_string(),
            book_author: book.author().to_string(),
            book_pages: book.pages(),
            user_first_name: user.first_name().to_string(),
            user_last_name: user.last_name().to_string(),
            user_email: user.email().to_string(),
            user_phone_number: user.phone_number().to_string(),
        })
    }

    fn records<'a>(
        &self,
        lendings: impl Iterator<Item = &'a UserBookLending>,
    ) -> AppResult<Vec<LendingRecord>> {
        lendings.map(|lending| self.join(lending)).collect()
    }
}

#[async_trait::async_trait]
impl LibraryStore for MemoryLibraryStore {
    async fn find_active_book(&self, book_id: Uuid) -> AppResult<Option<Book>> {
        let state = self.read()?;
        Ok(state
            .books
            .iter()
            .find(|book| book.id() == book_id && book.is_active())
            .cloned())
    }

    async fn all_lendings(&self) -> AppResult<Vec<LendingRecord>> {
        let state = self.read()?;
        state.records(state.lendings.iter())
    }

    async fn lendings_for_book(&self, book_id: Uuid) -> AppResult<Vec<LendingRecord>> {
        let state = self.read()?;
        state.records(
            state
                .lendings
                .iter()
                .filter(|lending| lending.book_id() == book_id),
        )
    }

    async fn lendings_for_user(&self, user_id: Uuid) -> AppResult<Vec<LendingRecord>> {
        let state = self.read()?;
        state.records(
            state
                .lendings
                .iter()
                .filter(|lending| lending.user_id() == user_id),
        )
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.read()?.books.len() as i64)
    }

    async fn count_users(&self) -> AppResult<i64> {
        Ok(self.read()?.users.len() as i64)
    }

    async fn count_lendings(&self) -> AppResult<i64> {
        Ok(self.read()?.lendings.len() as i64)
    }

    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        self.write()?.books.push(book.clone());
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        self.write()?.users.push(user.clone());
        Ok(())
    }

    async fn insert_lending(&self, lending: &UserBookLending) -> AppResult<()> {
        self.write()?.lendings.push(lending.clone());
        Ok(())
    }

    async fn insert_seed_batch(&self, batch: &SeedBatch) -> AppResult<()> {
        let mut state = self.write()?;
        state.books.extend(batch.books.iter().cloned());
        state.users.extend(batch.users.iter().cloned());
        state.lendings.extend(batch.lendings.iter().cloned());
        Ok(())
    }
}

impl MemoryLibraryStore {
    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, State>> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal("library store lock poisoned".into()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, State>> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal("library store lock poisoned".into()))
    }
}
