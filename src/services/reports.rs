//! Lending report read models
//!
//! Each report is a single-shot read: validate the query, fetch rows
//! from the store, then filter/group/aggregate in process. Group order
//! follows first appearance in the lending collection and the
//! descending sorts are stable, so ties keep their first-appearance
//! order.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::reports::{
        BookAvailabilityQuery, BookAvailabilityResponse, BookReadingRateQuery,
        BookReadingRateResponse, LendingBooksResponse, LendingRelatedBooksQuery,
        MostLendingBooksQuery, MostLendingBooksResponse, TopLendingUsersQuery,
        TopLendingUsersResponse, UserLendingBooksQuery,
    },
    repository::{LendingRecord, LibraryStore},
};

const DEFAULT_TOP_USER_COUNT: i32 = 10;
const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct ReportsService {
    store: Arc<dyn LibraryStore>,
}

impl ReportsService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Availability of one active book; `None` when no active book
    /// matches.
    pub async fn book_availability(
        &self,
        query: BookAvailabilityQuery,
    ) -> AppResult<Option<BookAvailabilityResponse>> {
        query.validate()?;
        self.run("book_availability", async {
            let book = self.store.find_active_book(query.book_id).await?;

            Ok(book.map(|book| BookAvailabilityResponse {
                code: book.code().to_string(),
                is_available: book.available_copies() > 0,
                available_copies: book.available_copies(),
                total_copies: book.total_copies(),
            }))
        })
        .await
    }

    /// Average pages-per-day over a book's returned lendings; `None`
    /// when no lending has a submitted date.
    pub async fn book_reading_rate(
        &self,
        query: BookReadingRateQuery,
    ) -> AppResult<Option<BookReadingRateResponse>> {
        query.validate()?;
        self.run("book_reading_rate", async {
            let records = self.store.lendings_for_book(query.book_id).await?;
            let returned: Vec<(&LendingRecord, DateTime<Utc>)> = records
                .iter()
                .filter_map(|record| record.submitted_date.map(|date| (record, date)))
                .collect();

            let Some((first, _)) = returned.first() else {
                return Ok(None);
            };

            let total: f64 = returned
                .iter()
                .map(|(record, submitted)| {
                    // Calendar-day difference; time of day is ignored. A
                    // same-day return divides by zero and stays unguarded.
                    let days =
                        (submitted.date_naive() - record.lending_date.date_naive()).num_days();
                    f64::from(record.book_pages) / days as f64
                })
                .sum();

            Ok(Some(BookReadingRateResponse {
                code: first.book_code.clone(),
                title: first.book_title.clone(),
                average: round2(total / returned.len() as f64),
            }))
        })
        .await
    }

    /// Books ranked by lending count, most lent first.
    pub async fn most_lending_books(
        &self,
        query: MostLendingBooksQuery,
    ) -> AppResult<Vec<MostLendingBooksResponse>> {
        query.validate()?;
        self.run("most_lending_books", async {
            let lendings = self.store.all_lendings().await?;

            let mut groups: IndexMap<String, MostLendingBooksResponse> = IndexMap::new();
            for record in &lendings {
                groups
                    .entry(record.book_code.clone())
                    .or_insert_with(|| MostLendingBooksResponse {
                        code: record.book_code.clone(),
                        title: record.book_title.clone(),
                        count: 0,
                    })
                    .count += 1;
            }

            let mut ranked: Vec<MostLendingBooksResponse> = groups.into_values().collect();
            ranked.sort_by(|a, b| b.count.cmp(&a.count));
            ranked.truncate(query.top_n as usize);

            Ok(ranked)
        })
        .await
    }

    /// The heaviest borrowers inside the date window. Absent bounds fall
    /// back to the trailing 30 days ending now; a zero count becomes 10.
    pub async fn top_lending_users(
        &self,
        query: TopLendingUsersQuery,
    ) -> AppResult<Vec<TopLendingUsersResponse>> {
        query.validate()?;
        self.run("top_lending_users", async {
            let (start, end) = lending_window(query.start_date, query.end_date);
            let top = if query.top_user_count == 0 {
                DEFAULT_TOP_USER_COUNT
            } else {
                query.top_user_count
            };

            let lendings = self.store.all_lendings().await?;

            let mut groups: IndexMap<Uuid, TopLendingUsersResponse> = IndexMap::new();
            for record in lendings
                .iter()
                .filter(|record| in_window(record.lending_date, start, end))
            {
                groups
                    .entry(record.user_id)
                    .or_insert_with(|| TopLendingUsersResponse {
                        user_id: record.user_id,
                        name: format!("{} {}", record.user_last_name, record.user_first_name),
                        email: record.user_email.clone(),
                        phone: record.user_phone_number.clone(),
                        lending_count: 0,
                    })
                    .lending_count += 1;
            }

            let mut ranked: Vec<TopLendingUsersResponse> = groups.into_values().collect();
            ranked.sort_by(|a, b| b.lending_count.cmp(&a.lending_count));
            // A negative top yields nothing, same as taking none.
            ranked.truncate(top.max(0) as usize);

            Ok(ranked)
        })
        .await
    }

    /// One user's lendings inside the date window, with the same absent-
    /// bound substitution as the top-borrowers report.
    pub async fn user_lending_books(
        &self,
        query: UserLendingBooksQuery,
    ) -> AppResult<Vec<LendingBooksResponse>> {
        query.validate()?;
        self.run("user_lending_books", async {
            let (start, end) = lending_window(query.start_date, query.end_date);
            let records = self.store.lendings_for_user(query.user_id).await?;

            Ok(records
                .into_iter()
                .filter(|record| in_window(record.lending_date, start, end))
                .map(lending_row)
                .collect())
        })
        .await
    }

    /// Every lending of any *other* book by the users who ever borrowed
    /// the given one.
    pub async fn lending_related_books(
        &self,
        query: LendingRelatedBooksQuery,
    ) -> AppResult<Vec<LendingBooksResponse>> {
        query.validate()?;
        self.run("lending_related_books", async {
            let borrowers: HashSet<Uuid> = self
                .store
                .lendings_for_book(query.book_id)
                .await?
                .into_iter()
                .map(|record| record.user_id)
                .collect();

            if borrowers.is_empty() {
                return Ok(Vec::new());
            }

            let lendings = self.store.all_lendings().await?;

            Ok(lendings
                .into_iter()
                .filter(|record| {
                    borrowers.contains(&record.user_id) && record.book_id != query.book_id
                })
                .map(lending_row)
                .collect())
        })
        .await
    }

    /// Funnel for every report body: a failure is logged once here and
    /// re-raised unchanged for the transport layer to render.
    async fn run<T>(
        &self,
        query: &'static str,
        body: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match body.await {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(query, error = %err, "report query failed");
                Err(err)
            }
        }
    }
}

fn lending_row(record: LendingRecord) -> LendingBooksResponse {
    LendingBooksResponse {
        book_id: record.book_id,
        book_code: record.book_code,
        title: record.book_title,
        author: record.book_author,
        lending_date: record.lending_date,
        submitted_date: record.submitted_date,
    }
}

/// Absent window bounds fall back to a trailing window ending now.
fn lending_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> (NaiveDate, NaiveDate) {
    let now = Utc::now();
    let start = start.unwrap_or_else(|| now - Duration::days(DEFAULT_WINDOW_DAYS));
    let end = end.unwrap_or(now);
    (start.date_naive(), end.date_naive())
}

fn in_window(moment: DateTime<Utc>, start: NaiveDate, end: NaiveDate) -> bool {
    let date = moment.date_naive();
    date >= start && date <= end
}

/// Round half-away-from-zero to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
