//! RPC-style message surface
//!
//! The six reports again, as message-oriented POST endpoints under
//! `/rpc/LibraryService/{Method}`. Identifiers travel as strings and
//! dates as ISO-8601 strings; the history and top-borrowers calls use
//! the implicit trailing 30-day window.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::reports::{
        BookAvailabilityQuery, BookReadingRateQuery, LendingRelatedBooksQuery,
        MostLendingBooksQuery, TopLendingUsersQuery, UserLendingBooksQuery,
    },
    AppState,
};

fn parse_id(value: &str, label: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::Validation(format!("{label} is not a valid identifier")))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MostBorrowedBooksRequest {
    #[serde(default)]
    pub top_n: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MostBorrowedBook {
    pub title: String,
    pub borrow_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MostBorrowedBooksResponse {
    pub books: Vec<MostBorrowedBook>,
}

/// Most borrowed books
#[utoipa::path(
    post,
    path = "/rpc/LibraryService/GetMostBorrowedBooks",
    tag = "rpc",
    request_body = MostBorrowedBooksRequest,
    responses(
        (status = 200, description = "Books ranked by borrow count", body = MostBorrowedBooksResponse)
    )
)]
pub async fn get_most_borrowed_books(
    State(state): State<AppState>,
    Json(request): Json<MostBorrowedBooksRequest>,
) -> AppResult<Json<MostBorrowedBooksResponse>> {
    tracing::info!(top_n = request.top_n, "fetching most borrowed books");
    let result = state
        .services
        .reports
        .most_lending_books(MostLendingBooksQuery {
            top_n: request.top_n,
        })
        .await?;

    Ok(Json(MostBorrowedBooksResponse {
        books: result
            .into_iter()
            .map(|book| MostBorrowedBook {
                title: book.title,
                borrow_count: book.count,
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAvailabilityRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAvailabilityMessage {
    pub code: String,
    pub total_copies: i32,
    pub available_copies: i32,
}

/// Availability of one book
#[utoipa::path(
    post,
    path = "/rpc/LibraryService/GetBookAvailability",
    tag = "rpc",
    request_body = BookAvailabilityRequest,
    responses(
        (status = 200, description = "Copy counts; zeroed when no active book matches", body = BookAvailabilityMessage)
    )
)]
pub async fn get_book_availability(
    State(state): State<AppState>,
    Json(request): Json<BookAvailabilityRequest>,
) -> AppResult<Json<BookAvailabilityMessage>> {
    tracing::info!(book_id = %request.book_id, "fetching book availability");
    let book_id = parse_id(&request.book_id, "Book Id")?;
    let result = state
        .services
        .reports
        .book_availability(BookAvailabilityQuery { book_id })
        .await?;

    Ok(Json(result.map_or_else(Default::default, |availability| {
        BookAvailabilityMessage {
            code: availability.code,
            total_copies: availability.total_copies,
            available_copies: availability.available_copies,
        }
    })))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRateRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRateMessage {
    pub rate: f64,
}

/// Average reading rate of one book
#[utoipa::path(
    post,
    path = "/rpc/LibraryService/GetReadingRate",
    tag = "rpc",
    request_body = ReadingRateRequest,
    responses(
        (status = 200, description = "Average pages per day; zero without returned lendings", body = ReadingRateMessage)
    )
)]
pub async fn get_reading_rate(
    State(state): State<AppState>,
    Json(request): Json<ReadingRateRequest>,
) -> AppResult<Json<ReadingRateMessage>> {
    tracing::info!(book_id = %request.book_id, "fetching reading rate");
    let book_id = parse_id(&request.book_id, "Book Id")?;
    let result = state
        .services
        .reports
        .book_reading_rate(BookReadingRateQuery { book_id })
        .await?;

    Ok(Json(ReadingRateMessage {
        rate: result.map_or(0.0, |rate| rate.average),
    }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopBorrowersRequest {
    #[serde(default)]
    pub top_n: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopBorrower {
    pub full_name: String,
    pub borrow_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopBorrowersResponse {
    pub borrowers: Vec<TopBorrower>,
}

/// Heaviest borrowers of the trailing 30 days
#[utoipa::path(
    post,
    path = "/rpc/LibraryService/GetTopBorrowers",
    tag = "rpc",
    request_body = TopBorrowersRequest,
    responses(
        (status = 200, description = "Borrowers ranked by borrow count", body = TopBorrowersResponse)
    )
)]
pub async fn get_top_borrowers(
    State(state): State<AppState>,
    Json(request): Json<TopBorrowersRequest>,
) -> AppResult<Json<TopBorrowersResponse>> {
    tracing::info!(top_n = request.top_n, "fetching top borrowers");
    let result = state
        .services
        .reports
        .top_lending_users(TopLendingUsersQuery {
            start_date: None,
            end_date: None,
            top_user_count: request.top_n,
        })
        .await?;

    Ok(Json(TopBorrowersResponse {
        borrowers: result
            .into_iter()
            .map(|user| TopBorrower {
                full_name: user.name,
                borrow_count: user.lending_count,
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBorrowHistoryRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBorrowRecord {
    pub book_title: String,
    /// ISO-8601 timestamp
    pub borrowed_at: String,
    /// ISO-8601 timestamp; absent while the loan is outstanding
    pub returned_at: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBorrowHistoryResponse {
    pub history: Vec<UserBorrowRecord>,
}

/// One user's borrows of the trailing 30 days
#[utoipa::path(
    post,
    path = "/rpc/LibraryService/GetUserBorrowHistory",
    tag = "rpc",
    request_body = UserBorrowHistoryRequest,
    responses(
        (status = 200, description = "The user's recent borrows", body = UserBorrowHistoryResponse)
    )
)]
pub async fn get_user_borrow_history(
    State(state): State<AppState>,
    Json(request): Json<UserBorrowHistoryRequest>,
) -> AppResult<Json<UserBorrowHistoryResponse>> {
    tracing::info!(user_id = %request.user_id, "fetching borrow history");
    let user_id = parse_id(&request.user_id, "User Id")?;
    let result = state
        .services
        .reports
        .user_lending_books(UserLendingBooksQuery {
            user_id,
            start_date: None,
            end_date: None,
        })
        .await?;

    Ok(Json(UserBorrowHistoryResponse {
        history: result
            .into_iter()
            .map(|row| UserBorrowRecord {
                book_title: row.title,
                borrowed_at: row.lending_date.to_rfc3339(),
                returned_at: row.submitted_date.map(|date| date.to_rfc3339()),
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedBooksRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedBook {
    pub id: String,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedBooksResponse {
    pub books: Vec<RelatedBook>,
}

/// Books borrowed by a book's co-borrowers
#[utoipa::path(
    post,
    path = "/rpc/LibraryService/GetRelatedBooks",
    tag = "rpc",
    request_body = RelatedBooksRequest,
    responses(
        (status = 200, description = "Other books borrowed by the same readers", body = RelatedBooksResponse)
    )
)]
pub async fn get_related_books(
    State(state): State<AppState>,
    Json(request): Json<RelatedBooksRequest>,
) -> AppResult<Json<RelatedBooksResponse>> {
    tracing::info!(book_id = %request.book_id, "fetching related books");
    let book_id = parse_id(&request.book_id, "Book Id")?;
    let result = state
        .services
        .reports
        .lending_related_books(LendingRelatedBooksQuery { book_id })
        .await?;

    Ok(Json(RelatedBooksResponse {
        books: result
            .into_iter()
            .map(|row| RelatedBook {
                id: row.book_id.to_string(),
                title: row.title,
                author: row.author,
            })
            .collect(),
    }))
}
