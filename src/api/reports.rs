//! Lending report endpoints
//!
//! Every report answers 200 with a JSON body; an absent book or rate is
//! a `null` body and an empty match set is `[]`, never a 404.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::reports::{
        BookAvailabilityQuery, BookAvailabilityResponse, BookReadingRateQuery,
        BookReadingRateResponse, LendingBooksResponse, LendingRelatedBooksQuery,
        MostLendingBooksQuery, MostLendingBooksResponse, TopLendingUsersQuery,
        TopLendingUsersResponse, UserLendingBooksQuery,
    },
    AppState,
};

/// Accept either a full RFC 3339 timestamp or a plain `YYYY-MM-DD`
/// date; an absent or empty parameter is substituted downstream.
fn flexible_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|moment| moment.with_timezone(&Utc))
        .or_else(|_| {
            raw.parse::<NaiveDate>()
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        })
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MostLendingParams {
    /// Number of books to return; must be greater than zero
    #[serde(default)]
    pub top_n: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TopLendersParams {
    /// Window start; trailing 30 days when omitted
    #[serde(default, deserialize_with = "flexible_date")]
    pub start_date: Option<DateTime<Utc>>,
    /// Window end; now when omitted
    #[serde(default, deserialize_with = "flexible_date")]
    pub end_date: Option<DateTime<Utc>>,
    /// Number of borrowers to return; 10 when omitted or zero
    #[serde(default)]
    pub top_n: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LendingHistoryParams {
    /// Window start; trailing 30 days when omitted
    #[serde(default, deserialize_with = "flexible_date")]
    pub start_date: Option<DateTime<Utc>>,
    /// Window end; now when omitted
    #[serde(default, deserialize_with = "flexible_date")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Most frequently lent books
#[utoipa::path(
    get,
    path = "/api/reports/most-lending",
    tag = "reports",
    params(MostLendingParams),
    responses(
        (status = 200, description = "Books ranked by lending count", body = Vec<MostLendingBooksResponse>),
        (status = 400, description = "topN missing or not positive")
    )
)]
pub async fn most_lending(
    State(state): State<AppState>,
    Query(params): Query<MostLendingParams>,
) -> AppResult<Json<Vec<MostLendingBooksResponse>>> {
    let result = state
        .services
        .reports
        .most_lending_books(MostLendingBooksQuery {
            top_n: params.top_n,
        })
        .await?;
    Ok(Json(result))
}

/// Availability of one book
#[utoipa::path(
    get,
    path = "/api/reports/book-availability/{bookId}",
    tag = "reports",
    params(
        ("bookId" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Copy counts, or null when no active book matches", body = BookAvailabilityResponse)
    )
)]
pub async fn book_availability(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<Option<BookAvailabilityResponse>>> {
    let result = state
        .services
        .reports
        .book_availability(BookAvailabilityQuery { book_id })
        .await?;
    Ok(Json(result))
}

/// Heaviest borrowers in a date window
#[utoipa::path(
    get,
    path = "/api/reports/top-lenders",
    tag = "reports",
    params(TopLendersParams),
    responses(
        (status = 200, description = "Borrowers ranked by lending count", body = Vec<TopLendingUsersResponse>)
    )
)]
pub async fn top_lenders(
    State(state): State<AppState>,
    Query(params): Query<TopLendersParams>,
) -> AppResult<Json<Vec<TopLendingUsersResponse>>> {
    let result = state
        .services
        .reports
        .top_lending_users(TopLendingUsersQuery {
            start_date: params.start_date,
            end_date: params.end_date,
            top_user_count: params.top_n,
        })
        .await?;
    Ok(Json(result))
}

/// One user's lending history in a date window
#[utoipa::path(
    get,
    path = "/api/reports/user-lending-history/{userId}",
    tag = "reports",
    params(
        ("userId" = Uuid, Path, description = "User ID"),
        LendingHistoryParams
    ),
    responses(
        (status = 200, description = "The user's lendings inside the window", body = Vec<LendingBooksResponse>)
    )
)]
pub async fn user_lending_history(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<LendingHistoryParams>,
) -> AppResult<Json<Vec<LendingBooksResponse>>> {
    let result = state
        .services
        .reports
        .user_lending_books(UserLendingBooksQuery {
            user_id,
            start_date: params.start_date,
            end_date: params.end_date,
        })
        .await?;
    Ok(Json(result))
}

/// Books lent to the co-borrowers of a book
#[utoipa::path(
    get,
    path = "/api/reports/related-books/{bookId}",
    tag = "reports",
    params(
        ("bookId" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Other books borrowed by the same readers", body = Vec<LendingBooksResponse>)
    )
)]
pub async fn related_books(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<Vec<LendingBooksResponse>>> {
    let result = state
        .services
        .reports
        .lending_related_books(LendingRelatedBooksQuery { book_id })
        .await?;
    Ok(Json(result))
}

/// Average reading rate of one book
#[utoipa::path(
    get,
    path = "/api/reports/reading-rate/{bookId}",
    tag = "reports",
    params(
        ("bookId" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Average pages per day, or null without returned lendings", body = BookReadingRateResponse)
    )
)]
pub async fn reading_rate(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<Option<BookReadingRateResponse>>> {
    let result = state
        .services
        .reports
        .book_reading_rate(BookReadingRateQuery { book_id })
        .await?;
    Ok(Json(result))
}
