//! Report query objects and response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn id_specified(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("id_specified"));
    }
    Ok(())
}

/// Availability of a single active book.
#[derive(Debug, Clone, Copy, Validate)]
pub struct BookAvailabilityQuery {
    #[validate(custom(function = "id_specified", message = "Book Id must be specified"))]
    pub book_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAvailabilityResponse {
    pub code: String,
    pub is_available: bool,
    pub available_copies: i32,
    pub total_copies: i32,
}

/// Average pages-per-day across a book's returned lendings.
#[derive(Debug, Clone, Copy, Validate)]
pub struct BookReadingRateQuery {
    #[validate(custom(function = "id_specified", message = "Book Id must be specified"))]
    pub book_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookReadingRateResponse {
    pub code: String,
    pub title: String,
    pub average: f64,
}

/// The most frequently lent books, ranked by lending count.
#[derive(Debug, Clone, Copy, Validate)]
pub struct MostLendingBooksQuery {
    #[validate(range(min = 1, message = "TopN must be greater than 0."))]
    pub top_n: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MostLendingBooksResponse {
    pub code: String,
    pub title: String,
    pub count: i64,
}

/// The heaviest borrowers inside a date window.
///
/// The window bounds and the count are declared mandatory by the rule
/// set, but absent or zero values pass and are substituted inside the
/// handler (trailing 30 days, top 10).
#[derive(Debug, Clone, Copy, Validate)]
pub struct TopLendingUsersQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub top_user_count: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopLendingUsersResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub lending_count: i64,
}

/// One user's lendings inside a date window.
#[derive(Debug, Clone, Copy, Validate)]
pub struct UserLendingBooksQuery {
    #[validate(custom(function = "id_specified", message = "User must be specified"))]
    pub user_id: Uuid,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Books lent to the co-borrowers of a given book.
#[derive(Debug, Clone, Copy, Validate)]
pub struct LendingRelatedBooksQuery {
    #[validate(custom(function = "id_specified", message = "Book must be specified"))]
    pub book_id: Uuid,
}

/// Row shape shared by the lending-history and related-books reports.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LendingBooksResponse {
    pub book_id: Uuid,
    pub book_code: String,
    pub title: String,
    pub author: String,
    pub lending_date: DateTime<Utc>,
    pub submitted_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_book_id_fails_validation() {
        let query = BookAvailabilityQuery {
            book_id: Uuid::nil(),
        };
        let err = query.validate().expect_err("nil id must be rejected");
        assert!(err.to_string().contains("Book Id must be specified"));
    }

    #[test]
    fn real_book_id_passes_validation() {
        let query = BookAvailabilityQuery {
            book_id: Uuid::new_v4(),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn non_positive_top_n_fails_validation() {
        for top_n in [0, -3] {
            let query = MostLendingBooksQuery { top_n };
            let err = query.validate().expect_err("top_n must be rejected");
            assert!(err.to_string().contains("TopN must be greater than 0."));
        }
    }

    // Zero count and absent dates are the handler's problem, not the
    // validator's.
    #[test]
    fn top_lending_users_accepts_zero_count_and_absent_dates() {
        let query = TopLendingUsersQuery {
            start_date: None,
            end_date: None,
            top_user_count: 0,
        };
        assert!(query.validate().is_ok());
    }
}
