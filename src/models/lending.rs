//! Lending record entity

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One borrow of one book by one user. Created open; a return fills in
/// `submitted_date`. Lending records are never deleted.
#[derive(Debug, Clone, FromRow)]
pub struct UserBookLending {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    lending_date: DateTime<Utc>,
    submitted_date: Option<DateTime<Utc>>,
    remarks: Option<String>,
}

impl UserBookLending {
    pub fn new(book_id: Uuid, user_id: Uuid, lending_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_id,
            user_id,
            lending_date,
            submitted_date: None,
            remarks: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn book_id(&self) -> Uuid {
        self.book_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn lending_date(&self) -> DateTime<Utc> {
        self.lending_date
    }

    pub fn submitted_date(&self) -> Option<DateTime<Utc>> {
        self.submitted_date
    }

    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// Record a return. The date is always taken; the remarks only
    /// replace the stored ones when non-empty.
    pub fn update_submitted_date(&mut self, submitted_date: DateTime<Utc>, remarks: Option<&str>) {
        self.submitted_date = Some(submitted_date);

        match remarks {
            Some(text) if !text.is_empty() => self.remarks = Some(text.to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_lending_is_outstanding() {
        let lending = UserBookLending::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        assert!(lending.submitted_date().is_none());
        assert!(lending.remarks().is_none());
    }

    #[test]
    fn return_sets_date_and_remarks() {
        let mut lending = UserBookLending::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        let returned = Utc::now() + Duration::days(14);
        lending.update_submitted_date(returned, Some("Slight wear on cover"));
        assert_eq!(lending.submitted_date(), Some(returned));
        assert_eq!(lending.remarks(), Some("Slight wear on cover"));
    }

    #[test]
    fn empty_remarks_do_not_overwrite() {
        let mut lending = UserBookLending::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        lending.update_submitted_date(Utc::now(), Some("Returned late"));
        let second_return = Utc::now() + Duration::days(1);
        lending.update_submitted_date(second_return, Some(""));
        assert_eq!(lending.submitted_date(), Some(second_return));
        assert_eq!(lending.remarks(), Some("Returned late"));
    }

    #[test]
    fn absent_remarks_leave_existing_ones() {
        let mut lending = UserBookLending::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        lending.update_submitted_date(Utc::now(), None);
        assert!(lending.remarks().is_none());
        lending.update_submitted_date(Utc::now(), Some("Missing dust jacket"));
        lending.update_submitted_date(Utc::now(), None);
        assert_eq!(lending.remarks(), Some("Missing dust jacket"));
    }
}
