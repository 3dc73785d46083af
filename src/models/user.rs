//! User entity

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered borrower.
///
/// `lending_book_count` is a plain signed counter with no floor; a
/// decrement without a matching increment drives it negative.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    id: Uuid,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    phone_number: String,
    email: String,
    address: String,
    is_active: bool,
    lending_book_count: i32,
}

impl User {
    pub fn new(
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
        phone_number: &str,
        email: &str,
        address: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            phone_number: phone_number.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            is_active: true,
            lending_book_count: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn lending_book_count(&self) -> i32 {
        self.lending_book_count
    }

    pub fn set_inactive(&mut self) {
        self.is_active = false;
    }

    pub fn set_active(&mut self) {
        self.is_active = true;
    }

    pub fn update_phone_number(&mut self, phone_number: &str) {
        self.phone_number = phone_number.to_string();
    }

    pub fn update_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    pub fn increment_lending_book_count(&mut self) {
        self.lending_book_count += 1;
    }

    pub fn decrement_lending_book_count(&mut self) {
        self.lending_book_count -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::new(
            "Alice",
            "Bob",
            NaiveDate::from_ymd_opt(1984, 3, 12).expect("valid date"),
            "123567 89",
            "alice@example.com",
            "1st street, Stockholm",
        )
    }

    #[test]
    fn new_user_is_active_with_zero_lendings() {
        let user = alice();
        assert!(user.is_active());
        assert_eq!(user.lending_book_count(), 0);
    }

    #[test]
    fn contact_details_update() {
        let mut user = alice();
        user.update_phone_number("555-000-1111");
        user.update_email("alice@lectern.org");
        assert_eq!(user.phone_number(), "555-000-1111");
        assert_eq!(user.email(), "alice@lectern.org");
    }

    // The counter is unclamped; decrementing a fresh user goes negative.
    #[test]
    fn lending_count_has_no_floor() {
        let mut user = alice();
        user.decrement_lending_book_count();
        assert_eq!(user.lending_book_count(), -1);
        user.increment_lending_book_count();
        user.increment_lending_book_count();
        assert_eq!(user.lending_book_count(), 1);
    }
}
