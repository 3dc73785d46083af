//! Seed data generation
//!
//! `generate` is a pure function of its seed, row count and reference
//! time; the startup initializer applies one batch to an empty database.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::SeedConfig,
    error::AppResult,
    models::{Book, User, UserBookLending},
    repository::{LibraryStore, SeedBatch},
};

const TITLES: &[&str] = &[
    "The Silent Echo",
    "Shadows of Time",
    "Beyond the Horizon",
    "Whispers in the Dark",
    "The Last Voyage",
    "Dreams of Eternity",
    "Hidden Truths",
    "Echoes of the Past",
];

const AUTHORS: &[&str] = &[
    "John Smith",
    "Jane Doe",
    "Michael Brown",
    "Emily Davis",
    "Robert Wilson",
    "Sarah Johnson",
    "David Lee",
    "Laura Martin",
];

const GENRES: &[&str] = &[
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Thriller",
    "Romance",
    "Biography",
    "History",
    "Self-Help",
];

const PUBLISHERS: &[&str] = &[
    "Penguin Books",
    "Random House",
    "HarperCollins",
    "Simon & Schuster",
    "Macmillan",
    "Hachette",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Edward", "Fiona", "George", "Hannah",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];

const DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "outlook.com", "example.com"];

const REMARKS: &[Option<&str>] = &[
    None,
    Some("Returned in good condition"),
    Some("Slight wear on cover"),
    Some("Missing dust jacket"),
    Some("Returned late"),
];

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Build one batch of seed rows: `rows` books, `rows / 10` users (at
/// least one) and `rows` lendings, roughly 70% of them returned. The
/// copy and lending counters are driven through the entity mutators, so
/// the generated state honours the same invariants as live data.
pub fn generate(rng_seed: u64, rows: usize, now: DateTime<Utc>) -> SeedBatch {
    let mut rng = StdRng::seed_from_u64(rng_seed);

    let mut books: Vec<Book> = (0..rows)
        .map(|i| {
            let title = format!("{} {}", pick(&mut rng, TITLES), i + 1);
            let author = pick(&mut rng, AUTHORS);
            let code = format!(
                "ISBN-978-0-{}-{}-{}",
                rng.gen_range(100..1000),
                rng.gen_range(10000..100000),
                rng.gen_range(0..10),
            );
            let publisher = pick(&mut rng, PUBLISHERS);
            let genre = pick(&mut rng, GENRES);
            Book::new(
                &title,
                author,
                &code,
                publisher,
                genre,
                rng.gen_range(100..600),
                rng.gen_range(1980..2025),
                rng.gen_range(1..10),
            )
        })
        .collect();

    let mut users: Vec<User> = (0..(rows / 10).max(1))
        .map(|_| {
            let first_name = pick(&mut rng, FIRST_NAMES);
            let last_name = pick(&mut rng, LAST_NAMES);
            let age_days =
                i64::from(rng.gen_range(18..70)) * 365 + i64::from(rng.gen_range(0..365));
            let phone_number = format!(
                "555-{}-{}",
                rng.gen_range(100..1000),
                rng.gen_range(1000..10000)
            );
            let email = format!(
                "{}.{}{}@{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                rng.gen_range(1..100),
                pick(&mut rng, DOMAINS),
            );
            let address = format!(
                "{} Main St, City {}, Sweden",
                rng.gen_range(100..10000),
                rng.gen_range(1..100)
            );
            User::new(
                first_name,
                last_name,
                (now - Duration::days(age_days)).date_naive(),
                &phone_number,
                &email,
                &address,
            )
        })
        .collect();

    let mut lendings = Vec::with_capacity(rows);
    for _ in 0..rows {
        let book_idx = rng.gen_range(0..books.len());
        let user_idx = rng.gen_range(0..users.len());
        let lending_date = now - Duration::days(rng.gen_range(1..365));
        let mut lending =
            UserBookLending::new(books[book_idx].id(), users[user_idx].id(), lending_date);

        if rng.gen_bool(0.7) {
            let submitted_date = lending_date + Duration::days(rng.gen_range(1..30));
            let remark = REMARKS[rng.gen_range(0..REMARKS.len())];
            lending.update_submitted_date(submitted_date, remark);
            books[book_idx].increment_available_copies();
        } else {
            books[book_idx].decrement_available_copies();
        }
        users[user_idx].increment_lending_book_count();

        lendings.push(lending);
    }

    SeedBatch {
        books,
        users,
        lendings,
    }
}

/// Populate an empty database with the configured batch. A store with
/// any existing rows is left untouched.
pub async fn initialize(store: &dyn LibraryStore, config: &SeedConfig) -> AppResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let populated = store.count_books().await? > 0
        || store.count_users().await? > 0
        || store.count_lendings().await? > 0;
    if populated {
        tracing::debug!("database already populated, skipping seed");
        return Ok(());
    }

    let batch = generate(config.rng_seed, config.size.rows(), Utc::now());
    store.insert_seed_batch(&batch).await?;

    tracing::info!(
        books = batch.books.len(),
        users = batch.users.len(),
        lendings = batch.lendings.len(),
        "seeded empty database"
    );

    Ok(())
}
