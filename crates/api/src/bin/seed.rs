//! Development seed tool: creates the default login and the demo bull
//! catalog. Seeding is the only write path for bulls.
//!
//! Idempotent: the user is looked up by email and bulls insert with
//! `ON CONFLICT DO NOTHING` on the ear tag, so re-running skips existing rows.
//!
//! Usage: `DATABASE_URL=... cargo run --bin herdbook-seed`

use herdbook_api::auth::password::hash_password;
use herdbook_core::query::{Coat, Origin, Purpose};
use herdbook_core::score::TraitScores;
use herdbook_db::models::bull::NewBull;
use herdbook_db::repositories::{BullRepo, UserRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SEED_USER_EMAIL: &str = "admin@herdbook.dev";
const SEED_USER_PASSWORD: &str = "herdbook-dev";
const SEED_USER_NAME: &str = "Admin User";

fn bull(
    ear_tag: &str,
    name: &str,
    purpose: Purpose,
    origin: Origin,
    coat: Coat,
    breed: &str,
    age_months: i32,
    highlight: Option<&str>,
    traits: [f64; 5],
) -> NewBull {
    let [growth, calving_ease, reproduction, moderation, carcass] = traits;
    NewBull {
        ear_tag: ear_tag.into(),
        name: name.into(),
        purpose,
        origin,
        coat,
        breed: breed.into(),
        age_months,
        highlight: highlight.map(Into::into),
        traits: TraitScores {
            growth,
            calving_ease,
            reproduction,
            moderation,
            carcass,
        },
    }
}

/// The demo catalog: a spread of purposes, origins, coats, and breeds so
/// every filter has matches out of the box.
fn seed_bulls() -> Vec<NewBull> {
    use Coat::{Black, Red};
    use Origin::{Catalog, Owned};
    use Purpose::{Cow, Heifer};

    vec![
        bull(
            "992",
            "Toro Black Emerald",
            Heifer,
            Owned,
            Black,
            "Angus",
            36,
            Some("Top 1% calving ease"),
            [85.0, 98.0, 75.0, 60.0, 82.0],
        ),
        bull(
            "845",
            "Red Diamond",
            Cow,
            Catalog,
            Red,
            "Angus",
            42,
            Some("Top 5% carcass"),
            [90.0, 40.0, 88.0, 70.0, 95.0],
        ),
        bull(
            "102",
            "General 102",
            Heifer,
            Catalog,
            Black,
            "Brangus",
            30,
            None,
            [70.0, 92.0, 65.0, 80.0, 60.0],
        ),
        bull(
            "554",
            "Indomable",
            Cow,
            Owned,
            Red,
            "Hereford",
            48,
            None,
            [60.0, 30.0, 95.0, 50.0, 75.0],
        ),
        bull(
            "210",
            "Midnight Express",
            Heifer,
            Owned,
            Black,
            "Angus",
            28,
            Some("Efficiency Leader"),
            [78.0, 95.0, 82.0, 85.0, 68.0],
        ),
        bull(
            "773",
            "Rustic King",
            Cow,
            Catalog,
            Red,
            "Braford",
            54,
            Some("Heat Tolerant"),
            [92.0, 35.0, 90.0, 45.0, 88.0],
        ),
        bull(
            "304",
            "Shadow Warrior",
            Heifer,
            Owned,
            Black,
            "Brangus",
            32,
            Some("Performance Pro"),
            [88.0, 85.0, 70.0, 65.0, 91.0],
        ),
    ]
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herdbook_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = herdbook_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    herdbook_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // --- Default user ---
    let existing = UserRepo::find_by_email(&pool, SEED_USER_EMAIL)
        .await
        .expect("User lookup failed");
    match existing {
        Some(_) => tracing::info!(email = SEED_USER_EMAIL, "Seed user already exists"),
        None => {
            let hashed = hash_password(SEED_USER_PASSWORD).expect("Password hashing failed");
            UserRepo::create(&pool, SEED_USER_EMAIL, &hashed, Some(SEED_USER_NAME))
                .await
                .expect("Seed user creation failed");
            tracing::info!(email = SEED_USER_EMAIL, "Created seed user");
        }
    }

    // --- Bull catalog ---
    let bulls = seed_bulls();
    let mut created = 0;
    for bull in &bulls {
        match BullRepo::insert(&pool, bull).await.expect("Bull insert failed") {
            Some(id) => {
                created += 1;
                tracing::info!(id, name = %bull.name, "Created bull");
            }
            None => tracing::info!(ear_tag = %bull.ear_tag, name = %bull.name, "Bull already exists"),
        }
    }

    tracing::info!(created, skipped = bulls.len() - created, "Seeding complete");
}
