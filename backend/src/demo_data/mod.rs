//! Optional startup seeding of demo categories, users, articles and comments.

mod seed;

pub use seed::{DemoDataError, DemoDataOutcome, DemoDataRepositories, DemoDataSeeder};

use tracing::info;

/// Apply demo data on startup when enabled.
///
/// Seeding is skipped when disabled or when any user already exists.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use newsroom::demo_data::{DemoDataRepositories, DemoDataSeeder, seed_demo_data_on_startup};
/// use newsroom::outbound::memory::MemoryStore;
/// use newsroom::outbound::security::Argon2PasswordHasher;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let seeder = DemoDataSeeder::new(
///     DemoDataRepositories::from_store(store),
///     Arc::new(Argon2PasswordHasher::default()),
///     Arc::new(DefaultClock),
/// );
/// let outcome = seed_demo_data_on_startup(true, &seeder).await?;
/// assert!(outcome.is_some());
/// # Ok(())
/// # }
/// ```
pub async fn seed_demo_data_on_startup(
    enabled: bool,
    seeder: &DemoDataSeeder,
) -> Result<Option<DemoDataOutcome>, DemoDataError> {
    if !enabled {
        info!(reason = "disabled", "demo data seeding skipped");
        return Ok(None);
    }
    let outcome = seeder.seed().await?;
    match outcome {
        DemoDataOutcome::Applied {
            categories,
            users,
            articles,
            comments,
        } => info!(
            categories,
            users, articles, comments, "demo data seeding applied"
        ),
        DemoDataOutcome::AlreadySeeded => {
            info!(reason = "users present", "demo data seeding skipped");
        }
    }
    Ok(Some(outcome))
}
