use std::sync::{Arc, OnceLock};

use super::{
    migrations,
    postgres_connection::{self, PgPoolSquad},
};

static POOL: OnceLock<Option<Arc<PgPoolSquad>>> = OnceLock::new();

/// Shared pool against `DATABASE_URL` with migrations applied.
/// `None` when the variable is unset, so database tests become no-ops.
pub(crate) fn database_pool() -> Option<Arc<PgPoolSquad>> {
    POOL.get_or_init(|| {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())?;

        let pool = postgres_connection::establish_connection(&database_url, 16)
            .expect("DATABASE_URL should be reachable");
        migrations::run_pending_migrations(&pool).expect("migrations should apply");
        Some(Arc::new(pool))
    })
    .clone()
}
