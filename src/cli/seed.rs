use sqlx::PgPool;
use tracing::info;

use crate::factory::advocate::AdvocateFactory;

/// Insert `count` generated advocates in one transaction.
pub async fn seed_advocates(pool: &PgPool, count: u32) -> anyhow::Result<u64> {
    let mut factory = AdvocateFactory::<()>::new();
    let inserted = factory.generate_many(pool, count, ()).await?;
    let inserted = inserted.len() as u64;
    info!(inserted, "seeded advocates");
    Ok(inserted)
}
