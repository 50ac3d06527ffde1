use anyhow::Result;
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::time::Duration;

use crate::store::UserDirectory;

/// true  => username is TAKEN
/// Only taken names are stored.
pub static USERNAME_CACHE: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(500_000)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Mark a single username as taken
pub async fn mark_taken(username: &str) {
    USERNAME_CACHE.insert(username.to_lowercase(), true).await;
}

/// Check if username is taken
pub async fn is_taken(username: &str) -> bool {
    USERNAME_CACHE
        .get(&username.to_lowercase())
        .await
        .unwrap_or(false)
}

async fn batch_mark(usernames: &[String]) {
    let futures: Vec<_> = usernames
        .iter()
        .map(|u| USERNAME_CACHE.insert(u.to_lowercase(), true))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load only RECENT usernames into the cache, in batches.
pub async fn warmup_username_cache(
    users: &dyn UserDirectory,
    days: u32,
    batch_size: usize,
) -> Result<()> {
    let usernames = users.recent_usernames(days).await?;

    for batch in usernames.chunks(batch_size.max(1)) {
        batch_mark(batch).await;
    }

    log::info!(
        "Username cache warmup complete: {} recent users (last {} days)",
        usernames.len(),
        days
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn marked_names_are_taken() {
        assert!(!is_taken("cache-test-nobody").await);
        mark_taken("Cache-Test-Somebody").await;
        assert!(is_taken("cache-test-somebody").await);
    }
}
