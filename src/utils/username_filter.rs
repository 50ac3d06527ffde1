use anyhow::Result;
use autoscale_cuckoo_filter::CuckooFilter;
use once_cell::sync::Lazy;
use std::sync::{PoisonError, RwLock};

use crate::store::UserDirectory;

/// Expected capacity and false-positive rate.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

static USERNAME_FILTER: Lazy<RwLock<CuckooFilter<String>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

#[inline]
fn normalize(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Check if a username might exist (false positives possible)
pub fn might_exist(username: &str) -> bool {
    let username = normalize(username);
    USERNAME_FILTER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&username)
}

/// Insert a single username into the filter
pub fn insert(username: &str) {
    let username = normalize(username);
    USERNAME_FILTER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .add(&username);
}

/// Load every registered username into the filter, `batch_size` per write lock.
pub async fn warmup_username_filter(users: &dyn UserDirectory, batch_size: usize) -> Result<()> {
    let usernames = users.all_usernames().await?;
    let total = usernames.len();

    for batch in usernames.chunks(batch_size.max(1)) {
        insert_batch(batch);
    }

    log::info!("Username filter warmup complete: {} users", total);
    Ok(())
}

fn insert_batch(usernames: &[String]) {
    let mut filter = USERNAME_FILTER
        .write()
        .unwrap_or_else(PoisonError::into_inner);

    for username in usernames {
        filter.add(&normalize(username));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_names_are_found_case_insensitively() {
        insert("Filter-Test-User");
        assert!(might_exist("filter-test-user"));
        assert!(might_exist(" FILTER-TEST-USER "));
    }
}
