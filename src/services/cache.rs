//! Per-user cached data: unread private message counters

use dashmap::DashMap;

#[derive(Default)]
pub struct UserDataCache {
    new_pm_counts: DashMap<i32, i64>,
}

impl UserDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_pm_count(&self, user_id: i32) -> Option<i64> {
        self.new_pm_counts.get(&user_id).map(|count| *count)
    }

    pub fn put_new_pm_count(&self, user_id: i32, count: i64) {
        self.new_pm_counts.insert(user_id, count);
    }

    /// No-op until a value has been cached for the user
    pub fn increment_new_pm_count(&self, user_id: i32) {
        if let Some(mut count) = self.new_pm_counts.get_mut(&user_id) {
            *count += 1;
        }
    }

    pub fn decrement_new_pm_count(&self, user_id: i32) {
        if let Some(mut count) = self.new_pm_counts.get_mut(&user_id) {
            *count = (*count - 1).max(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_needs_a_cached_value() {
        let cache = UserDataCache::new();
        cache.increment_new_pm_count(1);
        assert_eq!(cache.new_pm_count(1), None);

        cache.put_new_pm_count(1, 2);
        cache.increment_new_pm_count(1);
        assert_eq!(cache.new_pm_count(1), Some(3));
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let cache = UserDataCache::new();
        cache.put_new_pm_count(7, 1);
        cache.decrement_new_pm_count(7);
        cache.decrement_new_pm_count(7);
        assert_eq!(cache.new_pm_count(7), Some(0));
    }
}
