use crate::NewItem;

/// The catalog every fresh deployment starts with.
///
/// Mirrors `migrations/0002_seed_items.sql` so the in-memory store and a
/// freshly migrated database expose the same items.
pub fn default_catalog() -> Vec<NewItem> {
    vec![
        NewItem::new("Round Widget", 299, "A widget that is round"),
        NewItem::new("Square Widget", 199, "A widget that is square"),
    ]
}
