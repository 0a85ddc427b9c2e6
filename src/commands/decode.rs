//! Loading, migration and saving of the favorites collection.
//!
//! The persisted blob has no version field; its vintage is inferred from
//! its JSON shape. Three named cases, tried in order:
//!
//! 1. [`BlobShape::Categorized`] — the current shape, a `Category` array.
//!    Collections written before the reserved buckets existed may lack
//!    `home`/`work`; those are prepended, everything else untouched.
//! 2. [`BlobShape::LegacyFlat`] — the original shape, a bare `Place`
//!    array. Items move under the `default` bucket in their stored
//!    order; an empty legacy array just seeds a fresh collection.
//! 3. [`BlobShape::Fallback`] — no blob, or bytes neither shape accepts.
//!    Loading never fails: the fallback is three empty reserved
//!    categories.

use crate::error::Result;
use crate::model::{default_categories, Category, Place, HOME_ID, WORK_ID};
use crate::store::StorageBackend;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobShape {
    Categorized,
    LegacyFlat,
    Fallback,
}

/// Load the collection, migrating older shapes. Never fails.
pub fn load<S: StorageBackend>(store: &S) -> Vec<Category> {
    let blob = match store.read_blob() {
        Ok(blob) => blob,
        Err(e) => {
            debug!("favorites blob unreadable, starting fresh: {e}");
            None
        }
    };
    let (categories, shape) = decode_payload(blob.as_deref());
    debug!("favorites loaded as {shape:?} ({} categories)", categories.len());
    categories
}

/// Serialize and persist the full collection. Called after every
/// mutation; there are no partial writes.
pub fn save<S: StorageBackend>(store: &mut S, categories: &[Category]) -> Result<()> {
    let payload = serde_json::to_string_pretty(categories)?;
    store.write_blob(&payload)
}

pub fn decode_payload(payload: Option<&str>) -> (Vec<Category>, BlobShape) {
    let Some(raw) = payload else {
        return (default_categories(), BlobShape::Fallback);
    };

    if let Ok(categories) = serde_json::from_str::<Vec<Category>>(raw) {
        // An empty array also satisfies Vec<Place>; treat it as the
        // legacy empty case so a fresh profile gets its buckets.
        if !categories.is_empty() {
            return (ensure_reserved(categories), BlobShape::Categorized);
        }
        return (default_categories(), BlobShape::LegacyFlat);
    }

    if let Ok(items) = serde_json::from_str::<Vec<Place>>(raw) {
        let mut unsorted = Category::unsorted();
        unsorted.items = items;
        let mut categories = vec![Category::home(), Category::work()];
        categories.push(unsorted);
        return (categories, BlobShape::LegacyFlat);
    }

    (default_categories(), BlobShape::Fallback)
}

/// Prepend the reserved buckets a mid-vintage collection may lack.
/// Work first, then home, so home lands at the front.
fn ensure_reserved(mut categories: Vec<Category>) -> Vec<Category> {
    let has_home = categories.iter().any(|c| c.id == HOME_ID);
    let has_work = categories.iter().any(|c| c.id == WORK_ID);
    if !has_work {
        categories.insert(0, Category::work());
    }
    if !has_home {
        categories.insert(0, Category::home());
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_ID;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn missing_blob_falls_back_to_reserved_categories() {
        let (cats, shape) = decode_payload(None);
        assert_eq!(shape, BlobShape::Fallback);
        let ids: Vec<&str> = cats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "work", "default"]);
    }

    #[test]
    fn garbage_blob_falls_back_to_reserved_categories() {
        for raw in ["not json", "{\"id\":1}", "42", "[[]]"] {
            let (cats, shape) = decode_payload(Some(raw));
            assert_eq!(shape, BlobShape::Fallback, "payload: {raw}");
            assert_eq!(cats.len(), 3);
        }
    }

    #[test]
    fn legacy_flat_list_moves_under_default_in_order() {
        let raw = r#"[
            {"uri":"https://maps.example/a","title":"甲"},
            {"uri":"https://maps.example/b","title":"乙"}
        ]"#;
        let (cats, shape) = decode_payload(Some(raw));
        assert_eq!(shape, BlobShape::LegacyFlat);
        assert_eq!(cats.len(), 3);
        assert!(cats[0].id == "home" && cats[0].items.is_empty());
        assert!(cats[1].id == "work" && cats[1].items.is_empty());
        assert_eq!(cats[2].id, DEFAULT_ID);
        let titles: Vec<&str> = cats[2].items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["甲", "乙"]);
    }

    #[test]
    fn empty_legacy_list_seeds_fresh_collection() {
        let (cats, shape) = decode_payload(Some("[]"));
        assert_eq!(shape, BlobShape::LegacyFlat);
        assert_eq!(cats, default_categories());
    }

    #[test]
    fn categorized_blob_missing_reserved_gets_them_prepended() {
        let raw = r#"[
            {"id":"1700000000000","name":"甜點清單","items":[{"uri":"u1","title":"店"}],"collapsed":true}
        ]"#;
        let (cats, shape) = decode_payload(Some(raw));
        assert_eq!(shape, BlobShape::Categorized);
        let ids: Vec<&str> = cats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "work", "1700000000000"]);
        // Prior category untouched, including display state.
        assert!(cats[2].collapsed);
        assert_eq!(cats[2].items.len(), 1);
    }

    #[test]
    fn categorized_blob_missing_only_work_keeps_relative_order() {
        let raw = r#"[
            {"id":"home","name":"🏠 家裡附近","items":[]},
            {"id":"custom","name":"宵夜","items":[]}
        ]"#;
        let (cats, _) = decode_payload(Some(raw));
        let ids: Vec<&str> = cats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["work", "home", "custom"]);
    }

    #[test]
    fn complete_categorized_blob_is_untouched() {
        let cats = default_categories();
        let raw = serde_json::to_string(&cats).unwrap();
        let (decoded, shape) = decode_payload(Some(&raw));
        assert_eq!(shape, BlobShape::Categorized);
        assert_eq!(decoded, cats);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut store = InMemoryStore::new();
        let mut cats = default_categories();
        cats[0].items.push(crate::model::Place::new("u", "t"));
        save(&mut store, &cats).unwrap();
        assert_eq!(load(&store), cats);
    }
}
