//! Saving places into categories and moving them around.
//!
//! Favorite status is global: a uri is favorited when any category holds
//! it, and unfavoriting removes it from every category at once. Unknown
//! category ids and absent uris are absorbed as no-ops with an
//! informational message, never an error.

use crate::commands::{decode, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Category, Place};
use crate::store::StorageBackend;

/// True iff any category's item list contains the uri.
pub fn is_favorite(categories: &[Category], uri: &str) -> bool {
    categories.iter().any(|cat| cat.contains(uri))
}

#[derive(Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The uri was favorited; it has been removed from this many
    /// categories and the collection persisted.
    Removed(usize),
    /// The uri was not favorited. Nothing was persisted — the caller
    /// must pick a destination and follow up with [`add`].
    NeedsCategory,
}

/// Global favorite toggle. The add half is two-phase by design: the
/// destination category is the caller's question to answer.
pub fn toggle<S: StorageBackend>(store: &mut S, place: &Place) -> Result<ToggleOutcome> {
    let mut categories = decode::load(store);
    if !is_favorite(&categories, &place.uri) {
        return Ok(ToggleOutcome::NeedsCategory);
    }

    let mut removed = 0;
    for cat in categories.iter_mut() {
        let before = cat.items.len();
        cat.items.retain(|item| item.uri != place.uri);
        removed += before - cat.items.len();
    }
    decode::save(store, &categories)?;
    Ok(ToggleOutcome::Removed(removed))
}

/// Append the place at the end of the named category. No uniqueness
/// check on direct adds; the move operation is the one that dedupes.
pub fn add<S: StorageBackend>(
    store: &mut S,
    category_id: &str,
    place: Place,
) -> Result<CmdResult> {
    let mut categories = decode::load(store);
    let mut result = CmdResult::default();

    match categories.iter_mut().find(|cat| cat.id == category_id) {
        Some(cat) => {
            let name = cat.name.clone();
            cat.items.push(place.clone());
            decode::save(store, &categories)?;
            result.add_message(CmdMessage::success(format!(
                "已收藏「{}」到 {}",
                place.title, name
            )));
        }
        None => {
            result.add_message(CmdMessage::info(format!("找不到分類：{category_id}")));
        }
    }

    Ok(result.with_categories(categories))
}

/// Remove the uri from one category only.
pub fn remove<S: StorageBackend>(
    store: &mut S,
    category_id: &str,
    uri: &str,
) -> Result<CmdResult> {
    let mut categories = decode::load(store);
    let mut result = CmdResult::default();

    let mut removed: Option<Place> = None;
    if let Some(cat) = categories.iter_mut().find(|cat| cat.id == category_id) {
        if let Some(pos) = cat.items.iter().position(|item| item.uri == uri) {
            removed = Some(cat.items.remove(pos));
        }
    }

    match removed {
        Some(place) => {
            decode::save(store, &categories)?;
            result.add_message(CmdMessage::success(format!("已移除「{}」", place.title)));
        }
        None => {
            result.add_message(CmdMessage::info("沒有符合的收藏，未做任何更動"));
        }
    }

    Ok(result.with_categories(categories))
}

/// Move a place between categories, matched by uri.
///
/// The destination membership check runs against the pre-move state:
/// moving onto a category that already holds the uri drops the source
/// copy without duplicating the destination, and a move onto the
/// source category itself degenerates to plain removal.
pub fn move_item<S: StorageBackend>(
    store: &mut S,
    from_id: &str,
    to_id: &str,
    uri: &str,
) -> Result<CmdResult> {
    let mut categories = decode::load(store);
    let mut result = CmdResult::default();

    let Some(from_pos) = categories.iter().position(|cat| cat.id == from_id) else {
        result.add_message(CmdMessage::info(format!("找不到分類：{from_id}")));
        return Ok(result.with_categories(categories));
    };
    let Some(item_pos) = categories[from_pos].items.iter().position(|i| i.uri == uri) else {
        result.add_message(CmdMessage::info("來源分類裡沒有這個收藏"));
        return Ok(result.with_categories(categories));
    };
    if !categories.iter().any(|cat| cat.id == to_id) {
        result.add_message(CmdMessage::info(format!("找不到分類：{to_id}")));
        return Ok(result.with_categories(categories));
    }

    let destination_had = categories
        .iter()
        .find(|cat| cat.id == to_id)
        .map(|cat| cat.contains(uri))
        .unwrap_or(false);

    let place = categories[from_pos].items.remove(item_pos);
    let title = place.title.clone();

    if destination_had {
        result.add_message(CmdMessage::warning(format!(
            "「{title}」已在目標分類中，來源的那份已移除"
        )));
    } else if let Some(dest) = categories.iter_mut().find(|cat| cat.id == to_id) {
        dest.items.push(place);
        result.add_message(CmdMessage::success(format!("已移動「{title}」")));
    }

    decode::save(store, &categories)?;
    Ok(result.with_categories(categories))
}
