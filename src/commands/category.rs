//! Category lifecycle: create, rename, delete, collapse.

use crate::commands::{decode, CmdMessage, CmdResult};
use crate::error::{CompassError, Result};
use crate::model::{is_reserved, Category, Place};
use crate::store::StorageBackend;
use std::io::{self, Write};

/// Create a user category, optionally seeded with one place.
///
/// Whitespace-only names are absorbed as a no-op. The id is the
/// creation-time millisecond clock, bumped past any collision so ids
/// stay unique even for back-to-back creations.
pub fn create<S: StorageBackend>(
    store: &mut S,
    name: &str,
    initial: Option<Place>,
) -> Result<CmdResult> {
    let mut categories = decode::load(store);
    let mut result = CmdResult::default();

    let name = name.trim();
    if name.is_empty() {
        result.add_message(CmdMessage::info("分類名稱不能是空白"));
        return Ok(result.with_categories(categories));
    }

    let id = next_id(&categories);
    let mut category = Category::new(id, name);
    if let Some(place) = initial {
        category.items.push(place);
    }
    let display = category.name.clone();
    categories.push(category);
    decode::save(store, &categories)?;

    result.add_message(CmdMessage::success(format!("已建立分類「{display}」")));
    Ok(result.with_categories(categories))
}

/// Rename in place; id, items and collapsed state survive.
/// Whitespace-only names are absorbed as a no-op.
pub fn rename<S: StorageBackend>(store: &mut S, id: &str, new_name: &str) -> Result<CmdResult> {
    let mut categories = decode::load(store);
    let mut result = CmdResult::default();

    let new_name = new_name.trim();
    if new_name.is_empty() {
        result.add_message(CmdMessage::info("分類名稱不能是空白"));
        return Ok(result.with_categories(categories));
    }

    match categories.iter_mut().find(|cat| cat.id == id) {
        Some(cat) => {
            let old = std::mem::replace(&mut cat.name, new_name.to_string());
            decode::save(store, &categories)?;
            result.add_message(CmdMessage::success(format!(
                "已將「{old}」重新命名為「{new_name}」"
            )));
        }
        None => {
            result.add_message(CmdMessage::info(format!("找不到分類：{id}")));
        }
    }

    Ok(result.with_categories(categories))
}

/// Delete a category and everything in it.
///
/// The three reserved categories are rejected here as well, not only
/// hidden in the UI. Destructive, so it asks for a literal `Y` on
/// stdin unless `skip_confirm` is set.
pub fn delete<S: StorageBackend>(store: &mut S, id: &str, skip_confirm: bool) -> Result<CmdResult> {
    let mut categories = decode::load(store);
    let mut result = CmdResult::default();

    if is_reserved(id) {
        result.add_message(CmdMessage::warning(format!("保留分類不能刪除：{id}")));
        return Ok(result.with_categories(categories));
    }
    let Some(pos) = categories.iter().position(|cat| cat.id == id) else {
        result.add_message(CmdMessage::info(format!("找不到分類：{id}")));
        return Ok(result.with_categories(categories));
    };

    if !skip_confirm {
        println!(
            "確定要刪除「{}」嗎？裡面的 {} 筆收藏也會不見喔！",
            categories[pos].name,
            categories[pos].items.len()
        );
        print!("[Y] To delete: ");
        io::stdout().flush().map_err(CompassError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(CompassError::Io)?;

        if input.trim() != "Y" {
            result.add_message(CmdMessage::info("Operation cancelled."));
            return Ok(result.with_categories(categories));
        }
    }

    let removed = categories.remove(pos);
    decode::save(store, &categories)?;
    result.add_message(CmdMessage::success(format!(
        "已刪除分類「{}」（{} 筆收藏）",
        removed.name,
        removed.items.len()
    )));
    Ok(result.with_categories(categories))
}

/// Flip the display-only collapsed flag. Persisted like any other
/// mutation so the favorites view reopens the way it was left.
pub fn toggle_collapsed<S: StorageBackend>(store: &mut S, id: &str) -> Result<CmdResult> {
    let mut categories = decode::load(store);
    let mut result = CmdResult::default();

    match categories.iter_mut().find(|cat| cat.id == id) {
        Some(cat) => {
            cat.collapsed = !cat.collapsed;
            let state = if cat.collapsed { "收合" } else { "展開" };
            let name = cat.name.clone();
            decode::save(store, &categories)?;
            result.add_message(CmdMessage::info(format!("已{state}「{name}」")));
        }
        None => {
            result.add_message(CmdMessage::info(format!("找不到分類：{id}")));
        }
    }

    Ok(result.with_categories(categories))
}

fn next_id(categories: &[Category]) -> String {
    let mut stamp = chrono::Utc::now().timestamp_millis();
    loop {
        let id = stamp.to_string();
        if !categories.iter().any(|cat| cat.id == id) {
            return id;
        }
        stamp += 1;
    }
}
