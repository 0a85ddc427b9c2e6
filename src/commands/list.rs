use crate::commands::{decode, CmdResult};
use crate::error::Result;
use crate::store::StorageBackend;

/// Load the collection for display. The load itself performs any
/// pending shape migration, so listing an old profile upgrades it
/// in memory; nothing is written until the first mutation.
pub fn run<S: StorageBackend>(store: &S) -> Result<CmdResult> {
    let categories = decode::load(store);
    Ok(CmdResult::default().with_categories(categories))
}
