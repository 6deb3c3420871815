//! Key conventions for the Glica bucket. Pure string functions — no AWS
//! SDK dependency.

use uuid::Uuid;

pub const HISTORY_PREFIX: &str = "history/";

pub fn history_entry(id: Uuid) -> String {
    format!("history/{id}.json")
}

/// Recover the entry id from a history key. `None` for keys outside the
/// convention (foreign objects under the prefix are skipped, not fatal).
pub fn parse_history_entry(key: &str) -> Option<Uuid> {
    let id = key
        .strip_prefix(HISTORY_PREFIX)?
        .strip_suffix(".json")?;
    Uuid::parse_str(id).ok()
}
