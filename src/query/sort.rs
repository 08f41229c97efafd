use bson::Document;

use super::types::{SortDirection, SortField};

/// Combines sort fields into one multi-key sort clause, first entry being the primary key.
///
/// Returns `None` for an empty list so callers can skip the sort stage entirely. Entries with an
/// empty field name are dropped; for a repeated field the first occurrence wins.
#[must_use]
pub fn get_sort_definitions(sorts: &[SortField]) -> Option<Document> {
    let mut out = Document::new();
    for s in sorts {
        if s.field.is_empty() {
            log::warn!("skipping sort entry with empty field name");
            continue;
        }
        if out.contains_key(&s.field) {
            log::warn!("duplicate sort field ignored: {}", s.field);
            continue;
        }
        out.insert(s.field.clone(), direction_value(s.direction));
    }
    if out.is_empty() {
        return None;
    }
    crate::dev6!("{{\"op\":\"compile_sort\",\"keys\":{}}}", out.len());
    Some(out)
}

const fn direction_value(direction: SortDirection) -> i32 {
    match direction {
        SortDirection::Ascending => 1,
        SortDirection::Descending => -1,
    }
}
