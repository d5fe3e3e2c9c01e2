// crates/store/src/query/exec.rs

//! In-memory execution of sort / skip / limit over matched documents.
//!
//! Sorting is stable, so beyond the caller's sort keys the store's insertion
//! order is preserved; the ordering contract is exactly "stable and
//! caller-specified".

use super::ast::FindOptions;
use super::eval::field_value;
use schema::doc::ContentDocument;
use serde_json::Value as Json;
use std::cmp::Ordering;

/// Hard internal result cap; callers can pass a smaller explicit limit.
pub const MAX_RESULTS: usize = 1000;

/// Compare one sort key across two documents. Missing sorts before present.
fn compare_field(a: &Json, b: &Json, field: &str) -> Ordering {
    use serde_json::Value as J;

    match (field_value(a, field), field_value(b, field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(J::Number(na)), Some(J::Number(nb))) => {
            let fa = na.as_f64().unwrap_or(f64::NAN);
            let fb = nb.as_f64().unwrap_or(f64::NAN);
            fa.partial_cmp(&fb).unwrap_or(Ordering::Equal)
        }
        (Some(J::String(sa)), Some(J::String(sb))) => sa.cmp(sb),
        (Some(J::Bool(ba)), Some(J::Bool(bb))) => ba.cmp(bb),
        // Mixed types: stable but arbitrary.
        (Some(va), Some(vb)) => format!("{va:?}").cmp(&format!("{vb:?}")),
    }
}

/// Apply sort + skip + limit to an already-filtered document set.
pub fn apply_find_options(
    mut docs: Vec<ContentDocument>,
    opts: &FindOptions,
) -> Vec<ContentDocument> {
    if !opts.sort.is_empty() && docs.len() > 1 {
        // Sorting compares JSON projections; pair them up once.
        let mut keyed: Vec<(Json, ContentDocument)> =
            docs.into_iter().map(|d| (d.to_json(), d)).collect();

        keyed.sort_by(|(ja, _), (jb, _)| {
            for (field, dir) in &opts.sort {
                let ord = compare_field(ja, jb, field);
                if ord != Ordering::Equal {
                    return if *dir >= 0 { ord } else { ord.reverse() };
                }
            }
            Ordering::Equal
        });

        docs = keyed.into_iter().map(|(_, d)| d).collect();
    }

    let total = docs.len();
    let start = opts.skip.unwrap_or(0).min(total);
    let requested = opts.limit.unwrap_or(MAX_RESULTS).min(MAX_RESULTS);
    let end = (start + requested).min(total);

    if start >= end {
        return Vec::new();
    }

    docs.drain(start..end).collect()
}
