// crates/store/src/query/eval.rs

use super::ast::{CmpOp, Filter};
use serde_json::Value as Json;

/// Resolve a dotted field path into a nested JSON value.
///
/// Returns `None` if any segment is missing.
pub fn field_value<'a>(doc: &'a Json, path: &str) -> Option<&'a Json> {
    let mut current = doc;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

/// Ordering comparisons apply only to number/number and string/string pairs;
/// everything else (including an absent field) is false.
fn cmp_numbers_or_strings(a: Option<&Json>, b: &Json, ord: fn(std::cmp::Ordering) -> bool) -> bool {
    match (a, b) {
        (Some(Json::Number(a)), Json::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(av), Some(bv)) => av.partial_cmp(&bv).map(ord).unwrap_or(false),
            _ => false,
        },
        (Some(Json::String(a)), Json::String(b)) => ord(a.as_str().cmp(b.as_str())),
        _ => false,
    }
}

fn eval_cmp(op: &CmpOp, actual: Option<&Json>) -> bool {
    use CmpOp::*;

    match op {
        Eq(expected) => actual == Some(expected),
        Ne(expected) => actual != Some(expected),
        Gt(expected) => cmp_numbers_or_strings(actual, expected, |o| o.is_gt()),
        Gte(expected) => cmp_numbers_or_strings(actual, expected, |o| o.is_ge()),
        Lt(expected) => cmp_numbers_or_strings(actual, expected, |o| o.is_lt()),
        Lte(expected) => cmp_numbers_or_strings(actual, expected, |o| o.is_le()),
        In(list) => match actual {
            Some(actual) => list.iter().any(|v| actual == v),
            None => false,
        },
        Exists(flag) => *flag == actual.is_some(),
    }
}

/// Evaluate a full filter against one document's JSON projection.
pub fn eval_filter(filter: &Filter, doc: &Json) -> bool {
    match filter {
        Filter::Field(expr) => eval_cmp(&expr.op, field_value(doc, &expr.path)),
        Filter::And(filters) => filters.iter().all(|f| eval_filter(f, doc)),
        Filter::Or(filters) => filters.iter().any(|f| eval_filter(f, doc)),
    }
}
