// crates/store/src/query/parser.rs

//! JSON shorthand for filters and find options.
//!
//! `{ "field": value }` is an implicit Eq; `$and` / `$or` take arrays of
//! sub-filters; `{ "field": { "$op": value } }` selects an explicit operator.

use super::ast::{CmpOp, FieldExpr, Filter, FindOptions};
use crate::StoreError;
use serde_json::Value as Json;

pub fn parse_filter(json: &Json) -> Result<Filter, StoreError> {
    match json {
        Json::Object(map) => {
            let mut filters = Vec::new();

            for (k, v) in map {
                if k == "$and" {
                    filters.push(parse_group(v, Filter::And, "$and")?);
                } else if k == "$or" {
                    filters.push(parse_group(v, Filter::Or, "$or")?);
                } else {
                    filters.push(parse_field_expr(k, v)?);
                }
            }

            if filters.len() == 1 {
                Ok(filters.remove(0))
            } else {
                Ok(Filter::And(filters))
            }
        }
        _ => Err(StoreError::InvalidFilter(
            "top-level filter must be an object".into(),
        )),
    }
}

fn parse_group(
    value: &Json,
    construct: fn(Vec<Filter>) -> Filter,
    name: &str,
) -> Result<Filter, StoreError> {
    let arr = value
        .as_array()
        .ok_or_else(|| StoreError::InvalidFilter(format!("{name} value must be an array")))?;

    let mut filters = Vec::with_capacity(arr.len());
    for sub in arr {
        filters.push(parse_filter(sub)?);
    }
    Ok(construct(filters))
}

fn parse_field_expr(path: &str, v: &Json) -> Result<Filter, StoreError> {
    // Shorthand: { field: value } → Eq
    let obj = match v.as_object() {
        Some(obj) if obj.keys().any(|k| k.starts_with('$')) => obj,
        _ => {
            return Ok(Filter::Field(FieldExpr {
                path: path.to_string(),
                op: CmpOp::Eq(v.clone()),
            }))
        }
    };

    let mut and_ops = Vec::new();
    for (op_name, op_val) in obj {
        let op = parse_cmp_op(op_name, op_val)?;
        and_ops.push(Filter::Field(FieldExpr {
            path: path.to_string(),
            op,
        }));
    }

    if and_ops.len() == 1 {
        Ok(and_ops.remove(0))
    } else {
        Ok(Filter::And(and_ops))
    }
}

fn parse_cmp_op(op_name: &str, value: &Json) -> Result<CmpOp, StoreError> {
    use CmpOp::*;

    match op_name {
        "$eq" => Ok(Eq(value.clone())),
        "$ne" => Ok(Ne(value.clone())),
        "$gt" => Ok(Gt(value.clone())),
        "$gte" => Ok(Gte(value.clone())),
        "$lt" => Ok(Lt(value.clone())),
        "$lte" => Ok(Lte(value.clone())),
        "$in" => {
            let arr = value
                .as_array()
                .ok_or_else(|| StoreError::InvalidFilter("$in expects array".into()))?;
            Ok(In(arr.clone()))
        }
        "$exists" => {
            let b = value
                .as_bool()
                .ok_or_else(|| StoreError::InvalidFilter("$exists expects boolean".into()))?;
            Ok(Exists(b))
        }
        _ => Err(StoreError::InvalidOperator(format!(
            "unsupported operator {op_name}"
        ))),
    }
}

/// Parse FindOptions from a JSON object:
///
/// ```json
/// { "sort": { "_createdAt": -1 }, "limit": 6, "skip": 0 }
/// ```
pub fn parse_find_options(json: &Json) -> Result<FindOptions, StoreError> {
    let mut opts = FindOptions::default();

    let obj = match json {
        Json::Object(m) => m,
        _ => return Ok(opts),
    };

    if let Some(sort_val) = obj.get("sort") {
        let sort_obj = sort_val
            .as_object()
            .ok_or_else(|| StoreError::InvalidSort("sort must be an object".into()))?;

        for (field, dir_val) in sort_obj {
            let dir = dir_val
                .as_i64()
                .filter(|d| *d == 1 || *d == -1)
                .ok_or_else(|| StoreError::InvalidSort("sort direction must be 1 or -1".into()))?;
            opts.sort.push((field.clone(), dir as i8));
        }
    }

    if let Some(limit) = obj.get("limit") {
        opts.limit = Some(
            limit
                .as_u64()
                .ok_or_else(|| StoreError::InvalidFilter("limit must be a non-negative integer".into()))?
                as usize,
        );
    }

    if let Some(skip) = obj.get("skip") {
        opts.skip = Some(
            skip.as_u64()
                .ok_or_else(|| StoreError::InvalidFilter("skip must be a non-negative integer".into()))?
                as usize,
        );
    }

    Ok(opts)
}
