// crates/store/src/query/ast.rs

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Comparison operations on a single field path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CmpOp {
    Eq(Json),
    Ne(Json),
    Gt(Json),
    Gte(Json),
    Lt(Json),
    Lte(Json),
    In(Vec<Json>),
    Exists(bool),
}

/// A single field expression: `<path> <op>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldExpr {
    /// Dotted path into the document JSON, e.g. `"slug"` or
    /// `"seo.metaTitle"`.
    pub path: String,
    pub op: CmpOp,
}

/// Filter tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Field(FieldExpr),
}

impl Filter {
    /// Matches everything.
    pub fn all() -> Self {
        Filter::And(Vec::new())
    }

    /// Shorthand for `path == value`.
    pub fn eq(path: impl Into<String>, value: Json) -> Self {
        Filter::Field(FieldExpr {
            path: path.into(),
            op: CmpOp::Eq(value),
        })
    }
}

/// Caller-specified ordering and pagination. The store itself mandates no
/// order; an empty sort leaves insertion order untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindOptions {
    /// `(field_path, dir)` where dir is 1 (asc) or -1 (desc).
    pub sort: Vec<(String, i8)>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

impl FindOptions {
    pub fn sorted_by(mut self, path: impl Into<String>, dir: i8) -> Self {
        self.sort.push((path.into(), dir));
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_value, json, to_value};

    #[test]
    fn filter_shorthand_constructors() {
        match Filter::eq("_type", json!("post")) {
            Filter::Field(expr) => {
                assert_eq!(expr.path, "_type");
                assert!(matches!(expr.op, CmpOp::Eq(ref v) if v == &json!("post")));
            }
            other => panic!("expected Field, got {other:?}"),
        }

        assert!(matches!(Filter::all(), Filter::And(ref v) if v.is_empty()));
    }

    #[test]
    fn filter_tree_serde_round_trip() {
        let f = Filter::And(vec![
            Filter::eq("_type", json!("post")),
            Filter::Or(vec![
                Filter::Field(FieldExpr {
                    path: "featured".into(),
                    op: CmpOp::Eq(json!(true)),
                }),
                Filter::Field(FieldExpr {
                    path: "excerpt".into(),
                    op: CmpOp::Exists(true),
                }),
            ]),
        ]);

        let v = to_value(&f).expect("serialize Filter");
        let back: Filter = from_value(v).expect("deserialize Filter");

        match back {
            Filter::And(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1], Filter::Or(ref inner) if inner.len() == 2));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn find_options_builder() {
        let opts = FindOptions::default()
            .sorted_by("_createdAt", -1)
            .with_limit(6)
            .with_skip(2);

        assert_eq!(opts.sort, vec![("_createdAt".to_string(), -1)]);
        assert_eq!(opts.limit, Some(6));
        assert_eq!(opts.skip, Some(2));
    }

    #[test]
    fn find_options_default_is_unconstrained() {
        let opts = FindOptions::default();
        assert!(opts.sort.is_empty());
        assert!(opts.limit.is_none());
        assert!(opts.skip.is_none());
    }
}
