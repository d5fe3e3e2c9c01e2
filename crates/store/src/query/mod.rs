//! Content query surface: a small Mongo-flavored filter language evaluated
//! in memory over document JSON, with caller-specified sort, skip, and limit.

pub mod ast;
pub mod eval;
pub mod exec;
pub mod parser;

pub use ast::{CmpOp, FieldExpr, Filter, FindOptions};
pub use eval::eval_filter;
pub use exec::{apply_find_options, MAX_RESULTS};
pub use parser::{parse_filter, parse_find_options};
