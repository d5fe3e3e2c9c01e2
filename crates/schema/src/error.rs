use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("reference field {field} on {type_name} declares no target types")]
    EmptyReferenceTargets { type_name: String, field: String },
}
