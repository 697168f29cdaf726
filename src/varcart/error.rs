use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum VarcartError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Row not found: {0}")]
    RowNotFound(usize),

    #[error("Unknown attribute type: {0}")]
    UnknownAttributeType(String),

    #[error("Unknown value '{value}' for attribute type '{type_name}'")]
    UnknownAttributeValue { type_name: String, value: String },

    #[error("Attribute is inactive: {0}")]
    InactiveAttribute(String),

    #[error("Attribute type is not selected: {0}")]
    TypeNotSelected(String),

    #[error("Attribute already exists: {0}")]
    DuplicateAttribute(String),

    #[error("Attribute type name is reserved for a table column: {0}")]
    ReservedAttributeName(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Editing session is closed")]
    SessionClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, VarcartError>;
