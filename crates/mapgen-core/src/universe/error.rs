use super::type_expr::SyntaxError;

/// Errors raised while loading or querying a universe.
#[derive(Debug, thiserror::Error)]
pub enum UniverseError {
    #[error("invalid universe JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown unit `{name}`")]
    UnknownUnit { name: String },

    #[error("unit `{name}` is declared more than once")]
    DuplicateUnit { name: String },

    #[error("`{unit}::{name}` is declared more than once")]
    DuplicateDecl { unit: String, name: String },

    #[error("cannot resolve type `{name}` in {context}")]
    UnknownType { name: String, context: String },

    #[error("invalid type `{text}` in {context}: {source}")]
    TypeSyntax {
        text: String,
        context: String,
        source: SyntaxError,
    },

    #[error("`{name}` expects {expected} type argument(s), found {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("`{name}` in {context} is not a class")]
    NotAClass { name: String, context: String },

    #[error("cannot decompose record `{name}`: {reason}")]
    RecordDecomposition { name: String, reason: String },
}
