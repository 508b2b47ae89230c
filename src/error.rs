use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate project id `{0}`")]
    DuplicateId(String),
    #[error("project `{id}` has an empty `{field}`")]
    MissingField { id: String, field: &'static str },
}

/// Failures while wiring the page. Only the subsystem that hit one is skipped.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("javascript error: {0}")]
    Js(String),
}
