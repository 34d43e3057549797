pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Catalog JSON error ({source_name}): {source}")]
    CatalogJson {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Invalid config ({format}): {message}")]
    InvalidConfig {
        format: &'static str,
        message: String,
    },

    #[error("Unknown company: {slug}")]
    UnknownCompany { slug: String },

    #[error("Unknown job: {id}")]
    UnknownJob { id: String },

    #[error(transparent)]
    Form(#[from] crate::forms::FormError),
}
