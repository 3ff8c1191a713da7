pub mod error;
pub mod omdb;
pub mod traits;

pub use error::{CatalogError, NOT_FOUND_MESSAGE, TRANSPORT_MESSAGE};
pub use omdb::OmdbClient;
pub use traits::CatalogSource;
