//! Remote collaborators: the Square Orders/Catalog API, the Google
//! Sheets values API, and the Google token exchange that authorizes it.
//!
//! The pipeline only ever talks to the `OrderSource` and `CatalogSource`
//! traits, so tests substitute in-memory fakes for `SquareClient`.
//! Application-level error payloads come back as data inside `Partial`;
//! only transport-level failures surface as `ApiError`.

pub mod error;
pub mod google_auth;
pub mod sheets;
pub mod source;
pub mod square;

pub use error::ApiError;
pub use google_auth::{sheets_access_token, SHEETS_SCOPE};
pub use sheets::SheetsClient;
pub use source::{CatalogSource, OrderSource, Partial, RemoteError};
pub use square::SquareClient;
