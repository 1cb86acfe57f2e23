//! Pagination subsystem
//!
//! Drains a remote result set that arrives in bounded pages linked by an
//! opaque locator, under a soft memory ceiling.
//!
//! # Invariants
//!
//! - A count-only query never materializes records
//! - Locators are replayed verbatim, never parsed
//! - Exceeding the memory ceiling degrades to a partial result, not an error
//! - Only a failed fetch or a malformed row is a hard failure

mod engine;
mod errors;
mod page;
mod request;
mod result;
mod stream;

pub use engine::PaginationEngine;
pub use errors::{PaginationError, PaginationResult, TransportError};
pub use page::{Page, QueryLocator};
pub use request::{MatrixPivot, QueryKind, QueryRequest};
pub use result::{AccumulatedResult, PaginationOutcome, PaginationStatus};
pub use stream::{PageSource, PageStream};
