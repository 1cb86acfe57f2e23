//! resultpager - drains locator-paged query results and renders them
//!
//! A query result arrives from a remote record store in bounded pages, each
//! carrying an opaque locator for the next. The pagination engine drains
//! those pages into an accumulated result under a soft memory ceiling; the
//! view builders turn that result into a numbered grid or a pivot matrix;
//! the exporter writes it as CSV.

pub mod config;
pub mod export;
pub mod memory;
pub mod observability;
pub mod pagination;
pub mod record;
pub mod view;
