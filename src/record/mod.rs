//! Record model
//!
//! Schema-less rows: an ordered field map whose values are scalars or nested
//! child result sets, plus the header union used to give heterogeneous rows a
//! single column schema.

mod decode;
mod headers;
mod record;
mod value;

pub use decode::{decode_record, decode_records, DecodeError, ID_FIELD};
pub use headers::HeaderSet;
pub use record::{Record, RecordSet};
pub use value::FieldValue;
