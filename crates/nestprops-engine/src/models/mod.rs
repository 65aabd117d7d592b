pub mod line_record;
pub mod property;

pub use line_record::{LineKind, LineRecord};
pub use property::Property;
