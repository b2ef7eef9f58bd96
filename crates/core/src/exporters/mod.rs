pub mod document;
pub mod tabular;

pub use document::DocumentExporter;
pub use tabular::TabularExporter;
