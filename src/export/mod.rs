mod exporter;
mod layout;

pub use exporter::Exporter;
pub use layout::ExportLayout;
