//! Display module for formatted CLI output

pub mod icons;
pub mod table;

pub use self::icons::StatusIcon;
pub use self::table::TableRenderer;
