//! Miscellaneous components used in the library.

mod label;
pub use label::Label;
pub use label::LabelSet;
pub use label::LabelType;

mod logger;
pub use logger::init_logger;
pub use logger::init_logger_with_level;
