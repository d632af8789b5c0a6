pub mod constants;
pub mod date_parser;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use date_parser::parse_date;
pub use logging::init_logging;
pub use progress::ProgressReporter;
