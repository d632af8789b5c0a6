pub mod canton_reader;
pub mod directory_reader;

pub use canton_reader::CantonReader;
pub use directory_reader::DirectoryReader;
