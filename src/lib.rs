pub mod strings_file;

pub use self::strings_file::*;
