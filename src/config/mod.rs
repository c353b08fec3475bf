mod structure_file;

pub use structure_file::StructureFileError;
