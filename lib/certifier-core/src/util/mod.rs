pub mod anchor;
pub mod object_path;
