pub mod design;
pub mod schemas;
pub mod upload;
