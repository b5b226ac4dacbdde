pub mod dalle;
pub mod image_controller;
