pub mod api_doc;
pub mod app_state;
pub mod design_api;
pub mod schemas;
