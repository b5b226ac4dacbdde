use utoipa::OpenApi;

use crate::apis::design_api;
use crate::apis::design_api::schemas::{DesignRequest, DesignResponse, StyleOption, UploadResponse};
use crate::apis::schemas::ErrorResponse;


#[derive(OpenApi)]
#[openapi(
    paths(
        design_api::design::health,
        design_api::design::styles,
        design_api::design::design,
        design_api::upload::upload,
    ),
    components(
        schemas(DesignRequest, DesignResponse, StyleOption, UploadResponse, ErrorResponse)
    )
)]

pub struct ApiDoc;
