//! OpenAPI documentation, served at `/api/openapi.json` and browsable under `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reforma API",
        version = "0.1.0",
        description = "Interior design visualization API. Upload a room photo with style preferences and receive a redesigned rendering."
    ),
    paths(
        handlers::visualization::generate_visualization,
        handlers::health::health_check,
    ),
    components(
        schemas(
            handlers::visualization::VisualizationResponse,
            handlers::visualization::VisualizationData,
            handlers::visualization::VisualizationMetadata,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "visualization", description = "Room visualization generation"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
