//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - the store operation failed",
    content_type = "application/json",
    example = json!({
        "message": "Kind: Server selection timeout: No available servers"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed body, missing field or rejected write",
    content_type = "application/json",
    example = json!({
        "message": "name must not be empty"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);
