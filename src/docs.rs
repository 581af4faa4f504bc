use laptopbay_db::Document;
use serde::Serialize;
use serde_json::Value;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::modules::users::model::{RoleResponse, UserRole};

/// Standard `{ data, success, message }` response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope {
    #[schema(value_type = Object)]
    pub data: Value,
    pub success: bool,
    pub message: String,
}

/// Body returned by the token gate and admin policy.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenErrorBody {
    #[schema(example = "unauthorized")]
    pub message: String,
}

/// Free-form JSON document.
#[derive(ToSchema)]
#[schema(value_type = Object)]
#[allow(dead_code)]
pub struct DocumentBody(Document);

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::liveness,
        crate::modules::auth::controller::create_jwt_token,
        crate::modules::users::controller::upsert_user,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::list_users_by_role,
        crate::modules::users::controller::get_user_role,
        crate::modules::users::controller::promote_user,
        crate::modules::users::controller::revoke_admin,
        crate::modules::users::controller::delete_user,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::list_categories,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::list_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::delete_product,
        crate::modules::products::controller::backfill_years_of_use,
        crate::modules::orders::controller::create_order,
        crate::modules::orders::controller::list_orders,
        crate::modules::orders::controller::get_order,
        crate::modules::orders::controller::delete_order,
        crate::modules::blogs::controller::create_blog,
        crate::modules::blogs::controller::list_blogs,
        crate::modules::blogs::controller::get_blog,
    ),
    components(
        schemas(
            Envelope,
            TokenErrorBody,
            DocumentBody,
            RoleResponse,
            UserRole,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Authentication", description = "Token issuance"),
        (name = "Users", description = "User records and role management"),
        (name = "Categories", description = "Product categories"),
        (name = "Products", description = "Laptop listings"),
        (name = "Orders", description = "Customer orders"),
        (name = "Blogs", description = "Blog posts")
    ),
    info(
        title = "LaptopBay API",
        version = "0.1.0",
        description = "Backend for a second-hand laptop marketplace: document collections behind a JWT gate and a store-backed admin policy.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
