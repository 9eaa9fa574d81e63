use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, AuthUser, MaybeAuthUser, MessageResponse, UuidPath, ValidatedJson,
    ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, BusinessRuleResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    BuyProduct, Condition, CreateProduct, OrderBy, ProductDetail, ProductListQuery,
    ProductResponse, SellerResponse, SortBy, UpdateProduct, UpdateStock,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for the product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        create_product,
        list_products,
        get_product,
        update_product,
        delete_product,
        buy_product,
        update_stock
    ),
    components(
        schemas(
            Condition,
            SortBy,
            OrderBy,
            CreateProduct,
            UpdateProduct,
            UpdateStock,
            BuyProduct,
            ProductResponse,
            ProductDetail,
            SellerResponse
        ),
        responses(
            BadRequestValidationResponse,
            BusinessRuleResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product catalogue and purchases"))
)]
pub struct ApiDoc;

/// Product routes, meant to be nested under `/v1/product` behind the
/// optional-auth middleware. Mutations take [`AuthUser`] and answer 401
/// for anonymous callers.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/{id}/buy", post(buy_product))
        .route("/{id}/stock", post(update_stock))
        .with_state(Arc::new(service))
}

/// Create a product owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AuthUser(user): AuthUser,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let product = service.create(user.id, input).await?;
    Ok(ApiResponse::ok("Product created successfully", product))
}

/// List products
///
/// Anonymous callers may list; `userOnly` only narrows the result when a
/// valid token is present.
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductListQuery),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    MaybeAuthUser(user): MaybeAuthUser,
    ValidatedQuery(query): ValidatedQuery<ProductListQuery>,
) -> ProductResult<ApiResponse<Vec<ProductResponse>>> {
    let (products, meta) = service.list(user.map(|u| u.id), query).await?;

    let message = if products.is_empty() {
        "No products found"
    } else {
        "Products fetched successfully"
    };
    Ok(ApiResponse::ok(message, products).with_meta(meta))
}

/// Product with its seller summary
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse<ProductDetail>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<ApiResponse<ProductDetail>> {
    let detail = service.get_detail(id).await?;
    Ok(ApiResponse::ok("success", detail))
}

/// Replace the editable fields of one of the caller's products
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let product = service.update(user.id, id, input).await?;
    Ok(ApiResponse::ok("Product updated successfully", product))
}

/// Delete one of the caller's products
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
) -> ProductResult<ApiResponse<()>> {
    service.delete(user.id, id).await?;
    Ok(ApiResponse::message("Product deleted successfully"))
}

/// Buy a product, paying into one of the seller's bank accounts
#[utoipa::path(
    post,
    path = "/{id}/buy",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = BuyProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Purchase recorded", body = MessageResponse),
        (status = 400, response = BusinessRuleResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn buy_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<BuyProduct>,
) -> ProductResult<ApiResponse<()>> {
    service.buy(user.id, id, input).await?;
    Ok(ApiResponse::message("Payment processed successfully"))
}

/// Set the stock of one of the caller's products
#[utoipa::path(
    post,
    path = "/{id}/stock",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateStock,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stock updated", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateStock>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let product = service.update_stock(user.id, id, input.stock).await?;
    Ok(ApiResponse::ok("Stock updated successfully", product))
}
