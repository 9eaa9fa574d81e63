use axum::{
    Router,
    extract::State,
    routing::{get, patch},
};
use axum_helpers::{
    ApiResponse, AuthUser, MessageResponse, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{BankAccountError, BankAccountResult};
use crate::models::{BankAccountResponse, CreateBankAccount, UpdateBankAccount};
use crate::repository::BankAccountRepository;
use crate::service::BankAccountService;

pub const TAG: &str = "bank-accounts";

/// OpenAPI documentation for the bank account endpoints
#[derive(OpenApi)]
#[openapi(
    paths(create_account, list_accounts, update_account, delete_account),
    components(
        schemas(CreateBankAccount, UpdateBankAccount, BankAccountResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Seller bank accounts"))
)]
pub struct ApiDoc;

/// Bank account routes, meant to be nested under `/v1/bank/account` behind
/// the required-auth middleware.
pub fn router<R: BankAccountRepository + 'static>(service: BankAccountService<R>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_accounts)
                .post(create_account)
                .patch(update_without_id),
        )
        .route("/{id}", patch(update_account).delete(delete_account))
        .with_state(Arc::new(service))
}

/// Register a bank account for the caller
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBankAccount,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bank account created", body = ApiResponse<BankAccountResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_account<R: BankAccountRepository>(
    State(service): State<Arc<BankAccountService<R>>>,
    AuthUser(user): AuthUser,
    ValidatedJson(input): ValidatedJson<CreateBankAccount>,
) -> BankAccountResult<ApiResponse<BankAccountResponse>> {
    let account = service.create(user.id, input).await?;
    Ok(ApiResponse::ok("Bank account created successfully", account))
}

/// List the caller's bank accounts
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's bank accounts", body = ApiResponse<Vec<BankAccountResponse>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_accounts<R: BankAccountRepository>(
    State(service): State<Arc<BankAccountService<R>>>,
    AuthUser(user): AuthUser,
) -> BankAccountResult<ApiResponse<Vec<BankAccountResponse>>> {
    let accounts = service.list(user.id).await?;
    Ok(ApiResponse::ok("success", accounts))
}

async fn update_without_id(AuthUser(_): AuthUser) -> BankAccountError {
    BankAccountError::MissingId
}

/// Partially update one of the caller's bank accounts
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Bank account id")),
    request_body = UpdateBankAccount,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bank account updated", body = ApiResponse<BankAccountResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_account<R: BankAccountRepository>(
    State(service): State<Arc<BankAccountService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateBankAccount>,
) -> BankAccountResult<ApiResponse<BankAccountResponse>> {
    let account = service.update(user.id, id, input).await?;
    Ok(ApiResponse::ok("Bank account updated successfully", account))
}

/// Delete one of the caller's bank accounts
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Bank account id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bank account deleted", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_account<R: BankAccountRepository>(
    State(service): State<Arc<BankAccountService<R>>>,
    AuthUser(user): AuthUser,
    UuidPath(id): UuidPath,
) -> BankAccountResult<ApiResponse<()>> {
    service.delete(user.id, id).await?;
    Ok(ApiResponse::message("Bank account deleted successfully"))
}
