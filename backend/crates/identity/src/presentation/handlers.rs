//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::{
    AssignRoleInput, AssignRoleUseCase, ChangePasswordInput, ChangePasswordUseCase,
    GetAccountUseCase, ListAccountsUseCase, LoginInput, LoginUseCase, RegisterInput,
    RegisterUseCase,
    SocialLoginInput, SocialLoginUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::AccountRepository;
use crate::domain::token::{TokenClaims, TokenIssuer};
use crate::error::IdentityResult;
use crate::presentation::dto::{
    AccountResponse, AssignRoleRequest, AuthResponse, ChangePasswordRequest, LoginRequest,
    MessageResponse, RegisterRequest, SocialLoginRequest, UpdateProfileRequest,
};

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub issuer: Arc<dyn TokenIssuer>,
    pub config: Arc<IdentityConfig>,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<(StatusCode, Json<AuthResponse>)>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<Json<AuthResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            principal: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(output.into()))
}

/// POST /api/auth/social-login
pub async fn social_login<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<SocialLoginRequest>,
) -> IdentityResult<Json<AuthResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = SocialLoginUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SocialLoginInput {
            email: req.email,
            username: req.name,
            provider: req.provider,
            image_url: req.image_url,
        })
        .await?;

    Ok(Json(output.into()))
}

/// POST /api/auth/change-password
pub async fn change_password<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<ChangePasswordRequest>,
) -> IdentityResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ChangePasswordInput {
            account_id: req.user_id,
            current_password: req.current_password,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

// ============================================================================
// Accounts
// ============================================================================

/// GET /api/accounts/me
pub async fn me<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(claims): Extension<TokenClaims>,
) -> IdentityResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetAccountUseCase::new(state.repo.clone());
    let view = use_case.for_claims(&claims).await?;
    Ok(Json(view.into()))
}

/// GET /api/accounts
pub async fn list_accounts<R>(
    State(state): State<IdentityAppState<R>>,
) -> IdentityResult<Json<Vec<AccountResponse>>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListAccountsUseCase::new(state.repo.clone());
    let views = use_case.execute().await?;
    Ok(Json(views.into_iter().map(AccountResponse::from).collect()))
}

/// GET /api/accounts/{id}
pub async fn get_account<R>(
    State(state): State<IdentityAppState<R>>,
    Path(id): Path<String>,
) -> IdentityResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetAccountUseCase::new(state.repo.clone());
    let view = use_case.by_id(&id).await?;
    Ok(Json(view.into()))
}

/// PUT /api/accounts/{id}/profile
pub async fn update_profile<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> IdentityResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    let view = use_case
        .execute(
            &claims,
            UpdateProfileInput {
                account_id: id,
                username: req.username,
                phone_number: req.phone_number,
                address: req.address,
                image_url: req.image_url,
            },
        )
        .await?;

    Ok(Json(view.into()))
}

/// PUT /api/accounts/{id}/role
pub async fn assign_role<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<String>,
    Json(req): Json<AssignRoleRequest>,
) -> IdentityResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = AssignRoleUseCase::new(state.repo.clone());

    let view = use_case
        .execute(AssignRoleInput {
            account_id: id,
            role: req.role,
            actor: claims.principal,
        })
        .await?;

    Ok(Json(view.into()))
}
