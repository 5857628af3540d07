use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::profiles::{ActiveModel as ProfileActive, Column as ProfileCol, Entity as Profiles},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Profile,
    response::{ApiResponse, Meta},
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 24;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn issue_token(user_id: Uuid, role: &str, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn register_profile(
    state: &AppState,
    user: &AuthUser,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<Profile>> {
    ensure_admin(user)?;
    let RegisterRequest {
        email,
        password,
        full_name,
        role,
        phone,
    } = payload;

    let email = email.trim().to_lowercase();
    if email.is_empty() || password.len() < 6 {
        return Err(AppError::BadRequest(
            "Informe um e-mail e uma senha de pelo menos 6 caracteres".into(),
        ));
    }

    let exist = Profiles::find()
        .filter(ProfileCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("E-mail já cadastrado".into()));
    }

    let profile = ProfileActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(hash_password(&password)?),
        full_name: Set(full_name),
        role: Set(role.as_str().to_string()),
        phone: Set(phone.filter(|p| !p.trim().is_empty())),
        commission_rate: Set(Decimal::ZERO),
        is_active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(profile_id = %profile.id, role = %profile.role, "staff profile registered");

    Ok(ApiResponse::success(
        "Usuário cadastrado com sucesso!",
        Profile::try_from(profile)?,
        Some(Meta::empty()),
    ))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let invalid = || AppError::BadRequest("E-mail ou senha inválidos".into());

    let profile = Profiles::find()
        .filter(ProfileCol::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(invalid)?;

    let parsed_hash = PasswordHash::new(&profile.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid());
    }

    let token = issue_token(profile.id, &profile.role, &state.jwt_secret)?;
    tracing::info!(profile_id = %profile.id, "staff signed in");

    Ok(ApiResponse::success(
        "Login realizado",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}

pub async fn current_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Profile>> {
    let profile = Profiles::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(ApiResponse::success(
        "OK",
        Profile::try_from(profile)?,
        Some(Meta::empty()),
    ))
}
