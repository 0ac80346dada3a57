use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{Region, UserProfile};
use crate::profile::normalize_email;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub profile: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PremiumStatus {
    pub premium: bool,
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<&'static str>,
}

/// GET /api/v1/regions
///
/// Region presets in display order, for the profile form.
pub async fn handle_list_regions() -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: Region::ALL.iter().map(Region::label).collect(),
    })
}

/// GET /api/v1/profiles/:email
///
/// First load creates and stores a blank profile carrying the email.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let email = normalize_email(&email)?;

    if let Some(profile) = state.store.load_profile(&email).await? {
        return Ok(Json(profile));
    }

    let profile = UserProfile::for_email(&email);
    state.store.save_profile(&email, &profile).await?;
    info!("Created profile for {email}");
    Ok(Json(profile))
}

/// PUT /api/v1/profiles/:email
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<SaveProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let email = normalize_email(&email)?;
    let mut profile = request.profile;
    if profile.email.trim().is_empty() {
        profile.email = email.clone();
    }

    state.store.save_profile(&email, &profile).await?;
    Ok(Json(profile))
}

/// GET /api/v1/profiles/:email/premium
pub async fn handle_get_premium(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<PremiumStatus>, AppError> {
    let email = normalize_email(&email)?;
    let premium = state.store.is_premium(&email).await?;
    Ok(Json(PremiumStatus { premium }))
}

/// PUT /api/v1/profiles/:email/premium
pub async fn handle_set_premium(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<PremiumStatus>,
) -> Result<Json<PremiumStatus>, AppError> {
    let email = normalize_email(&email)?;
    state.store.set_premium(&email, request.premium).await?;
    info!("Premium for {email} set to {}", request.premium);
    Ok(Json(request))
}
