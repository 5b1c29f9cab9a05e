use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{
    Holdings, LearningProgress, PortfolioState, ProfileDocument, UserProfile, ValuationPoint,
};

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Client for the remote profile store. All user state (cash, holdings,
/// valuation history, learning progress) lives there and is rehydrated at
/// the start of every session; there is no local persistence.
pub struct ProfileStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadRequest<'a> {
    user_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PortfolioSaveRequest<'a> {
    user_id: &'a str,
    owned_stocks: &'a Holdings,
    user_cash: f64,
    user_investment_data: &'a [ValuationPoint],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LearningSaveRequest<'a> {
    user_id: &'a str,
    user_progress: &'a BTreeMap<String, f64>,
    user_points: f64,
}

impl ProfileStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Reads `PROFILE_STORE_URL`.
    pub fn from_env() -> Result<Self, ProfileStoreError> {
        let base_url = std::env::var("PROFILE_STORE_URL")
            .map_err(|_| ProfileStoreError::BadResponse("PROFILE_STORE_URL not set".into()))?;
        Ok(Self::new(base_url))
    }

    async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<reqwest::Response, ProfileStoreError> {
        let resp = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| ProfileStoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProfileStoreError::BadResponse(format!(
                "{} returned status {}",
                endpoint,
                resp.status()
            )));
        }
        Ok(resp)
    }

    /// Load a user's profile, applying new-user defaults for every field
    /// the store has never seen.
    pub async fn load(&self, user_id: &str) -> Result<UserProfile, AppError> {
        let resp = self
            .post("get-user-metadata", &LoadRequest { user_id })
            .await
            .map_err(AppError::ProfileLoadFailed)?;

        let doc = resp
            .json::<ProfileDocument>()
            .await
            .map_err(|e| AppError::ProfileLoadFailed(ProfileStoreError::Parse(e.to_string())))?;

        info!(user = user_id, "profile loaded");
        Ok(UserProfile::from(doc.user_metadata))
    }

    /// Persist the portfolio side of a profile (cash, holdings, valuation
    /// history).
    pub async fn save_portfolio(
        &self,
        user_id: &str,
        state: &PortfolioState,
    ) -> Result<(), AppError> {
        self.post(
            "simvest-update",
            &PortfolioSaveRequest {
                user_id,
                owned_stocks: &state.holdings,
                user_cash: state.cash,
                user_investment_data: &state.history,
            },
        )
        .await
        .map_err(AppError::ProfileSaveFailed)?;
        Ok(())
    }

    /// Persist the learning side of a profile (module progress and points).
    pub async fn save_learning(
        &self,
        user_id: &str,
        learning: &LearningProgress,
    ) -> Result<(), AppError> {
        self.post(
            "update-user-progress-points",
            &LearningSaveRequest {
                user_id,
                user_progress: &learning.progress,
                user_points: learning.points,
            },
        )
        .await
        .map_err(AppError::ProfileSaveFailed)?;
        Ok(())
    }

    /// Best-effort portfolio save: a failure is logged and swallowed, and
    /// the local snapshot simply stays ahead of the store until the next
    /// state change triggers another attempt.
    pub async fn save_portfolio_best_effort(&self, user_id: &str, state: &PortfolioState) {
        if let Err(err) = self.save_portfolio(user_id, state).await {
            warn!(user = user_id, error = %err, "portfolio save failed, keeping local state");
        }
    }

    /// Best-effort learning save, same policy as
    /// [`Self::save_portfolio_best_effort`].
    pub async fn save_learning_best_effort(&self, user_id: &str, learning: &LearningProgress) {
        if let Err(err) = self.save_learning(user_id, learning).await {
            warn!(user = user_id, error = %err, "progress save failed, keeping local state");
        }
    }
}
