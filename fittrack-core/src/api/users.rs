use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, BodyWeightEntry, LoginRequest, NewBodyWeight, ProfileUpdate,
    ProfileUpdateResponse, RegisterRequest, User,
};

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("users/auth/login/", &body).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("users/auth/register/", request).await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get("users/profile/").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let response: ProfileUpdateResponse = self.patch("users/profile/update/", update).await?;
        Ok(response.user)
    }

    /// Body-weight entries, newest first.
    pub async fn body_weights(&self) -> Result<Vec<BodyWeightEntry>, ApiError> {
        self.get("users/body-weight/").await
    }

    pub async fn log_body_weight(&self, entry: &NewBodyWeight) -> Result<BodyWeightEntry, ApiError> {
        self.post("users/body-weight/", entry).await
    }
}
