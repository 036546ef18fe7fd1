//! Access decision for views that need a logged-in user.

use crate::auth::{AuthState, TokenStore};

/// What a protected view should do given the current auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Auth state is still being restored
    Loading,
    /// No user is logged in
    RedirectToLogin,
    Allow,
}

/// Decides access from the loading flag and current user.
pub fn check<S: TokenStore>(auth: &AuthState<S>) -> GuardOutcome {
    if auth.is_loading() {
        GuardOutcome::Loading
    } else if auth.is_authenticated() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::RedirectToLogin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::auth::MemoryTokenStore;
    use crate::models::RegisterRequest;
    use crate::test_support::{serve, user_json};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_loading_then_redirect() {
        let mut auth = AuthState::new(ApiClient::default(), MemoryTokenStore::new());
        assert_eq!(check(&auth), GuardOutcome::Loading);

        auth.restore().await;
        assert_eq!(check(&auth), GuardOutcome::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_registered_user_is_allowed() {
        let router = Router::new().route(
            "/api/users/auth/register/",
            post(|| async {
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "user": user_json(1, "a@b.com", "a"),
                        "tokens": {"access": "acc", "refresh": "ref"}
                    })),
                )
            }),
        );
        let api = serve(router).await;
        let mut auth = AuthState::new(api, MemoryTokenStore::new());
        auth.restore().await;

        let request = RegisterRequest::new("a@b.com", "a", "pw123456", "pw123456");
        let user = auth.register(&request).await.unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(check(&auth), GuardOutcome::Allow);

        auth.logout().unwrap();
        assert_eq!(check(&auth), GuardOutcome::RedirectToLogin);
    }
}
