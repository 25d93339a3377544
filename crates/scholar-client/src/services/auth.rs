use serde::de::IgnoredAny;
use tracing::{info, warn};

use super::acknowledge;
use crate::endpoint::{item_path, QueryParams};
use crate::envelope::Envelope;
use crate::http::ApiClient;
use crate::types::{AuthResponse, SignInRequest, SignUpRequest, User, UserUpdate};

/// Sign-up, sign-in and profile calls. A successful sign-in or sign-up
/// stores the returned token and user on the client's credential store.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> Envelope<AuthResponse> {
        let response: Envelope<AuthResponse> = self
            .api
            .post(&self.api.config().endpoints.auth_signup, request)
            .await;
        self.remember(&response);
        response
    }

    pub async fn sign_in(&self, request: &SignInRequest) -> Envelope<AuthResponse> {
        let response: Envelope<AuthResponse> = self
            .api
            .post(&self.api.config().endpoints.auth_signin, request)
            .await;
        self.remember(&response);
        response
    }

    /// Local credentials are cleared whatever the backend says.
    pub async fn sign_out(&self) -> Envelope<()> {
        let response = acknowledge(
            self.api
                .post_empty::<IgnoredAny>(&self.api.config().endpoints.auth_signout)
                .await,
        );

        if let Err(e) = self.api.credentials().clear() {
            warn!(error = %e, "failed to clear stored credentials");
        }
        info!("signed out");
        response
    }

    pub fn current_user(&self) -> Option<User> {
        self.api.credentials().current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.credentials().is_authenticated()
    }

    pub async fn user_profile(&self, user_id: &str) -> Envelope<User> {
        let endpoint = item_path(&self.api.config().endpoints.user_profile, user_id);
        self.api.get(&endpoint, QueryParams::new()).await
    }

    pub async fn update_user_profile(&self, user_id: &str, update: &UserUpdate) -> Envelope<User> {
        let endpoint = item_path(&self.api.config().endpoints.user_profile, user_id);
        self.api.put(&endpoint, update).await
    }

    fn remember(&self, response: &Envelope<AuthResponse>) {
        let Some(auth) = response.data() else {
            return;
        };
        if auth.token.is_empty() {
            warn!("auth response carried an empty token, not storing it");
            return;
        }

        let credentials = self.api.credentials();
        if let Err(e) = credentials.set_token(auth.token.as_str()) {
            warn!(error = %e, "token kept in memory but not persisted");
        }
        if let Err(e) = credentials.set_user(&auth.user) {
            warn!(error = %e, "user kept in memory but not persisted");
        }
        info!(user = %auth.user.id, "signed in");
    }
}
