//! Recording fakes for the auth collaborators.

use crate::{AuthRepository, OAuthProvider};
use api_gateway::{AuthResult, GatewayError, GatewayResponse, GatewayResult, HttpGateway};
use app_storage::{SessionStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub path: String,
    pub bearer_token: Option<String>,
    pub body: serde_json::Value,
}

/// Replays scripted responses; `None` entries simulate a transport failure.
#[derive(Default)]
pub struct FakeGateway {
    responses: Mutex<VecDeque<Option<GatewayResponse>>>,
    pub posts: Mutex<Vec<RecordedPost>>,
}

impl FakeGateway {
    pub fn with_responses(responses: Vec<Option<GatewayResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn last_post(&self) -> Option<RecordedPost> {
        self.posts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpGateway for FakeGateway {
    async fn post_json(
        &self,
        path: &str,
        bearer_token: Option<&str>,
        body: &serde_json::Value,
    ) -> GatewayResult<GatewayResponse> {
        self.posts.lock().unwrap().push(RecordedPost {
            path: path.to_string(),
            bearer_token: bearer_token.map(str::to_string),
            body: body.clone(),
        });
        match self.responses.lock().unwrap().pop_front() {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(GatewayError::Config("simulated transport failure".to_string())),
            None => Ok(GatewayResponse::new(200)),
        }
    }
}

#[derive(Default)]
pub struct FakeSessionStore {
    pub token: Mutex<Option<String>>,
    pub fail_writes: bool,
}

impl FakeSessionStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            token: Mutex::new(None),
            fail_writes: true,
        }
    }

    pub fn current(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

impl SessionStore for FakeSessionStore {
    fn read(&self) -> StorageResult<Option<String>> {
        Ok(self.current())
    }

    fn write(&self, token: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Platform("locked".to_string()));
        }
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

/// Scripted repository that counts every call.
pub struct FakeAuthRepository {
    pub authorize_url: Option<String>,
    pub callback_result: AuthResult,
    pub request_result: AuthResult,
    pub verify_result: AuthResult,
    pub last_provider: Mutex<Option<OAuthProvider>>,
    pub callback_uris: Mutex<Vec<String>>,
    pub request_calls: Mutex<Vec<String>>,
    pub verify_calls: Mutex<Vec<(String, String)>>,
}

impl Default for FakeAuthRepository {
    fn default() -> Self {
        Self {
            authorize_url: None,
            callback_result: AuthResult::Success,
            request_result: AuthResult::Success,
            verify_result: AuthResult::Success,
            last_provider: Mutex::new(None),
            callback_uris: Mutex::new(Vec::new()),
            request_calls: Mutex::new(Vec::new()),
            verify_calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeAuthRepository {
    pub fn network_calls(&self) -> usize {
        self.callback_uris.lock().unwrap().len()
            + self.request_calls.lock().unwrap().len()
            + self.verify_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AuthRepository for FakeAuthRepository {
    fn build_oauth_authorize_url(&self, provider: OAuthProvider) -> Option<String> {
        *self.last_provider.lock().unwrap() = Some(provider);
        self.authorize_url.clone()
    }

    async fn complete_oauth_callback(&self, callback_uri: &str) -> AuthResult {
        self.callback_uris
            .lock()
            .unwrap()
            .push(callback_uri.to_string());
        self.callback_result.clone()
    }

    async fn request_otp(&self, email: &str) -> AuthResult {
        self.request_calls.lock().unwrap().push(email.to_string());
        self.request_result.clone()
    }

    async fn verify_otp(&self, email: &str, code: &str) -> AuthResult {
        self.verify_calls
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        self.verify_result.clone()
    }

    async fn logout(&self) -> AuthResult {
        AuthResult::Success
    }
}
