//! In-memory identity provider.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{
    models::Session,
    provider::{IdentityError, IdentityProvider},
};

struct Account {
    user_id: Uuid,
    password_digest: String,
}

/// Process-local [`IdentityProvider`] used by tests and the demo CLI.
///
/// Credentials never leave the process; passwords are kept only as SHA-256
/// digests.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: RwLock<HashMap<String, Account>>,
    session: RwLock<Option<Session>>,
}

impl MemoryIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _display_name: &str,
    ) -> Result<Session, IdentityError> {
        let email = normalize_email(email);
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&email) {
            return Err(IdentityError::EmailTaken);
        }

        let account = Account {
            user_id: Uuid::now_v7(),
            password_digest: digest(password),
        };

        let session = Session {
            user_id: account.user_id,
            email: email.clone(),
        };

        accounts.insert(email, account);
        *self.session.write().await = Some(session.clone());

        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let email = normalize_email(email);
        let accounts = self.accounts.read().await;

        let account = accounts
            .get(&email)
            .filter(|account| account.password_digest == digest(password))
            .ok_or(IdentityError::InvalidCredentials)?;

        let session = Session {
            user_id: account.user_id,
            email,
        };

        *self.session.write().await = Some(session.clone());

        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        *self.session.write().await = None;

        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, IdentityError> {
        Ok(self.session.read().await.clone())
    }
}
