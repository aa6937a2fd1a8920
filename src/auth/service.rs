//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{Profile, ProfileUpdate, Session},
        provider::IdentityProvider,
        records::{ProfileRecord, UserRoleRecord},
    },
    store::{self, DocumentStore, Filter, collections},
};

const ADMIN_ROLE: &str = "admin";

#[derive(Clone)]
pub struct DocAuthService {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
}

impl DocAuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { provider, store }
    }
}

#[async_trait]
impl AuthService for DocAuthService {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, AuthServiceError> {
        let session = self.provider.sign_up(email, password, full_name).await?;

        // The profile starts with empty address fields; checkout prefill
        // picks up whatever the user saves later.
        let record = ProfileRecord {
            full_name: full_name.to_string(),
            address_line1: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            phone: String::new(),
            email: session.email.clone(),
            created_at: Timestamp::now(),
        };

        self.store
            .create(
                collections::PROFILES,
                session.user_id,
                store::encode(&record)?,
            )
            .await?;

        tracing::info!(user = %session.user_id, "account created");

        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        Ok(self.provider.sign_in(email, password).await?)
    }

    async fn sign_out(&self) -> Result<(), AuthServiceError> {
        Ok(self.provider.sign_out().await?)
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthServiceError> {
        Ok(self.provider.current_session().await?)
    }

    async fn profile(&self, user: Uuid) -> Result<Profile, AuthServiceError> {
        let value = self
            .store
            .get(collections::PROFILES, user)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let record: ProfileRecord = store::decode(value)?;

        Ok(record.into_profile(user))
    }

    async fn update_profile(
        &self,
        user: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, AuthServiceError> {
        let mut patch = Map::new();

        if let Some(full_name) = &update.full_name {
            patch.insert("full_name".to_string(), json!(full_name));
        }
        if let Some(address_line1) = &update.address_line1 {
            patch.insert("address_line1".to_string(), json!(address_line1));
        }
        if let Some(city) = &update.city {
            patch.insert("city".to_string(), json!(city));
        }
        if let Some(state) = &update.state {
            patch.insert("state".to_string(), json!(state));
        }
        if let Some(pincode) = &update.pincode {
            patch.insert("pincode".to_string(), json!(pincode));
        }
        if let Some(phone) = &update.phone {
            patch.insert("phone".to_string(), json!(phone));
        }

        self.store
            .update(collections::PROFILES, user, Value::Object(patch))
            .await?;

        self.profile(user).await
    }

    async fn is_admin(&self, user: Uuid) -> Result<bool, AuthServiceError> {
        let documents = self
            .store
            .find(
                collections::USER_ROLES,
                &[
                    Filter::eq("user_id", user.to_string()),
                    Filter::eq("role", ADMIN_ROLE),
                ],
            )
            .await?;

        Ok(!documents.is_empty())
    }

    async fn grant_admin(&self, user: Uuid) -> Result<(), AuthServiceError> {
        if self.is_admin(user).await? {
            return Ok(());
        }

        let record = UserRoleRecord {
            user_id: user,
            role: ADMIN_ROLE.to_string(),
        };

        self.store
            .create(
                collections::USER_ROLES,
                Uuid::now_v7(),
                store::encode(&record)?,
            )
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register an account with the identity provider and create its
    /// profile record.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, AuthServiceError>;

    /// Authenticate an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthServiceError>;

    /// End the active session.
    async fn sign_out(&self) -> Result<(), AuthServiceError>;

    /// The active session, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthServiceError>;

    /// The user's profile.
    async fn profile(&self, user: Uuid) -> Result<Profile, AuthServiceError>;

    /// Apply a partial update to the user's profile.
    async fn update_profile(
        &self,
        user: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, AuthServiceError>;

    /// Whether the user holds the back-office role.
    async fn is_admin(&self, user: Uuid) -> Result<bool, AuthServiceError>;

    /// Grant the back-office role. Idempotent.
    async fn grant_admin(&self, user: Uuid) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{auth::memory::MemoryIdentity, store::memory::MemoryStore};

    use super::*;

    fn service() -> DocAuthService {
        DocAuthService::new(Arc::new(MemoryIdentity::new()), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn sign_up_creates_a_profile() -> TestResult {
        let auth = service();

        let session = auth
            .sign_up("asha@example.com", "hunter2", "Asha Verma")
            .await?;

        let profile = auth.profile(session.user_id).await?;

        assert_eq!(profile.full_name, "Asha Verma");
        assert_eq!(profile.email, "asha@example.com");
        assert_eq!(profile.address_line1, "");

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_fills_address_fields() -> TestResult {
        let auth = service();

        let session = auth
            .sign_up("asha@example.com", "hunter2", "Asha Verma")
            .await?;

        let profile = auth
            .update_profile(
                session.user_id,
                ProfileUpdate {
                    address_line1: Some("14 MG Road".to_string()),
                    city: Some("Pune".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await?;

        assert_eq!(profile.address_line1, "14 MG Road");
        assert_eq!(profile.city, "Pune");
        assert_eq!(profile.full_name, "Asha Verma");

        Ok(())
    }

    #[tokio::test]
    async fn profile_of_unknown_user_is_not_found() {
        let auth = service();

        let result = auth.profile(Uuid::now_v7()).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }

    #[tokio::test]
    async fn admin_role_is_granted_idempotently() -> TestResult {
        let auth = service();

        let session = auth
            .sign_up("staff@example.com", "hunter2", "Back Office")
            .await?;

        assert!(!auth.is_admin(session.user_id).await?);

        auth.grant_admin(session.user_id).await?;
        auth.grant_admin(session.user_id).await?;

        assert!(auth.is_admin(session.user_id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_sign_up_surfaces_the_provider_error() -> TestResult {
        let auth = service();

        auth.sign_up("asha@example.com", "hunter2", "Asha Verma")
            .await?;

        let result = auth
            .sign_up("asha@example.com", "other", "Someone Else")
            .await;

        assert!(matches!(result, Err(AuthServiceError::Identity(_))));

        Ok(())
    }
}
