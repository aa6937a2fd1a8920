//! Auth Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::models::Profile;

/// Stored document shape of a profile. The document id is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProfileRecord {
    pub full_name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl ProfileRecord {
    pub(crate) fn into_profile(self, user_id: Uuid) -> Profile {
        Profile {
            user_id,
            full_name: self.full_name,
            address_line1: self.address_line1,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            phone: self.phone,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// Stored document shape of a role grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserRoleRecord {
    pub user_id: Uuid,
    pub role: String,
}
