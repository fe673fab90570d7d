//! Client-related types shared with the backend
//!
//! Auth request/response DTOs and the staff permission checks used to
//! gate mutating actions before any network call is made.

use serde::{Deserialize, Serialize};

/// Role that bypasses all permission checks
pub const SUPER_ADMIN_ROLE: &str = "super-admin";

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserInfo,
}

/// Staff user information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub company_id: i64,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserInfo {
    /// Check a single permission; super-admins hold everything
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.is_super_admin() {
            return true;
        }
        self.permissions.iter().any(|p| p == permission)
    }

    /// Check a role by name
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check whether at least one of the permissions is held
    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        if self.is_super_admin() {
            return true;
        }
        permissions.iter().any(|p| self.permissions.iter().any(|held| held == p))
    }

    /// Check whether all of the permissions are held
    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        if self.is_super_admin() {
            return true;
        }
        permissions.iter().all(|p| self.permissions.iter().any(|held| held == p))
    }

    fn is_super_admin(&self) -> bool {
        self.has_role(SUPER_ADMIN_ROLE)
    }
}
