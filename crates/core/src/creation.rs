//! Full project creation request.
//!
//! A request is always seeded with one assignment per organizational role
//! label. Labels are fixed for the lifetime of the request; only the user
//! behind each label can change. Nothing else is validated client-side:
//! the backend accepts or rejects whatever is submitted.

use serde::Serialize;

use crate::error::CoreError;
use crate::models::RoleAssignment;
use crate::roles::ORGANIZATIONAL_ROLES;
use crate::types::DbId;

/// Body of `POST /projects/full-create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCreationRequest {
    pub name: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub address: String,
    role_assignments: Vec<RoleAssignment>,
}

impl Default for ProjectCreationRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            client_name: String::new(),
            client_email: String::new(),
            client_phone: String::new(),
            address: String::new(),
            role_assignments: ORGANIZATIONAL_ROLES
                .iter()
                .map(|role| RoleAssignment {
                    role: role.to_string(),
                    user_id: None,
                })
                .collect(),
        }
    }
}

impl ProjectCreationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn role_assignments(&self) -> &[RoleAssignment] {
        &self.role_assignments
    }

    /// Set (or clear, with `None`) the user behind a role label.
    ///
    /// Returns [`CoreError::UnknownRole`] when `role` is not one of the
    /// seeded labels; labels are never added or removed.
    pub fn assign(&mut self, role: &str, user_id: Option<DbId>) -> Result<(), CoreError> {
        let slot = self
            .role_assignments
            .iter_mut()
            .find(|a| a.role == role)
            .ok_or_else(|| CoreError::UnknownRole(role.to_string()))?;
        slot.user_id = user_id;
        Ok(())
    }

    pub fn assigned_user(&self, role: &str) -> Option<DbId> {
        self.role_assignments
            .iter()
            .find(|a| a.role == role)
            .and_then(|a| a.user_id)
    }
}
