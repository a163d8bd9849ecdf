//! Capability enforcement.

use tracing::warn;

use dossier_core::error::AppError;
use dossier_core::result::AppResult;
use dossier_entity::account::Role;

use crate::rbac::policies::{Capability, RolePolicies};

/// Answers "may this role do that" for the service layer.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RolePolicies,
}

impl RbacEnforcer {
    pub fn new() -> Self {
        Self {
            policies: RolePolicies::new(),
        }
    }

    /// Returns `Forbidden` unless `role` holds `capability`.
    pub fn require(&self, role: Role, capability: Capability) -> AppResult<()> {
        if self.policies.allows(role, capability) {
            return Ok(());
        }
        warn!(%role, ?capability, "Capability denied");
        Err(AppError::forbidden(format!(
            "Role '{role}' is not permitted to perform this operation"
        )))
    }

    /// Whether `role` holds `capability`, without producing an error.
    pub fn allows(&self, role: Role, capability: Capability) -> bool {
        self.policies.allows(role, capability)
    }
}
