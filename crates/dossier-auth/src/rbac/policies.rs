//! The capability table.
//!
//! Grants are data, not code: every role's capability set is spelled
//! out here in one place, and the enforcer consults nothing else.

use std::collections::{HashMap, HashSet};

use dossier_entity::account::Role;

/// A single guarded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create a new case record.
    RecordCreate,
    /// Retrieve a record by its subject key.
    RecordSearch,
    /// Replace the notes on an existing record.
    RecordUpdateNotes,
    /// List every record for oversight.
    RecordListAll,
    /// Administer accounts: list, create, modify, delete.
    AccountManage,
}

/// Maps each role to the capabilities it holds.
#[derive(Debug, Clone)]
pub struct RolePolicies {
    grants: HashMap<Role, HashSet<Capability>>,
}

impl RolePolicies {
    pub fn new() -> Self {
        use Capability::*;

        let mut grants: HashMap<Role, HashSet<Capability>> = HashMap::new();

        grants.insert(
            Role::Master,
            [
                RecordCreate,
                RecordSearch,
                RecordUpdateNotes,
                RecordListAll,
                AccountManage,
            ]
            .into(),
        );
        grants.insert(Role::Admin, [RecordCreate, RecordSearch].into());
        grants.insert(Role::Entry, [RecordCreate, RecordSearch].into());
        grants.insert(Role::Search, [RecordSearch].into());
        grants.insert(Role::Worker, [RecordCreate].into());
        grants.insert(Role::Viewer, [RecordSearch].into());

        Self { grants }
    }

    /// Whether `role` holds `capability`.
    pub fn allows(&self, role: Role, capability: Capability) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|caps| caps.contains(&capability))
    }

    /// All roles holding `capability`, in declaration order.
    pub fn roles_with(&self, capability: Capability) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|role| self.allows(*role, capability))
            .collect()
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::new()
    }
}
