//! Per-request caller identity.

use uuid::Uuid;

use dossier_entity::account::Role;
use dossier_entity::session::Session;

/// The authenticated identity a request acts as.
///
/// Built by the API layer from a resolved session; services trust it and
/// never re-resolve tokens.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub account_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl From<&Session> for RequestContext {
    fn from(session: &Session) -> Self {
        Self {
            account_id: session.account_id,
            username: session.username.clone(),
            role: session.role,
        }
    }
}
