//! # Core Traits (Ports)
//! 
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use crate::error::Result;
use crate::filter::EventFilter;
use crate::models::{
    AttendanceStatus, CurrentUser, Event, EventPatch, EventView, InteractionRecord, NewEvent, Session,
};

/// The Event Store: owns the event catalog and every user's interaction records.
///
/// `user` is whoever the identity provider resolved for the request, if anyone.
/// Commands that fail leave the store exactly as it was.
#[async_trait]
pub trait EventRepo: Send + Sync {
    // Queries
    async fn list_events(&self, filter: &EventFilter, user: Option<&CurrentUser>) -> Result<Vec<EventView>>;
    async fn get_event(&self, id: &str, user: Option<&CurrentUser>) -> Result<EventView>;
    async fn list_categories(&self) -> Result<Vec<String>>;
    /// The caller's own records, in event order.
    async fn list_interactions(&self, user: &CurrentUser) -> Result<Vec<InteractionRecord>>;

    // Admin commands
    async fn create_event(&self, draft: NewEvent, user: Option<&CurrentUser>) -> Result<Event>;
    async fn update_event(&self, id: &str, patch: EventPatch, user: Option<&CurrentUser>) -> Result<Event>;
    /// Also removes every interaction record for the event.
    async fn delete_event(&self, id: &str, user: Option<&CurrentUser>) -> Result<()>;

    // Interaction commands
    async fn toggle_like(&self, id: &str, user: Option<&CurrentUser>) -> Result<EventView>;
    async fn set_attendance(
        &self,
        id: &str,
        status: Option<AttendanceStatus>,
        user: Option<&CurrentUser>,
    ) -> Result<EventView>;
}

/// Identity contract: credentials in, `CurrentUser` out.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verifies credentials and opens a session.
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    /// Creates a regular (non-admin) account and opens a session.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session>;

    /// Resolves a bearer token. Unknown tokens yield `None`.
    async fn resolve(&self, token: &str) -> Option<CurrentUser>;

    /// Ends a session. Unknown tokens are ignored.
    async fn logout(&self, token: &str);
}
