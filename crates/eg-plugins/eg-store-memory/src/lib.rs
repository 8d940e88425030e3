//! # eg-store-memory
//!
//! In-memory implementation of `EventRepo`.
//! One `RwLock` guards the whole store: every command holds the write guard
//! for its full read-modify-write, so counters and records never diverge.

pub mod seed;

use async_trait::async_trait;
use chrono::Utc;
use eg_core::error::{AppError, Result};
use eg_core::guard::{require_admin, require_user};
use eg_core::models::{
    AttendanceStatus, CurrentUser, Event, EventPatch, EventView, InteractionRecord, NewEvent,
    DEFAULT_CATEGORIES,
};
use eg_core::traits::EventRepo;
use eg_core::{EventFilter, EventRules};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    /// Insertion order is the listing order
    events: Vec<Event>,
    /// event_id -> user_id -> record. Sparse: records exist only after a first interaction.
    interactions: HashMap<String, HashMap<String, InteractionRecord>>,
}

impl StoreState {
    fn position(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    fn record(&self, event_id: &str, user: Option<&CurrentUser>) -> Option<&InteractionRecord> {
        self.interactions.get(event_id)?.get(&user?.id)
    }

    fn view(&self, event: &Event, user: Option<&CurrentUser>) -> EventView {
        EventView::new(event.clone(), self.record(&event.id, user))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Get-or-create for `(user, event)` plus the event itself.
    fn interaction_mut(
        &mut self,
        event_id: &str,
        user: &CurrentUser,
    ) -> Result<(&mut Event, &mut InteractionRecord)> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| AppError::event_not_found(event_id))?;

        let record = self
            .interactions
            .entry(event_id.to_string())
            .or_default()
            .entry(user.id.clone())
            .or_insert_with(|| InteractionRecord::new(&user.id, event_id));

        Ok((event, record))
    }
}

pub struct MemoryEventStore {
    state: RwLock<StoreState>,
    rules: EventRules,
    /// Catalogue offered before any in-use categories
    categories: Vec<String>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            rules: EventRules::default(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_rules(mut self, rules: EventRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Preloads events such as demo seed data. An event whose id is already
    /// present is skipped.
    ///
    /// Counters are taken as given and no interaction records are created for
    /// them, so `likes` and `attendingCount` of a preloaded event may exceed
    /// the number of matching records. Only events created through
    /// `create_event` start at zero with counters equal to their record counts.
    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        let state = self.state.get_mut();
        for event in events {
            if state.position(&event.id).is_some() {
                log::warn!("Skipping preloaded event with duplicate id {}", event.id);
                continue;
            }
            state.events.push(event);
        }
        self
    }
}

impl Default for MemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventRepo for MemoryEventStore {
    async fn list_events(&self, filter: &EventFilter, user: Option<&CurrentUser>) -> Result<Vec<EventView>> {
        let state = self.state.read().await;
        Ok(state
            .events
            .iter()
            .filter(|e| filter.matches(e))
            .map(|e| state.view(e, user))
            .collect())
    }

    async fn get_event(&self, id: &str, user: Option<&CurrentUser>) -> Result<EventView> {
        let state = self.state.read().await;
        let index = state.position(id).ok_or_else(|| AppError::event_not_found(id))?;
        Ok(state.view(&state.events[index], user))
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        let mut categories = self.categories.clone();
        let state = self.state.read().await;
        for event in &state.events {
            let in_use = event.category.trim();
            if in_use.is_empty() {
                continue;
            }
            let lowered = in_use.to_lowercase();
            if !categories.iter().any(|c| c.to_lowercase() == lowered) {
                categories.push(in_use.to_string());
            }
        }
        Ok(categories)
    }

    async fn list_interactions(&self, user: &CurrentUser) -> Result<Vec<InteractionRecord>> {
        let state = self.state.read().await;
        Ok(state
            .events
            .iter()
            .filter_map(|e| state.record(&e.id, Some(user)).cloned())
            .collect())
    }

    async fn create_event(&self, draft: NewEvent, user: Option<&CurrentUser>) -> Result<Event> {
        let admin = require_admin(user, "create events")?;

        let mut state = self.state.write().await;
        let mut event = Event {
            id: state.fresh_id(),
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            date: draft.date,
            city: draft.city,
            category: draft.category,
            price: draft.price.filter(|p| !p.trim().is_empty()),
            likes: 0,
            attending_count: 0,
            created_by: Some(admin.id.clone()),
            created_at: Utc::now(),
        };
        self.rules.check(&mut event)?;

        state.events.push(event.clone());
        log::info!("Event {} ({}) created by {}", event.id, event.title, admin.id);
        Ok(event)
    }

    async fn update_event(&self, id: &str, patch: EventPatch, user: Option<&CurrentUser>) -> Result<Event> {
        let admin = require_admin(user, "edit events")?;

        let mut state = self.state.write().await;
        let index = state.position(id).ok_or_else(|| AppError::event_not_found(id))?;

        // Validate a copy so a rejected patch leaves the stored record intact
        let mut updated = state.events[index].clone();
        patch.apply_to(&mut updated);
        self.rules.check(&mut updated)?;

        state.events[index] = updated.clone();
        log::info!("Event {} updated by {}", id, admin.id);
        Ok(updated)
    }

    async fn delete_event(&self, id: &str, user: Option<&CurrentUser>) -> Result<()> {
        let admin = require_admin(user, "delete events")?;

        let mut state = self.state.write().await;
        let index = state.position(id).ok_or_else(|| AppError::event_not_found(id))?;

        state.events.remove(index);
        let dropped = state.interactions.remove(id).map(|r| r.len()).unwrap_or(0);
        log::info!("Event {} deleted by {} ({} interaction records dropped)", id, admin.id, dropped);
        Ok(())
    }

    async fn toggle_like(&self, id: &str, user: Option<&CurrentUser>) -> Result<EventView> {
        let user = require_user(user)?;

        let mut state = self.state.write().await;
        let (event, record) = state.interaction_mut(id, user)?;
        record.toggle_like().apply(&mut event.likes);

        log::debug!("User {} liked={} event {} (likes={})", user.id, record.liked, id, event.likes);
        Ok(EventView::new(event.clone(), Some(record)))
    }

    async fn set_attendance(
        &self,
        id: &str,
        status: Option<AttendanceStatus>,
        user: Option<&CurrentUser>,
    ) -> Result<EventView> {
        let user = require_user(user)?;

        let mut state = self.state.write().await;
        let (event, record) = state.interaction_mut(id, user)?;
        record.set_status(status).apply(&mut event.attending_count);

        log::debug!(
            "User {} status={:?} event {} (attending={})",
            user.id, status, id, event.attending_count
        );
        Ok(EventView::new(event.clone(), Some(record)))
    }
}
