// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The event catalog.
//!
//! Catalog documents have historically used several spellings for the same
//! field (`_id` or `id`, `eventName` or `title`, `eventType` or `category`,
//! `rules` or `detailedRules`). They are resolved here, once, into canonical
//! [`EventRecord`]s.

use crate::error::DomainError;
use crate::team_size::{TeamRequirement, classify};
use crate::types::{Category, Coordinator, EventId, EventRecord};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;

const DEFAULT_CATALOG: &str = include_str!("../data/events.json");

/// An event as it appears in a catalog document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEventRecord {
    #[serde(rename = "_id")]
    underscore_id: Option<String>,
    id: Option<String>,
    #[serde(rename = "eventName")]
    event_name: Option<String>,
    title: Option<String>,
    #[serde(rename = "eventSubName")]
    event_sub_name: Option<String>,
    #[serde(rename = "eventType")]
    event_type: Option<String>,
    category: Option<String>,
    #[serde(rename = "teamSize")]
    team_size: Option<String>,
    description: Option<String>,
    rules: Option<Vec<String>>,
    #[serde(rename = "detailedRules")]
    detailed_rules: Option<Vec<String>>,
    venue: Option<String>,
    date: Option<String>,
    time: Option<String>,
    image: Option<String>,
    #[serde(rename = "studentCoordinator")]
    student_coordinator: Option<String>,
    #[serde(rename = "studentCoordinatorContact")]
    student_coordinator_contact: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawEventRecord {
    /// Resolves field aliases. Returns `None` for records that cannot be listed.
    fn normalize(self) -> Option<EventRecord> {
        let Some(id) = non_empty(self.underscore_id).or_else(|| non_empty(self.id)) else {
            warn!("Skipping catalog record without an id");
            return None;
        };

        let category_name: Option<String> = self.event_type.or(self.category);
        let category: Category = match category_name.as_deref().map(str::parse) {
            Some(Ok(category)) => category,
            _ => {
                warn!(event_id = %id, category = ?category_name, "Skipping catalog record with unknown category");
                return None;
            }
        };

        Some(EventRecord {
            id: EventId::new(&id),
            title: self.event_name.or(self.title).unwrap_or_default(),
            subtitle: non_empty(self.event_sub_name),
            category,
            team_size: self.team_size.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            rules: self.rules.or(self.detailed_rules).unwrap_or_default(),
            venue: non_empty(self.venue),
            date: non_empty(self.date),
            time: non_empty(self.time),
            image: non_empty(self.image),
            coordinator: Coordinator {
                name: self.student_coordinator.unwrap_or_default(),
                contact: self.student_coordinator_contact.unwrap_or_default(),
            },
        })
    }
}

/// The immutable list of events open for browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    events: Vec<EventRecord>,
}

impl Catalog {
    /// Builds a catalog from canonical records.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share an id.
    pub fn from_events(events: Vec<EventRecord>) -> Result<Self, DomainError> {
        let mut seen: HashSet<&EventId> = HashSet::new();
        for event in &events {
            if !seen.insert(&event.id) {
                return Err(DomainError::DuplicateEvent(event.id.clone()));
            }
        }
        Ok(Self { events })
    }

    /// Parses and normalizes a catalog document (a JSON array of events).
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a JSON array of objects or
    /// if two listable records share an id.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let raw: Vec<RawEventRecord> =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidCatalog(e.to_string()))?;
        let events: Vec<EventRecord> = raw
            .into_iter()
            .filter_map(RawEventRecord::normalize)
            .collect();
        Self::from_events(events)
    }

    /// The catalog bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled document is invalid.
    pub fn bundled() -> Result<Self, DomainError> {
        Self::from_json_str(DEFAULT_CATALOG)
    }

    /// All events, in catalog order.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Looks up an event by id.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&EventRecord> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Looks up an event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist.
    pub fn require(&self, id: &EventId) -> Result<&EventRecord, DomainError> {
        self.get(id)
            .ok_or_else(|| DomainError::EventNotFound(id.clone()))
    }

    /// Events of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &EventRecord> {
        self.events
            .iter()
            .filter(move |event| event.category == category)
    }

    /// The team requirement of an event, if it exists.
    #[must_use]
    pub fn requirement(&self, id: &EventId) -> Option<TeamRequirement> {
        self.get(id).map(classify)
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
