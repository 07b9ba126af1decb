// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use async_trait::async_trait;
use sambhram::{Session, SessionContext};
use sambhram_domain::{
    Catalog, Category, Coordinator, EventId, EventRecord, LeaderEntry, MemberEntry,
    PersonalDetails, RegistrationRecord,
};
use std::sync::Mutex;

use crate::{ApiError, OrderBackend, OrderRequest, OrderResponse};

pub const SOLO: &str = "solo-1";
pub const DUO: &str = "duo-1";

fn create_test_event(id: &str, title: &str, team_size: &str) -> EventRecord {
    EventRecord {
        id: EventId::new(id),
        title: String::from(title),
        subtitle: None,
        category: Category::Cultural,
        team_size: String::from(team_size),
        description: String::new(),
        rules: Vec::new(),
        venue: None,
        date: None,
        time: None,
        image: None,
        coordinator: Coordinator {
            name: String::from("Rahul Sharma"),
            contact: String::from("9876543215"),
        },
    }
}

pub fn create_test_context() -> SessionContext {
    let catalog: Catalog = Catalog::from_events(vec![
        create_test_event(SOLO, "Solo Singing", "Individual"),
        create_test_event(DUO, "Duet Dance", "2-3 members"),
    ])
    .unwrap();
    SessionContext::new(catalog)
}

pub fn create_test_personal() -> PersonalDetails {
    PersonalDetails {
        name: String::from("Asha Rao"),
        email: String::from("asha@example.com"),
        college: String::from("Other"),
        branch: String::from("CSE"),
        mobile: String::from("9876543210"),
        other_college: String::from("City College"),
        ..PersonalDetails::default()
    }
}

pub fn create_test_record() -> RegistrationRecord {
    RegistrationRecord {
        team_name: String::from("Twin Steps"),
        leader: LeaderEntry::new("Asha Rao", "asha@example.com", "9876543210"),
        members: vec![MemberEntry::new("Kiran", "kiran@example.com")],
    }
}

/// A session with both events selected and a complete personal form.
pub fn create_test_session() -> Session {
    let mut session: Session = Session::new();
    session.personal = create_test_personal();
    session
        .registrations
        .set(EventId::new(DUO), create_test_record());
    session.selection.insert(EventId::new(SOLO));
    session.selection.insert(EventId::new(DUO));
    session
}

/// An `OrderBackend` that returns a canned answer and records requests.
pub struct StubBackend {
    response: Result<OrderResponse, ApiError>,
    pub requests: Mutex<Vec<OrderRequest>>,
}

impl StubBackend {
    pub fn answering(response: OrderResponse) -> Self {
        Self {
            response: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(ApiError::Backend {
                message: String::from(message),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderBackend for StubBackend {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}

pub fn create_test_order_response() -> OrderResponse {
    OrderResponse {
        participant_id: Some(String::from("SAM-0001")),
        order_id: Some(String::from("order_123")),
        amount: Some(160),
        currency: None,
    }
}
