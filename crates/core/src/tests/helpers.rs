// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SessionContext;
use sambhram_domain::{
    Catalog, Category, Coordinator, EventId, EventRecord, LeaderEntry, MemberEntry,
    RegistrationRecord,
};

pub const SOLO: &str = "solo-1";
pub const DUO: &str = "duo-1";
pub const SQUAD: &str = "squad-1";
pub const OPEN_TEAM: &str = "open-team-1";

fn create_test_event(id: &str, title: &str, team_size: &str) -> EventRecord {
    EventRecord {
        id: EventId::new(id),
        title: String::from(title),
        subtitle: None,
        category: Category::Technical,
        team_size: String::from(team_size),
        description: String::from("Test event"),
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

/// A catalog with one individual event and three team events.
///
/// - `SOLO`: individual
/// - `DUO`: 2-3 members
/// - `SQUAD`: 3-6 members (form capacity 4)
/// - `OPEN_TEAM`: 1-2 members
pub fn create_test_context() -> SessionContext {
    let catalog: Catalog = Catalog::from_events(vec![
        create_test_event(SOLO, "Solo Singing", "Individual"),
        create_test_event(DUO, "Coding Duo", "2-3 members"),
        create_test_event(SQUAD, "Robo Squad", "3-6 members"),
        create_test_event(OPEN_TEAM, "Web Designing", "1-2 members"),
    ])
    .unwrap();
    SessionContext::new(catalog)
}

pub fn id(value: &str) -> EventId {
    EventId::new(value)
}

pub fn create_test_leader() -> LeaderEntry {
    LeaderEntry::new("Asha Rao", "asha@example.com", "9876543210")
}

/// A record with a team name, a complete leader and `members` complete members.
pub fn create_test_record(members: usize) -> RegistrationRecord {
    RegistrationRecord {
        team_name: String::from("Byte Busters"),
        leader: create_test_leader(),
        members: (1..=members)
            .map(|n| MemberEntry::new(&format!("Member {n}"), &format!("member{n}@example.com")))
            .collect(),
    }
}
