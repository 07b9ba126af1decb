// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Category, Coordinator, EventId, EventRecord, LeaderEntry, MemberEntry, RegistrationRecord,
};

pub fn create_test_event(id: &str, title: &str, team_size: &str) -> EventRecord {
    EventRecord {
        id: EventId::new(id),
        title: String::from(title),
        subtitle: None,
        category: Category::Technical,
        team_size: String::from(team_size),
        description: String::from("Test event"),
        rules: vec![String::from("Be on time")],
        venue: Some(String::from("Main Stage")),
        date: Some(String::from("2024-11-18")),
        time: Some(String::from("5:00 PM")),
        image: None,
        coordinator: Coordinator {
            name: String::from("Rahul Sharma"),
            contact: String::from("9876543215"),
        },
    }
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
