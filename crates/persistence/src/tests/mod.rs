// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use sambhram::{CheckoutStep, Session};
use sambhram_domain::{EventId, LeaderEntry, MemberEntry, RegistrationRecord};

pub fn create_test_record() -> RegistrationRecord {
    RegistrationRecord {
        team_name: String::from("Byte Busters"),
        leader: LeaderEntry::new("Asha Rao", "asha@example.com", "9876543210"),
        members: vec![MemberEntry::new("Kiran", "kiran@example.com")],
    }
}

pub fn create_test_session() -> Session {
    let mut session: Session = Session::new();
    session.selection.insert(EventId::new("hackathon"));
    session.selection.insert(EventId::new("solo-singing"));
    session
        .registrations
        .set(EventId::new("hackathon"), create_test_record());
    session.personal.name = String::from("Asha Rao");
    session.personal.college = String::from("Other");
    session.personal.other_college = String::from("City College");
    session.step = CheckoutStep::Review;
    session
}
