// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Category, DomainError, LeaderEntry, MemberEntry, PersonalDetails, PersonalField,
    RegistrationRecord,
};

#[test]
fn test_category_parses_case_insensitively() {
    assert_eq!("cultural".parse::<Category>().unwrap(), Category::Cultural);
    assert_eq!("TECHNICAL".parse::<Category>().unwrap(), Category::Technical);
    assert_eq!(" Special ".parse::<Category>().unwrap(), Category::Special);
}

#[test]
fn test_category_rejects_unknown_names() {
    let result: Result<Category, DomainError> = "Sports".parse();
    assert!(matches!(result, Err(DomainError::InvalidCategory(name)) if name == "Sports"));
}

#[test]
fn test_member_fill_states() {
    assert!(MemberEntry::new("Ravi", "ravi@example.com").is_complete());
    assert!(MemberEntry::new("Ravi", "").is_half_filled());
    assert!(MemberEntry::new("", "ravi@example.com").is_half_filled());
    assert!(MemberEntry::default().is_blank());
    assert!(!MemberEntry::default().is_half_filled());
}

#[test]
fn test_filled_count_includes_complete_leader_and_members_only() {
    let record: RegistrationRecord = RegistrationRecord {
        team_name: String::from("Team"),
        leader: LeaderEntry::new("Asha", "asha@example.com", "9876543210"),
        members: vec![
            MemberEntry::new("Ravi", "ravi@example.com"),
            MemberEntry::new("Half", ""),
            MemberEntry::default(),
        ],
    };
    assert_eq!(record.filled_count(), 2);
}

#[test]
fn test_filled_count_ignores_leader_without_phone() {
    let record: RegistrationRecord = RegistrationRecord {
        leader: LeaderEntry::new("Asha", "asha@example.com", ""),
        ..RegistrationRecord::default()
    };
    assert_eq!(record.filled_count(), 0);
}

#[test]
fn test_registration_record_serializes_with_camel_case_keys() {
    let mut record: RegistrationRecord = RegistrationRecord {
        team_name: String::from("Byte Busters"),
        leader: LeaderEntry::new("Asha", "asha@example.com", "9876543210"),
        members: vec![MemberEntry::new("Ravi", "ravi@example.com")],
    };
    record.leader.alt_phone = String::from("9123456780");

    let json: serde_json::Value = serde_json::to_value(&record).unwrap();
    assert_eq!(json["teamName"], "Byte Busters");
    assert_eq!(json["leader"]["altPhone"], "9123456780");
    assert_eq!(json["members"][0]["email"], "ravi@example.com");
}

#[test]
fn test_registration_record_tolerates_missing_fields() {
    let record: RegistrationRecord =
        serde_json::from_str(r#"{"leader":{"name":"Asha"}}"#).unwrap();
    assert_eq!(record.leader.name, "Asha");
    assert!(record.leader.phone.is_empty());
    assert!(record.members.is_empty());
    assert!(record.team_name.is_empty());
}

#[test]
fn test_personal_details_resolve_other_college_and_branch() {
    let mut details: PersonalDetails = PersonalDetails {
        college: String::from("Other"),
        other_college: String::from("NITK Surathkal"),
        branch: String::from("CSE"),
        other_branch: String::from("ignored"),
        ..PersonalDetails::default()
    };
    assert_eq!(details.resolved_college(), "NITK Surathkal");
    assert_eq!(details.resolved_branch(), "CSE");

    *details.field_mut(PersonalField::Branch) = String::from("Other");
    assert_eq!(details.resolved_branch(), "ignored");
}

#[test]
fn test_personal_details_use_legacy_storage_keys() {
    let details: PersonalDetails = serde_json::from_str(
        r#"{"name":"Asha","college":"Other","Othercollege":"SDIT","mobile":"9876543210"}"#,
    )
    .unwrap();
    assert_eq!(details.other_college, "SDIT");
    assert_eq!(details.resolved_college(), "SDIT");
}
