use clankit::ecs::commands::{ClanCommandKind, Confirm};
use clankit::model::MAX_MEMBERS;
use clankit::testutil::Scenario;
use clankit::PropertyStore;

#[test]
fn create_registers_clan_and_marks_owner() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");

    let clan = s.clan("Alpha");
    assert_eq!(clan.owner, "Steve");
    assert_eq!(clan.members, vec!["Steve"]);
    assert_eq!(clan.level, 1);
    assert!(clan.active);
    assert_eq!(clan.tag, "[ALP]");

    assert_eq!(s.membership("Steve").owned_clan(), Some("Alpha"));
    assert!(
        s.messages_for("Steve")
            .iter()
            .any(|m| m.contains("Successfully created clan \"Alpha\""))
    );
}

#[test]
fn duplicate_name_is_rejected() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Alex",
        ClanCommandKind::Create {
            name: "Alpha".to_string(),
        },
    );

    assert_eq!(s.clans().len(), 1);
    assert!(!s.membership("Alex").in_clan());
    assert!(
        s.messages_for("Alex")
            .iter()
            .any(|m| m.contains("already exists"))
    );
}

#[test]
fn create_while_in_a_clan_is_rejected() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.run(
        "Steve",
        ClanCommandKind::Create {
            name: "Second".to_string(),
        },
    );

    assert_eq!(s.clans().len(), 1);
    assert!(
        s.messages_for("Steve")
            .iter()
            .any(|m| m.contains("already in a clan"))
    );
}

#[test]
fn invalid_names_are_rejected() {
    let mut s = Scenario::new();
    s.join("Steve");
    for bad in ["ab", "ThirteenChars", "has space", "TheAdmins"] {
        s.run(
            "Steve",
            ClanCommandKind::Create {
                name: bad.to_string(),
            },
        );
    }
    assert!(s.clans().is_empty());
    assert!(!s.membership("Steve").in_clan());
}

#[test]
fn approved_join_request_adds_member_and_clears_request() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Alex",
        ClanCommandKind::RequestJoin {
            clan: "Alpha".to_string(),
        },
    );
    assert_eq!(s.membership("Alex").pending.as_deref(), Some("Alpha"));
    assert!(s.requests().contains_key("Alex"));

    s.run(
        "Steve",
        ClanCommandKind::ResolveJoin {
            requester: "Alex".to_string(),
            approve: true,
        },
    );

    let clan = s.clan("Alpha");
    assert!(clan.is_member("Alex"));
    assert_eq!(clan.member_count(), 2);
    let membership = s.membership("Alex");
    assert_eq!(membership.clan_name(), Some("Alpha"));
    assert_eq!(membership.pending, None);
    assert!(s.requests().is_empty());
    assert!(
        s.messages_for("Alex")
            .iter()
            .any(|m| m.contains("approved and added"))
    );
}

#[test]
fn denied_join_request_clears_everything() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Alex",
        ClanCommandKind::RequestJoin {
            clan: "Alpha".to_string(),
        },
    );
    s.run(
        "Steve",
        ClanCommandKind::ResolveJoin {
            requester: "Alex".to_string(),
            approve: false,
        },
    );

    assert!(!s.clan("Alpha").is_member("Alex"));
    let membership = s.membership("Alex");
    assert!(!membership.in_clan());
    assert_eq!(membership.pending, None);
    assert!(s.requests().is_empty());
    assert!(
        s.messages_for("Alex")
            .iter()
            .any(|m| m.contains("denied entry"))
    );
}

#[test]
fn join_request_notifies_online_members() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.drain_outbox();
    s.join("Alex");
    s.run(
        "Alex",
        ClanCommandKind::RequestJoin {
            clan: "Alpha".to_string(),
        },
    );

    assert!(
        s.messages_for("Steve")
            .iter()
            .any(|m| m.contains("Alex wants to join"))
    );
}

#[test]
fn second_pending_request_is_rejected() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.found_clan("Kai", "Beta");
    s.join("Alex");
    s.run(
        "Alex",
        ClanCommandKind::RequestJoin {
            clan: "Alpha".to_string(),
        },
    );
    s.run(
        "Alex",
        ClanCommandKind::RequestJoin {
            clan: "Beta".to_string(),
        },
    );

    let requests = s.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests["Alex"].clan, "Alpha");
}

#[test]
fn resolve_by_non_owner_is_rejected() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.join("Mallory");
    s.run(
        "Alex",
        ClanCommandKind::RequestJoin {
            clan: "Alpha".to_string(),
        },
    );
    s.run(
        "Mallory",
        ClanCommandKind::ResolveJoin {
            requester: "Alex".to_string(),
            approve: true,
        },
    );

    assert!(s.requests().contains_key("Alex"));
    assert!(!s.clan("Alpha").is_member("Alex"));
    assert!(
        s.messages_for("Mallory")
            .iter()
            .any(|m| m.contains("not authorized"))
    );
}

#[test]
fn join_request_to_full_clan_is_rejected() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    let mut clans = s.clans();
    {
        let clan = clans.get_mut("Alpha").unwrap();
        for i in 0..MAX_MEMBERS - 1 {
            clan.add_member(&format!("filler{i}"));
        }
        assert!(clan.is_full());
    }
    s.store
        .set("clans", &serde_json::to_string(&clans).unwrap());

    s.join("Alex");
    s.run(
        "Alex",
        ClanCommandKind::RequestJoin {
            clan: "Alpha".to_string(),
        },
    );

    assert!(s.requests().is_empty());
    assert!(
        s.messages_for("Alex")
            .iter()
            .any(|m| m.contains("full (25/25"))
    );
}

#[test]
fn invite_adds_directly_without_pending_step() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Steve",
        ClanCommandKind::Invite {
            target: "Alex".to_string(),
            confirm: Confirm::Yes,
        },
    );

    assert!(s.clan("Alpha").is_member("Alex"));
    assert_eq!(s.membership("Alex").clan_name(), Some("Alpha"));
    assert!(s.requests().is_empty());
    assert!(
        s.messages_for("Alex")
            .iter()
            .any(|m| m.contains("invited and added"))
    );
}

#[test]
fn unconfirmed_invite_does_nothing() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Steve",
        ClanCommandKind::Invite {
            target: "Alex".to_string(),
            confirm: Confirm::No,
        },
    );

    assert!(!s.clan("Alpha").is_member("Alex"));
    assert!(
        s.messages_for("Steve")
            .iter()
            .any(|m| m.contains("Invitation canceled"))
    );
}

#[test]
fn invite_of_clanned_player_is_rejected() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.found_clan("Kai", "Beta");
    s.run(
        "Steve",
        ClanCommandKind::Invite {
            target: "Kai".to_string(),
            confirm: Confirm::Yes,
        },
    );

    assert!(!s.clan("Alpha").is_member("Kai"));
    assert_eq!(s.membership("Kai").owned_clan(), Some("Beta"));
}

#[test]
fn kick_removes_member_from_registry_and_component() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Steve",
        ClanCommandKind::Invite {
            target: "Alex".to_string(),
            confirm: Confirm::Yes,
        },
    );
    s.run(
        "Steve",
        ClanCommandKind::Kick {
            target: "Alex".to_string(),
        },
    );

    assert!(!s.clan("Alpha").is_member("Alex"));
    assert!(!s.membership("Alex").in_clan());
    assert!(
        s.messages_for("Alex")
            .iter()
            .any(|m| m.contains("kicked from the clan"))
    );
}

#[test]
fn owner_cannot_kick_themselves() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.run(
        "Steve",
        ClanCommandKind::Kick {
            target: "Steve".to_string(),
        },
    );

    assert_eq!(s.clan("Alpha").owner, "Steve");
    assert!(
        s.messages_for("Steve")
            .iter()
            .any(|m| m.contains("cannot kick the clan owner"))
    );
}

#[test]
fn leave_by_member_keeps_clan_and_owner() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Steve",
        ClanCommandKind::Invite {
            target: "Alex".to_string(),
            confirm: Confirm::Yes,
        },
    );
    s.run(
        "Alex",
        ClanCommandKind::Leave {
            confirm: Confirm::Yes,
        },
    );

    let clan = s.clan("Alpha");
    assert_eq!(clan.owner, "Steve");
    assert_eq!(clan.members, vec!["Steve"]);
    assert!(!s.membership("Alex").in_clan());
}

#[test]
fn leave_by_sole_owner_deletes_the_clan() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.run(
        "Steve",
        ClanCommandKind::Leave {
            confirm: Confirm::Yes,
        },
    );

    assert!(s.clans().is_empty());
    assert!(!s.membership("Steve").in_clan());
}

#[test]
fn leave_by_owner_promotes_one_remaining_member() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    for name in ["Alex", "Kai"] {
        s.join(name);
        s.run(
            "Steve",
            ClanCommandKind::Invite {
                target: name.to_string(),
                confirm: Confirm::Yes,
            },
        );
    }
    let before = s.clan("Alpha").member_count();

    s.run(
        "Steve",
        ClanCommandKind::Leave {
            confirm: Confirm::Yes,
        },
    );

    let clan = s.clan("Alpha");
    assert_ne!(clan.owner, "Steve");
    assert!(["Alex", "Kai"].contains(&clan.owner.as_str()));
    assert_eq!(clan.member_count(), before);
    assert!(!s.membership("Steve").in_clan());
    assert_eq!(s.membership(&clan.owner).owned_clan(), Some("Alpha"));
    assert!(
        s.messages_for(&clan.owner)
            .iter()
            .any(|m| m.contains("promoted to the owner"))
    );
}

#[test]
fn unconfirmed_leave_is_a_silent_no_op() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.drain_outbox();
    s.run(
        "Steve",
        ClanCommandKind::Leave {
            confirm: Confirm::No,
        },
    );

    assert_eq!(s.clan("Alpha").owner, "Steve");
    assert_eq!(s.membership("Steve").owned_clan(), Some("Alpha"));
    assert!(s.messages_for("Steve").is_empty());
}

#[test]
fn departed_owner_can_found_a_new_clan() {
    let mut s = Scenario::new();
    s.found_clan("Steve", "Alpha");
    s.join("Alex");
    s.run(
        "Steve",
        ClanCommandKind::Invite {
            target: "Alex".to_string(),
            confirm: Confirm::Yes,
        },
    );
    s.run(
        "Steve",
        ClanCommandKind::Leave {
            confirm: Confirm::Yes,
        },
    );
    s.run(
        "Steve",
        ClanCommandKind::Create {
            name: "Second".to_string(),
        },
    );

    assert_eq!(s.clan("Second").owner, "Steve");
    assert_eq!(s.clan("Alpha").owner, "Alex");
    assert_eq!(s.membership("Steve").owned_clan(), Some("Second"));
}
