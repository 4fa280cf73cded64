use super::*;
use crate::testing::make_user;

fn signed_in(user: User) -> AuthState {
    let mut state = AuthState::default();
    state.set_user(user);
    state
}

fn decide(state: &AuthState, requirement: &RoleRequirement) -> GuardDecision {
    evaluate_guard(state, requirement, &Routes::default())
}

fn sign_in() -> GuardDecision {
    GuardDecision::Unauthenticated { redirect_to: "/signin".to_owned() }
}

// =============================================================
// Shared steps
// =============================================================

#[test]
fn loading_never_redirects() {
    let mut inactive = make_user("fan");
    inactive.is_active = false;
    let states = [
        AuthState::pending(),
        AuthState { loading: true, ..signed_in(make_user("player")) },
        AuthState { loading: true, ..signed_in(inactive) },
        AuthState { loading: true, is_authenticated: true, ..AuthState::default() },
    ];
    let requirements = [
        RoleRequirement::Any,
        RoleRequirement::Admin,
        RoleRequirement::Exact(Role::Organizer),
        RoleRequirement::OneOf(vec![Role::Fan]),
    ];
    for state in &states {
        for requirement in &requirements {
            let decision = decide(state, requirement);
            assert_eq!(decision, GuardDecision::Loading);
            assert_eq!(decision.redirect_target(), None);
        }
    }
}

#[test]
fn signed_out_redirects_to_sign_in() {
    assert_eq!(decide(&AuthState::default(), &RoleRequirement::Any), sign_in());
    assert_eq!(decide(&AuthState::default(), &RoleRequirement::Admin), sign_in());
}

#[test]
fn user_without_authenticated_flag_is_signed_out() {
    let state = AuthState { user: Some(make_user("fan")), ..AuthState::default() };
    assert_eq!(decide(&state, &RoleRequirement::Any), sign_in());
}

#[test]
fn deactivated_user_is_blocked_before_role_check() {
    let mut user = make_user("admin");
    user.is_active = false;
    let state = signed_in(user);
    assert_eq!(decide(&state, &RoleRequirement::Any), GuardDecision::Blocked);
    assert_eq!(decide(&state, &RoleRequirement::Admin), GuardDecision::Blocked);
    assert_eq!(decide(&state, &RoleRequirement::Exact(Role::Player)), GuardDecision::Blocked);
}

#[test]
fn any_requirement_admits_every_active_role() {
    for role in Role::ALL {
        let state = signed_in(make_user(role.as_str()));
        assert_eq!(decide(&state, &RoleRequirement::Any), GuardDecision::Authorized, "{role:?}");
    }
}

// =============================================================
// Role predicates
// =============================================================

#[test]
fn club_manager_guard_normalizes_role_spelling() {
    let requirement = RoleRequirement::Exact(Role::ClubManager);
    for raw in ["Club Manager", "club_manager", "CLUB_MANAGER"] {
        assert_eq!(decide(&signed_in(make_user(raw)), &requirement), GuardDecision::Authorized, "{raw}");
    }
    assert_eq!(
        decide(&signed_in(make_user("player")), &requirement),
        GuardDecision::RoleMismatch { redirect_to: "/signin".to_owned() }
    );
}

#[test]
fn admin_guard_accepts_superadmin_of_any_role() {
    let mut root = make_user("fan");
    root.is_superadmin = true;
    assert_eq!(decide(&signed_in(root), &RoleRequirement::Admin), GuardDecision::Authorized);
    assert_eq!(decide(&signed_in(make_user("admin")), &RoleRequirement::Admin), GuardDecision::Authorized);
    assert_eq!(decide(&signed_in(make_user("Admin")), &RoleRequirement::Admin), GuardDecision::Authorized);
}

#[test]
fn admin_guard_mismatch_goes_to_unauthorized() {
    let decision = decide(&signed_in(make_user("organizer")), &RoleRequirement::Admin);
    assert_eq!(decision, GuardDecision::RoleMismatch { redirect_to: "/unauthorized".to_owned() });
    assert_eq!(decision.redirect_target(), Some("/unauthorized"));
}

#[test]
fn superadmin_does_not_bypass_other_role_guards() {
    let mut root = make_user("fan");
    root.is_superadmin = true;
    assert_eq!(
        decide(&signed_in(root), &RoleRequirement::Exact(Role::Organizer)),
        GuardDecision::RoleMismatch { redirect_to: "/signin".to_owned() }
    );
}

#[test]
fn multi_role_guard_checks_membership() {
    let requirement = RoleRequirement::OneOf(vec![Role::Organizer, Role::ClubManager]);
    assert_eq!(decide(&signed_in(make_user("organizer")), &requirement), GuardDecision::Authorized);
    assert_eq!(decide(&signed_in(make_user("Club Manager")), &requirement), GuardDecision::Authorized);
    assert_eq!(
        decide(&signed_in(make_user("fan")), &requirement),
        GuardDecision::RoleMismatch { redirect_to: "/signin".to_owned() }
    );
}

#[test]
fn empty_allow_list_admits_nobody() {
    let requirement = RoleRequirement::OneOf(Vec::new());
    assert_eq!(
        decide(&signed_in(make_user("admin")), &requirement),
        GuardDecision::RoleMismatch { redirect_to: "/signin".to_owned() }
    );
}

// =============================================================
// Scenario: organizer signs in
// =============================================================

#[test]
fn organizer_passes_organizer_guard_and_fails_player_guard() {
    let state = signed_in(make_user("organizer"));
    assert!(state.is_authenticated);
    assert_eq!(decide(&state, &RoleRequirement::Exact(Role::Organizer)), GuardDecision::Authorized);
    assert_eq!(decide(&state, &RoleRequirement::Exact(Role::Player)).redirect_target(), Some("/signin"));
}

#[test]
fn custom_routes_are_honored() {
    let routes = Routes { sign_in: "/login".to_owned(), unauthorized: "/403".to_owned(), sign_in_aliases: Vec::new() };
    let state = signed_in(make_user("fan"));
    assert_eq!(
        evaluate_guard(&state, &RoleRequirement::Admin, &routes).redirect_target(),
        Some("/403")
    );
    assert_eq!(
        evaluate_guard(&AuthState::default(), &RoleRequirement::Any, &routes).redirect_target(),
        Some("/login")
    );
}

// =============================================================
// Side effects
// =============================================================

#[test]
fn blocked_decision_evicts() {
    assert_eq!(guard_action(None, &GuardDecision::Blocked), GuardAction::Evict);
    assert_eq!(guard_action(Some(&GuardDecision::Loading), &GuardDecision::Blocked), GuardAction::Evict);
}

#[test]
fn sign_out_after_eviction_does_not_redirect_again() {
    assert_eq!(guard_action(Some(&GuardDecision::Blocked), &sign_in()), GuardAction::None);
}

#[test]
fn redirect_decisions_redirect() {
    assert_eq!(guard_action(None, &sign_in()), GuardAction::Redirect("/signin".to_owned()));
    assert_eq!(
        guard_action(Some(&GuardDecision::Authorized), &sign_in()),
        GuardAction::Redirect("/signin".to_owned())
    );
    assert_eq!(
        guard_action(None, &GuardDecision::RoleMismatch { redirect_to: "/unauthorized".to_owned() }),
        GuardAction::Redirect("/unauthorized".to_owned())
    );
}

#[test]
fn loading_and_authorized_do_nothing() {
    assert_eq!(guard_action(None, &GuardDecision::Loading), GuardAction::None);
    assert_eq!(guard_action(Some(&GuardDecision::Loading), &GuardDecision::Authorized), GuardAction::None);
}

#[test]
fn deactivated_user_guard_sequence_navigates_once() {
    let mut state = signed_in(make_user("player"));
    state.user.as_mut().unwrap().is_active = false;
    let requirement = RoleRequirement::Exact(Role::Player);

    let blocked = decide(&state, &requirement);
    assert_eq!(guard_action(None, &blocked), GuardAction::Evict);

    state.clear_user();
    let after = decide(&state, &requirement);
    assert_eq!(guard_action(Some(&blocked), &after), GuardAction::None);
}
