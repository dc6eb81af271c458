use super::*;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn auth_state_default_not_loading() {
    let state = AuthState::default();
    assert!(!state.loading);
}

// =============================================================
// Derived fields
// =============================================================

#[test]
fn authenticated_iff_user_present() {
    let state = AuthState {
        user: Some(UserProfile {
            id: "u1".to_owned(),
            full_name: "Jane Roe".to_owned(),
            email: "jane@example.com".to_owned(),
        }),
        loading: false,
    };
    assert!(state.is_authenticated());
    assert_eq!(state.display_name(), "Jane Roe");
}

#[test]
fn display_name_empty_when_signed_out() {
    assert_eq!(AuthState::default().display_name(), "");
}
