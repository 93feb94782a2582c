use contracts::system::auth::SupplierInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

/// Where the session stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    /// A stored token is being checked against `/me`
    Checking,
    /// No usable token: the login view is shown
    Anonymous,
    Authenticated,
}

/// Phase right after mount, before any request is made
pub fn initial_phase(stored_token: Option<&str>) -> AuthPhase {
    match stored_token {
        Some(token) if !token.trim().is_empty() => AuthPhase::Checking,
        _ => AuthPhase::Anonymous,
    }
}

#[derive(Clone, Debug)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub access_token: Option<String>,
    pub user_info: Option<SupplierInfo>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self {
            phase: AuthPhase::Anonymous,
            access_token: None,
            user_info: None,
        }
    }

    pub fn authenticated(access_token: String, user_info: SupplierInfo) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            access_token: Some(access_token),
            user_info: Some(user_info),
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let stored = storage::get_access_token();
    let (auth_state, set_auth_state) = signal(AuthState {
        phase: initial_phase(stored.as_deref()),
        access_token: stored.clone(),
        user_info: None,
    });

    // Validate the stored token by fetching the profile
    Effect::new(move |_| {
        let Some(access_token) = stored.clone() else {
            return;
        };
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user_info) => {
                    log::info!("Session restored for {}", user_info.email);
                    set_auth_state.set(AuthState::authenticated(access_token, user_info));
                }
                Err(e) => {
                    log::warn!("Stored token rejected: {}", e);
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::anonymous());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Log in, store the token and load the profile
pub async fn do_login(
    email: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let response = api::login(email, password).await?;
    storage::save_access_token(&response.access_token);

    match api::get_current_user().await {
        Ok(user_info) => {
            set_auth_state.set(AuthState::authenticated(response.access_token, user_info));
            Ok(())
        }
        Err(e) => {
            storage::clear_tokens();
            Err(e)
        }
    }
}

/// Drop the token and return to the login view
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::anonymous());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_token_starts_anonymous() {
        assert_eq!(initial_phase(None), AuthPhase::Anonymous);
        assert_eq!(initial_phase(Some("  ")), AuthPhase::Anonymous);
    }

    #[test]
    fn stored_token_is_checked_first() {
        assert_eq!(initial_phase(Some("eyJhbGciOi")), AuthPhase::Checking);
    }

    #[test]
    fn anonymous_state_is_not_authenticated() {
        assert_eq!(AuthState::anonymous().phase, AuthPhase::Anonymous);
    }
}
