use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::entity_table::PermissionOracle;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Session restore has finished, successfully or not
    pub resolved: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Admins may create and delete records
impl PermissionOracle for AuthState {
    fn is_privileged(&self) -> bool {
        self.is_admin()
    }
}

/// Restores the session from localStorage and provides `AuthState`
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    spawn_local(async move {
        let Some(access_token) = storage::get_access_token() else {
            set_auth_state.set(AuthState {
                resolved: true,
                ..AuthState::default()
            });
            return;
        };

        match api::get_current_user(&access_token).await {
            Ok(user_info) => {
                log::info!("session restored for {}", user_info.username);
                set_auth_state.set(AuthState {
                    access_token: Some(access_token),
                    user_info: Some(user_info),
                    resolved: true,
                });
            }
            Err(e) => {
                log::warn!("stored session rejected: {}", e);
                storage::clear_access_token();
                set_auth_state.set(AuthState {
                    resolved: true,
                    ..AuthState::default()
                });
            }
        }
    });

    provide_context(auth_state);

    children()
}

/// Auth state provided by `AuthProvider`
pub fn use_auth() -> ReadSignal<AuthState> {
    use_context::<ReadSignal<AuthState>>().unwrap_or_else(|| {
        log::warn!("AuthProvider not found in component tree");
        signal(AuthState {
            resolved: true,
            ..AuthState::default()
        })
        .0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            username: "admin".into(),
            full_name: None,
            email: None,
            is_admin,
        }
    }

    #[test]
    fn test_only_admin_is_privileged() {
        let mut state = AuthState {
            access_token: Some("t".into()),
            user_info: Some(user(true)),
            resolved: true,
        };
        assert!(state.is_privileged());

        state.user_info = Some(user(false));
        assert!(!state.is_privileged());
        assert!(!AuthState::default().is_privileged());
    }
}
