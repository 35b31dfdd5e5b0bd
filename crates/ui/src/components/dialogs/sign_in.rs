//! # Sign-in Dialog
//!
//! Stores an access token issued by the backend together with the role and
//! user name it belongs to. The session is persisted and routes are
//! recomposed for the new role.

use dioxus::prelude::*;
use edutalks_client::Credentials;
use edutalks_core::Role;

use crate::components::inputs::TextInput;
use crate::services::use_services;
use crate::state::{APP_STATE, StatusLevel, notify};

#[derive(Debug, Clone, Default, PartialEq)]
struct SignInForm {
    username: String,
    display_name: String,
    token: String,
    role: String,
}

impl SignInForm {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push("User name is required".to_string());
        }
        if self.token.trim().is_empty() {
            errors.push("Access token is required".to_string());
        }
        errors
    }

    fn credentials(&self) -> Credentials {
        let role = match self.role.trim() {
            "" => Role::Member("member".to_string()),
            other => Role::from(other),
        };
        let credentials = Credentials::new(self.token.trim(), role, self.username.trim());
        match self.display_name.trim() {
            "" => credentials,
            name => credentials.with_display_name(name),
        }
    }
}

#[component]
pub fn SignInDialog() -> Element {
    let services = use_services();
    let mut form = use_signal(SignInForm::default);
    let mut errors = use_signal(Vec::<String>::new);

    let submit = use_callback(move |_: ()| {
        let current = form.read().clone();
        let problems = current.validate();
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        match services.sign_in(current.credentials()) {
            Ok(view) => {
                let label = view.display_label().to_string();
                let mut state = APP_STATE.write();
                state.set_session(view);
                state.ui.close_dialog();
                drop(state);
                notify(format!("Signed in as {label}"), StatusLevel::Success);
            }
            Err(e) => {
                tracing::error!("Failed to store session: {}", e);
                errors.set(vec![e.to_string()]);
            }
        }
    });

    let values = form.read().clone();

    rsx! {
        div {
            class: "sign-in-dialog p-6",

            h2 { class: "text-xl font-semibold text-white mb-1", "Sign in" }
            p { class: "text-sm text-slate-400 mb-6", "Paste the access token issued for your account." }

            if !errors.read().is_empty() {
                div {
                    class: "mb-4 p-3 bg-red-500/10 border border-red-500/30 rounded-lg",
                    ul {
                        class: "list-disc list-inside text-sm text-red-300",
                        for error in errors.read().iter() {
                            li { "{error}" }
                        }
                    }
                }
            }

            div {
                class: "space-y-4",

                TextInput {
                    value: values.username.clone(),
                    label: "User name",
                    required: true,
                    on_change: move |v| form.write().username = v,
                }
                TextInput {
                    value: values.display_name.clone(),
                    label: "Display name",
                    placeholder: "Optional",
                    on_change: move |v| form.write().display_name = v,
                }
                TextInput {
                    value: values.role.clone(),
                    label: "Role",
                    placeholder: "admin, teacher, student...",
                    help_text: "Only \"admin\" unlocks tab management",
                    on_change: move |v| form.write().role = v,
                }
                TextInput {
                    value: values.token.clone(),
                    label: "Access token",
                    input_type: "password",
                    required: true,
                    on_change: move |v| form.write().token = v,
                    on_enter: move |_| submit.call(()),
                }
            }

            div {
                class: "flex justify-end gap-3 mt-6",
                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                    onclick: move |_| APP_STATE.write().ui.close_dialog(),
                    "Cancel"
                }
                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 rounded-lg transition-colors",
                    onclick: move |_| submit.call(()),
                    "Sign in"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_user_and_token() {
        let form = SignInForm::default();
        assert_eq!(form.validate().len(), 2);

        let form = SignInForm {
            username: "ann".to_string(),
            token: "tok".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_credentials_from_form() {
        let form = SignInForm {
            username: " root ".to_string(),
            display_name: String::new(),
            token: " tok ".to_string(),
            role: "admin".to_string(),
        };
        let creds = form.credentials();
        assert_eq!(creds.access_token, "tok");
        assert_eq!(creds.username, "root");
        assert_eq!(creds.role, Role::Admin);
        assert_eq!(creds.display_name, None);

        let form = SignInForm {
            display_name: "Ann B".to_string(),
            ..form
        };
        let creds = SignInForm { role: String::new(), ..form }.credentials();
        assert_eq!(creds.role, Role::Member("member".to_string()));
        assert_eq!(creds.display_name.as_deref(), Some("Ann B"));
    }
}
