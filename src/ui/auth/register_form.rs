//! Registration form component.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::{register, use_session_context};
use crate::ui::common::InlineSpinner;

/// Account creation form. Registration does not log in; the page navigates
/// back to the login surface on success.
#[component]
pub fn RegisterForm(
    /// Callback when the account was created
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let session = use_session_context();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let username_error = RwSignal::new(None::<String>);
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);

    let validate_username = move || {
        if username.get().trim().is_empty() {
            username_error.set(Some("Le nom d'utilisateur est requis".to_string()));
            false
        } else {
            username_error.set(None);
            true
        }
    };

    let validate_email = move || {
        let value = email.get();
        if value.trim().is_empty() {
            email_error.set(Some("L'email est requis".to_string()));
            false
        } else if !value.contains('@') || !value.contains('.') {
            email_error.set(Some("Adresse email invalide".to_string()));
            false
        } else {
            email_error.set(None);
            true
        }
    };

    let validate_password = move || {
        if password.get().len() < 8 {
            password_error.set(Some(
                "Le mot de passe doit contenir au moins 8 caractères".to_string(),
            ));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    let validate_confirm = move || {
        if confirm.get() != password.get() {
            confirm_error.set(Some("Les mots de passe ne correspondent pas".to_string()));
            false
        } else {
            confirm_error.set(None);
            true
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        session.clear_error();

        let all_valid = [
            validate_username(),
            validate_email(),
            validate_password(),
            validate_confirm(),
        ]
        .iter()
        .all(|ok| *ok);
        if !all_valid {
            return;
        }

        let username_val = username.get();
        let email_val = email.get();
        let password_val = password.get();

        spawn_local(async move {
            if register(&username_val, &email_val, &password_val).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form">
            <h2 class="auth-form-title">"Créer un compte"</h2>

            {move || {
                session.error.get().map(|error| {
                    view! {
                        <div class="auth-form-error" role="alert">
                            <p>{error}</p>
                        </div>
                    }
                })
            }}

            <div class="form-field">
                <label for="reg-username">"Nom d'utilisateur"</label>
                <input
                    type="text"
                    id="reg-username"
                    autocomplete="username"
                    class:field-invalid=move || username_error.get().is_some()
                    prop:value=move || username.get()
                    on:input=move |ev| {
                        username.set(event_target_value(&ev));
                        username_error.set(None);
                    }
                    on:blur=move |_| { validate_username(); }
                />
                {move || username_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            </div>

            <div class="form-field">
                <label for="reg-email">"Email"</label>
                <input
                    type="email"
                    id="reg-email"
                    autocomplete="email"
                    class:field-invalid=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { validate_email(); }
                />
                {move || email_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            </div>

            <div class="form-field">
                <label for="reg-password">"Mot de passe"</label>
                <input
                    type="password"
                    id="reg-password"
                    autocomplete="new-password"
                    class:field-invalid=move || password_error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        password_error.set(None);
                    }
                    on:blur=move |_| { validate_password(); }
                />
                {move || password_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            </div>

            <div class="form-field">
                <label for="reg-confirm">"Confirmer le mot de passe"</label>
                <input
                    type="password"
                    id="reg-confirm"
                    autocomplete="new-password"
                    class:field-invalid=move || confirm_error.get().is_some()
                    prop:value=move || confirm.get()
                    on:input=move |ev| {
                        confirm.set(event_target_value(&ev));
                        confirm_error.set(None);
                    }
                    on:blur=move |_| { validate_confirm(); }
                />
                {move || confirm_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            </div>

            <button
                type="submit"
                class="btn-primary"
                disabled=move || session.pending.get()
            >
                {move || {
                    if session.pending.get() {
                        view! {
                            <span class="btn-loading">
                                <InlineSpinner />
                                "Création en cours..."
                            </span>
                        }
                        .into_any()
                    } else {
                        view! { <span>"Créer le compte"</span> }.into_any()
                    }
                }}
            </button>
        </form>
    }
}
