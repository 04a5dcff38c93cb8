//! Login form component.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::{login, use_session_context};
use crate::ui::common::InlineSpinner;

/// Username/password form; delegates to the session context's login action.
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let session = use_session_context();

    // Form state
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    // Client-side required-field validation
    let username_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let validate_username = move || {
        if username.get().trim().is_empty() {
            username_error.set(Some("Le nom d'utilisateur est requis".to_string()));
            false
        } else {
            username_error.set(None);
            true
        }
    };

    let validate_password = move || {
        if password.get().is_empty() {
            password_error.set(Some("Le mot de passe est requis".to_string()));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        session.clear_error();

        let username_valid = validate_username();
        let password_valid = validate_password();
        if !username_valid || !password_valid {
            return;
        }

        let username_val = username.get();
        let password_val = password.get();

        spawn_local(async move {
            if login(&username_val, &password_val).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
            // On failure the error signal is already set by the context.
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form">
            <h2 class="auth-form-title">"Connexion"</h2>

            // Global error message
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
                <label for="username">"Nom d'utilisateur"</label>
                <input
                    type="text"
                    id="username"
                    name="username"
                    autocomplete="username"
                    class:field-invalid=move || username_error.get().is_some()
                    prop:value=move || username.get()
                    on:input=move |ev| {
                        username.set(event_target_value(&ev));
                        username_error.set(None);
                    }
                    on:blur=move |_| { validate_username(); }
                />
                {move || {
                    username_error.get().map(|error| {
                        view! { <p class="field-error">{error}</p> }
                    })
                }}
            </div>

            <div class="form-field">
                <label for="password">"Mot de passe"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="current-password"
                    class:field-invalid=move || password_error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        password_error.set(None);
                    }
                    on:blur=move |_| { validate_password(); }
                />
                {move || {
                    password_error.get().map(|error| {
                        view! { <p class="field-error">{error}</p> }
                    })
                }}
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
                                "Connexion en cours..."
                            </span>
                        }
                        .into_any()
                    } else {
                        view! { <span>"Se connecter"</span> }.into_any()
                    }
                }}
            </button>
        </form>
    }
}
