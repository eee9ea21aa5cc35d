use dioxus::prelude::*;

use crate::routes::Route;
use crate::stores::auth_store;

/// Sign-in view. Owns the write path to the persisted `user` slot.
#[component]
pub fn Login() -> Element {
    let mut username = use_signal(|| String::new());
    let mut password = use_signal(|| String::new());
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let navigator = navigator();

    let handle_submit = move |_| {
        if *submitting.read() {
            return;
        }
        let username_value = username.read().trim().to_string();
        let password_value = password.read().clone();
        if username_value.is_empty() || password_value.is_empty() {
            error.set(Some("Enter your username and password.".to_string()));
            return;
        }

        submitting.set(true);
        error.set(None);

        spawn(async move {
            match auth_store::login(&username_value, &password_value).await {
                Ok(_) => {
                    navigator.replace(Route::Feed {});
                }
                Err(e) => {
                    error.set(Some(e));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "min-h-screen bg-gray-50 flex items-center justify-center px-4",
            div {
                class: "bg-white rounded-xl shadow-2xl p-8 w-full max-w-md",

                h1 {
                    class: "text-2xl font-bold text-gray-800 mb-1",
                    "Estelar"
                }
                p {
                    class: "text-gray-500 mb-6",
                    "Sign in with your company account."
                }

                div {
                    class: "space-y-4",
                    div {
                        label {
                            class: "block text-sm font-medium text-gray-700 mb-2",
                            "Username"
                        }
                        input {
                            class: "w-full px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500",
                            r#type: "text",
                            value: "{username}",
                            placeholder: "Your username",
                            disabled: *submitting.read(),
                            oninput: move |evt| username.set(evt.value()),
                        }
                    }
                    div {
                        label {
                            class: "block text-sm font-medium text-gray-700 mb-2",
                            "Password"
                        }
                        input {
                            class: "w-full px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500",
                            r#type: "password",
                            value: "{password}",
                            placeholder: "Your password",
                            disabled: *submitting.read(),
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }

                    if let Some(message) = error.read().as_ref() {
                        div {
                            class: "bg-red-50 border border-red-200 text-red-600 text-sm rounded-md p-3",
                            "{message}"
                        }
                    }

                    button {
                        class: "w-full px-4 py-2 text-white font-medium rounded-lg shadow-lg bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-400",
                        disabled: *submitting.read(),
                        onclick: handle_submit,
                        if *submitting.read() { "Signing in..." } else { "Sign In" }
                    }
                }
            }
        }
    }
}
