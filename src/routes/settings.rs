use dioxus::prelude::*;

use crate::routes::Route;
use crate::stores::auth_store;

#[component]
pub fn Settings() -> Element {
    let navigator = navigator();

    let handle_logout = move |_| {
        auth_store::logout();
        navigator.replace(Route::Login {});
    };

    rsx! {
        div {
            class: "container mx-auto px-4 py-8",
            h1 {
                class: "text-2xl font-bold text-gray-800 mb-4",
                "Settings"
            }
            div {
                class: "bg-white rounded-lg shadow p-6",
                p {
                    class: "text-gray-600",
                    "Application settings will be displayed here."
                }
                button {
                    class: "mt-4 px-4 py-2 bg-red-500 text-white rounded hover:bg-red-600 transition-colors",
                    onclick: handle_logout,
                    "Logout"
                }
            }
        }
    }
}
