use dioxus::prelude::*;

pub mod about;
pub mod feed;
pub mod login;
pub mod profile;
pub mod settings;

use about::About;
use feed::Feed;
use login::Login;
use profile::{MyProfile, UserProfile};
use settings::Settings;

use crate::stores::auth_store;
use crate::utils::avatar;

/// App routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login")]
    Login {},

    #[layout(Layout)]
        #[route("/")]
        Feed {},

        #[route("/profile")]
        MyProfile {},

        #[route("/profile/:username")]
        UserProfile { username: String },

        #[route("/settings")]
        Settings {},

        #[route("/about")]
        About {},
}

#[component]
fn Layout() -> Element {
    let mut drawer_open = use_signal(|| false);
    let navigator = navigator();

    // Everything behind the shell needs a session; this also kicks the
    // user back out after logout.
    use_effect(move || {
        if auth_store::CURRENT_USER.read().is_none() {
            navigator.replace(Route::Login {});
        }
    });

    let user = auth_store::current_user();
    let avatar_url = user
        .as_ref()
        .map(|u| avatar::placeholder_avatar_url(&u.name))
        .unwrap_or_else(|| avatar::placeholder_avatar_url("U"));

    let mut go = move |route: Route| {
        drawer_open.set(false);
        navigator.push(route);
    };

    rsx! {
        div {
            class: "min-h-screen bg-gray-50",

            // Header
            header {
                class: "fixed top-0 inset-x-0 z-30 bg-white border-b border-gray-200 shadow-sm",
                div {
                    class: "container mx-auto px-4 h-16 flex items-center justify-between",
                    Link {
                        to: Route::Feed {},
                        class: "text-xl font-extrabold text-indigo-600",
                        "Estelar"
                    }
                    button {
                        class: "w-10 h-10 rounded-full overflow-hidden border-2 border-indigo-200 hover:border-indigo-500 transition",
                        onclick: move |_| {
                            let open = *drawer_open.read();
                            drawer_open.set(!open);
                        },
                        img {
                            class: "w-full h-full object-cover",
                            src: "{avatar_url}",
                            alt: "Menu",
                        }
                    }
                }
            }

            // Drawer
            if *drawer_open.read() {
                div {
                    class: "fixed inset-0 bg-black/50 z-40",
                    onclick: move |_| drawer_open.set(false),

                    aside {
                        class: "w-64 bg-white h-full ml-auto shadow-xl",
                        onclick: move |e| e.stop_propagation(),
                        div {
                            class: "p-4 space-y-1",

                            if let Some(user) = user.as_ref() {
                                div {
                                    class: "px-3 py-2 mb-2 border-b border-gray-100",
                                    p {
                                        class: "font-semibold text-gray-900",
                                        "{user.name}"
                                    }
                                    p {
                                        class: "text-sm text-gray-500",
                                        "{user.job_title}"
                                    }
                                }
                            }

                            DrawerItem { label: "Feed", onclick: move |_| go(Route::Feed {}) }
                            DrawerItem { label: "My Profile", onclick: move |_| go(Route::MyProfile {}) }
                            DrawerItem { label: "Settings", onclick: move |_| go(Route::Settings {}) }
                            DrawerItem { label: "About", onclick: move |_| go(Route::About {}) }
                        }
                    }
                }
            }

            main {
                class: "pt-16",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn DrawerItem(label: &'static str, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "w-full text-left px-3 py-2 rounded-lg text-gray-700 hover:bg-indigo-50 hover:text-indigo-700 transition",
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}
