use dioxus::prelude::*;

#[component]
pub fn About() -> Element {
    rsx! {
        div {
            class: "container mx-auto px-4 py-8",
            h1 {
                class: "text-2xl font-bold text-gray-800 mb-4",
                "About"
            }
            div {
                class: "bg-white rounded-lg shadow p-6",
                h2 {
                    class: "text-xl font-semibold text-gray-800 mb-2",
                    "Estelar"
                }
                p {
                    class: "text-gray-600 mb-4",
                    "A secure, internal business communication platform combining work, achievement, and connection."
                }
                p {
                    class: "text-sm text-gray-500",
                    "Version {env!(\"CARGO_PKG_VERSION\")}"
                }
            }
        }
    }
}
