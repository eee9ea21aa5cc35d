use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::components::PostCard;
use crate::services::{auth_api, avatar_api};
use crate::stores::auth_store::User;
use crate::stores::feed_store::Post;
use crate::stores::{auth_store, feed_store};
use crate::utils::avatar;

/// Maximum accepted avatar file size in bytes (inclusive)
const MAX_AVATAR_BYTES: u64 = 2_000_000;

#[derive(Clone, Copy, PartialEq, Debug)]
enum ProfileTab {
    Details,
    Activity,
    Edit,
    Password,
}

impl ProfileTab {
    fn label(&self) -> &'static str {
        match self {
            ProfileTab::Details => "Profile Details",
            ProfileTab::Activity => "Activity",
            ProfileTab::Edit => "Edit Avatar",
            ProfileTab::Password => "Change Password",
        }
    }
}

/// Inclusive size gate applied before anything else touches the file.
fn validate_avatar_size(size: u64) -> Result<(), String> {
    if size > MAX_AVATAR_BYTES {
        Err("The file is too large (max 2 MB).".to_string())
    } else {
        Ok(())
    }
}

fn load_posts_for(user: &User) -> Vec<Post> {
    feed_store::posts_by_author(&feed_store::load_all(), &user.name)
}

/// The caller's own profile
#[component]
pub fn MyProfile() -> Element {
    rsx! {
        ProfileView {}
    }
}

/// Another user's profile, read-only
#[component]
pub fn UserProfile(username: String) -> Element {
    rsx! {
        ProfileView { viewed_username: username }
    }
}

#[component]
fn ProfileView(viewed_username: Option<String>) -> Element {
    // Absence of a viewed identity is the signal that this is the caller's
    // own profile.
    let is_own_profile = viewed_username.is_none();

    let mut active_tab = use_signal(|| ProfileTab::Details);
    let mut subject = use_signal(|| None::<User>);
    let mut avatar_url = use_signal(|| String::new());
    let mut user_posts = use_signal(|| Vec::<Post>::new());

    // Avatar workflow state
    let mut uploading = use_signal(|| false);
    let mut upload_error = use_signal(|| None::<String>);

    // Password workflow state
    let mut old_password = use_signal(|| String::new());
    let mut new_password = use_signal(|| String::new());
    let mut confirm_password = use_signal(|| String::new());
    let mut password_error = use_signal(|| None::<String>);
    let mut password_success = use_signal(|| None::<String>);
    let mut changing_password = use_signal(|| false);

    // Resolve the subject: the supplied viewed identity, or the caller's
    // own persisted record. The display avatar resets to the initials
    // placeholder whenever the subject changes.
    use_effect(use_reactive(&viewed_username, move |viewed| {
        let resolved = match viewed {
            Some(username) => auth_api::find_user(&username),
            None => auth_store::current_user(),
        };
        if let Some(user) = resolved.as_ref() {
            avatar_url.set(avatar::placeholder_avatar_url(&user.name));
        }
        subject.set(resolved);
    }));

    // Project the subject's posts once the identity resolves
    use_effect(move || {
        let posts = subject
            .read()
            .as_ref()
            .map(load_posts_for)
            .unwrap_or_default();
        user_posts.set(posts);
    });

    // Reload the projection on every change-bus delivery, from either
    // channel. Reloads are full rescans, so bursts are harmless.
    let mut feed_subscription = use_signal(|| None::<feed_store::FeedSubscription>);
    use_effect(move || {
        if feed_subscription.peek().is_some() {
            return;
        }
        let subscription = feed_store::subscribe(move || {
            if let Some(user) = subject.peek().as_ref() {
                user_posts.set(load_posts_for(user));
            }
        });
        feed_subscription.set(subscription);
    });

    // Detach both listeners together when the view goes away
    use_drop(move || {
        feed_subscription.write().take();
    });

    // Release the last local preview when the view goes away; earlier
    // previews are released as they are replaced.
    use_drop(move || {
        let url = avatar_url.peek().clone();
        if url.starts_with("blob:") {
            web_sys::Url::revoke_object_url(&url).ok();
        }
    });

    let file_input_id = use_hook(|| format!("avatar-upload-{}", uuid::Uuid::new_v4()));
    let input_id_for_handler = file_input_id.clone();

    let handle_avatar_change = move |_evt: Event<FormData>| {
        let input_id = input_id_for_handler.clone();
        spawn(async move {
            upload_error.set(None);

            let Some(file) = selected_file(&input_id) else {
                return;
            };

            if let Err(message) = validate_avatar_size(file.size() as u64) {
                upload_error.set(Some(message));
                return;
            }

            // Optimistic local preview; shown before the upload settles and
            // kept even if it fails. The replaced preview is released here.
            match web_sys::Url::create_object_url_with_blob(&file) {
                Ok(url) => {
                    let previous = avatar_url.peek().clone();
                    avatar_url.set(url);
                    if previous.starts_with("blob:") {
                        web_sys::Url::revoke_object_url(&previous).ok();
                    }
                }
                Err(e) => log::warn!("Failed to create preview URL: {:?}", e),
            }

            uploading.set(true);
            let outcome = match read_file_bytes(&file).await {
                Ok(bytes) => avatar_api::upload_avatar(bytes).await,
                Err(e) => Err(e),
            };
            if let Err(e) = outcome {
                log::error!("Avatar upload failed: {}", e);
                upload_error.set(Some("Network error. Could not reach the server.".to_string()));
            }
            uploading.set(false);
        });
    };

    let handle_password_submit = move |_| {
        // Single-flight: a submission in progress wins over new clicks
        if *changing_password.read() {
            return;
        }

        password_error.set(None);
        password_success.set(None);

        // Local guard, checked before the service is ever involved: the
        // workflow only runs against the caller's own resolved identity.
        let Some(user) = auth_store::current_user() else {
            password_error.set(Some("No authenticated user.".to_string()));
            return;
        };

        let old = old_password.read().clone();
        let new = new_password.read().clone();
        let confirm = confirm_password.read().clone();

        changing_password.set(true);
        spawn(async move {
            match auth_api::change_password(&user.username, &old, &new, &confirm).await {
                Ok(result) if result.success => {
                    password_success.set(Some(result.message.unwrap_or_else(|| {
                        "Password changed successfully!".to_string()
                    })));
                    old_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                }
                Ok(result) => {
                    // Inputs are kept so the user can correct and resubmit
                    password_error.set(Some(result.message.unwrap_or_else(|| {
                        "Something went wrong while changing the password.".to_string()
                    })));
                }
                Err(e) => {
                    log::error!("Password change request failed: {}", e);
                    password_error.set(Some("An unexpected error occurred.".to_string()));
                }
            }
            changing_password.set(false);
        });
    };

    let Some(user) = subject.read().clone() else {
        return rsx! {
            div {
                class: "container mx-auto px-4 py-8 max-w-5xl",
                div {
                    class: "bg-white rounded-xl shadow-2xl p-8 text-center",
                    p {
                        class: "text-gray-600",
                        "No user data available. Please sign in."
                    }
                }
            }
        };
    };

    // Content for the active tab. The restricted tabs collapse to a notice
    // on another user's profile no matter how the tab state got there.
    let tab_content = match *active_tab.read() {
        ProfileTab::Details => rsx! {
            div {
                class: "space-y-6",
                div {
                    h2 {
                        class: "text-xl font-semibold text-gray-800 mb-4",
                        "Personal Details"
                    }
                    div {
                        class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                        DetailCard { title: "Email", value: user.email.clone() }
                        DetailCard {
                            title: "Department",
                            value: user.department.clone().unwrap_or_else(|| "N/A".to_string()),
                        }
                        DetailCard {
                            title: "Manager",
                            value: user.manager.clone().unwrap_or_else(|| "N/A".to_string()),
                        }
                        DetailCard { title: "Location", value: user.location.clone() }
                        DetailCard { title: "Position", value: user.job_title.clone() }
                    }
                    if let Some(description) = user.description.as_ref() {
                        div {
                            class: "mt-4 bg-blue-50 p-4 rounded-lg border border-blue-200",
                            h3 {
                                class: "text-sm font-medium text-blue-900 uppercase mb-2",
                                "Description"
                            }
                            p {
                                class: "text-blue-800",
                                "{description}"
                            }
                        }
                    }
                }

                // The subject's posts
                div {
                    class: "mt-8",
                    h2 {
                        class: "text-xl font-semibold text-gray-800 mb-4",
                        if is_own_profile { "My Posts" } else { "Posts" }
                    }
                    if user_posts.read().is_empty() {
                        div {
                            class: "bg-gray-50 p-6 rounded-lg border border-gray-200 text-center",
                            p {
                                class: "text-gray-500",
                                "Nothing posted yet."
                            }
                        }
                    } else {
                        div {
                            class: "space-y-4",
                            for post in user_posts.read().iter().cloned() {
                                PostCard { key: "{post.id}", post }
                            }
                        }
                    }
                }
            }
        },
        ProfileTab::Activity if !is_own_profile => rsx! {
            RestrictedNotice { message: "You do not have access to this user's activity." }
        },
        ProfileTab::Activity => rsx! {
            div {
                class: "space-y-4",
                h2 {
                    class: "text-xl font-semibold text-gray-800",
                    "Recent Activity"
                }
                ActivityItem { description: "Changed their password.", timestamp: "2 days ago" }
                ActivityItem { description: "Updated their contact details.", timestamp: "2025-10-30" }
            }
        },
        ProfileTab::Edit if !is_own_profile => rsx! {
            RestrictedNotice { message: "You cannot edit another user's profile." }
        },
        ProfileTab::Edit => rsx! {
            div {
                class: "space-y-6 max-w-lg",
                h2 {
                    class: "text-xl font-semibold text-gray-800",
                    "Change Profile Picture"
                }
                div {
                    class: "flex flex-col items-center p-6 bg-white border border-gray-200 rounded-lg shadow-md",

                    img {
                        class: "w-32 h-32 rounded-full border-4 border-indigo-500 object-cover mb-4",
                        src: "{avatar_url}",
                        alt: "Current avatar",
                    }

                    p {
                        class: "text-gray-600 mb-4",
                        if *uploading.read() { "Uploading..." } else { "Upload a new picture (PNG, JPG)." }
                    }

                    if let Some(error) = upload_error.read().as_ref() {
                        p {
                            class: "text-red-500 text-sm mb-2",
                            "{error}"
                        }
                    }

                    input {
                        id: "{file_input_id}",
                        class: "hidden",
                        r#type: "file",
                        accept: "image/png, image/jpeg",
                        onchange: handle_avatar_change,
                        disabled: *uploading.read(),
                    }

                    label {
                        r#for: "{file_input_id}",
                        class: if *uploading.read() {
                            "cursor-pointer px-4 py-2 text-white font-medium rounded-lg transition-colors shadow-lg bg-gray-400"
                        } else {
                            "cursor-pointer px-4 py-2 text-white font-medium rounded-lg transition-colors shadow-lg bg-indigo-600 hover:bg-indigo-700"
                        },
                        if *uploading.read() { "Processing..." } else { "Choose a new image" }
                    }

                    p {
                        class: "text-sm text-gray-400 mt-4",
                        "The picture is stored server-side once the upload completes."
                    }
                }
            }
        },
        ProfileTab::Password if !is_own_profile => rsx! {
            RestrictedNotice { message: "You cannot change another user's password." }
        },
        ProfileTab::Password => rsx! {
            div {
                class: "space-y-6 max-w-lg",
                h2 {
                    class: "text-xl font-semibold text-gray-800",
                    "Change Password"
                }
                div {
                    class: "space-y-4",

                    PasswordField {
                        label: "Current Password",
                        placeholder: "Enter your current password",
                        value: old_password,
                        disabled: *changing_password.read(),
                    }
                    PasswordField {
                        label: "New Password",
                        placeholder: "Enter the new password (min. 6 characters)",
                        value: new_password,
                        disabled: *changing_password.read(),
                    }
                    PasswordField {
                        label: "Confirm New Password",
                        placeholder: "Confirm the new password",
                        value: confirm_password,
                        disabled: *changing_password.read(),
                    }

                    if let Some(error) = password_error.read().as_ref() {
                        div {
                            class: "bg-red-50 border border-red-200 text-red-600 text-sm rounded-md p-3",
                            "{error}"
                        }
                    }

                    if let Some(success) = password_success.read().as_ref() {
                        div {
                            class: "bg-green-50 border border-green-200 text-green-600 text-sm rounded-md p-3",
                            "{success}"
                        }
                    }

                    button {
                        class: if *changing_password.read() {
                            "w-full px-4 py-2 text-white font-medium rounded-lg transition-colors shadow-lg bg-gray-400 cursor-not-allowed"
                        } else {
                            "w-full px-4 py-2 text-white font-medium rounded-lg transition-colors shadow-lg bg-indigo-600 hover:bg-indigo-700"
                        },
                        disabled: *changing_password.read(),
                        onclick: handle_password_submit,
                        if *changing_password.read() { "Changing password..." } else { "Change Password" }
                    }

                    p {
                        class: "text-sm text-gray-500 mt-4",
                        "The new password must have at least 6 characters and differ from the current one."
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "container mx-auto px-4 py-8 max-w-5xl",
            div {
                class: "bg-white rounded-xl shadow-2xl overflow-hidden",

                // Profile header
                div {
                    class: "p-8 bg-gradient-to-r from-blue-500 to-indigo-600 text-white",
                    div {
                        class: "flex flex-col md:flex-row items-center space-x-6",
                        img {
                            class: "w-24 h-24 rounded-full border-4 border-white object-cover shadow-lg",
                            src: "{avatar_url}",
                            alt: "Avatar",
                        }
                        div {
                            h1 {
                                class: "text-3xl font-extrabold",
                                "{user.name}"
                            }
                            p {
                                class: "text-blue-200 text-lg mt-1",
                                "{user.job_title}"
                            }
                        }
                    }
                }

                // Tab row; other profiles only get the details tab
                div {
                    class: "bg-white border-b border-gray-200",
                    div {
                        class: "flex justify-start space-x-4 px-8",
                        TabButton { tab: ProfileTab::Details, active_tab }
                        if is_own_profile {
                            TabButton { tab: ProfileTab::Activity, active_tab }
                            TabButton { tab: ProfileTab::Edit, active_tab }
                            TabButton { tab: ProfileTab::Password, active_tab }
                        }
                    }
                }

                // Active tab content
                div {
                    class: "p-8",
                    {tab_content}
                }
            }
        }
    }
}

/// Pull the selected file out of the hidden input element.
fn selected_file(input_id: &str) -> Option<web_sys::File> {
    let document = web_sys::window()?.document()?;
    let input = document
        .get_element_by_id(input_id)?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    input.files()?.get(0)
}

/// Read a browser File into memory.
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Failed to read file".to_string())?;
    let buffer: ArrayBuffer = buffer
        .dyn_into()
        .map_err(|_| "Not an ArrayBuffer".to_string())?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

#[component]
fn TabButton(tab: ProfileTab, active_tab: Signal<ProfileTab>) -> Element {
    let is_active = *active_tab.read() == tab;
    let mut active_tab = active_tab;

    rsx! {
        button {
            class: if is_active {
                "py-3 px-1 transition-colors duration-200 border-b-2 border-indigo-600 text-indigo-600 font-semibold"
            } else {
                "py-3 px-1 transition-colors duration-200 text-gray-500 hover:text-indigo-600"
            },
            onclick: move |_| active_tab.set(tab),
            "{tab.label()}"
        }
    }
}

#[component]
fn DetailCard(title: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "bg-gray-50 p-4 rounded-lg border border-gray-200",
            h4 {
                class: "text-xs font-medium text-gray-500 uppercase",
                "{title}"
            }
            p {
                class: "text-gray-800 font-medium mt-1",
                "{value}"
            }
        }
    }
}

#[component]
fn ActivityItem(description: &'static str, timestamp: &'static str) -> Element {
    rsx! {
        div {
            class: "flex justify-between items-center p-4 bg-white border border-gray-200 rounded-lg shadow-sm",
            p {
                class: "text-gray-700",
                "{description}"
            }
            span {
                class: "text-sm text-gray-500",
                "{timestamp}"
            }
        }
    }
}

#[component]
fn RestrictedNotice(message: &'static str) -> Element {
    rsx! {
        div {
            class: "space-y-4",
            p {
                class: "text-gray-500",
                "{message}"
            }
        }
    }
}

#[component]
fn PasswordField(
    label: &'static str,
    placeholder: &'static str,
    value: Signal<String>,
    disabled: bool,
) -> Element {
    let mut value = value;

    rsx! {
        div {
            label {
                class: "block text-sm font-medium text-gray-700 mb-2",
                "{label}"
            }
            input {
                class: "w-full px-4 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500 focus:border-transparent",
                r#type: "password",
                value: "{value}",
                placeholder: "{placeholder}",
                disabled: disabled,
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_size_gate_is_inclusive() {
        assert!(validate_avatar_size(2_000_000).is_ok());
        assert!(validate_avatar_size(2_000_001).is_err());
        assert!(validate_avatar_size(0).is_ok());
    }
}
