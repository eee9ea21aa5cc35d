use dioxus::prelude::*;

use crate::components::PostCard;
use crate::stores::feed_store::Post;
use crate::stores::{auth_store, feed_store};
use crate::utils::avatar;

/// The main feed: the composer that owns the write path to the shared
/// post slot, plus the merged seed+persisted list.
#[component]
pub fn Feed() -> Element {
    let mut posts = use_signal(|| Vec::<Post>::new());
    let mut draft = use_signal(|| String::new());

    let reload = move || {
        posts.set(feed_store::recent_first(&feed_store::load_all()));
    };

    // Initial load
    use_effect(move || {
        let mut reload = reload;
        reload();
    });

    // Stay fresh on writes from this tab and from other tabs alike
    let mut feed_subscription = use_signal(|| None::<feed_store::FeedSubscription>);
    use_effect(move || {
        if feed_subscription.peek().is_some() {
            return;
        }
        feed_subscription.set(feed_store::subscribe(reload));
    });
    use_drop(move || {
        feed_subscription.write().take();
    });

    let can_post = !draft.read().trim().is_empty();

    let handle_post = move |_| {
        let content = draft.read().trim().to_string();
        if content.is_empty() {
            return;
        }
        let Some(user) = auth_store::current_user() else {
            return;
        };

        let post = Post {
            id: feed_store::next_id(&feed_store::load_all()),
            author: user.name.clone(),
            content,
            timestamp: "just now".to_string(),
            image_url: None,
            author_avatar_url: Some(avatar::placeholder_avatar_url(&user.name)),
            likes: 0,
            is_liked: false,
            comments: Vec::new(),
        };

        // publish_post notifies the bus; our own subscription reloads the
        // list along with every other open view
        match feed_store::publish_post(post) {
            Ok(_) => draft.set(String::new()),
            Err(e) => log::error!("Failed to publish post: {}", e),
        }
    };

    let handle_like = move |id: i64| {
        if let Err(e) = feed_store::toggle_like(id) {
            log::error!("Failed to toggle like: {}", e);
        }
    };

    rsx! {
        div {
            class: "container mx-auto px-4 py-8 max-w-2xl",

            // Composer
            div {
                class: "bg-white rounded-xl shadow p-4 mb-6",
                textarea {
                    class: "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500 resize-none",
                    rows: "3",
                    placeholder: "Share something with the team...",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                div {
                    class: "flex justify-end mt-2",
                    button {
                        class: "px-6 py-2 text-sm font-bold text-white bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-400 disabled:cursor-not-allowed rounded-lg transition",
                        disabled: !can_post,
                        onclick: handle_post,
                        "Post"
                    }
                }
            }

            // Merged feed, newest first
            div {
                class: "space-y-4",
                for post in posts.read().iter().cloned() {
                    PostCard {
                        key: "{post.id}",
                        post,
                        on_like: handle_like,
                    }
                }
            }
        }
    }
}
