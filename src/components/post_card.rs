use dioxus::prelude::*;

use crate::routes::Route;
use crate::services::auth_api;
use crate::stores::feed_store::Post;
use crate::utils::avatar;

#[derive(Props, Clone, PartialEq)]
pub struct PostCardProps {
    pub post: Post,
    /// Like-toggle callback; omit it to render the card read-only.
    #[props(default = None)]
    pub on_like: Option<EventHandler<i64>>,
}

#[component]
pub fn PostCard(props: PostCardProps) -> Element {
    let post = props.post;
    let initials = avatar::initials(&post.author);
    let author_route = auth_api::find_user_by_name(&post.author)
        .map(|user| Route::UserProfile { username: user.username });
    let post_id = post.id;

    rsx! {
        div {
            class: "bg-white p-4 rounded-lg border border-gray-200 shadow-sm",

            // Author line
            div {
                class: "flex items-center mb-3",
                if let Some(url) = post.author_avatar_url.as_ref() {
                    img {
                        class: "w-8 h-8 rounded-full object-cover mr-2",
                        src: "{url}",
                        alt: "{post.author}",
                    }
                } else {
                    div {
                        class: "w-8 h-8 bg-indigo-200 rounded-full flex items-center justify-center text-indigo-700 font-bold mr-2 text-sm",
                        "{initials}"
                    }
                }
                div {
                    if let Some(route) = author_route {
                        Link {
                            to: route,
                            class: "text-sm font-semibold text-gray-900 hover:text-indigo-600",
                            "{post.author}"
                        }
                    } else {
                        p {
                            class: "text-sm font-semibold text-gray-900",
                            "{post.author}"
                        }
                    }
                    span {
                        class: "text-xs text-gray-500",
                        "{post.timestamp}"
                    }
                }
            }

            p {
                class: "text-gray-800 mb-3",
                "{post.content}"
            }

            if let Some(url) = post.image_url.as_ref() {
                img {
                    class: "rounded-lg w-full h-auto object-cover max-h-64 mt-2",
                    src: "{url}",
                    alt: "Post media",
                }
            }

            // Counts row
            div {
                class: "flex items-center text-sm text-gray-500 mt-3 pt-3 border-t border-gray-100",
                if let Some(on_like) = props.on_like {
                    button {
                        class: if post.is_liked {
                            "mr-4 text-indigo-600 font-medium"
                        } else {
                            "mr-4 hover:text-indigo-600"
                        },
                        onclick: move |_| on_like.call(post_id),
                        "👍 {post.likes}"
                    }
                } else if post.likes > 0 {
                    span {
                        class: "mr-4",
                        "👍 {post.likes}"
                    }
                }
                if !post.comments.is_empty() {
                    span { "💬 {post.comments.len()}" }
                }
            }
        }
    }
}
