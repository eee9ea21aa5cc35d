//! Feed Store - shared post list persisted in LocalStorage
//!
//! The `feedPosts` slot is shared by every open view (and every open tab)
//! of the app. This store reads the slot, merges it with the fixed seed
//! posts, and exposes a subscription over the two change channels:
//! cross-tab `storage` events and the same-context `feedPostsUpdated`
//! custom event fired after each local write.

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::utils::avatar;

const STORAGE_KEY_POSTS: &str = "feedPosts";

/// Custom event fired on `window` after a same-context write to the slot.
/// Browsers only deliver `storage` events to *other* tabs, so local views
/// rely on this one.
pub const FEED_UPDATED_EVENT: &str = "feedPostsUpdated";

/// A feed post, as persisted by the composer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    /// Display name of the author. Posts are joined to users by this name,
    /// not by a stable identifier.
    pub author: String,
    pub content: String,
    /// Opaque display string ("5m ago"), never parsed back
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar_url: Option<String>,
    pub likes: u32,
    pub is_liked: bool,
    /// Comment payloads are owned by the feed feature; this store carries
    /// them through unchanged.
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
}

/// The fixed baseline posts that exist regardless of persisted state.
pub fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            author: "Andrei Guinea".to_string(),
            content: "Shipped the Q3 reporting dashboard. Feedback welcome!".to_string(),
            timestamp: "5m ago".to_string(),
            image_url: None,
            author_avatar_url: Some("https://picsum.photos/50/50?random=10".to_string()),
            likes: 5,
            is_liked: false,
            comments: Vec::new(),
        },
        Post {
            id: 2,
            author: "Delia Farcas".to_string(),
            content: "Today's React Native training session went great! See you next week for part two.".to_string(),
            timestamp: "1h ago".to_string(),
            image_url: None,
            author_avatar_url: Some(avatar::placeholder_avatar_url("U")),
            likes: 12,
            is_liked: true,
            comments: Vec::new(),
        },
    ]
}

/// Posts currently persisted in the slot. A corrupt slot is logged and
/// treated as empty, never surfaced to callers.
fn stored_posts() -> Vec<Post> {
    match LocalStorage::get::<Vec<Post>>(STORAGE_KEY_POSTS) {
        Ok(posts) => posts,
        Err(StorageError::KeyNotFound(_)) => Vec::new(),
        Err(e) => {
            log::error!("Failed to parse stored posts: {}", e);
            Vec::new()
        }
    }
}

/// Seed posts always precede persisted ones, so a persisted post that
/// collides with a seed id loses the dedup pass downstream.
pub fn merge_with_seeds(stored: Vec<Post>) -> Vec<Post> {
    let mut all = seed_posts();
    all.extend(stored);
    all
}

/// The full combined post list: seeds followed by the persisted slot.
pub fn load_all() -> Vec<Post> {
    merge_with_seeds(stored_posts())
}

/// Project the posts authored by `name`: exact display-name match, first
/// occurrence wins on duplicate ids, then newest (highest id) first.
pub fn posts_by_author(posts: &[Post], name: &str) -> Vec<Post> {
    let mut seen = HashSet::new();
    let mut own: Vec<Post> = posts
        .iter()
        .filter(|post| post.author == name)
        .filter(|post| seen.insert(post.id))
        .cloned()
        .collect();
    own.sort_by(|a, b| b.id.cmp(&a.id));
    own
}

/// All posts, newest first, duplicates removed. Used by the main feed.
pub fn recent_first(posts: &[Post]) -> Vec<Post> {
    let mut seen = HashSet::new();
    let mut all: Vec<Post> = posts
        .iter()
        .filter(|post| seen.insert(post.id))
        .cloned()
        .collect();
    all.sort_by(|a, b| b.id.cmp(&a.id));
    all
}

/// Next free post id, above everything in the merged set so new posts sort
/// first under the id-descending order.
pub fn next_id(posts: &[Post]) -> i64 {
    posts.iter().map(|post| post.id).max().unwrap_or(0) + 1
}

/// Append a post to the persisted slot and notify same-context listeners.
pub fn publish_post(post: Post) -> Result<(), String> {
    let mut stored = stored_posts();
    stored.push(post);
    LocalStorage::set(STORAGE_KEY_POSTS, &stored)
        .map_err(|e| format!("Failed to persist posts: {}", e))?;
    notify_feed_updated();
    Ok(())
}

/// Toggle the viewer's like on a persisted post. Seed posts are fixed data
/// and cannot be rewritten; toggling one is a no-op.
pub fn toggle_like(id: i64) -> Result<(), String> {
    let mut stored = stored_posts();
    let Some(post) = stored.iter_mut().find(|post| post.id == id) else {
        log::debug!("Ignoring like toggle for non-persisted post {}", id);
        return Ok(());
    };

    if post.is_liked {
        post.is_liked = false;
        post.likes = post.likes.saturating_sub(1);
    } else {
        post.is_liked = true;
        post.likes += 1;
    }

    LocalStorage::set(STORAGE_KEY_POSTS, &stored)
        .map_err(|e| format!("Failed to persist posts: {}", e))?;
    notify_feed_updated();
    Ok(())
}

/// Fire the same-context change signal after a write to the slot.
pub fn notify_feed_updated() {
    let Some(window) = web_sys::window() else {
        return;
    };
    match web_sys::CustomEvent::new(FEED_UPDATED_EVENT) {
        Ok(event) => {
            if let Err(e) = window.dispatch_event(&event) {
                log::warn!("Failed to dispatch {}: {:?}", FEED_UPDATED_EVENT, e);
            }
        }
        Err(e) => log::warn!("Failed to create {}: {:?}", FEED_UPDATED_EVENT, e),
    }
}

/// Active registration on both change channels. Dropping it detaches the
/// two listeners together, so a dead view cannot leak handlers.
pub struct FeedSubscription {
    storage: Closure<dyn FnMut(web_sys::StorageEvent)>,
    local: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window
                .remove_event_listener_with_callback(
                    "storage",
                    self.storage.as_ref().unchecked_ref(),
                )
                .ok();
            window
                .remove_event_listener_with_callback(
                    FEED_UPDATED_EVENT,
                    self.local.as_ref().unchecked_ref(),
                )
                .ok();
        }
    }
}

/// Invoke `handler` whenever the post slot changes, whether the write came
/// from another tab (`storage` event, filtered to the post slot's key) or
/// from this one (custom event). Delivery is level-triggered: handlers are
/// expected to reload the full list, so redundant or unordered deliveries
/// are harmless.
pub fn subscribe<F>(handler: F) -> Option<FeedSubscription>
where
    F: FnMut() + 'static,
{
    let window = web_sys::window()?;
    let handler = Rc::new(RefCell::new(handler));

    let storage_handler = handler.clone();
    let storage = Closure::wrap(Box::new(move |event: web_sys::StorageEvent| {
        // Storage events fire for every slot another tab touches
        if event.key().as_deref() == Some(STORAGE_KEY_POSTS) {
            (storage_handler.borrow_mut())();
        }
    }) as Box<dyn FnMut(web_sys::StorageEvent)>);

    let local_handler = handler.clone();
    let local = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        (local_handler.borrow_mut())();
    }) as Box<dyn FnMut(web_sys::Event)>);

    if let Err(e) =
        window.add_event_listener_with_callback("storage", storage.as_ref().unchecked_ref())
    {
        log::error!("Failed to attach storage listener: {:?}", e);
        return None;
    }
    if let Err(e) =
        window.add_event_listener_with_callback(FEED_UPDATED_EVENT, local.as_ref().unchecked_ref())
    {
        log::error!("Failed to attach {} listener: {:?}", FEED_UPDATED_EVENT, e);
        window
            .remove_event_listener_with_callback("storage", storage.as_ref().unchecked_ref())
            .ok();
        return None;
    }

    Some(FeedSubscription { storage, local })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, author: &str) -> Post {
        Post {
            id,
            author: author.to_string(),
            content: format!("post {}", id),
            timestamp: "just now".to_string(),
            image_url: None,
            author_avatar_url: None,
            likes: 0,
            is_liked: false,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_projection_filters_by_exact_author_name() {
        let posts = vec![post(1, "A"), post(2, "B"), post(3, "a")];
        let projected = posts_by_author(&posts, "A");
        assert_eq!(projected.len(), 1);
        assert!(projected.iter().all(|p| p.author == "A"));
    }

    #[test]
    fn test_projection_has_no_duplicate_ids() {
        let posts = vec![post(1, "A"), post(1, "A"), post(2, "A"), post(1, "A")];
        let projected = posts_by_author(&posts, "A");
        let mut ids: Vec<i64> = projected.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), projected.len());
    }

    #[test]
    fn test_projection_sorts_by_id_descending() {
        let posts = vec![post(3, "A"), post(7, "A"), post(5, "A")];
        let projected = posts_by_author(&posts, "A");
        let ids: Vec<i64> = projected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 5, 3]);
    }

    #[test]
    fn test_seed_wins_on_id_collision() {
        let seed_author = seed_posts()[0].author.clone();
        let mut colliding = post(1, &seed_author);
        colliding.content = "impostor".to_string();

        let all = merge_with_seeds(vec![colliding]);
        let projected = posts_by_author(&all, &seed_author);

        let kept = projected.iter().find(|p| p.id == 1).unwrap();
        assert_eq!(kept.content, seed_posts()[0].content);
    }

    #[test]
    fn test_projection_example_ordering() {
        // persisted [{1,A},{2,B}] behind seed [{2,B},{3,A}] projects for A
        // as [3, 1]
        let all = vec![post(2, "B"), post(3, "A"), post(1, "A"), post(2, "B")];
        let projected = posts_by_author(&all, "A");
        let ids: Vec<i64> = projected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_next_id_allocates_above_merged_max() {
        let all = merge_with_seeds(vec![post(9, "A")]);
        assert_eq!(next_id(&all), 10);
        assert_eq!(next_id(&merge_with_seeds(Vec::new())), 3);
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn test_recent_first_dedupes_and_sorts() {
        let posts = vec![post(2, "A"), post(5, "B"), post(2, "C")];
        let ordered = recent_first(&posts);
        let ids: Vec<i64> = ordered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 2]);
        // first occurrence kept
        assert_eq!(ordered[1].author, "A");
    }

    #[test]
    fn test_post_round_trips_with_wire_field_names() {
        let raw = r#"[{
            "id": 4,
            "author": "Delia Farcas",
            "content": "hello",
            "timestamp": "just now",
            "authorAvatarUrl": "https://example.com/a.png",
            "likes": 1,
            "isLiked": true,
            "comments": [{"text": "hi"}]
        }]"#;
        let posts: Vec<Post> = serde_json::from_str(raw).unwrap();
        assert_eq!(posts[0].author_avatar_url.as_deref(), Some("https://example.com/a.png"));
        assert!(posts[0].is_liked);
        assert_eq!(posts[0].comments.len(), 1);

        let encoded = serde_json::to_string(&posts).unwrap();
        assert!(encoded.contains("\"isLiked\":true"));
        assert!(encoded.contains("\"authorAvatarUrl\""));
        // absent image stays absent instead of serializing null
        assert!(!encoded.contains("imageUrl"));
    }
}
