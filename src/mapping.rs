use chrono::{SecondsFormat, Utc};

use crate::types::{ContentItem, ContentPatch, NewContent};

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn item_from_new(id: String, created_at: String, n: NewContent) -> ContentItem {
    ContentItem {
        id,
        title: n.title,
        description: n.description,
        poster_path: n.poster_path,
        video_path: n.video_path,
        content_type: n.content_type,
        country: n.country,
        genre: n.genre,
        year: n.year,
        is_popular: n.is_popular,
        created_at,
    }
}

/// Shallow merge: present patch fields overwrite, `id` and `created_at` are never touched.
pub fn apply_patch(item: &mut ContentItem, patch: ContentPatch) {
    let ContentPatch { title, description, poster_path, video_path, content_type, country, genre, year, is_popular } = patch;
    if let Some(v) = title { item.title = v; }
    if let Some(v) = description { item.description = v; }
    if let Some(v) = poster_path { item.poster_path = v; }
    if let Some(v) = video_path { item.video_path = v; }
    if let Some(v) = content_type { item.content_type = v; }
    if let Some(v) = country { item.country = v; }
    if let Some(v) = genre { item.genre = v; }
    if let Some(v) = year { item.year = v; }
    if let Some(v) = is_popular { item.is_popular = v; }
}

/// The caller-visible fields of an item, for comparing against what was submitted.
pub fn content_of(item: &ContentItem) -> NewContent {
    NewContent {
        title: item.title.clone(),
        description: item.description.clone(),
        poster_path: item.poster_path.clone(),
        video_path: item.video_path.clone(),
        content_type: item.content_type,
        country: item.country,
        genre: item.genre,
        year: item.year,
        is_popular: item.is_popular,
    }
}
