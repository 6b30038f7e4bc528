use serde::{Deserialize, Serialize};

use crate::types::{ContentItem, ContentType, Country, Genre};

pub const NEW_RELEASES_LIMIT: usize = 10;
pub const HISTORY_LIMIT: usize = 5;

/// Case-insensitive substring match over title, country, genre and content type.
/// The query is used as typed, surrounding spaces included. An empty query matches everything.
pub fn search<'a>(items: &'a [ContentItem], query: &str) -> Vec<&'a ContentItem> {
    let q = query.to_lowercase();
    items
        .iter()
        .filter(|m| {
            q.is_empty()
                || m.title.to_lowercase().contains(&q)
                || m.country.as_str().to_lowercase().contains(&q)
                || m.genre.as_str().to_lowercase().contains(&q)
                || m.content_type.as_str().to_lowercase().contains(&q)
        })
        .collect()
}

pub fn by_type(items: &[ContentItem], kind: ContentType) -> Vec<&ContentItem> {
    items.iter().filter(|m| m.content_type == kind).collect()
}

pub fn by_country(items: &[ContentItem], country: Country) -> Vec<&ContentItem> {
    items.iter().filter(|m| m.country == country).collect()
}

pub fn by_genre(items: &[ContentItem], genre: Genre) -> Vec<&ContentItem> {
    items.iter().filter(|m| m.genre == genre).collect()
}

pub fn popular(items: &[ContentItem]) -> Vec<&ContentItem> {
    items.iter().filter(|m| m.is_popular).collect()
}

/// Browse filters from the client pages. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub content_type: Option<ContentType>,
    pub country: Option<Country>,
    pub genre: Option<Genre>,
    pub popular_only: bool,
}

impl CatalogFilter {
    pub fn apply(&self, items: &[ContentItem]) -> Vec<ContentItem> {
        let mut out = items.to_vec();
        if let Some(kind) = self.content_type { out = by_type(&out, kind).into_iter().cloned().collect(); }
        if let Some(country) = self.country { out = by_country(&out, country).into_iter().cloned().collect(); }
        if let Some(genre) = self.genre { out = by_genre(&out, genre).into_iter().cloned().collect(); }
        if self.popular_only { out = popular(&out).into_iter().cloned().collect(); }
        out
    }
}

/// Newest year first; ties keep storage order.
pub fn new_releases(items: &[ContentItem], limit: usize) -> Vec<&ContentItem> {
    let mut out: Vec<&ContentItem> = items.iter().collect();
    out.sort_by(|a, b| b.year.cmp(&a.year));
    out.truncate(limit);
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total: usize,
    pub series: usize,
    pub singles: usize,
    pub popular: usize,
    /// Non-zero counts in enumeration order.
    pub by_country: Vec<(Country, usize)>,
    pub by_genre: Vec<(Genre, usize)>,
}

pub fn stats(items: &[ContentItem]) -> CatalogStats {
    let series = items.iter().filter(|m| m.content_type == ContentType::Series).count();
    let by_country = Country::ALL
        .iter()
        .map(|c| (*c, items.iter().filter(|m| m.country == *c).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let by_genre = Genre::ALL
        .iter()
        .map(|g| (*g, items.iter().filter(|m| m.genre == *g).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    CatalogStats {
        total: items.len(),
        series,
        singles: items.len() - series,
        popular: items.iter().filter(|m| m.is_popular).count(),
        by_country,
        by_genre,
    }
}

/// Recently played titles, newest first, unique by id.
#[derive(Debug, Clone)]
pub struct WatchHistory {
    items: Vec<ContentItem>,
    cap: usize,
}

impl Default for WatchHistory {
    fn default() -> Self { Self::with_capacity(HISTORY_LIMIT) }
}

impl WatchHistory {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(cap: usize) -> Self { Self { items: Vec::with_capacity(cap), cap } }

    pub fn record(&mut self, item: &ContentItem) {
        self.items.retain(|m| m.id != item.id);
        self.items.insert(0, item.clone());
        self.items.truncate(self.cap);
    }

    pub fn items(&self) -> &[ContentItem] { &self.items }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed_catalog;

    fn titles(v: &[&ContentItem]) -> Vec<String> { v.iter().map(|m| m.title.clone()).collect() }

    #[test]
    fn search_matches_any_text_field() {
        let items = seed_catalog("t");
        assert_eq!(titles(&search(&items, "squid")), vec!["Squid Game"]);
        assert_eq!(titles(&search(&items, "KOREA")), vec!["Squid Game"]);
        assert_eq!(search(&items, "sci-fi").len(), 1);
        assert_eq!(search(&items, "single").len(), 2);
        assert_eq!(search(&items, "").len(), 6);
        assert!(search(&items, "zzz").is_empty());
    }

    #[test]
    fn search_keeps_whitespace_in_the_query() {
        let items = seed_catalog("t");
        assert!(search(&items, "  ").is_empty());
        assert_eq!(titles(&search(&items, " game")), vec!["Squid Game"]);
        assert!(search(&items, " squid").is_empty());
    }

    #[test]
    fn filters_preserve_order() {
        let items = seed_catalog("t");
        assert_eq!(titles(&by_country(&items, Country::America)), vec!["Stranger Things", "The Office"]);
        assert_eq!(by_genre(&items, Genre::Action).len(), 3);
        assert_eq!(by_type(&items, ContentType::Single).len(), 2);
        assert_eq!(popular(&items).len(), 5);
        assert!(by_genre(&items, Genre::Romance).is_empty());
    }

    #[test]
    fn filters_combine() {
        let items = seed_catalog("t");
        assert_eq!(CatalogFilter::default().apply(&items).len(), 6);
        let f = CatalogFilter { content_type: Some(ContentType::Series), genre: Some(Genre::Action), ..Default::default() };
        let ids: Vec<String> = f.apply(&items).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["6"]);
        let f = CatalogFilter { country: Some(Country::China), popular_only: true, ..Default::default() };
        assert!(f.apply(&items).is_empty());
    }

    #[test]
    fn new_releases_sorted_by_year() {
        let items = seed_catalog("t");
        let top = new_releases(&items, 3);
        assert_eq!(titles(&top), vec!["RRR", "Squid Game", "The Protector"]);
        assert_eq!(new_releases(&items, NEW_RELEASES_LIMIT).len(), 6);
    }

    #[test]
    fn stats_count_seed() {
        let s = stats(&seed_catalog("t"));
        assert_eq!(s.total, 6);
        assert_eq!(s.series, 4);
        assert_eq!(s.singles, 2);
        assert_eq!(s.popular, 5);
        assert_eq!(s.by_country.len(), 5);
        assert_eq!(s.by_country[2], (Country::America, 2));
        assert_eq!(s.by_genre, vec![(Genre::Action, 3), (Genre::Comedy, 1), (Genre::SciFi, 1), (Genre::Thriller, 1)]);
        assert_eq!(stats(&[]), CatalogStats::default());
    }

    #[test]
    fn history_is_unique_and_capped() {
        let items = seed_catalog("t");
        let mut h = WatchHistory::new();
        for m in &items { h.record(m); }
        h.record(&items[2]);
        let ids: Vec<&str> = h.items().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "6", "5", "4", "2"]);
    }
}
