use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Single,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    India,
    Korea,
    America,
    China,
    Turkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Horror,
    Romance,
    Documentary,
    Thriller,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Single, ContentType::Series];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Single => "Single",
            ContentType::Series => "Series",
        }
    }
}

impl Country {
    pub const ALL: [Country; 5] = [Country::India, Country::Korea, Country::America, Country::China, Country::Turkey];

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::India => "India",
            Country::Korea => "Korea",
            Country::America => "America",
            Country::China => "China",
            Country::Turkey => "Turkey",
        }
    }
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::SciFi,
        Genre::Horror,
        Genre::Romance,
        Genre::Documentary,
        Genre::Thriller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::SciFi => "Sci-Fi",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::Documentary => "Documentary",
            Genre::Thriller => "Thriller",
        }
    }
}

// Display and FromStr share the wire names; parsing ignores ASCII case so the CLI can take `sci-fi`.
macro_rules! wire_name_impls {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.as_str()) }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownVariant { kind: $kind, value: s.to_string() })
            }
        }
    };
}

wire_name_impls!(ContentType, "content type");
wire_name_impls!(Country, "country");
wire_name_impls!(Genre, "genre");

/// A catalog entry as stored in the collection slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub poster_path: String,
    pub video_path: String,
    pub content_type: ContentType,
    pub country: Country,
    pub genre: Genre,
    pub year: i32,
    pub is_popular: bool,
    pub created_at: String,
}

/// Caller-supplied fields for `create`; the store assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub poster_path: String,
    pub video_path: String,
    pub content_type: ContentType,
    pub country: Country,
    pub genre: Genre,
    pub year: i32,
    pub is_popular: bool,
}

/// Partial update. Present fields overwrite, absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool { *self == ContentPatch::default() }
}

impl From<NewContent> for ContentPatch {
    fn from(n: NewContent) -> Self {
        ContentPatch {
            title: Some(n.title),
            description: Some(n.description),
            poster_path: Some(n.poster_path),
            video_path: Some(n.video_path),
            content_type: Some(n.content_type),
            country: Some(n.country),
            genre: Some(n.genre),
            year: Some(n.year),
            is_popular: Some(n.is_popular),
        }
    }
}

/// The logged-in user record kept in the session slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_uses_hyphenated_wire_name() {
        assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"Sci-Fi\"");
        assert_eq!(serde_json::from_str::<Genre>("\"Sci-Fi\"").unwrap(), Genre::SciFi);
        assert_eq!("sci-fi".parse::<Genre>().unwrap(), Genre::SciFi);
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert!(serde_json::from_str::<Country>("\"France\"").is_err());
        assert!(serde_json::from_str::<ContentType>("\"series\"").is_err());
        let err = "Bollywood".parse::<Genre>().unwrap_err();
        assert_eq!(err.to_string(), "unknown genre: Bollywood");
    }

    #[test]
    fn item_serializes_camel_case() {
        let item = ContentItem {
            id: "1".into(),
            title: "RRR".into(),
            description: String::new(),
            poster_path: "p".into(),
            video_path: "v".into(),
            content_type: ContentType::Single,
            country: Country::India,
            genre: Genre::Action,
            year: 2022,
            is_popular: true,
            created_at: "2024-01-01T00:00:00.000Z".into(),
        };
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["posterPath"], "p");
        assert_eq!(v["contentType"], "Single");
        assert_eq!(v["isPopular"], true);
        assert_eq!(v["createdAt"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn patch_omits_absent_fields() {
        let patch = ContentPatch { year: Some(1999), ..Default::default() };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"year":1999}"#);
        let parsed: ContentPatch = serde_json::from_str(r#"{"isPopular":false}"#).unwrap();
        assert_eq!(parsed.is_popular, Some(false));
        assert!(parsed.title.is_none());
        assert!(ContentPatch::default().is_empty());
    }
}
