// First-run example catalog
use crate::types::{ContentItem, ContentType, Country, Genre};

const SAMPLE_BUCKET: &str = "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample";

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    description: &str,
    poster_seed: &str,
    video: &str,
    content_type: ContentType,
    country: Country,
    genre: Genre,
    year: i32,
    is_popular: bool,
    created_at: &str,
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        poster_path: format!("https://picsum.photos/seed/{poster_seed}/300/450"),
        video_path: format!("{SAMPLE_BUCKET}/{video}"),
        content_type,
        country,
        genre,
        year,
        is_popular,
        created_at: created_at.to_string(),
    }
}

/// The six example titles written to an empty store. All share `created_at`.
pub fn seed_catalog(created_at: &str) -> Vec<ContentItem> {
    vec![
        entry(
            "1",
            "Stranger Things",
            "When a young boy vanishes, a small town uncovers a mystery involving secret experiments, terrifying supernatural forces, and one strange little girl.",
            "stranger",
            "BigBuckBunny.mp4",
            ContentType::Series,
            Country::America,
            Genre::SciFi,
            2016,
            true,
            created_at,
        ),
        entry(
            "2",
            "Squid Game",
            "Hundreds of cash-strapped players accept a strange invitation to compete in children's games. Inside, a tempting prize awaits with deadly high stakes.",
            "squid",
            "ElephantsDream.mp4",
            ContentType::Series,
            Country::Korea,
            Genre::Thriller,
            2021,
            true,
            created_at,
        ),
        entry(
            "3",
            "RRR",
            "A fearless warrior on a perilous mission comes face to face with a steely cop serving the British forces in this epic saga set in pre-independent India.",
            "rrr",
            "ForBiggerBlazes.mp4",
            ContentType::Single,
            Country::India,
            Genre::Action,
            2022,
            true,
            created_at,
        ),
        entry(
            "4",
            "Crouching Tiger",
            "A young Chinese warrior steals a sword from a famed swordsman and then escapes into a world of romantic adventure with a mysterious man in the frontier of the nation.",
            "tiger",
            "TearsOfSteel.mp4",
            ContentType::Single,
            Country::China,
            Genre::Action,
            2000,
            false,
            created_at,
        ),
        entry(
            "5",
            "The Office",
            "A mockumentary on a group of typical office workers, where the workday consists of ego clashes, inappropriate behavior, and tedium.",
            "office",
            "BigBuckBunny.mp4",
            ContentType::Series,
            Country::America,
            Genre::Comedy,
            2005,
            true,
            created_at,
        ),
        entry(
            "6",
            "The Protector",
            "Discovering his ties to a secret ancient order, a young man living in modern Istanbul embarks on a quest to save the city from an immortal enemy.",
            "protector",
            "SubaruOutbackOnStreetAndDirt.mp4",
            ContentType::Series,
            Country::Turkey,
            Genre::Action,
            2018,
            true,
            created_at,
        ),
    ]
}
