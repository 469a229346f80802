//! TMDB API response types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a TMDB date that may be `null`, `""`, or `YYYY-MM-DD`.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// --- Pagination ---

/// Paginated list envelope shared by every list endpoint.
///
/// Pages are 1-based. `results` keeps the order the server returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Current page number.
    pub page: u32,
    /// Items on this page.
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl<T> Paginated<T> {
    /// Returns `true` if a later page exists.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Movies ---

/// Movie entry returned by list and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Release date.
    #[serde(default, deserialize_with = "optional_date")]
    pub release_date: Option<NaiveDate>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// IMDb ID (e.g. `tt0137523`).
    pub imdb_id: Option<String>,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release status (e.g. "Released").
    pub status: Option<String>,
    /// Release date.
    #[serde(default, deserialize_with = "optional_date")]
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Budget in USD.
    #[serde(default)]
    pub budget: u64,
    /// Revenue in USD.
    #[serde(default)]
    pub revenue: u64,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Collection this movie belongs to.
    pub belongs_to_collection: Option<Collection>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    /// Production countries.
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    /// Spoken languages.
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Collection reference within movie details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: u64,
    /// Collection name.
    pub name: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Production company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1, may be empty).
    #[serde(default)]
    pub origin_country: String,
}

/// Production country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

/// Spoken language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    /// ISO 639-1 code.
    pub iso_639_1: String,
    /// English name.
    #[serde(default)]
    pub english_name: String,
    /// Native name.
    pub name: String,
}

// --- TV ---

/// TV series entry returned by list and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvSummary {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    pub original_name: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// First air date.
    #[serde(default, deserialize_with = "optional_date")]
    pub first_air_date: Option<NaiveDate>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Response from `tv/{series_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    pub original_name: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Tagline.
    pub tagline: Option<String>,
    /// Status (e.g., "Returning Series", "Ended").
    pub status: Option<String>,
    /// Series type (e.g., "Scripted").
    #[serde(rename = "type")]
    pub series_type: Option<String>,
    /// First air date.
    #[serde(default, deserialize_with = "optional_date")]
    pub first_air_date: Option<NaiveDate>,
    /// Last air date.
    #[serde(default, deserialize_with = "optional_date")]
    pub last_air_date: Option<NaiveDate>,
    /// Whether the show is still in production.
    #[serde(default)]
    pub in_production: bool,
    /// Total number of episodes.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// Total number of seasons.
    #[serde(default)]
    pub number_of_seasons: u32,
    /// Typical episode runtimes in minutes.
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Creators.
    #[serde(default)]
    pub created_by: Vec<Creator>,
    /// Broadcasting networks.
    #[serde(default)]
    pub networks: Vec<Network>,
    /// Season summaries.
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Series creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Person ID.
    pub id: u64,
    /// Credit ID.
    pub credit_id: Option<String>,
    /// Name.
    pub name: String,
    /// Profile image path.
    pub profile_path: Option<String>,
}

/// Broadcasting network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Network ID.
    pub id: u64,
    /// Network name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1, may be empty).
    #[serde(default)]
    pub origin_country: String,
}

/// Season summary within TV details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    /// TMDB season ID.
    pub id: u64,
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Number of episodes in this season.
    #[serde(default)]
    pub episode_count: u32,
    /// Air date of this season.
    #[serde(default, deserialize_with = "optional_date")]
    pub air_date: Option<NaiveDate>,
    /// Season name.
    pub name: String,
    /// Season overview.
    #[serde(default)]
    pub overview: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
}

// --- TV Season Details ---

/// Response from `tv/{series_id}/season/{season_number}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvSeason {
    /// Internal `MongoDB` ID.
    #[serde(rename = "_id", default)]
    pub internal_id: Option<String>,
    /// TMDB season ID.
    pub id: u64,
    /// Season number.
    pub season_number: u32,
    /// Season name.
    pub name: Option<String>,
    /// Season overview.
    #[serde(default)]
    pub overview: String,
    /// Air date.
    #[serde(default, deserialize_with = "optional_date")]
    pub air_date: Option<NaiveDate>,
    /// Episodes in this season.
    #[serde(default)]
    pub episodes: Vec<Episode>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
}

/// A single episode within a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// TMDB episode ID.
    pub id: u64,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Season number.
    pub season_number: u32,
    /// Episode name.
    pub name: String,
    /// Episode overview.
    #[serde(default)]
    pub overview: String,
    /// Air date.
    #[serde(default, deserialize_with = "optional_date")]
    pub air_date: Option<NaiveDate>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Parent show ID.
    pub show_id: Option<u64>,
    /// Episode type (e.g., "standard", "finale").
    pub episode_type: Option<String>,
    /// Still image path.
    pub still_path: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
}

// --- Error Response ---

/// Error body TMDB sends with non-200 responses.
///
/// Only `status_message` is read. Other fields (`status_code`, `success`)
/// are ignored whatever their JSON type.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    /// Error message.
    pub status_message: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_empty_date_decodes_to_none() {
        // Arrange
        let json = r#"{"id":1,"title":"A","original_title":"A","original_language":"en",
            "release_date":"","popularity":1.0,"vote_average":0.0,"vote_count":0,
            "poster_path":null,"backdrop_path":null}"#;

        // Act
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.release_date.is_none());
        assert!(movie.overview.is_empty());
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        // Arrange
        let json = r#"{"id":1,"title":"A","original_title":"A","original_language":"en",
            "release_date":"sometime","popularity":1.0,"vote_average":0.0,"vote_count":0,
            "poster_path":null,"backdrop_path":null}"#;

        // Act
        let result = serde_json::from_str::<MovieSummary>(json);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // Arrange
        let json = r#"{"id":1,"original_title":"A","original_language":"en",
            "popularity":1.0,"vote_average":0.0,"vote_count":0}"#;

        // Act
        let result = serde_json::from_str::<MovieSummary>(json);

        // Assert
        assert!(result.unwrap_err().to_string().contains("title"));
    }

    #[test]
    fn test_paginated_round_trip_preserves_fields_and_order() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        // Act
        let decoded: Paginated<MovieSummary> = serde_json::from_str(json).unwrap();
        let encoded = serde_json::to_string(&decoded).unwrap();
        let again: Paginated<MovieSummary> = serde_json::from_str(&encoded).unwrap();

        // Assert
        assert_eq!(again, decoded);
        assert_eq!(again.page, 1);
        assert_eq!(again.total_pages, 5);
        assert_eq!(again.total_results, 100);
        let titles: Vec<&str> = again.results.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles[0], "Fight Club");
        assert_eq!(titles.len(), 2);
        assert_eq!(
            again.results[0].release_date,
            NaiveDate::from_ymd_opt(1999, 10, 15)
        );
        assert!(again.results[1].release_date.is_none());
    }

    #[test]
    fn test_has_next_page() {
        // Arrange
        let first: Paginated<Genre> = Paginated {
            page: 1,
            results: Vec::new(),
            total_pages: 2,
            total_results: 25,
        };
        let last = Paginated {
            page: 2,
            ..first.clone()
        };

        // Act & Assert
        assert!(first.has_next_page());
        assert!(!last.has_next_page());
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_details_550.json");

        // Act
        let details: MovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 550);
        assert_eq!(details.title, "Fight Club");
        assert_eq!(details.release_date, NaiveDate::from_ymd_opt(1999, 10, 15));
        assert_eq!(details.runtime, Some(139));
        assert_eq!(details.genres[0].name, "Drama");
        assert_eq!(details.production_countries[0].iso_3166_1, "US");
    }

    #[test]
    fn test_parse_tv_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_details_1399.json");

        // Act
        let details: TvDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 1399);
        assert_eq!(details.name, "Game of Thrones");
        assert_eq!(details.series_type.as_deref(), Some("Scripted"));
        assert_eq!(details.number_of_seasons, 8);
        assert_eq!(details.seasons[0].season_number, 0);
        assert!(details.seasons[0].air_date.is_none());
        assert_eq!(details.networks[0].name, "HBO");
    }

    #[test]
    fn test_parse_tv_season_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_season_1399_1.json");

        // Act
        let season: TvSeason = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(season.season_number, 1);
        assert_eq!(season.episodes.len(), 2);
        let first_ep = &season.episodes[0];
        assert_eq!(first_ep.episode_number, 1);
        assert_eq!(first_ep.name, "Winter Is Coming");
        assert_eq!(first_ep.air_date, NaiveDate::from_ymd_opt(2011, 4, 17));
    }

    #[test]
    fn test_parse_error_body_without_message() {
        // Arrange & Act
        let body: ErrorBody = serde_json::from_str(r#"{"success":false}"#).unwrap();

        // Assert
        assert!(body.status_message.is_none());
    }

    #[test]
    fn test_parse_error_body_ignores_string_status_code() {
        // Arrange & Act
        let body: ErrorBody =
            serde_json::from_str(r#"{"status_code":"7","status_message":"Invalid API key"}"#)
                .unwrap();

        // Assert
        assert_eq!(body.status_message.as_deref(), Some("Invalid API key"));
    }
}
