//! TMDB API client module.
//!
//! Builds authenticated requests against the TMDB API v3 endpoints,
//! merges default language / region into the query, and decodes
//! movie, TV series, and season data.

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{ErrorKind, Result, TmdbError};
pub use params::{
    ListParams, QueryDefaults, QueryParams, SearchMovieParams, SearchTvParams, build_url,
};
pub use types::{
    Collection, Creator, Episode, Genre, MovieDetails, MovieSummary, Network, Paginated,
    ProductionCompany, ProductionCountry, SeasonSummary, SpokenLanguage, TvDetails, TvSeason,
    TvSummary,
};
