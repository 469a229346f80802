//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::params::{ListParams, SearchMovieParams, SearchTvParams};
use super::types::{MovieDetails, MovieSummary, Paginated, TvDetails, TvSeason, TvSummary};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
/// [`super::TmdbClient`] implements `TmdbApi`; the blanket impl covers
/// `LocalTmdbApi`.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Lists popular movies (`movie/popular`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn popular_movies(&self, params: &ListParams) -> Result<Paginated<MovieSummary>>;

    /// Lists top-rated movies (`movie/top_rated`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn top_rated_movies(&self, params: &ListParams) -> Result<Paginated<MovieSummary>>;

    /// Searches for movies (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn search_movies(&self, params: &SearchMovieParams) -> Result<Paginated<MovieSummary>>;

    /// Fetches movie details (`movie/{movie_id}`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn movie_details(&self, movie_id: u64, language: Option<&str>) -> Result<MovieDetails>;

    /// Lists popular TV series (`tv/popular`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn popular_tv(&self, params: &ListParams) -> Result<Paginated<TvSummary>>;

    /// Lists top-rated TV series (`tv/top_rated`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn top_rated_tv(&self, params: &ListParams) -> Result<Paginated<TvSummary>>;

    /// Searches for TV series (`search/tv`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn search_tv(&self, params: &SearchTvParams) -> Result<Paginated<TvSummary>>;

    /// Fetches TV series details including season list (`tv/{series_id}`).
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn tv_details(&self, series_id: u64, language: Option<&str>) -> Result<TvDetails>;

    /// Fetches TV season details including episode list.
    ///
    /// # Errors
    ///
    /// Returns a [`super::TmdbError`] if the request, status, or decode fails.
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: Option<&str>,
    ) -> Result<TvSeason>;
}
