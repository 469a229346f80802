//! Typed client library for the TMDB (The Movie Database) API.
//!
//! ```no_run
//! use tmdbkit_api::tmdb::{ListParams, LocalTmdbApi, TmdbClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = TmdbClient::builder()
//!     .api_token("token")
//!     .language("en-US")
//!     .build()?;
//! let page = client.popular_movies(&ListParams::new().page(2)).await?;
//! for movie in &page.results {
//!     println!("{} {}", movie.id, movie.title);
//! }
//! client.close().await;
//! # Ok(())
//! # }
//! ```

/// TMDB API client.
pub mod tmdb;
