//! TMDB API request parameter types and query-string construction.

use url::Url;

/// Query key for the response language.
const LANGUAGE: &str = "language";

/// Query key for the region filter.
const REGION: &str = "region";

/// Client-wide defaults merged into every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDefaults {
    /// Default response language (e.g. "en-US").
    pub language: Option<String>,
    /// Default region (ISO 3166-1).
    pub region: Option<String>,
}

/// Caller-supplied query parameters, in insertion order.
///
/// A key that was never set is "not supplied". A key set to an empty
/// string counts as supplied (it suppresses the default for that key)
/// but is never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets a string parameter. `None` leaves the key unset.
    #[must_use]
    pub fn string(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.insert(key, String::from(v)),
            None => self,
        }
    }

    /// Sets a numeric parameter. `None` leaves the key unset.
    #[must_use]
    pub fn number(self, key: &'static str, value: Option<u32>) -> Self {
        match value {
            Some(v) => self.insert(key, v.to_string()),
            None => self,
        }
    }

    /// Sets a boolean parameter (`true` / `false`).
    #[must_use]
    pub fn flag(self, key: &'static str, value: bool) -> Self {
        self.insert(key, value.to_string())
    }

    /// Returns `true` if the caller set `key`, even to an empty string.
    #[must_use]
    pub fn supplies(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Inserts or replaces a value, keeping the original position.
    fn insert(mut self, key: &'static str, value: String) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
        self
    }

    /// Merges client defaults with the caller parameters.
    ///
    /// Defaults for `language` and `region` come first and apply only when
    /// the caller did not supply that key. Caller values follow; empty
    /// strings are dropped.
    #[must_use]
    pub fn merge(&self, defaults: &QueryDefaults) -> Vec<(&'static str, String)> {
        let mut merged: Vec<(&'static str, String)> =
            Vec::with_capacity(self.entries.len().saturating_add(2));

        for (key, default) in [(LANGUAGE, &defaults.language), (REGION, &defaults.region)] {
            if let Some(value) = default.as_deref().filter(|v| !v.is_empty())
                && !self.supplies(key)
            {
                merged.push((key, String::from(value)));
            }
        }

        merged.extend(
            self.entries
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (*k, v.clone())),
        );
        merged
    }
}

/// Builds `{base}{path}?{query}`.
///
/// `path` is appended to whatever path `base` already carries, so a base
/// of `http://host/proxy/` and a path of `/3/movie/550` yields
/// `http://host/proxy/3/movie/550`.
#[must_use]
pub fn build_url(base: &Url, path: &str, query: &[(&'static str, String)]) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url.set_query(None);
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    url
}

// --- Endpoint Parameters ---

/// Parameters for the popular / top-rated list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Result page (1-based, default: 1).
    pub page: Option<u32>,
    /// Response language override.
    pub language: Option<String>,
}

impl ListParams {
    /// Creates params for page 1 with the client's default language.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: None,
            language: None,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Converts to query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .number("page", Some(self.page.unwrap_or(1)))
            .string(LANGUAGE, self.language.as_deref())
    }
}

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-based, default: 1).
    pub page: Option<u32>,
    /// Response language override.
    pub language: Option<String>,
    /// Include adult content (default: `false`).
    pub include_adult: bool,
    /// Region override (ISO 3166-1).
    pub region: Option<String>,
    /// Filter by year.
    pub year: Option<u32>,
    /// Filter by primary release year.
    pub primary_release_year: Option<u32>,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: None,
            language: None,
            include_adult: false,
            region: None,
            year: None,
            primary_release_year: None,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Includes or excludes adult content.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Sets the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn primary_release_year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }

    /// Converts to query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .string("query", Some(&self.query))
            .number("page", Some(self.page.unwrap_or(1)))
            .string(LANGUAGE, self.language.as_deref())
            .flag("include_adult", self.include_adult)
            .string(REGION, self.region.as_deref())
            .number("year", self.year)
            .number("primary_release_year", self.primary_release_year)
    }
}

/// Parameters for `search/tv` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTvParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-based, default: 1).
    pub page: Option<u32>,
    /// Response language override.
    pub language: Option<String>,
    /// Include adult content (default: `false`).
    pub include_adult: bool,
    /// Filter by first air date year.
    pub first_air_date_year: Option<u32>,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: None,
            language: None,
            include_adult: false,
            first_air_date_year: None,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Includes or excludes adult content.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Sets the first air date year filter.
    #[must_use]
    pub const fn first_air_date_year(mut self, year: u32) -> Self {
        self.first_air_date_year = Some(year);
        self
    }

    /// Converts to query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .string("query", Some(&self.query))
            .number("page", Some(self.page.unwrap_or(1)))
            .string(LANGUAGE, self.language.as_deref())
            .flag("include_adult", self.include_adult)
            .number("first_air_date_year", self.first_air_date_year)
    }
}
