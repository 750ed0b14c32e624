use reqwest::Url;
use thiserror::Error;

const BASE_URL: &str = "replayview://app/";

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("invalid location '{0}': {1}")]
    Invalid(String, String),
}

/// The address of the current view. Query parameters carry view state that
/// should survive a reload, such as the selected network row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Location for `path`, which may carry a `?query`.
    pub fn new(path: &str) -> Result<Self, LocationError> {
        let raw = format!("{BASE_URL}{}", path.trim_start_matches('/'));
        let url = Url::parse(&raw).map_err(|e| LocationError::Invalid(path.to_string(), e.to_string()))?;
        Ok(Self { url })
    }

    pub fn for_replay(replay_id: &str) -> Result<Self, LocationError> {
        Self::new(&format!("replays/{replay_id}/"))
    }

    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Set a query parameter. An empty value removes it.
    pub fn set_query(&mut self, name: &str, value: &str) {
        let mut pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != name)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        if !value.is_empty() {
            pairs.push((name.to_string(), value.to_string()));
        }

        if pairs.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }

    /// Path and query, e.g. `/replays/abc/?n_detail_row=3`.
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}
