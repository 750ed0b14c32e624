use std::collections::BTreeSet;

use super::frame::NetworkFrame;

/// Filters applied to the network frames before sorting.
///
/// - A non-empty search term must appear (case-insensitive) in the URL,
///   method, status or op
/// - If resource types are selected, the frame's type must be one of them
/// - If statuses are selected, the frame's status must be one of them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkFilters {
    search: String,
    types: BTreeSet<String>,
    statuses: BTreeSet<String>,
}

impl NetworkFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn statuses(&self) -> &BTreeSet<String> {
        &self.statuses
    }

    pub fn set_types(&mut self, types: impl IntoIterator<Item = String>) {
        self.types = types.into_iter().collect();
    }

    pub fn set_statuses(&mut self, statuses: impl IntoIterator<Item = String>) {
        self.statuses = statuses.into_iter().collect();
    }

    /// Returns true if nothing is filtered out.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.types.is_empty() && self.statuses.is_empty()
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.types.clear();
        self.statuses.clear();
    }

    /// Check if a frame passes every active filter.
    pub fn matches(&self, frame: &NetworkFrame) -> bool {
        if !self.types.is_empty() && !self.types.contains(frame.resource_type()) {
            return false;
        }

        if !self.statuses.is_empty() && !self.statuses.contains(&frame.status()) {
            return false;
        }

        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }

        let term = term.to_lowercase();
        [
            frame.description.as_str(),
            frame.method(),
            frame.status().as_str(),
            frame.op.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Indices of the frames that pass, in their original order.
    pub fn apply(&self, frames: &[NetworkFrame]) -> Vec<usize> {
        frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| self.matches(frame))
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Distinct values of `key` across `frames`, sorted.
pub fn facet_values(frames: &[NetworkFrame], key: impl Fn(&NetworkFrame) -> String) -> Vec<String> {
    frames
        .iter()
        .map(key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Step a single-valued facet selection through `values`: none, each value, none.
pub fn cycle_facet(current: &BTreeSet<String>, values: &[String]) -> Option<String> {
    let position = current
        .iter()
        .next()
        .and_then(|selected| values.iter().position(|v| v == selected));
    match position {
        None => values.first().cloned(),
        Some(idx) => values.get(idx + 1).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::frame::mock_frames;

    #[test]
    fn test_empty_filter_matches_all() {
        let frames = mock_frames(0.0, 20);
        let filters = NetworkFilters::new();
        assert!(filters.is_empty());
        assert_eq!(filters.apply(&frames).len(), 20);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let frames = mock_frames(0.0, 30);
        let mut filters = NetworkFilters::new();
        filters.set_search("LOGO.PNG");
        let matched = filters.apply(&frames);
        assert!(!matched.is_empty());
        assert!(matched.iter().all(|&i| frames[i].description.contains("logo.png")));
    }

    #[test]
    fn test_search_matches_method_and_status() {
        let frames = mock_frames(0.0, 30);
        let mut filters = NetworkFilters::new();

        filters.set_search("post");
        assert!(filters.apply(&frames).iter().all(|&i| frames[i].method() == "POST"));

        filters.set_search("404");
        assert!(filters.apply(&frames).iter().all(|&i| {
            frames[i].status() == "404" || frames[i].description.contains("404")
        }));
    }

    #[test]
    fn test_type_and_status_facets() {
        let frames = mock_frames(0.0, 60);
        let mut filters = NetworkFilters::new();
        filters.set_types(["img".to_string()]);
        filters.set_statuses(["200".to_string()]);
        let matched = filters.apply(&frames);
        assert!(!matched.is_empty());
        for i in matched {
            assert_eq!(frames[i].resource_type(), "img");
            assert_eq!(frames[i].status(), "200");
        }
    }

    #[test]
    fn test_filter_then_clear_restores_all_rows() {
        let frames = mock_frames(0.0, 100);
        let mut filters = NetworkFilters::new();
        filters.set_search("theme.css");
        filters.set_types(["css".to_string()]);
        assert!(filters.apply(&frames).len() < frames.len());

        filters.clear();
        assert_eq!(filters.apply(&frames).len(), frames.len());
    }

    #[test]
    fn test_apply_keeps_original_order() {
        let frames = mock_frames(0.0, 40);
        let mut filters = NetworkFilters::new();
        filters.set_search("api");
        let matched = filters.apply(&frames);
        assert!(matched.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_cycle_facet() {
        let values = vec!["css".to_string(), "fetch".to_string()];
        let mut current = BTreeSet::new();
        assert_eq!(cycle_facet(&current, &values), Some("css".to_string()));
        current.insert("css".to_string());
        assert_eq!(cycle_facet(&current, &values), Some("fetch".to_string()));
        current.clear();
        current.insert("fetch".to_string());
        assert_eq!(cycle_facet(&current, &values), None);
    }
}
