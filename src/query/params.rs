//! Accumulated query state and its canonical query-string rendering.

use std::fmt;

/// Sort order for a `sort` clause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter, search, sort and select state of a query builder.
///
/// Parameters render in the fixed order `filter`, `search`, `sort`,
/// `select`; a parameter with no content is omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    filters: Vec<String>,
    search: Option<String>,
    /// Insertion-ordered; a key appears at most once.
    sort: Vec<(String, SortDirection)>,
    select: Vec<String>,
}

impl QueryParams {
    pub fn push_filter(&mut self, key: &str, value: &str) {
        self.filters.push(format!("{key}:{value}"));
    }

    pub fn set_search(&mut self, query: String) {
        self.search = Some(query);
    }

    /// Sets the direction for `key`, keeping its original position.
    pub fn set_sort(&mut self, key: String, direction: SortDirection) {
        match self.sort.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = direction,
            None => self.sort.push((key, direction)),
        }
    }

    pub fn set_select(&mut self, fields: Vec<String>) {
        self.select = fields;
    }

    #[must_use]
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Renders the non-empty parameters in canonical order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(4);

        if !self.filters.is_empty() {
            pairs.push(("filter".to_string(), self.filters.join(",")));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|(key, direction)| format!("{key}:{direction}"))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("sort".to_string(), sort));
        }
        if !self.select.is_empty() {
            pairs.push(("select".to_string(), self.select.join(",")));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_renders_nothing() {
        assert!(QueryParams::default().to_pairs().is_empty());
    }

    #[test]
    fn test_filters_join_in_call_order() {
        let mut params = QueryParams::default();
        params.push_filter("publication_year", "2023");
        params.push_filter("type", "article|book");

        assert_eq!(
            params.to_pairs(),
            vec![(
                "filter".to_string(),
                "publication_year:2023,type:article|book".to_string()
            )]
        );
    }

    #[test]
    fn test_sort_overwrites_in_place() {
        let mut params = QueryParams::default();
        params.set_sort("cited_by_count".to_string(), SortDirection::Asc);
        params.set_sort("publication_date".to_string(), SortDirection::Desc);
        params.set_sort("cited_by_count".to_string(), SortDirection::Desc);

        assert_eq!(
            params.to_pairs(),
            vec![(
                "sort".to_string(),
                "cited_by_count:desc,publication_date:desc".to_string()
            )]
        );
    }

    #[test]
    fn test_canonical_parameter_order() {
        let mut params = QueryParams::default();
        params.set_select(vec!["id".to_string(), "doi".to_string()]);
        params.set_sort("relevance_score".to_string(), SortDirection::Desc);
        params.set_search("graphene".to_string());
        params.push_filter("is_oa", "true");

        let keys: Vec<_> = params.to_pairs().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["filter", "search", "sort", "select"]);
    }

    #[test]
    fn test_empty_search_is_omitted() {
        let mut params = QueryParams::default();
        params.set_search(String::new());

        assert!(params.to_pairs().is_empty());
        assert_eq!(params.to_pairs(), QueryParams::default().to_pairs());
    }

    #[test]
    fn test_search_overwrites() {
        let mut params = QueryParams::default();
        params.set_search("first".to_string());
        params.set_search("second".to_string());

        assert_eq!(
            params.to_pairs(),
            vec![("search".to_string(), "second".to_string())]
        );
    }
}
