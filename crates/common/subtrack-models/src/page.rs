use serde::Deserialize;

/// Paginated envelope returned by list endpoints with pagination enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A list endpoint answers either with a bare array or with a [`Page`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Page(Page<T>),
    Items(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Page(page) => page.results,
            ListResponse::Items(items) => items,
        }
    }
}
