//! Common request query types

use serde::Deserialize;

/// List query: pagination plus catalog filters.
///
/// Fields are flat (no nesting) so they deserialize cleanly from URL
/// query strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Page number (1-based, default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page (default: 50, max: 200)
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Restrict to a single category
    #[serde(default)]
    pub category_id: Option<i64>,

    /// Case-insensitive substring search over name/description
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            category_id: None,
            search: None,
        }
    }
}

impl ListQuery {
    /// Get the limit (clamped to max 200)
    pub fn limit(&self) -> u32 {
        std::cmp::min(self.per_page, 200)
    }

    /// Get the offset for database queries
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) as u64 * self.limit() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_uses_clamped_limit() {
        let q = ListQuery {
            page: 3,
            per_page: 500,
            ..Default::default()
        };
        assert_eq!(q.limit(), 200);
        assert_eq!(q.offset(), 400);
    }

    #[test]
    fn defaults_apply_on_empty_query() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 50);
        assert!(q.category_id.is_none());
        assert!(q.search.is_none());
    }
}
