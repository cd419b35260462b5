// Entry query builder.
//
// Mirrors the delivery API search parameters. Values are passed through
// verbatim; the CMS validates them.

/// Maximum link resolution depth accepted by the CMS.
pub const MAX_INCLUDE_DEPTH: u8 = 10;

/// Filter and pagination options for `GET /entries`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    fields: Vec<(String, String)>,
    limit: Option<u32>,
    skip: Option<u32>,
    order: Option<String>,
    include: Option<u8>,
    select: Vec<String>,
    locale: Option<String>,
}

impl EntryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equality filter on a field: `fields.<name>=<value>`.
    pub fn field_eq(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sort order, e.g. `"fields.title"` or `"-sys.createdAt"`.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Link resolution depth, clamped to [`MAX_INCLUDE_DEPTH`].
    pub fn include(mut self, depth: u8) -> Self {
        self.include = Some(depth.min(MAX_INCLUDE_DEPTH));
        self
    }

    /// Restrict the returned fields (e.g. `"fields.title"`).
    pub fn select(mut self, path: impl Into<String>) -> Self {
        self.select.push(path.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Encode as query parameters for the given content type.
    pub fn to_params(&self, content_type: &str) -> Vec<(String, String)> {
        let mut params = vec![("content_type".to_owned(), content_type.to_owned())];

        for (name, value) in &self.fields {
            params.push((format!("fields.{name}"), value.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".into(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("skip".into(), skip.to_string()));
        }
        if let Some(ref order) = self.order {
            params.push(("order".into(), order.clone()));
        }
        if let Some(include) = self.include {
            params.push(("include".into(), include.to_string()));
        }
        if !self.select.is_empty() {
            params.push(("select".into(), self.select.join(",")));
        }
        if let Some(ref locale) = self.locale {
            params.push(("locale".into(), locale.clone()));
        }

        params
    }
}
