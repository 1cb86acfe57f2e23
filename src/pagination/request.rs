//! Query requests

/// What the caller wants from a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Records rendered on screen
    Normal,
    /// Only the total match count
    Count,
    /// Records written to an export; screen output is suppressed
    Export,
}

/// Field names defining the two axes of the matrix view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixPivot {
    pub column_field: String,
    pub row_field: String,
}

impl MatrixPivot {
    pub fn new(column_field: impl Into<String>, row_field: impl Into<String>) -> Self {
        Self {
            column_field: column_field.into(),
            row_field: row_field.into(),
        }
    }
}

/// Immutable query request, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    query: String,
    kind: QueryKind,
    pivot: Option<MatrixPivot>,
}

impl QueryRequest {
    /// Create a request, inferring `Count` from a `count()` aggregate in the
    /// query text (case-insensitive).
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let kind = if query.to_ascii_lowercase().contains("count()") {
            QueryKind::Count
        } else {
            QueryKind::Normal
        };

        Self {
            query,
            kind,
            pivot: None,
        }
    }

    pub fn with_kind(mut self, kind: QueryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Switch to export: drains every page and never short-circuits to a count
    pub fn for_export(self) -> Self {
        self.with_kind(QueryKind::Export)
    }

    /// Render as a matrix pivoted on the given column and row fields
    pub fn with_matrix(mut self, column_field: impl Into<String>, row_field: impl Into<String>) -> Self {
        self.pivot = Some(MatrixPivot::new(column_field, row_field));
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn pivot(&self) -> Option<&MatrixPivot> {
        self.pivot.as_ref()
    }

    pub fn is_count_only(&self) -> bool {
        self.kind == QueryKind::Count
    }

    pub fn suppresses_screen_output(&self) -> bool {
        self.kind == QueryKind::Export
    }
}
