use super::PageError;

/// Sortable card fields. The whitelist is the record's declared fields;
/// anything else is rejected rather than silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Amount,
    Id,
    Owner,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "amount" => Some(SortField::Amount),
            "id" => Some(SortField::Id),
            "owner" => Some(SortField::Owner),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Amount => "amount",
            SortField::Id => "id",
            SortField::Owner => "owner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Field + direction pair governing list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Amount,
            direction: SortDirection::Asc,
        }
    }
}

impl SortSpec {
    /// Parse a `field` or `field,direction` token. Direction defaults to
    /// ascending when omitted.
    pub fn parse(raw: &str) -> Result<Self, PageError> {
        let mut parts = raw.split(',').map(str::trim);

        let field_raw = parts.next().unwrap_or_default();
        if field_raw.is_empty() {
            return Err(PageError::EmptySort);
        }
        let field = SortField::parse(field_raw)
            .ok_or_else(|| PageError::UnsupportedSortField(field_raw.to_string()))?;

        let direction = match parts.next() {
            Some(dir_raw) if !dir_raw.is_empty() => SortDirection::parse(dir_raw)
                .ok_or_else(|| PageError::InvalidSortDirection(dir_raw.to_string()))?,
            _ => SortDirection::Asc,
        };

        Ok(Self { field, direction })
    }

    /// ORDER BY clause for the page query. A secondary ascending id keeps
    /// equal-keyed rows in a stable order across page requests.
    pub fn order_by_sql(&self) -> String {
        if self.field == SortField::Id {
            format!("ORDER BY \"id\" {}", self.direction.to_sql())
        } else {
            format!(
                "ORDER BY \"{}\" {}, \"id\" ASC",
                self.field.column(),
                self.direction.to_sql()
            )
        }
    }
}
