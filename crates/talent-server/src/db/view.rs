//! View-model field catalogues
//!
//! A [`ViewModel`] is the whitelist of API fields a list endpoint exposes. Every
//! field maps an API name (matched case-insensitively, optionally through
//! aliases) to a fixed SQL expression. Dynamic SELECT lists, ORDER BY clauses
//! and filters are only ever rendered from these expressions, never from
//! request text.

use super::query::ListQueryError;

/// How a column is decoded when a row is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Uuid,
    /// NUMERIC columns, selected as FLOAT8 and emitted as JSON numbers
    Decimal,
    Timestamp,
}

/// One field of a view model
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Name used in requests and as the key of shaped rows
    pub name: &'static str,
    /// Alternative spellings accepted in `fields` and `orderBy`
    pub aliases: &'static [&'static str],
    /// SQL expression against the view's source relation
    pub column: &'static str,
    pub kind: FieldKind,
    pub sortable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            aliases: &[],
            column,
            kind,
            sortable: true,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Whether `candidate` names this field, ignoring ASCII case
    pub fn matches(&self, candidate: &str) -> bool {
        self.name.eq_ignore_ascii_case(candidate)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(candidate))
    }

    /// Expression for the SELECT list, aliased to the API name
    pub fn select_expr(&self) -> String {
        match self.kind {
            FieldKind::Decimal => format!("({})::FLOAT8 AS \"{}\"", self.column, self.name),
            _ => format!("{} AS \"{}\"", self.column, self.name),
        }
    }
}

/// Whitelisted projection of an entity
#[derive(Debug)]
pub struct ViewModel {
    /// Entity name used in logs and error messages
    pub entity: &'static str,
    /// FROM clause, including any joins the fields need
    pub source: &'static str,
    pub fields: &'static [FieldDef],
}

impl ViewModel {
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.matches(name))
    }

    /// All fields, in declaration order
    pub fn default_fields(&self) -> Vec<&'static FieldDef> {
        self.fields.iter().collect()
    }

    /// Comma-separated API names of every field
    pub fn field_list(&self) -> String {
        self.fields.iter().map(|f| f.name).collect::<Vec<_>>().join(",")
    }

    /// Resolve a comma-separated `fields` request against the catalogue
    ///
    /// Entries are trimmed and empty entries skipped. Repeated fields keep
    /// their first position. A missing or blank request selects every field.
    pub fn resolve_fields(
        &self,
        requested: Option<&str>,
    ) -> Result<Vec<&'static FieldDef>, ListQueryError> {
        let requested = match requested.map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => return Ok(self.default_fields()),
        };

        let mut resolved: Vec<&'static FieldDef> = Vec::new();
        for name in requested.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let field = self.field(name).ok_or_else(|| ListQueryError::InvalidField {
                entity: self.entity,
                field: name.to_string(),
            })?;
            if !resolved.iter().any(|f| f.name == field.name) {
                resolved.push(field);
            }
        }

        if resolved.is_empty() {
            return Ok(self.default_fields());
        }
        Ok(resolved)
    }
}
