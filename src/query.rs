/// The part of the listing engine's query builder a column may touch.
pub trait Query {
    /// table the listing is based on
    fn base_table(&self) -> &str;

    /// Add `table.field` to the selected fields and return the alias it is selected as.
    /// Adding the same field twice returns the existing alias.
    fn add_field(&mut self, table: &str, field: &str) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryField {
    pub table: String,
    pub field: String,
    pub alias: String,
}

/// A query that only records what was selected.
///
/// Useful for engines that build their SQL elsewhere and for inspecting what columns
/// contribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectQuery {
    base_table: String,
    fields: Vec<QueryField>,
}

impl SelectQuery {
    pub fn new(base_table: impl Into<String>) -> Self {
        Self {
            base_table: base_table.into(),
            fields: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[QueryField] {
        &self.fields
    }
}

impl Query for SelectQuery {
    fn base_table(&self) -> &str {
        &self.base_table
    }

    fn add_field(&mut self, table: &str, field: &str) -> String {
        if let Some(f) = self
            .fields
            .iter()
            .find(|f| f.table == table && f.field == field)
        {
            return f.alias.clone();
        }
        let alias = format!("{table}_{field}");
        self.fields.push(QueryField {
            table: table.to_string(),
            field: field.to_string(),
            alias: alias.clone(),
        });
        alias
    }
}
