//! Cache Key Generator
//!
//! Deterministic keys for reference-table lookups. Every key of a table starts
//! with [`table_pattern`], which is what bulk invalidation matches on.
//!
//! Format: `ReferenceTable:{table}:{operation}[:{qualifier}]`

/// Namespace shared by all reference-table keys.
pub const KEY_NAMESPACE: &str = "ReferenceTable";

const GET_ALL: &str = "GetAll";
const GET_BY_ID: &str = "GetById";
const GET_BY_VALUE: &str = "GetByValue";

/// Key for the full listing of a table.
pub fn all_key(table: &str) -> String {
    format!("{}{}", table_pattern(table), GET_ALL)
}

/// Key for a single entry looked up by id. Ids are used verbatim.
pub fn by_id_key(table: &str, id: &str) -> String {
    format!("{}{}:{}", table_pattern(table), GET_BY_ID, id)
}

/// Key for a single entry looked up by value.
///
/// Values are case-insensitive lookups, so the qualifier is lowercased. An
/// empty value yields the degenerate key ending in `GetByValue:`, which callers
/// use to cache "nothing matches".
pub fn by_value_key(table: &str, value: &str) -> String {
    format!(
        "{}{}:{}",
        table_pattern(table),
        GET_BY_VALUE,
        value.to_lowercase()
    )
}

/// Separator between key segments. Table names must not contain it, or keys
/// of different tables could collide.
pub const KEY_SEPARATOR: char = ':';

/// Whether `table` can be used as a key segment.
pub fn is_valid_table_name(table: &str) -> bool {
    !table.trim().is_empty() && !table.contains(KEY_SEPARATOR)
}

/// Prefix shared by every key of `table`.
pub fn table_pattern(table: &str) -> String {
    format!("{}:{}:", KEY_NAMESPACE, table)
}
