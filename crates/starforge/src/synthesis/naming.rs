//! Deterministic naming: theme extraction and table-name derivation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Key-ish substrings stripped from a column name to expose its theme.
static THEME_STRIP_TOKENS: &[&str] = &[
    "id_", "_id", "codigo", "código", "chave", "nr_", "num_", "pk_", "fk_",
];

static NON_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]+").unwrap());
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Extract the theme token from a key column name, e.g. `id_cliente` ->
/// `cliente`, `Cod_Produto` -> `produto`. Case-insensitive; may be empty.
pub fn extract_theme(key_column: &str) -> String {
    let mut theme = key_column.to_lowercase();
    for token in THEME_STRIP_TOKENS {
        theme = theme.replace(token, "");
    }
    theme.trim_matches('_').trim().to_string()
}

/// Reduce a free-form name to a lowercase SQL/filesystem-safe identifier.
/// Empty results fall back to `entidade`.
fn normalize_identifier(base: &str) -> String {
    let lower = base.trim().to_lowercase();
    let replaced = NON_IDENTIFIER.replace_all(&lower, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches('_');
    if trimmed.is_empty() {
        "entidade".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derive the dimension table name for a key column. Pure and
/// deterministic: the same input name always yields the same output.
pub fn derive_dimension_name(key_column: &str) -> String {
    let theme = extract_theme(key_column);
    let base = if theme.is_empty() { key_column } else { &theme };
    format!("dim_{}", normalize_identifier(base))
}

/// Derive the fact table name from the source table's base name.
pub fn fact_table_name(base_name: &str) -> String {
    format!("fato_{}", normalize_identifier(base_name))
}
