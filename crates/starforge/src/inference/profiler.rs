//! Single-pass statistical profiling of table columns.

use indexmap::IndexSet;
use once_cell::sync::Lazy;

use crate::config::Thresholds;
use crate::input::DataTable;
use crate::schema::{ColumnDtype, ColumnProfile};

/// Tokens that mark a column name as key-ish.
static ID_NAME_TOKENS: &[&str] = &[
    "id_", "_id", "codigo", "código", "chave", "nr_", "num_", "seq_", "pk_", "fk_",
];

/// Date formats tried in order. Day-first formats come before anything
/// ambiguous, matching the source data's pt-BR convention.
static DATE_FORMATS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%d-%m-%Y",
        "%d.%m.%Y",
        "%Y/%m/%d",
        "%d/%m/%y",
    ]
});

static DATETIME_FORMATS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ]
});

/// Error-tolerant, day-first date parse. Returns None instead of failing on
/// values that are not dates.
pub fn parse_date_day_first(value: &str) -> Option<chrono::NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS.iter() {
        if let Ok(d) = chrono::NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Parse a numeric value, accepting both `1234.56` and pt-BR `1.234,56` /
/// `1234,56` renderings.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }

    if trimmed.contains(',') {
        let normalized = if trimmed.contains('.') {
            // "1.234,56": dot is a thousands separator
            trimmed.replace('.', "").replace(',', ".")
        } else {
            trimmed.replace(',', ".")
        };
        return normalized.parse::<f64>().ok();
    }

    None
}

fn is_integer_value(value: &str) -> bool {
    value.trim().parse::<i64>().is_ok()
}

/// Whether the lowercased column name carries a key-ish token.
pub(crate) fn name_suggests_id(name: &str) -> bool {
    let lower = name.to_lowercase();
    ID_NAME_TOKENS.iter().any(|t| lower.contains(t))
}

/// Computes a [`ColumnProfile`] per column in a single pass.
pub struct ColumnProfiler {
    thresholds: Thresholds,
}

impl ColumnProfiler {
    /// Create a profiler with default thresholds.
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    /// Create a profiler with custom thresholds.
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Profile every column of the table, preserving original column order.
    pub fn profile_table(&self, table: &DataTable) -> Vec<ColumnProfile> {
        table
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| self.profile_column(table, idx, name))
            .collect()
    }

    /// Profile one column.
    pub fn profile_column(&self, table: &DataTable, index: usize, name: &str) -> ColumnProfile {
        let row_count = table.row_count();

        let mut distinct: IndexSet<String> = IndexSet::new();
        let mut null_count = 0usize;
        let mut int_count = 0usize;
        let mut float_count = 0usize;
        let mut date_count = 0usize;
        let mut non_null = 0usize;
        let mut has_fractional = false;

        for value in table.column_values(index) {
            if DataTable::is_null_value(value) {
                null_count += 1;
                continue;
            }
            non_null += 1;
            distinct.insert(value.to_string());

            if is_integer_value(value) {
                int_count += 1;
            } else if let Some(n) = parse_numeric(value) {
                float_count += 1;
                // Fractional check runs on the leading sample of non-null
                // values only, mirroring the monetary-column key guard.
                if non_null <= self.thresholds.float_key_sample && n.fract() != 0.0 {
                    has_fractional = true;
                }
            } else if parse_date_day_first(value).is_some() {
                date_count += 1;
            }
        }

        let cardinality = distinct.len();
        let (uniqueness_ratio, null_ratio) = if row_count == 0 {
            (0.0, 0.0)
        } else {
            (
                cardinality as f64 / row_count as f64,
                null_count as f64 / row_count as f64,
            )
        };

        // Date-likeness is judged over the whole column, nulls included:
        // a sparse column of parseable dates still counts if 70% of all
        // values parse.
        let parseable_dates = table
            .column_values(index)
            .filter(|v| parse_date_day_first(v).is_some())
            .count();
        let is_date_like = row_count > 0
            && parseable_dates as f64 / row_count as f64 >= self.thresholds.date_like_fraction;

        let dtype = infer_dtype(non_null, int_count, float_count, date_count, is_date_like);

        ColumnProfile {
            name: name.to_string(),
            position: index,
            dtype,
            cardinality,
            uniqueness_ratio,
            null_ratio,
            is_date_like,
            name_suggests_id: name_suggests_id(name),
            has_fractional_values: has_fractional,
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the dominant type among the non-null values. Integers promote to
/// float when any fractional value is present; a date-like column is typed
/// Date outright.
fn infer_dtype(
    non_null: usize,
    int_count: usize,
    float_count: usize,
    date_count: usize,
    is_date_like: bool,
) -> ColumnDtype {
    if is_date_like {
        return ColumnDtype::Date;
    }
    if non_null == 0 {
        return ColumnDtype::Text;
    }

    let numeric = int_count + float_count;
    let text_count = non_null - numeric - date_count;

    if numeric >= date_count && numeric > text_count {
        if float_count > 0 {
            ColumnDtype::Float
        } else {
            ColumnDtype::Integer
        }
    } else if date_count > text_count {
        ColumnDtype::Date
    } else {
        ColumnDtype::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b';',
        )
    }

    fn profile_single(rows: Vec<&str>, name: &str) -> ColumnProfile {
        let table = make_table(vec![name], rows.into_iter().map(|v| vec![v]).collect());
        ColumnProfiler::new().profile_column(&table, 0, name)
    }

    #[test]
    fn test_parse_date_day_first() {
        let d = parse_date_day_first("05/03/2024").unwrap();
        assert_eq!(d, chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(parse_date_day_first("2024-03-05").is_some());
        assert!(parse_date_day_first("not a date").is_none());
    }

    #[test]
    fn test_parse_numeric_ptbr() {
        assert_eq!(parse_numeric("123.45"), Some(123.45));
        assert_eq!(parse_numeric("123,45"), Some(123.45));
        assert_eq!(parse_numeric("1.234,56"), Some(1234.56));
        assert_eq!(parse_numeric("abc"), None);
    }

    #[test]
    fn test_name_suggests_id_tokens() {
        assert!(name_suggests_id("id_cliente"));
        assert!(name_suggests_id("ID_CLIENTE"));
        assert!(name_suggests_id("Código Parceiro"));
        assert!(name_suggests_id("nr_nota"));
        assert!(!name_suggests_id("cidade"));
        assert!(!name_suggests_id("valor_total"));
    }

    #[test]
    fn test_profile_integer_column() {
        let p = profile_single(vec!["1", "2", "3", "4"], "qtd");
        assert_eq!(p.dtype, ColumnDtype::Integer);
        assert_eq!(p.cardinality, 4);
        assert_eq!(p.uniqueness_ratio, 1.0);
        assert_eq!(p.null_ratio, 0.0);
        assert!(!p.is_date_like);
    }

    #[test]
    fn test_profile_float_column_flags_fractional() {
        let p = profile_single(vec!["123,45", "67,10", "88,00"], "valor_total");
        assert_eq!(p.dtype, ColumnDtype::Float);
        assert!(p.has_fractional_values);
    }

    #[test]
    fn test_profile_date_column() {
        let p = profile_single(vec!["01/03/2024", "02/03/2024", "03/03/2024"], "data_emissao");
        assert!(p.is_date_like);
        assert_eq!(p.dtype, ColumnDtype::Date);
    }

    #[test]
    fn test_date_like_threshold() {
        // 2 of 4 values parse: below the 70% cutoff.
        let p = profile_single(vec!["01/03/2024", "02/03/2024", "x", "y"], "mista");
        assert!(!p.is_date_like);
    }

    #[test]
    fn test_profile_all_null_column() {
        let p = profile_single(vec!["", "NA", ""], "vazia");
        assert_eq!(p.cardinality, 0);
        assert_eq!(p.uniqueness_ratio, 0.0);
        assert_eq!(p.null_ratio, 1.0);
        assert!(p.is_all_null());
    }

    #[test]
    fn test_profile_empty_table() {
        let table = make_table(vec!["a"], vec![]);
        let p = ColumnProfiler::new().profile_column(&table, 0, "a");
        assert_eq!(p.cardinality, 0);
        assert_eq!(p.uniqueness_ratio, 0.0);
        assert_eq!(p.null_ratio, 0.0);
        assert!(!p.is_date_like);
    }

    #[test]
    fn test_profile_counts_nulls() {
        let p = profile_single(vec!["a", "", "b", "a"], "uf");
        assert_eq!(p.cardinality, 2);
        assert_eq!(p.null_ratio, 0.25);
        assert_eq!(p.uniqueness_ratio, 0.5);
    }
}
