//! Primary-key selection among key candidates.

use std::cmp::Ordering;

use crate::schema::{ColumnProfile, RoleVerdict};

/// Pick the best key candidate, if any.
///
/// Candidates are ordered by: id-ish name first, then uniqueness descending,
/// then null ratio ascending, with the table's original column order as the
/// final tie-break. Deterministic and side-effect free; the result is a
/// suggestion the curation port may override or discard.
pub fn suggest_primary_key(
    profiles: &[ColumnProfile],
    verdicts: &[RoleVerdict],
) -> Option<String> {
    let mut candidates: Vec<&ColumnProfile> = profiles
        .iter()
        .zip(verdicts)
        .filter(|(_, v)| **v == RoleVerdict::KeyCandidate)
        .map(|(p, _)| p)
        .collect();

    candidates.sort_by(|a, b| {
        b.name_suggests_id
            .cmp(&a.name_suggests_id)
            .then_with(|| {
                b.uniqueness_ratio
                    .partial_cmp(&a.uniqueness_ratio)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                a.null_ratio
                    .partial_cmp(&b.null_ratio)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.position.cmp(&b.position))
    });

    candidates.first().map(|p| p.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDtype;

    fn candidate(name: &str, position: usize, id_name: bool, uniq: f64, nulls: f64) -> ColumnProfile {
        ColumnProfile {
            name: name.to_string(),
            position,
            dtype: ColumnDtype::Integer,
            cardinality: (uniq * 1000.0) as usize,
            uniqueness_ratio: uniq,
            null_ratio: nulls,
            is_date_like: false,
            name_suggests_id: id_name,
            has_fractional_values: false,
        }
    }

    #[test]
    fn test_no_candidates_returns_none() {
        let profiles = vec![candidate("a", 0, false, 0.5, 0.0)];
        let verdicts = vec![RoleVerdict::None];
        assert_eq!(suggest_primary_key(&profiles, &verdicts), None);
    }

    #[test]
    fn test_id_name_beats_higher_uniqueness() {
        let profiles = vec![
            candidate("sku", 0, false, 1.0, 0.0),
            candidate("id_produto", 1, true, 0.99, 0.0),
        ];
        let verdicts = vec![RoleVerdict::KeyCandidate, RoleVerdict::KeyCandidate];
        assert_eq!(
            suggest_primary_key(&profiles, &verdicts),
            Some("id_produto".to_string())
        );
    }

    #[test]
    fn test_uniqueness_then_nulls() {
        let profiles = vec![
            candidate("nr_nota", 0, true, 0.98, 0.02),
            candidate("nr_serie", 1, true, 0.98, 0.01),
        ];
        let verdicts = vec![RoleVerdict::KeyCandidate, RoleVerdict::KeyCandidate];
        assert_eq!(
            suggest_primary_key(&profiles, &verdicts),
            Some("nr_serie".to_string())
        );
    }

    #[test]
    fn test_residual_tie_breaks_on_column_order() {
        let profiles = vec![
            candidate("id_b", 3, true, 0.99, 0.0),
            candidate("id_a", 1, true, 0.99, 0.0),
        ];
        let verdicts = vec![RoleVerdict::KeyCandidate, RoleVerdict::KeyCandidate];
        // Equal on every criterion: the earlier table column wins even
        // though it appears later in the profile slice.
        assert_eq!(
            suggest_primary_key(&profiles, &verdicts),
            Some("id_a".to_string())
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        let profiles = vec![
            candidate("id_x", 0, true, 0.95, 0.0),
            candidate("id_y", 1, true, 0.97, 0.0),
            candidate("codigo_z", 2, true, 0.97, 0.01),
        ];
        let verdicts = vec![RoleVerdict::KeyCandidate; 3];
        let first = suggest_primary_key(&profiles, &verdicts);
        let second = suggest_primary_key(&profiles, &verdicts);
        assert_eq!(first, second);
        assert_eq!(first, Some("id_y".to_string()));
    }
}
