use std::cmp::Ordering;

use crate::core::allocation::Allocation;
use crate::core::query::SearchResult;

/// Order allocations by run efficiency, highest first, with unknown efficiencies last.
///
/// The sort is stable: allocations with equal or unknown efficiency keep their
/// relative order.
pub fn sort_allocations(allocations: &mut [Allocation]) {
    allocations.sort_by(|a, b| match (a.run_efficiency, b.run_efficiency) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Sort and keep the best `limit` allocations
#[must_use]
pub fn select_allocations(mut allocations: Vec<Allocation>, limit: usize) -> Vec<Allocation> {
    sort_allocations(&mut allocations);
    allocations.truncate(limit);
    allocations
}

/// Attach the best `limit` allocations to a result.
///
/// An empty input still sets an (empty) allocation list.
#[must_use]
pub fn enrich(mut result: SearchResult, allocations: Vec<Allocation>, limit: usize) -> SearchResult {
    result.allocations = Some(select_allocations(allocations, limit));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LayoutId;

    fn alloc(id: i64, efficiency: Option<f64>) -> Allocation {
        let a = Allocation::new(1, id, format!("Line {id}"), 100.0);
        match efficiency {
            Some(e) => a.with_run_efficiency(e),
            None => a,
        }
    }

    fn result() -> SearchResult {
        SearchResult {
            layout_id: LayoutId(1),
            layout_code: "L-001".to_string(),
            similarity_score: 100.0,
            operation_similarity: 100.0,
            machine_similarity: 100.0,
            matched_operations: 0,
            operations: Vec::new(),
            allocations: None,
        }
    }

    #[test]
    fn test_absent_efficiency_sorts_last() {
        let selected = select_allocations(
            vec![alloc(1, Some(95.5)), alloc(2, None), alloc(3, Some(92.3))],
            2,
        );
        let ids: Vec<i64> = selected.iter().map(|a| a.allocation_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(selected[0].run_efficiency, Some(95.5));
        assert_eq!(selected[1].run_efficiency, Some(92.3));
    }

    #[test]
    fn test_stable_among_absent_and_equal() {
        let mut allocations = vec![
            alloc(1, None),
            alloc(2, Some(80.0)),
            alloc(3, None),
            alloc(4, Some(80.0)),
            alloc(5, Some(90.0)),
        ];
        sort_allocations(&mut allocations);
        let ids: Vec<i64> = allocations.iter().map(|a| a.allocation_id).collect();
        assert_eq!(ids, vec![5, 2, 4, 1, 3]);
    }

    #[test]
    fn test_efficiencies_non_increasing_until_first_absent() {
        let mut allocations = vec![
            alloc(1, Some(10.0)),
            alloc(2, None),
            alloc(3, Some(70.5)),
            alloc(4, Some(99.9)),
            alloc(5, None),
            alloc(6, Some(0.0)),
        ];
        sort_allocations(&mut allocations);

        let first_absent = allocations
            .iter()
            .position(|a| a.run_efficiency.is_none())
            .unwrap();
        assert!(allocations[first_absent..]
            .iter()
            .all(|a| a.run_efficiency.is_none()));
        let present: Vec<f64> = allocations[..first_absent]
            .iter()
            .filter_map(|a| a.run_efficiency)
            .collect();
        assert!(present.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_enrich_empty_sets_empty_list() {
        let enriched = enrich(result(), Vec::new(), 3);
        assert_eq!(enriched.allocations, Some(Vec::new()));
    }

    #[test]
    fn test_enrich_limit_larger_than_input() {
        let enriched = enrich(result(), vec![alloc(1, None), alloc(2, Some(50.0))], 10);
        let allocations = enriched.allocations.unwrap();
        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].allocation_id, 2);
    }
}
