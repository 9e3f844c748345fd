//! Flattening ordered vertex subsets into one community assignment.

/// Assign community ids to `n_vertices` vertices from ordered disjoint subsets.
///
/// The `i`-th non-empty subset gets id `i`; empty subsets (left behind by
/// degenerate splits) are skipped so ids stay contiguous. The subsets are
/// expected to be disjoint and to cover `0..n_vertices`; this is not checked,
/// and uncovered vertices keep id 0.
pub fn collect_assignment<I, S>(n_vertices: usize, subsets: I) -> Vec<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[usize]>,
{
    let mut assignment = vec![0; n_vertices];
    let mut next = 0usize;
    for subset in subsets {
        let vertices = subset.as_ref();
        if vertices.is_empty() {
            continue;
        }
        for &v in vertices {
            assignment[v] = next;
        }
        next += 1;
    }
    assignment
}

/// Number of distinct community ids in a contiguous assignment.
pub fn community_count(assignment: &[usize]) -> usize {
    assignment.iter().copied().max().map_or(0, |c| c + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_input_order() {
        let subsets = vec![vec![3, 4], vec![0], vec![1, 2]];
        assert_eq!(collect_assignment(5, &subsets), vec![1, 2, 2, 0, 0]);
    }

    #[test]
    fn empty_subsets_do_not_leave_gaps() {
        let subsets: [&[usize]; 4] = [&[], &[2], &[], &[0, 1]];
        let assignment = collect_assignment(3, subsets);
        assert_eq!(assignment, vec![1, 1, 0]);
        assert_eq!(community_count(&assignment), 2);
    }

    #[test]
    fn empty_graph_has_no_communities() {
        let assignment = collect_assignment(0, Vec::<Vec<usize>>::new());
        assert!(assignment.is_empty());
        assert_eq!(community_count(&assignment), 0);
    }
}
