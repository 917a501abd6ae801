//! Overlap merging for selection lists.
//!
//! Commands routinely produce selections that collide: a rotation lands two
//! cursors on the same word, a line-wise extension swallows the next cursor's
//! line. Before such a list is committed it is collapsed so that no two
//! surviving selections overlap. Surviving selections keep their first-seen
//! list position and direction.

use crate::selection::Selection;

/// Collapse overlapping selections into unions of their clusters.
///
/// Empty selections merge only with an exactly-coincident empty selection, or
/// disappear into a non-empty selection whose span contains them. Selections
/// that merely touch are left alone; see [`merge_consecutive`] for the
/// merging variant.
pub fn merge_overlapping(selections: &[Selection]) -> Vec<Selection> {
    merge_impl(selections, false)
}

/// Like [`merge_overlapping`], but also merges selections that touch at a
/// boundary without overlapping.
pub fn merge_consecutive(selections: &[Selection]) -> Vec<Selection> {
    merge_impl(selections, true)
}

fn merge_impl(selections: &[Selection], merge_touching: bool) -> Vec<Selection> {
    let len = selections.len();
    let mut merged: Vec<Selection> = selections.to_vec();
    let mut inactive = vec![false; len];

    for i in 0..len {
        if inactive[i] {
            continue;
        }
        let mut acc = merged[i];
        let mut j = i + 1;

        while j < len {
            if inactive[j] {
                j += 1;
                continue;
            }
            let cand = selections[j];

            if acc.is_empty() {
                if cand.is_empty() {
                    if cand.start() == acc.start() {
                        inactive[j] = true;
                    }
                    j += 1;
                    continue;
                }
                if cand.contains(acc.start()) {
                    // Absorbed: the accumulator takes on the candidate's
                    // span and direction, and the enlarged span may now
                    // reach candidates that were already skipped.
                    acc = cand;
                    inactive[j] = true;
                    j = i + 1;
                    continue;
                }
                j += 1;
                continue;
            }

            let (a_start, a_end) = (acc.start(), acc.end());
            let (c_start, c_end) = (cand.start(), cand.end());

            let starts_within = c_start >= a_start
                && (c_start < a_end || (merge_touching && c_start == a_end));
            if starts_within {
                if c_end <= a_end {
                    // Wholly contained: drop the candidate, accumulator
                    // unchanged, nothing new to rescan.
                    inactive[j] = true;
                    j += 1;
                } else {
                    acc = Selection::from_start_end(a_start, c_end, acc.direction());
                    inactive[j] = true;
                    j = i + 1;
                }
                continue;
            }

            let ends_within = c_end <= a_end
                && (c_end > a_start || (merge_touching && c_end == a_start));
            if ends_within && c_start < a_start {
                acc = Selection::from_start_end(c_start, a_end, acc.direction());
                inactive[j] = true;
                j = i + 1;
                continue;
            }

            j += 1;
        }

        merged[i] = acc;
    }

    let out: Vec<Selection> = (0..len)
        .filter(|&k| !inactive[k])
        .map(|k| merged[k])
        .collect();
    if out.len() != len {
        log::trace!("merged {} selections into {}", len, out.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::selection::SelectionDirection;

    fn fwd(start: (usize, usize), end: (usize, usize)) -> Selection {
        Selection::from_start_end(
            Position::new(start.0, start.1),
            Position::new(end.0, end.1),
            SelectionDirection::Forward,
        )
    }

    fn rev(start: (usize, usize), end: (usize, usize)) -> Selection {
        Selection::from_start_end(
            Position::new(start.0, start.1),
            Position::new(end.0, end.1),
            SelectionDirection::Backward,
        )
    }

    fn at(line: usize, column: usize) -> Selection {
        Selection::empty(Position::new(line, column))
    }

    #[test]
    fn test_disjoint_untouched() {
        let input = vec![fwd((0, 0), (0, 2)), fwd((0, 5), (0, 7))];

        assert_eq!(merge_overlapping(&input), input);
        assert_eq!(merge_consecutive(&input), input);
    }

    #[test]
    fn test_overlap_merges() {
        // [0,3) and [2,5) overlap: union is [0,5)
        let input = vec![fwd((0, 0), (0, 3)), fwd((0, 2), (0, 5))];

        assert_eq!(merge_overlapping(&input), vec![fwd((0, 0), (0, 5))]);
    }

    #[test]
    fn test_contained_candidate_dropped() {
        let input = vec![fwd((0, 0), (0, 6)), fwd((0, 2), (0, 4))];

        assert_eq!(merge_overlapping(&input), vec![fwd((0, 0), (0, 6))]);
    }

    #[test]
    fn test_extend_start_backward() {
        let input = vec![fwd((0, 3), (0, 6)), fwd((0, 0), (0, 4))];

        assert_eq!(merge_overlapping(&input), vec![fwd((0, 0), (0, 6))]);
    }

    #[test]
    fn test_first_seen_direction_preserved() {
        let input = vec![rev((0, 0), (0, 3)), fwd((0, 2), (0, 5))];

        assert_eq!(merge_overlapping(&input), vec![rev((0, 0), (0, 5))]);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        // The second cluster keeps its slot even though it sorts first
        let input = vec![
            fwd((0, 6), (0, 8)),
            fwd((0, 0), (0, 2)),
            fwd((0, 7), (0, 9)),
        ];

        assert_eq!(
            merge_overlapping(&input),
            vec![fwd((0, 6), (0, 9)), fwd((0, 0), (0, 2))]
        );
    }

    #[test]
    fn test_touching_requires_consecutive_flag() {
        let input = vec![fwd((0, 0), (0, 3)), fwd((0, 3), (0, 5))];

        assert_eq!(merge_overlapping(&input), input);
        assert_eq!(merge_consecutive(&input), vec![fwd((0, 0), (0, 5))]);
    }

    #[test]
    fn test_touching_start_consecutive() {
        // The candidate ends exactly where the accumulator starts
        let input = vec![fwd((0, 3), (0, 5)), fwd((0, 0), (0, 3))];

        assert_eq!(merge_overlapping(&input), input);
        assert_eq!(merge_consecutive(&input), vec![fwd((0, 0), (0, 5))]);
    }

    #[test]
    fn test_coincident_empties_collapse() {
        let input = vec![at(0, 2), at(0, 2), at(0, 2)];

        assert_eq!(merge_overlapping(&input), vec![at(0, 2)]);
    }

    #[test]
    fn test_distinct_empties_survive() {
        let input = vec![at(0, 2), at(0, 4)];

        assert_eq!(merge_overlapping(&input), input);
    }

    #[test]
    fn test_empty_absorbed_into_containing_selection() {
        let input = vec![at(0, 3), fwd((0, 1), (0, 5))];

        assert_eq!(merge_overlapping(&input), vec![fwd((0, 1), (0, 5))]);
    }

    #[test]
    fn test_empty_inside_earlier_selection_dropped() {
        let input = vec![fwd((0, 1), (0, 5)), at(0, 3)];

        assert_eq!(merge_overlapping(&input), vec![fwd((0, 1), (0, 5))]);
    }

    #[test]
    fn test_restart_reaches_skipped_candidate() {
        // [4,6) first skips [0,2), then [2,5) pulls the accumulator's start
        // back far enough that the restart must also swallow [0,2)... which
        // still only touches, so it survives without the consecutive flag.
        let input = vec![
            fwd((0, 4), (0, 6)),
            fwd((0, 0), (0, 2)),
            fwd((0, 2), (0, 5)),
        ];

        assert_eq!(
            merge_overlapping(&input),
            vec![fwd((0, 2), (0, 6)), fwd((0, 0), (0, 2))]
        );
        assert_eq!(merge_consecutive(&input), vec![fwd((0, 0), (0, 6))]);
    }

    #[test]
    fn test_restart_transitive_overlap() {
        // After merging with [2,7), the accumulator overlaps the previously
        // skipped [5,9)
        let input = vec![
            fwd((0, 0), (0, 3)),
            fwd((0, 5), (0, 9)),
            fwd((0, 2), (0, 7)),
        ];

        assert_eq!(merge_overlapping(&input), vec![fwd((0, 0), (0, 9))]);
    }

    #[test]
    fn test_cross_line_merge() {
        let input = vec![fwd((0, 2), (1, 3)), fwd((1, 1), (2, 4))];

        assert_eq!(merge_overlapping(&input), vec![fwd((0, 2), (2, 4))]);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            fwd((0, 0), (0, 3)),
            fwd((0, 2), (0, 5)),
            at(1, 1),
            at(1, 1),
            rev((2, 0), (2, 4)),
        ];

        let once = merge_overlapping(&input);
        let twice = merge_overlapping(&once);
        assert_eq!(once, twice);
    }
}
