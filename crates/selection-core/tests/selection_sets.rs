use selection_core::{
    EditorContext, Position, Selection, SelectionDirection, SelectionError, SelectionSet,
    TextDocument, select_within, split_selections,
};

fn line_sel(line: usize) -> Selection {
    Selection::new(Position::new(line, 0), Position::new(line, 1))
}

fn span(start: (usize, usize), end: (usize, usize)) -> Selection {
    Selection::new(
        Position::new(start.0, start.1),
        Position::new(end.0, end.1),
    )
}

#[test]
fn test_rotation_moves_every_index() {
    let set = SelectionSet::new(vec![line_sel(0), line_sel(1), line_sel(2)]).unwrap();

    // rotate(1): [A, B, C] -> [C, A, B]
    assert_eq!(
        set.rotate(1).selections(),
        &[line_sel(2), line_sel(0), line_sel(1)]
    );
    // rotate(-1): [A, B, C] -> [B, C, A]
    assert_eq!(
        set.rotate(-1).selections(),
        &[line_sel(1), line_sel(2), line_sel(0)]
    );
}

#[test]
fn test_rotation_changes_primary() {
    let set = SelectionSet::new(vec![line_sel(0), line_sel(1), line_sel(2)]).unwrap();

    assert_eq!(set.primary(), line_sel(0));
    assert_eq!(set.rotate(-1).primary(), line_sel(1));
    assert_eq!(set.rotate(1).primary(), line_sel(2));
    assert_eq!(set.rotate(6).primary(), line_sel(0));
}

#[test]
fn test_sort_both_ways() {
    let set = SelectionSet::new(vec![line_sel(1), line_sel(2), line_sel(0)]).unwrap();

    assert_eq!(
        set.sort_top_to_bottom().selections(),
        &[line_sel(0), line_sel(1), line_sel(2)]
    );
    assert_eq!(
        set.sort_bottom_to_top().selections(),
        &[line_sel(2), line_sel(1), line_sel(0)]
    );
    // The original set is untouched
    assert_eq!(set.primary(), line_sel(1));
}

#[test]
fn test_lines_of_disjoint_selections() {
    let set = SelectionSet::new(vec![line_sel(0), line_sel(2)]).unwrap();

    assert_eq!(set.lines(), vec![0, 2]);
}

#[test]
fn test_lines_follow_traversal_order() {
    let set = SelectionSet::new(vec![line_sel(4), span((0, 1), (2, 2))]).unwrap();

    // The first-seen selection contributes first
    assert_eq!(set.lines(), vec![4, 0, 1, 2]);
}

#[test]
fn test_lines_with_column_zero_end() {
    let doc_lines = SelectionSet::single(span((1, 0), (3, 0)));

    // An end at column 0 counts as ending on the previous line
    assert_eq!(doc_lines.lines(), vec![1, 2]);
}

#[test]
fn test_shift_empty_left_over_line_break() {
    let doc = TextDocument::from_text("abc\nd");
    let set = SelectionSet::new(vec![
        Selection::empty(Position::new(1, 1)),
        Selection::empty(Position::new(1, 0)),
        Selection::empty(Position::new(0, 0)),
    ])
    .unwrap();

    let shifted = set.shift_empty_left(&doc);

    assert_eq!(
        shifted.selections(),
        &[
            Selection::empty(Position::new(1, 0)),
            Selection::empty(Position::new(0, 3)),
            Selection::empty(Position::new(0, 0)),
        ]
    );
}

#[test]
fn test_point_queries() {
    let set = SelectionSet::new(vec![span((0, 2), (0, 5)), line_sel(3)]).unwrap();

    assert!(set.contains(Position::new(0, 2)));
    assert!(set.contains(Position::new(0, 5)));
    assert!(set.contains(Position::new(3, 1)));
    assert!(!set.contains(Position::new(1, 0)));
    assert!(!set.contains(Position::new(0, 6)));
}

#[test]
fn test_split_concatenates_in_input_order() {
    let doc = TextDocument::from_text("a,b\nc,d");
    let set = SelectionSet::new(vec![span((1, 0), (1, 3)), span((0, 0), (0, 3))]).unwrap();
    let ctx = EditorContext::new(&doc, set);

    let pieces = split_selections(&ctx, ",").unwrap();

    // Second-line parent was first in the set, so its pieces come first
    assert_eq!(
        pieces,
        vec![
            span((1, 0), (1, 1)),
            span((1, 2), (1, 3)),
            span((0, 0), (0, 1)),
            span((0, 2), (0, 3)),
        ]
    );
}

#[test]
fn test_split_inherits_reversed_direction() {
    let doc = TextDocument::from_text("a b");
    let parent = Selection::new(Position::new(0, 3), Position::new(0, 0));
    let ctx = EditorContext::new(&doc, SelectionSet::single(parent));

    let pieces = split_selections(&ctx, " ").unwrap();

    assert_eq!(pieces.len(), 2);
    assert!(pieces.iter().all(Selection::is_reversed));
    assert_eq!(pieces[0].start(), Position::new(0, 0));
    assert_eq!(pieces[0].end(), Position::new(0, 1));
}

#[test]
fn test_select_within_multiple_parents() {
    let doc = TextDocument::from_text("x1x\ny22y");
    let set = SelectionSet::new(vec![span((0, 0), (0, 3)), span((1, 0), (1, 4))]).unwrap();
    let ctx = EditorContext::new(&doc, set);

    let found = select_within(&ctx, r"\d+").unwrap();

    assert_eq!(found, vec![span((0, 1), (0, 2)), span((1, 1), (1, 3))]);
    assert_eq!(
        found[1].direction(),
        SelectionDirection::Forward
    );
}

#[test]
fn test_select_within_respects_parent_bounds() {
    let doc = TextDocument::from_text("aaa bbb aaa");
    // Only the middle of the line is searched
    let ctx = EditorContext::new(&doc, SelectionSet::single(span((0, 4), (0, 7))));

    let found = select_within(&ctx, "a+|b+").unwrap();

    assert_eq!(found, vec![span((0, 4), (0, 7))]);
}

#[test]
fn test_indexing_and_iteration() {
    let set = SelectionSet::new(vec![line_sel(0), line_sel(1)]).unwrap();

    assert_eq!(set[0], line_sel(0));
    assert_eq!(set[1], line_sel(1));
    assert_eq!(set.iter().count(), 2);

    let collected: Vec<Selection> = set.iter().copied().collect();
    assert_eq!(collected, set.selections());
}

#[test]
fn test_try_from_vec() {
    let set = SelectionSet::try_from(vec![line_sel(2), line_sel(0)]).unwrap();

    // Input order kept: the first element stays primary
    assert_eq!(set.primary(), line_sel(2));
    assert_eq!(set.selections(), &[line_sel(2), line_sel(0)]);

    let empty = SelectionSet::try_from(Vec::<Selection>::new());
    assert!(matches!(empty, Err(SelectionError::EmptySelectionSet)));
}
