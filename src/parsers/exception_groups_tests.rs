//! Unit tests for exception sheet parsing.

use super::*;
use crate::parsers::test_support::{make_index, row};

#[test]
fn emits_last_group_without_trailing_blank() {
    let index = make_index(&["Card1", "Card2"]);
    let rows = vec![
        row(&["", "Group A"]),
        row(&["Card1", "SET-001", "2020-01-01", ""]),
        row(&["", "", ""]),
        row(&["", "Group B"]),
        row(&["Card2", "SET-002", "2020-02-02", ""]),
    ];

    let groups = parse_exception_groups(&rows, &index);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "Group A");
    assert_eq!(groups[0].cards.len(), 1);
    assert_eq!(groups[0].cards[0].card.name, "Card1");
    assert_eq!(groups[0].cards[0].set_code, "SET-001");
    assert_eq!(groups[0].cards[0].release_date, "2020-01-01");
    assert_eq!(groups[0].cards[0].notes, None);
    assert_eq!(groups[1].name, "Group B");
    assert_eq!(groups[1].cards.len(), 1);
    assert_eq!(groups[1].cards[0].card.name, "Card2");
}

#[test]
fn keeps_notes_when_present() {
    let index = make_index(&["Card1"]);
    let rows = vec![
        row(&["", "Group A"]),
        row(&["Card1", "SET-001", "2020-01-01", "Reprint only"]),
    ];

    let groups = parse_exception_groups(&rows, &index);
    assert_eq!(groups[0].cards[0].notes.as_deref(), Some("Reprint only"));
}

#[test]
fn unresolved_cards_are_skipped() {
    let index = make_index(&["Card1", "Card3"]);
    let rows = vec![
        row(&["", "Group A"]),
        row(&["Card1", "SET-001", "2020-01-01"]),
        row(&["Unknown Card", "SET-002", "2020-01-02"]),
        row(&["Card3", "SET-003", "2020-01-03"]),
        row(&[]),
    ];

    let groups = parse_exception_groups(&rows, &index);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].cards.len(), 2);
    assert_eq!(groups[0].cards[1].card.name, "Card3");
}

#[test]
fn empty_group_is_still_emitted() {
    let index = make_index(&[]);
    let rows = vec![row(&["", "Nothing yet"]), row(&[])];

    let groups = parse_exception_groups(&rows, &index);
    assert_eq!(groups.len(), 1);
    assert!(groups[0].cards.is_empty());
}

#[test]
fn header_directly_after_data_opens_new_group() {
    let index = make_index(&["Card1", "Card2"]);
    let rows = vec![
        row(&["", "Group A"]),
        row(&["Card1", "SET-001", "2020-01-01"]),
        row(&["", "Group B"]),
        row(&["Card2", "SET-002", "2020-02-02"]),
    ];

    let groups = parse_exception_groups(&rows, &index);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].name, "Group B");
    assert_eq!(groups[1].cards[0].card.name, "Card2");
}

#[test]
fn data_rows_before_any_header_are_ignored() {
    let index = make_index(&["Card1"]);
    let rows = vec![
        row(&["Card1", "SET-001", "2020-01-01"]),
        row(&[]),
        row(&[]),
    ];

    assert!(parse_exception_groups(&rows, &index).is_empty());
}

#[test]
fn no_rows_no_groups() {
    let index = make_index(&["Card1"]);
    assert!(parse_exception_groups(&[], &index).is_empty());
}

#[test]
fn always_legal_names_come_from_data_rows() {
    let rows = vec![
        row(&["", "Group A"]),
        row(&["Card1", "SET-001", "2020-01-01"]),
        row(&["", ""]),
        row(&["", "Group B"]),
        row(&[" Card2 ", "SET-002", "2020-02-02"]),
    ];

    let names = always_legal_names(&rows);
    assert_eq!(names.len(), 2);
    assert!(names.contains("Card1"));
    assert!(names.contains("Card2"));
    assert!(!names.contains("Group A"));
}
