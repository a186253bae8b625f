use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_span_precedes() {
    assert!(Span::new(0, 4).precedes(Span::new(5, 9)));
    assert!(!Span::new(5, 9).precedes(Span::new(5, 12)));
}

#[test]
fn test_line_col_first_line() {
    let index = LineIndex::new("x = 0\ny = 1\n");
    assert_eq!(index.line_col(0), (1, 1));
    assert_eq!(index.line_col(4), (1, 5));
}

#[test]
fn test_line_col_later_lines() {
    let index = LineIndex::new("x = 0\ny = 1\nreturn y");
    assert_eq!(index.line_col(6), (2, 1));
    assert_eq!(index.line_col(12), (3, 1));
    assert_eq!(index.line_col(19), (3, 8));
    assert_eq!(index.line_count(), 3);
}
