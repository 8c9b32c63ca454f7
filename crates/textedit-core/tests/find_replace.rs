use textedit_core::{
    Document, EditContext, EditorConfig, Position, SearchError, SearchOptions, TextBuffer,
};

#[test]
fn test_search_next_moves_cursor_and_wraps() {
    let mut doc = Document::new("alpha beta\nbeta gamma\n");
    let mut ctx = EditContext::default();

    assert!(doc.search_next(&mut ctx, "beta").unwrap());
    assert_eq!(doc.cursor(), Position::new(0, 6));
    assert_eq!(ctx.last_search.as_deref(), Some("beta"));

    assert!(doc.search_again(&mut ctx).unwrap());
    assert_eq!(doc.cursor(), Position::new(1, 0));

    assert!(doc.search_again(&mut ctx).unwrap());
    assert_eq!(doc.cursor(), Position::new(0, 6));
}

#[test]
fn test_search_miss_keeps_cursor() {
    let mut doc = Document::new("alpha\n");
    let mut ctx = EditContext::default();
    doc.set_cursor(Position::new(0, 2));

    assert!(!doc.search_next(&mut ctx, "omega").unwrap());
    assert_eq!(doc.cursor(), Position::new(0, 2));
}

#[test]
fn test_search_again_without_previous_query() {
    let mut doc = Document::new("alpha\n");
    let mut ctx = EditContext::default();
    assert!(!doc.search_again(&mut ctx).unwrap());
}

#[test]
fn test_search_uses_configured_options() {
    let config = EditorConfig {
        search_options: SearchOptions {
            case_sensitive: false,
            whole_word: true,
            regex: false,
        },
        ..EditorConfig::default()
    };
    let mut doc = Document::new("Catalog cat CAT\n").with_config(config);
    let mut ctx = EditContext::default();

    assert!(doc.search_next(&mut ctx, "cat").unwrap());
    assert_eq!(doc.cursor(), Position::new(0, 8));
    assert!(doc.search_again(&mut ctx).unwrap());
    assert_eq!(doc.cursor(), Position::new(0, 12));
}

#[test]
fn test_invalid_regex_is_an_error() {
    let config = EditorConfig {
        search_options: SearchOptions {
            regex: true,
            ..SearchOptions::default()
        },
        ..EditorConfig::default()
    };
    let mut doc = Document::new("text\n").with_config(config);
    let mut ctx = EditContext::default();

    let err = doc.search_next(&mut ctx, "[").unwrap_err();
    assert!(matches!(err, SearchError::InvalidRegex(_)));
}

#[test]
fn test_buffer_search_across_lines() {
    let buffer = TextBuffer::from_lines(["ab", "cd"]);
    let (start, end) = buffer
        .search_next_with("b\nc", Position::new(0, 0), SearchOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(start, Position::new(0, 1));
    assert_eq!(end, Position::new(1, 1));
    assert_eq!(buffer.extract_range(start, end), "b\nc");
}
