use textedit_core::motion::{to_end_of_line, to_next_start_of_word};
use textedit_core::{Document, EditContext, LineEnding, Position};

fn main() {
    let mut doc = Document::load("first line\r\nsecond line\r\n".as_bytes()).unwrap();
    assert_eq!(doc.line_ending(), LineEnding::Crlf);
    let mut ctx = EditContext::default();

    // Type at the end of the first line; the whole word coalesces into one command.
    doc.move_cursor(to_end_of_line);
    for c in " here".chars() {
        doc.type_char(c);
    }
    assert_eq!(doc.text(), "first line here\nsecond line\n");

    // Cut "second " and paste it in front of the first line.
    doc.set_cursor(Position::new(1, 0));
    doc.set_mark();
    doc.move_cursor(to_next_start_of_word);
    assert!(doc.cut(&mut ctx));
    doc.set_cursor(Position::new(0, 0));
    doc.paste(&ctx);
    assert_eq!(doc.text(), "second first line here\nline\n");

    // Find "line" twice, wrapping around.
    assert!(doc.search_next(&mut ctx, "line").unwrap());
    assert_eq!(doc.cursor(), Position::new(0, 13));
    assert!(doc.search_again(&mut ctx).unwrap());
    assert_eq!(doc.cursor(), Position::new(1, 0));

    while doc.undo() {}
    assert_eq!(doc.text(), "first line\nsecond line\n");

    let mut saved = Vec::new();
    doc.save(&mut saved).unwrap();
    println!("{}", String::from_utf8_lossy(&saved));
}
