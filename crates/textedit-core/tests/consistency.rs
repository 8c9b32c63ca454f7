//! Randomized consistency tests.
//!
//! Runs many random edits against a [`TextBuffer`] and compares it with a flat `Vec<char>`
//! reference model; then drives a [`Document`] with random actions and checks that undoing
//! everything restores the original text and redoing everything restores the final text.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use textedit_core::motion::{
    clamp, clamp_signed, to_end_of_buffer, to_next_end_of_word, to_next_start_of_paragraph,
    to_next_start_of_word, to_prev_end_of_word, to_prev_start_of_paragraph,
    to_prev_start_of_word, to_start_of_buffer,
};
use textedit_core::{Document, EditContext, LINE_BREAK, Line, Position, TextBuffer};

const ALPHABET: [char; 8] = ['a', 'b', 'Z', '9', ' ', '.', '\n', 'é'];

fn random_position(rng: &mut StdRng, buffer: &TextBuffer) -> Position {
    let line = rng.gen_range(0..buffer.line_count());
    Position::new(line, rng.gen_range(0..buffer.line_len(line)))
}

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.gen_range(1..8);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn assert_invariants(buffer: &TextBuffer) {
    assert!(buffer.line_count() >= 1);
    for line in buffer.lines() {
        assert!(line.ends_with_break());
        assert_eq!(
            line.chars().iter().filter(|c| **c == LINE_BREAK).count(),
            1,
            "line {line:?} has interior line breaks"
        );
    }
}

#[test]
fn test_random_edits_match_reference_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut buffer = TextBuffer::from_lines(["The quick brown fox", "", "jumps over", "the lazy dog."]);
    let mut model: Vec<char> = buffer.text().chars().collect();

    for _ in 0..2_000 {
        match rng.gen_range(0..5) {
            0 => {
                let pos = random_position(&mut rng, &buffer);
                let c = ALPHABET[rng.gen_range(0..ALPHABET.len())];
                let offset = buffer.offset_of(pos);
                let end = buffer.insert_char(c, pos);
                model.insert(offset, c);
                assert_eq!(buffer.offset_of(end), offset + 1);
            }
            1 => {
                let pos = random_position(&mut rng, &buffer);
                let offset = buffer.offset_of(pos);
                let removed = buffer.remove_char(pos);
                if offset + 1 == model.len() {
                    assert_eq!(removed, None);
                } else {
                    assert_eq!(removed, Some(model.remove(offset)));
                }
            }
            2 => {
                let pos = random_position(&mut rng, &buffer);
                let text = random_text(&mut rng);
                let offset = buffer.offset_of(pos);
                let end = buffer.insert_range(&text, pos);
                let len = text.chars().count();
                model.splice(offset..offset, text.chars());
                assert_eq!(buffer.offset_of(end), offset + len);
                assert_eq!(end, pos.advanced_over(&text));
            }
            3 => {
                let a = random_position(&mut rng, &buffer);
                let b = random_position(&mut rng, &buffer);
                let (start, end) = (a.min(b), a.max(b));
                let (s, e) = (buffer.offset_of(start), buffer.offset_of(end));
                let removed = buffer.remove_range(start, end);
                let expected: String = model.drain(s..e).collect();
                assert_eq!(removed, expected);
            }
            _ => {
                if buffer.line_count() > 1 && rng.gen_bool(0.5) {
                    let index = rng.gen_range(0..buffer.line_count());
                    let start = buffer.offset_of(Position::new(index, 0));
                    let removed = buffer.remove_line(index);
                    model.drain(start..start + removed.len());
                } else {
                    let index = rng.gen_range(0..=buffer.line_count());
                    let start = if index == buffer.line_count() {
                        model.len()
                    } else {
                        buffer.offset_of(Position::new(index, 0))
                    };
                    let line = Line::new(&format!("{}\n", random_text(&mut rng).replace('\n', "")));
                    model.splice(start..start, line.chars().iter().copied());
                    buffer.insert_line(line, index);
                }
            }
        }

        assert_eq!(buffer.text(), model.iter().collect::<String>());
        assert_invariants(&buffer);
    }
}

#[test]
fn test_random_document_actions_undo_and_redo_fully() {
    let mut rng = StdRng::seed_from_u64(42);
    let original = "fn main() {\n    let x = 1;\n\n    x + 1\n}\n";
    let mut doc = Document::new(original);
    let mut ctx = EditContext::default();

    for _ in 0..500 {
        match rng.gen_range(0..8) {
            0 | 1 => doc.type_char(ALPHABET[rng.gen_range(0..ALPHABET.len())]),
            2 => {
                doc.delete_backward();
            }
            3 => {
                doc.delete_forward();
            }
            4 => {
                let pos = random_position(&mut rng, doc.buffer());
                doc.set_cursor(pos);
            }
            5 => {
                ctx.clipboard = random_text(&mut rng);
                doc.paste(&ctx);
            }
            6 => {
                doc.set_mark();
                let pos = random_position(&mut rng, doc.buffer());
                doc.set_cursor(pos);
                doc.delete_selection();
            }
            _ => {
                doc.set_mark();
                let pos = random_position(&mut rng, doc.buffer());
                doc.set_cursor(pos);
                for _ in 0..rng.gen_range(1..6) {
                    match rng.gen_range(0..3) {
                        0 => doc.type_char(ALPHABET[rng.gen_range(0..ALPHABET.len())]),
                        1 => {
                            doc.delete_backward();
                        }
                        _ => {
                            doc.delete_forward();
                        }
                    }
                }
                match rng.gen_range(0..3) {
                    0 => {
                        doc.copy(&mut ctx);
                    }
                    1 => {
                        doc.cut(&mut ctx);
                    }
                    _ => doc.paste(&ctx),
                }
            }
        }
        assert_invariants(doc.buffer());
        assert!(doc.buffer().is_valid_position(doc.cursor()));
        if let Some(mark) = doc.mark() {
            assert!(doc.buffer().is_valid_position(mark), "mark {mark:?} out of bounds");
        }
    }

    let edited = doc.text();
    while doc.undo() {}
    assert_eq!(doc.text(), original);

    while doc.redo() {}
    assert_eq!(doc.text(), edited);
}

#[test]
fn test_random_clamp_and_motions_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    let buffer = TextBuffer::from_lines([
        "  first paragraph, line one",
        "line two!",
        "",
        "   ",
        "(second) paragraph",
        "end",
    ]);
    let (lo, hi) = (to_start_of_buffer(&buffer), to_end_of_buffer(&buffer));

    for _ in 0..1_000 {
        let line = rng.gen_range(-3i64..10);
        let col = rng.gen_range(-3i64..40);
        let pos = clamp_signed(&buffer, line, col);
        assert!(buffer.is_valid_position(pos));
        assert_eq!(clamp(&buffer, pos), pos);

        for motion in [
            to_next_start_of_word,
            to_next_end_of_word,
            to_prev_start_of_word,
            to_prev_end_of_word,
            to_next_start_of_paragraph,
            to_prev_start_of_paragraph,
        ] {
            let moved = motion(&buffer, pos);
            assert!(lo <= moved && moved <= hi, "{moved:?} out of bounds");
            assert!(buffer.is_valid_position(moved));
        }
    }
}
