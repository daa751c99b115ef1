//! End-to-end tests: byte streams through the engine to the screen

use vtscreen::{AttrFlags, Color, CursorPosition, Engine};

fn engine() -> Engine {
    Engine::new(24, 80).unwrap()
}

#[test]
fn plain_text_flows_left_to_right_and_wraps() {
    let mut engine = Engine::new(24, 10).unwrap();
    engine.process_data(b"0123456789abc");
    assert_eq!(engine.screen().row_text(0), "0123456789");
    assert_eq!(engine.screen().row_text(1), "abc");
}

#[test]
fn overflowing_lines_grow_history() {
    let mut engine = Engine::new(4, 40).unwrap();
    for i in 0..10 {
        engine.process_data(format!("line {i}\r\n").as_bytes());
    }
    // Ten lines plus the trailing newline scroll: 10 - 4 + 1 archived
    assert_eq!(engine.screen().history_len(), 7);
    let oldest: String = engine
        .screen()
        .history_line(0)
        .unwrap()
        .iter()
        .map(|c| c.ch)
        .collect();
    assert_eq!(oldest.trim_end(), "line 0");
}

#[test]
fn clear_screen_erases_everything_cursor_unchanged() {
    let mut engine = engine();
    engine.process_data(b"some text\x1b[5;8H");
    engine.process_data(b"\x1b[2J");
    for row in 0..24 {
        assert_eq!(engine.screen().row_text(row), "");
    }
    assert_eq!(engine.screen().cursor(), CursorPosition::new(4, 7));
}

#[test]
fn cursor_position_is_one_based_and_clamped() {
    let mut engine = engine();
    engine.process_data(b"\x1b[10;20H");
    assert_eq!(engine.screen().cursor(), CursorPosition::new(9, 19));
    engine.process_data(b"\x1b[0;0H");
    assert_eq!(engine.screen().cursor(), CursorPosition::new(0, 0));
    engine.process_data(b"\x1b[999;999H");
    assert_eq!(engine.screen().cursor(), CursorPosition::new(23, 79));
}

#[test]
fn sgr_attributes_stamp_cells() {
    let mut engine = engine();
    engine.process_data(b"\x1b[1;31mA\x1b[0mB");
    let a = engine.screen().cell(0, 0).unwrap();
    assert_eq!(a.fg, Color::RED);
    assert!(a.attrs.contains(AttrFlags::BOLD));
    let b = engine.screen().cell(0, 1).unwrap();
    assert_eq!(b.fg, Color::Default);
    assert_eq!(b.bg, Color::Default);
    assert!(b.attrs.is_empty());
}

#[test]
fn resize_round_trip_preserves_top_left() {
    let mut engine = engine();
    for row in 0..12 {
        engine.process_data(format!("\x1b[{};1Hrow-{row}", row + 1).as_bytes());
    }
    engine.resize(12, 40).unwrap();
    engine.resize(24, 80).unwrap();
    for row in 0..12 {
        assert_eq!(engine.screen().row_text(row), format!("row-{row}"));
    }
    for row in 12..24 {
        assert_eq!(engine.screen().row_text(row), "");
    }
}

#[test]
fn reentering_alternate_buffer_is_blank() {
    let mut engine = engine();
    engine.process_data(b"\x1b[?47h");
    engine.process_data(b"leftover");
    engine.process_data(b"\x1b[?47l\x1b[H\x1b[?47h");
    for row in 0..24 {
        assert_eq!(engine.screen().row_text(row), "");
    }
}

#[test]
fn default_tab_stops() {
    let mut engine = engine();
    engine.process_data(b"\x1b[1;4H\t");
    assert_eq!(engine.screen().cursor().col, 8);
    engine.process_data(b"\x1b[1;80H\t");
    assert_eq!(engine.screen().cursor().col, 79);
}

#[test]
fn split_sequence_equals_contiguous() {
    let mut split = engine();
    split.process_data(b"\x1b[");
    split.process_data(b"5;1");
    split.process_data(b"0H\x1b[3");
    split.process_data(b"1mX");

    let mut whole = engine();
    whole.process_data(b"\x1b[5;10H\x1b[31mX");

    assert_eq!(split.screen().cursor(), whole.screen().cursor());
    assert_eq!(split.screen().cell(4, 9), whole.screen().cell(4, 9));
}

#[test]
fn scroll_region_confines_line_feeds() {
    let mut engine = Engine::new(6, 10).unwrap();
    for row in 0..6 {
        engine.process_data(format!("\x1b[{};1Hr{row}", row + 1).as_bytes());
    }
    // Region rows 2-4 (1-based), cursor to its bottom, feed twice
    engine.process_data(b"\x1b[2;4r\x1b[4;1H\n\n");
    assert_eq!(engine.screen().row_text(0), "r0");
    assert_eq!(engine.screen().row_text(1), "r3");
    assert_eq!(engine.screen().row_text(2), "");
    assert_eq!(engine.screen().row_text(3), "");
    assert_eq!(engine.screen().row_text(4), "r4");
    assert_eq!(engine.screen().row_text(5), "r5");
    // Partial-height scrolling never archives
    assert_eq!(engine.screen().history_len(), 0);
}

#[test]
fn box_drawing_via_dec_graphics() {
    let mut engine = engine();
    engine.process_data(b"\x1b(0lqk\x1b(B");
    assert_eq!(engine.screen().cell(0, 0).unwrap().ch, '\u{250C}');
    assert_eq!(engine.screen().cell(0, 1).unwrap().ch, '\u{2500}');
    assert_eq!(engine.screen().cell(0, 2).unwrap().ch, '\u{2510}');
}

#[test]
fn utf8_text_lands_on_screen() {
    let mut engine = engine();
    engine.process_data("héllo wörld ✓".as_bytes());
    assert_eq!(engine.screen().row_text(0), "héllo wörld ✓");
}

#[test]
fn insert_and_delete_lines_via_csi() {
    let mut engine = Engine::new(4, 10).unwrap();
    engine.process_data(b"a\r\nb\r\nc\r\nd\x1b[2;1H\x1b[L");
    assert_eq!(engine.screen().row_text(1), "");
    assert_eq!(engine.screen().row_text(2), "b");
    engine.process_data(b"\x1b[M");
    assert_eq!(engine.screen().row_text(1), "b");
}
