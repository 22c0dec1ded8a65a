//! Line buffer tests

use rust_motion_controller::console::line_buffer::{LineBuffer, LINE_CAPACITY, LINE_SIZE};

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::new();

    for c in b"fwd 10" {
        assert!(buf.push(*c));
    }

    assert_eq!(buf.as_str(), "fwd 10");
    assert_eq!(buf.last(), Some(b'0'));
}

#[test]
fn test_line_buffer_backspace() {
    let mut buf = LineBuffer::new();
    buf.set("servo");

    assert!(buf.backspace());
    assert!(buf.backspace());
    assert_eq!(buf.as_str(), "ser");
}

#[test]
fn test_line_buffer_backspace_empty() {
    let mut buf = LineBuffer::new();

    assert!(!buf.backspace());
    assert_eq!(buf.as_str(), "");
    assert_eq!(buf.last(), None);
}

#[test]
fn test_line_buffer_clear() {
    let mut buf = LineBuffer::new();
    buf.set("pu");
    buf.clear();

    assert_eq!(buf.as_str(), "");
    assert!(buf.is_empty());
}

#[test]
fn test_line_buffer_capacity() {
    assert_eq!(LINE_CAPACITY, LINE_SIZE - 1);

    let mut buf = LineBuffer::new();
    for i in 0..120u8 {
        buf.push(b'a' + (i % 26));
    }

    assert_eq!(buf.len(), LINE_CAPACITY);
    assert!(buf.is_full());
    assert!(!buf.push(b'x'));
    assert_eq!(buf.len(), LINE_CAPACITY);
}

#[test]
fn test_line_buffer_set_truncates() {
    let mut buf = LineBuffer::new();
    buf.set(&"b".repeat(150));
    assert_eq!(buf.len(), LINE_CAPACITY);
}
