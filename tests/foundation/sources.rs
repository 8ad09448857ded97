//! Integration tests for input sources
//!
//! Tests in-memory sources and the paged file-backed source.

use peggy_foundation::{PagedSource, Source};
use std::io::Cursor;
use std::rc::Rc;

fn paged(text: &str, page_size: usize) -> PagedSource<Cursor<Vec<u8>>> {
    PagedSource::new(Cursor::new(text.as_bytes().to_vec()))
        .unwrap()
        .with_page_size(page_size)
}

// =============================================================================
// In-memory
// =============================================================================

#[test]
fn str_source_basics() {
    let source = "héllo";
    assert_eq!(Source::len(source), 6);
    assert_eq!(source.char_at(1), Some('é'));
    assert_eq!(source.char_at(2), None);
    assert!(source.slice(1..2).is_none());
    assert_eq!(source.window(3).as_deref(), Some("llo"));
}

#[test]
fn wrappers_delegate() {
    let owned = String::from("abc");
    let boxed: Box<str> = Box::from("abc");
    let shared: Rc<str> = Rc::from("abc");
    assert!(owned.starts_with_at(1, "bc"));
    assert!(boxed.starts_with_at(1, "bc"));
    assert!(shared.starts_with_at(1, "bc"));
    assert!(!(&owned).starts_with_at(2, "cd"));
}

#[test]
fn empty_source() {
    let source = "";
    assert!(Source::is_empty(source));
    assert_eq!(source.window(0).as_deref(), Some(""));
    assert!(source.char_at(0).is_none());
}

// =============================================================================
// Paged
// =============================================================================

#[test]
fn paged_agrees_with_str() {
    let text = "the quick brown fox jumps over the lazy dog";
    let source = paged(text, 8);
    for start in 0..text.len() {
        for end in start..=text.len() {
            assert_eq!(
                source.slice(start..end).as_deref(),
                text.get(start..end),
                "slice {start}..{end}"
            );
        }
    }
}

#[test]
fn paged_window_stops_at_page() {
    let source = paged("0123456789", 4);
    assert_eq!(source.window(0).as_deref(), Some("0123"));
    assert_eq!(source.window(8).as_deref(), Some("89"));
    assert_eq!(source.window(10).as_deref(), Some(""));
}

#[test]
fn paged_open_reads_file() {
    let path = std::env::temp_dir().join(format!("peggy-paged-{}.txt", std::process::id()));
    std::fs::write(&path, "file contents").unwrap();
    let source = PagedSource::open(&path).unwrap();
    assert_eq!(source.len(), 13);
    assert_eq!(source.slice(5..13).as_deref(), Some("contents"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn paged_open_missing_file_is_io_error() {
    let result = PagedSource::open("/nonexistent/peggy/input.txt");
    assert!(matches!(
        result.map(|_| ()).unwrap_err().kind,
        peggy_foundation::ErrorKind::Io(_)
    ));
}
