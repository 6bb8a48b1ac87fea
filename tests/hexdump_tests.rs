//! Hex Dump Renderer Tests
//!
//! The renderer's hard contract is memory safety: it may truncate its
//! output, but it must never write past the capacity it was given.

use nrfmon::hexdump::{DUMP_BUFFER_SIZE, DumpBuffer, render_into};

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn zero_length_payload_renders_nothing() {
    let mut out = [0u8; 64];
    assert_eq!(render_into(&mut out, &[]), 0);
}

#[test]
fn zero_capacity_writes_nothing() {
    let mut out = [0u8; 0];
    assert_eq!(render_into(&mut out, b"abc"), 0);
}

#[test]
fn never_writes_past_capacity() {
    let payload: Vec<u8> = (0u8..=255).collect();

    for capacity in 0..200 {
        let mut out = vec![0xAAu8; capacity + 16];
        let written = render_into(&mut out[..capacity], &payload);

        assert!(written <= capacity, "capacity {}", capacity);
        assert!(
            out[capacity..].iter().all(|&b| b == 0xAA),
            "capacity {}: canary bytes were overwritten",
            capacity
        );
    }
}

#[test]
fn truncated_output_is_a_prefix_of_the_full_dump() {
    let payload: Vec<u8> = (0u8..64).collect();

    let mut full = [0u8; 2048];
    let full_len = render_into(&mut full, &payload);
    assert!(full_len > 0);

    for capacity in [1, 7, 40, 100, full_len - 1] {
        let mut small = vec![0u8; capacity];
        let written = render_into(&mut small, &payload);
        assert_eq!(&small[..written], &full[..written], "capacity {}", capacity);
    }
}

// ============================================================================
// Format
// ============================================================================

#[test]
fn renders_hex_and_ascii_gutter() {
    let mut out = [0u8; 256];
    let written = render_into(&mut out, b"Hello");
    let dump = std::str::from_utf8(&out[..written]).expect("dump is ASCII");

    assert!(dump.starts_with("0000"));
    assert!(dump.contains("48 65 6c 6c 6f"));
    assert!(dump.contains("|Hello|"));
}

#[test]
fn nonprintable_bytes_become_dots() {
    let mut out = [0u8; 256];
    let written = render_into(&mut out, &[0x00, 0x41, 0x1f, 0x7f]);
    let dump = std::str::from_utf8(&out[..written]).expect("dump is ASCII");

    assert!(dump.contains("|.A..|"));
}

#[test]
fn second_line_carries_its_offset() {
    let payload = [0u8; 32];
    let mut out = [0u8; 512];
    let written = render_into(&mut out, &payload);
    let dump = std::str::from_utf8(&out[..written]).expect("dump is ASCII");

    let mut lines = dump.lines();
    assert!(lines.next().expect("first line").starts_with("0000"));
    assert!(lines.next().expect("second line").starts_with("0010"));
    assert_eq!(lines.next(), None);
}

// ============================================================================
// Reusable Buffer
// ============================================================================

#[test]
fn repeated_renders_are_identical() {
    let payload = [0xDEu8, 0xAD, 0xBE, 0xEF];
    let mut dump = DumpBuffer::new();

    let first_len = dump.render(&payload);
    let first = dump.as_str().to_string();

    let second_len = dump.render(&payload);
    assert_eq!(first_len, second_len);
    assert_eq!(dump.as_str(), first);
}

#[test]
fn buffer_is_fully_overwritten_between_renders() {
    let mut dump = DumpBuffer::new();

    dump.render(&[0xFFu8; 32]);
    let long = dump.as_str().to_string();

    dump.render(&[0x01u8]);
    let short = dump.as_str();

    assert!(short.len() < long.len());
    assert!(!short.contains("ff"));
}

#[test]
fn full_packet_fits_the_dump_buffer() {
    let mut dump = DumpBuffer::new();
    let written = dump.render(&[0x5Au8; 32]);

    assert!(written > 0);
    assert!(written < DUMP_BUFFER_SIZE);
}

#[test]
fn zero_length_render_clears_the_buffer() {
    let mut dump = DumpBuffer::new();
    dump.render(&[1, 2, 3]);

    assert_eq!(dump.render(&[]), 0);
    assert_eq!(dump.as_str(), "");
}
