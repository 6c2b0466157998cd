/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Tests for the buffered token reader.

use netpbm::bytestream::{ByteCursor, TokenReader};

fn reader(data: &[u8]) -> TokenReader<ByteCursor<&[u8]>> {
    TokenReader::new(ByteCursor::new(data))
}

fn collect_string_tokens(data: &[u8]) -> Vec<Vec<u8>> {
    let mut reader = reader(data);
    let mut tokens = vec![];

    while let Some(token) = reader.read_string_token().unwrap() {
        tokens.push(token.to_vec());
    }
    tokens
}

#[test]
fn string_tokens_split_on_whitespace() {
    let tokens = collect_string_tokens(b"0010 1111");

    assert_eq!(tokens, [b"0010".to_vec(), b"1111".to_vec()]);
}

#[test]
fn string_tokens_split_on_any_whitespace_byte() {
    let tokens = collect_string_tokens(b"a b\tc\rd\ne");

    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0], b"a");
    assert_eq!(tokens[4], b"e");
}

#[test]
fn string_tokens_are_never_empty() {
    // leading and trailing whitespace runs must not produce tokens
    let tokens = collect_string_tokens(b"  \t\r\n  P2  \n ");

    assert_eq!(tokens, [b"P2".to_vec()]);
}

#[test]
fn comments_count_as_whitespace() {
    let tokens = collect_string_tokens(b"P2 # a comment\n3 #another\r2");

    assert_eq!(tokens, [b"P2".to_vec(), b"3".to_vec(), b"2".to_vec()]);
}

#[test]
fn comment_terminates_a_token() {
    // the comment byte itself delimits the running token
    let tokens = collect_string_tokens(b"12#34\n56");

    assert_eq!(tokens, [b"12".to_vec(), b"56".to_vec()]);
}

#[test]
fn comment_running_to_eof_yields_no_token() {
    let tokens = collect_string_tokens(b"ab # trailing comment without newline");

    assert_eq!(tokens, [b"ab".to_vec()]);
}

#[test]
fn empty_input_has_no_tokens() {
    let mut reader = reader(b"");

    assert!(reader.read_string_token().unwrap().is_none());
    assert!(reader.read_char_token().unwrap().is_none());
    assert!(reader.read_byte().unwrap().is_none());
}

#[test]
fn char_tokens_need_no_separator() {
    let mut reader = reader(b"0010 1111");
    let mut tokens = vec![];

    while let Some(chr) = reader.read_char_token().unwrap() {
        tokens.push(chr);
    }
    assert_eq!(tokens, b"00101111");
}

#[test]
fn char_tokens_skip_comments() {
    let mut reader = reader(b"1#01\n0");

    assert_eq!(reader.read_char_token().unwrap(), Some(b'1'));
    assert_eq!(reader.read_char_token().unwrap(), Some(b'0'));
    assert_eq!(reader.read_char_token().unwrap(), None);
}

#[test]
fn read_byte_is_raw() {
    // raw reads must deliver whitespace bytes verbatim
    let mut reader = reader(b" \n#");

    assert_eq!(reader.read_byte().unwrap(), Some(b' '));
    assert_eq!(reader.read_byte().unwrap(), Some(b'\n'));
    assert_eq!(reader.read_byte().unwrap(), Some(b'#'));
    assert_eq!(reader.read_byte().unwrap(), None);
}

#[test]
fn token_delimiter_is_not_delivered_to_raw_reads() {
    // after a token read, exactly one delimiter byte has been consumed,
    // the raster bytes after it are delivered verbatim even if they look
    // like whitespace
    let mut reader = reader(b"255 \n\t\rdata");

    assert_eq!(reader.read_string_token().unwrap(), Some(&b"255"[..]));

    let mut raw = [0_u8; 7];
    assert_eq!(reader.read_bulk(&mut raw).unwrap(), 7);
    assert_eq!(&raw, b"\n\t\rdata");
}

#[test]
fn bulk_read_returns_short_count_at_eof() {
    let mut reader = reader(b"abcde");
    let mut buf = [0_u8; 16];

    assert_eq!(reader.read_bulk(&mut buf).unwrap(), 5);
    assert_eq!(&buf[..5], b"abcde");
    // nothing left, a further bulk read reports zero bytes
    assert_eq!(reader.read_bulk(&mut buf).unwrap(), 0);
}

#[test]
fn bulk_read_spans_internal_refills() {
    // more data than the internal buffer holds, a single bulk read must
    // keep going back to the source
    let data: Vec<u8> = (0..u32::from(u16::MAX)).map(|i| (i % 251) as u8).collect();
    let mut reader = TokenReader::new(ByteCursor::new(data.as_slice()));

    let mut out = vec![0_u8; data.len()];
    assert_eq!(reader.read_bulk(&mut out).unwrap(), data.len());
    assert_eq!(out, data);
}

#[test]
fn tokens_span_internal_refills() {
    // a whitespace run longer than the internal buffer followed by a
    // token that itself straddles a refill boundary
    let mut data = vec![b' '; 4000];
    data.extend_from_slice(&[b'7'; 200]);
    data.push(b' ');

    let mut reader = TokenReader::new(ByteCursor::new(data.as_slice()));
    let token = reader.read_string_token().unwrap().unwrap();

    assert_eq!(token, &[b'7'; 200][..]);
}

#[test]
fn single_byte_reads_after_bulk_read() {
    let mut reader = reader(b"abcdef");
    let mut buf = [0_u8; 3];

    assert_eq!(reader.read_bulk(&mut buf).unwrap(), 3);
    assert_eq!(reader.read_byte().unwrap(), Some(b'd'));
    assert_eq!(reader.read_byte().unwrap(), Some(b'e'));
    assert_eq!(reader.read_byte().unwrap(), Some(b'f'));
    assert_eq!(reader.read_byte().unwrap(), None);
}
