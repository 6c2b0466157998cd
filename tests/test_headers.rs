/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Tests for header parsing and probing.

use netpbm::bytestream::ByteCursor;
use netpbm::{
    probe_netpbm, NetpbmDecodeErrors, NetpbmDecoder, NetpbmHeader, NetpbmOptions, NetpbmSignature
};

fn decoder(data: &[u8]) -> NetpbmDecoder<ByteCursor<&[u8]>> {
    NetpbmDecoder::new(ByteCursor::new(data))
}

fn parse_header(data: &[u8]) -> Result<NetpbmHeader, NetpbmDecodeErrors> {
    let mut decoder = decoder(data);
    decoder.decode_headers()?;
    Ok(decoder.header().unwrap())
}

#[test]
fn parses_headers_with_max_value() {
    let with_max_value = [
        (&b"P2 3 2 255"[..], NetpbmSignature::P2),
        (&b"P3 3 2 255"[..], NetpbmSignature::P3),
        (&b"P5 3 2 255"[..], NetpbmSignature::P5),
        (&b"P6 3 2 255"[..], NetpbmSignature::P6)
    ];

    for (data, signature) in with_max_value {
        let header = parse_header(data).unwrap();

        assert_eq!(header.signature, signature);
        assert_eq!((header.width, header.height), (3, 2));
        assert_eq!(header.max_value, 255);
    }
}

#[test]
fn bitmap_max_value_is_fixed_and_not_read_from_the_stream() {
    // were P1/P4 to consume a max value token, "0" would be eaten here
    // and the raster would shift
    for data in [&b"P1 2 1 0 1"[..], &b"P4 2 1 \xc0"[..]] {
        let header = parse_header(data).unwrap();

        assert!(header.signature.is_bitmap());
        assert_eq!(header.max_value, 1);
    }

    let mut decoder = decoder(b"P1 2 1 0 1");
    assert_eq!(decoder.decode().unwrap(), [255, 0]);
}

#[test]
fn comments_are_header_transparent() {
    let plain = parse_header(b"P2 3 2 255").unwrap();
    let commented = parse_header(
        b"#leading\nP2 #sig\n # after sig\n3 #width\n2 #height\n255 #max\n"
    )
    .unwrap();

    assert_eq!(plain, commented);
}

#[test]
fn signature_match_uses_leading_bytes_only() {
    // the signature token may carry trailing junk, only its head counts
    let header = parse_header(b"P2junk 3 2 255").unwrap();

    assert_eq!(header.signature, NetpbmSignature::P2);
}

#[test]
fn bad_signature_is_a_header_error() {
    for data in [&b"P7 1 1 255"[..], &b"X5 1 1 255"[..], &b""[..]] {
        let err = parse_header(data).unwrap_err();

        assert!(
            matches!(&err, NetpbmDecodeErrors::Header(cause)
                if matches!(**cause, NetpbmDecodeErrors::BadSignature)),
            "{:?}",
            err
        );
    }
}

#[test]
fn unparsable_number_is_a_header_error() {
    for data in [
        &b"P2 x 2 255"[..],
        &b"P2 3 -2 255"[..],
        &b"P5 3 2 abc"[..],
        &b"P2 3"[..]
    ] {
        let err = parse_header(data).unwrap_err();

        assert!(matches!(err, NetpbmDecodeErrors::Header(_)), "{:?}", err);
    }
}

#[test]
fn zero_dimensions_and_zero_max_value_are_rejected() {
    assert!(parse_header(b"P2 0 2 255").is_err());
    assert!(parse_header(b"P2 3 0 255").is_err());
    assert!(parse_header(b"P2 3 2 0").is_err());
}

#[test]
fn dimension_limits_are_enforced() {
    let options = NetpbmOptions::default().set_max_width(16).set_max_height(16);
    let mut decoder =
        NetpbmDecoder::new_with_options(ByteCursor::new(&b"P5 17 4 255"[..]), options);

    let err = decoder.decode_headers().unwrap_err();
    assert!(
        matches!(err, NetpbmDecodeErrors::LargeDimensions(16, 17)),
        "{:?}",
        err
    );
}

#[test]
fn accessors_are_gated_on_header_decode() {
    let mut decoder = decoder(b"P6 4 3 255 ");

    assert!(decoder.header().is_none());
    assert!(decoder.dimensions().is_none());
    assert!(decoder.colorspace().is_none());
    assert!(decoder.max_value().is_none());
    assert!(decoder.output_buf_size().is_none());

    decoder.decode_headers().unwrap();

    assert_eq!(decoder.dimensions(), Some((4, 3)));
    assert_eq!(
        decoder.colorspace(),
        Some(netpbm::colorspace::ColorSpace::RGB)
    );
    assert_eq!(decoder.max_value(), Some(255));
    assert_eq!(decoder.output_buf_size(), Some(4 * 3 * 3));
}

#[test]
fn header_decode_is_idempotent() {
    let mut decoder = decoder(b"P2 2 1 255 7 9");

    decoder.decode_headers().unwrap();
    decoder.decode_headers().unwrap();

    // the second call must not have consumed raster tokens
    assert_eq!(decoder.decode().unwrap(), [7, 9]);
}

#[test]
fn probe_accepts_the_six_signatures() {
    for sig in [b"P1", b"P2", b"P3", b"P4", b"P5", b"P6"] {
        let mut data = sig.to_vec();
        data.extend_from_slice(b" 1 1 255 0");
        assert!(probe_netpbm(&data));
    }
}

#[test]
fn probe_rejects_everything_else() {
    assert!(!probe_netpbm(b""));
    assert!(!probe_netpbm(b"P"));
    assert!(!probe_netpbm(b"P0 1 1"));
    assert!(!probe_netpbm(b"P7 1 1"));
    assert!(!probe_netpbm(b"BM"));
    assert!(!probe_netpbm(b"Q5 1 1"));
}
