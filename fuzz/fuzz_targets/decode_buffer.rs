#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // fuzzed code goes here

    use netpbm::bytestream::ByteCursor;
    let data = ByteCursor::new(data);

    let mut decoder = netpbm::NetpbmDecoder::new(data);
    let _ = decoder.decode();
});
