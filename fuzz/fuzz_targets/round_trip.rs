#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate ruhuff;

fuzz_target!(|data: &[u8]| {
    let container = ruhuff::compress(data).unwrap();
    let output = ruhuff::decompress(&container).unwrap();
    assert_eq!(data, output.as_slice());
});
