#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate ruhuff;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = ruhuff::decompress(data) {
        // anything that decodes must decode to what its header promised
        let info = ruhuff::inspect(data).unwrap();
        assert_eq!(output.len() as u64, info.original_len());
    }
});
