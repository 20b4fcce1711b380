#![no_main]

use std::io::Cursor;

use hll_sketch::{murmur3_x86_32, Murmur3};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let expected = murmur3::murmur3_32(&mut Cursor::new(data), 0).unwrap();
    assert_eq!(murmur3_x86_32(data, 0), expected);

    let mut state = Murmur3::new(0);
    for chunk in data.chunks(3) {
        state.write(chunk);
    }
    assert_eq!(state.finish(), expected);
});
