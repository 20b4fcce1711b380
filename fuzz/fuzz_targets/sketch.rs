#![no_main]

use hll_sketch::{murmur3_x86_32, HyperLogLog};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let precision = 4 + data[0] % 15;
    let split_index = murmur3_x86_32(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut sketch1 = HyperLogLog::<[u8]>::new(precision).unwrap();
    for chunk in first_half.chunks(4) {
        sketch1.add(chunk);
        assert!(sketch1.count() > 0);
    }

    let mut sketch2 = HyperLogLog::<[u8]>::new(precision).unwrap();
    for chunk in second_half.chunks(4) {
        sketch2.add(chunk);
        assert!(sketch2.count() > 0);
    }

    let union = sketch2.union(&sketch1).unwrap();
    sketch1.merge(&sketch2).unwrap();
    assert_eq!(sketch1, union);
    assert!(sketch1.count() > 0);
});
