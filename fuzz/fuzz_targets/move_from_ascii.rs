#![no_main]

use libfuzzer_sys::fuzz_target;
use xiangqi::Move;

fuzz_target!(|data: &[u8]| {
    let Ok(m) = Move::from_ascii(data) else {
        return;
    };
    let roundtripped = Move::from_ascii(m.to_string().as_bytes()).expect("roundtrip");
    assert_eq!(m, roundtripped);
});
