#![no_main]

use libfuzzer_sys::fuzz_target;
use xiangqi::{iccs::Iccs, Move};

fuzz_target!(|data: &[u8]| {
    let Ok(iccs) = Iccs::from_ascii(data) else {
        return;
    };
    let roundtripped = Iccs::from_ascii(iccs.to_string().as_bytes()).expect("roundtrip");
    assert_eq!(iccs, roundtripped);
    let back: Iccs = Move::from(iccs).into();
    assert_eq!(back, iccs);
});
