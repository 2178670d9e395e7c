#![no_main]

use libfuzzer_sys::fuzz_target;
use xiangqi::{packed::PackedBoard, Board};

fuzz_target!(|data: &[u8]| {
    let Ok(packed) = PackedBoard::from_ascii(data) else {
        return;
    };
    let roundtripped = PackedBoard::from_ascii(packed.to_string().as_bytes()).expect("roundtrip");
    assert_eq!(packed, roundtripped);
    assert_eq!(Board::from_packed(&packed).to_packed(), Ok(packed));
});
