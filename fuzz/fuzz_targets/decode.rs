#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(document) = smile_json::decode(data) {
        assert!(document.consumed() <= data.len());
    }
    let _ = smile_json::decode_value(data);
});
