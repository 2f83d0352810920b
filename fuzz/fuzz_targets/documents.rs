#![no_main]

use libfuzzer_sys::fuzz_target;
use smile_json::Decoder;

fuzz_target!(|data: &[u8]| {
    let decoder = Decoder::builder()
        .max_depth(64)
        .max_number_len(64)
        .table_capacity(16)
        .build();

    let mut documents = decoder.documents(data);
    for r in &mut documents {
        if let Err(e) = r {
            assert!(e.offset() <= data.len());
        }
    }
    assert!(documents.offset() <= data.len());
});
