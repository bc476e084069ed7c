#![no_main]

use cryptanalysis::corpus::FrequencyTable;
use cryptanalysis::masker::Masker;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Table parsing must fail cleanly on any byte stream
    let _ = FrequencyTable::parse(data);

    if let Ok(input) = std::str::from_utf8(data) {
        let _ = FrequencyTable::from_corpus(input, 3);
        if let Ok(masker) = Masker::new(input) {
            assert_eq!(masker.extend(masker.reduce()).ok().as_deref(), Some(input));
        }
    }
});
