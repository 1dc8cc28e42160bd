#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(data) = std::str::from_utf8(data) {
        let _ = jack::lexer::Lexer::new(data).collect::<Vec<_>>();
    }
});
