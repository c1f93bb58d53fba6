#![no_main]

use libfuzzer_sys::fuzz_target;
use siridb_prompt::prompt::format_response;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = format_response(&value);
    }
});
