#![no_main]

use libfuzzer_sys::fuzz_target;
use siridb_prompt::client::Request;

fuzz_target!(|line: &str| {
    match Request::parse(line) {
        Ok(Request::Query(text)) => assert_eq!(text, line.trim()),
        Ok(Request::Insert(document)) => assert!(document.is_object()),
        Err(_) => {}
    }
});
