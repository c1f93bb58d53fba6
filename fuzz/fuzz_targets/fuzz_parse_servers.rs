#![no_main]

use libfuzzer_sys::fuzz_target;
use siridb_prompt::parse_server_list;

fuzz_target!(|input: &str| {
    if let Ok(endpoints) = parse_server_list(input) {
        assert!(!endpoints.is_empty());

        // Display output must parse back to the same endpoints
        let rendered: Vec<String> = endpoints.iter().map(|e| e.to_string()).collect();
        let reparsed = parse_server_list(&rendered.join(","))
            .expect("rendered server list should parse");
        assert_eq!(endpoints, reparsed);
    }
});
