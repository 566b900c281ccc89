//! Fuzz target for owner identifier parsing.
//!
//! Whatever parses must format and re-parse to the same identifier.

#![no_main]

use libfuzzer_sys::fuzz_target;
use player_auth::OwnerId;

fuzz_target!(|text: &str| {
    if let Ok(id) = text.parse::<OwnerId>() {
        assert_eq!(OwnerId::parse_hyphenated(&id.to_hyphenated()), Ok(id));
        assert_eq!(OwnerId::parse_bits(&id.bits_text()), Ok(id));
    }
});
