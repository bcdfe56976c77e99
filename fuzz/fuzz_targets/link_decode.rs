//! Fuzz target for LinkCodec::decode
//!
//! # Strategy
//!
//! - Random text: arbitrary strings as URLs (general malformation)
//! - Near misses: our prefix followed by arbitrary query text
//!
//! # Invariants
//!
//! - NEVER panic on malformed URLs
//! - A decoded message re-encodes to a link that decodes to the same message

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nfcmsg_proto::LinkCodec;

#[derive(Debug, Arbitrary)]
enum Input {
    Raw { web: bool, url: String },
    AfterPrefix { web: bool, query: String },
}

fn codec(web: bool) -> LinkCodec {
    if web { LinkCodec::web("nfcmsg.app") } else { LinkCodec::custom() }
}

fuzz_target!(|input: Input| {
    let (codec, url) = match input {
        Input::Raw { web, url } => (codec(web), url),
        Input::AfterPrefix { web, query } => {
            let codec = codec(web);
            let url = format!("{}?{query}", codec.prefix());
            (codec, url)
        },
    };

    if let Some(message) = codec.decode(&url) {
        let link = codec.encode(&message);
        assert_eq!(codec.decode(&link), Some(message), "re-encoded {link:?} from {url:?}");
    }
});
