#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_passpersist::oid::Oid;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(oid) = Oid::parse(s) {
            // Anything accepted must print back to something that parses the same
            let reparsed = Oid::parse(&oid.to_string()).expect("display output must parse");
            assert_eq!(reparsed, oid);
        }
    }
});
