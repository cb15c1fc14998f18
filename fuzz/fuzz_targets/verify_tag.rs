#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let a = (data[0] as usize) % (data.len() + 1);
    let b = (data[1] as usize) % (data.len() + 1);
    let (i, j) = if a <= b { (a, b) } else { (b, a) };

    let tag = &data[..i];
    let key = &data[i..j];
    let message = &data[j..];

    let verified = lp_cbc_mac::verify_tag(tag, message, key);
    if let Ok(computed) = lp_cbc_mac::compute_tag(message, key) {
        // Recomputation is deterministic and always verifies.
        assert_eq!(lp_cbc_mac::verify_tag(&computed, message, key), Ok(true));
        if let Ok(valid) = verified {
            assert_eq!(valid, computed.as_slice() == tag);
        }
    }
});
