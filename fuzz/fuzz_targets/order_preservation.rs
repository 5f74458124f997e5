//! Fuzz test: for any two `i32`/`f64` values drawn from the fuzzer's raw
//! bytes, `a < b` iff `encode(a)` sorts before `encode(b)` as a byte
//! string (the order-preservation invariant every codec in this crate
//! promises).

#![no_main]
use libfuzzer_sys::fuzz_target;
use ordkey::codec::float::Float64Codec;
use ordkey::codec::int::I32Codec;
use ordkey::codec::Codec;

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }

    let mut a_bytes = [0u8; 4];
    let mut b_bytes = [0u8; 4];
    a_bytes.copy_from_slice(&data[0..4]);
    b_bytes.copy_from_slice(&data[4..8]);
    let a = i32::from_le_bytes(a_bytes);
    let b = i32::from_le_bytes(b_bytes);

    let mut enc_a = Vec::new();
    let mut enc_b = Vec::new();
    I32Codec.append(&mut enc_a, &a);
    I32Codec.append(&mut enc_b, &b);
    assert_eq!(a.cmp(&b), enc_a.cmp(&enc_b), "i32 {} vs {} order mismatch", a, b);

    let mut fa_bytes = [0u8; 8];
    let mut fb_bytes = [0u8; 8];
    fa_bytes.copy_from_slice(&data[8..16]);
    fb_bytes.copy_from_slice(&data[0..8]);
    let fa = f64::from_le_bytes(fa_bytes);
    let fb = f64::from_le_bytes(fb_bytes);
    if fa.is_nan() || fb.is_nan() {
        // NaN has no total order under `PartialOrd`; the encoding does,
        // but this target only checks values `f64` itself can order.
        return;
    }

    let mut enc_fa = Vec::new();
    let mut enc_fb = Vec::new();
    Float64Codec.append(&mut enc_fa, &fa);
    Float64Codec.append(&mut enc_fb, &fb);
    assert_eq!(
        fa.partial_cmp(&fb).unwrap(),
        enc_fa.cmp(&enc_fb),
        "f64 {} vs {} order mismatch",
        fa,
        fb
    );
});
