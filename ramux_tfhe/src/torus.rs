use crate::PlaintextBits;

const TORUS_SIZE: f64 = 18446744073709551616.0;

/// Place `msg` in the top `bits` bits of a torus element.
///
/// # Panics
/// If `bits` is zero or at least 64.
pub fn encode(msg: u64, bits: PlaintextBits) -> u64 {
    assert!(bits.0 > 0 && bits.0 < u64::BITS);

    (msg & ((1 << bits.0) - 1)) << (u64::BITS - bits.0)
}

/// Round a torus element to the nearest encoded message and return that
/// message.
///
/// # Panics
/// If `bits` is zero or at least 64.
pub fn decode(val: u64, bits: PlaintextBits) -> u64 {
    assert!(bits.0 > 0 && bits.0 < u64::BITS);

    let shift = u64::BITS - bits.0;
    let rounded = ((val >> (shift - 1)).wrapping_add(1)) >> 1;

    rounded & ((1 << bits.0) - 1)
}

/// Convert a real number, interpreted as a fraction of the torus, into a
/// torus element.
pub fn from_f64(val: f64) -> u64 {
    let frac = val - val.round();

    (frac * TORUS_SIZE).round() as i64 as u64
}

/// Interpret a torus element as a signed fraction in `[-0.5, 0.5)`.
pub fn to_f64(val: u64) -> f64 {
    val as i64 as f64 / TORUS_SIZE
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn can_encode_bit() {
        assert_eq!(encode(0, PlaintextBits(1)), 0);
        assert_eq!(encode(1, PlaintextBits(1)), 0x1 << 63);
        assert_eq!(encode(1, PlaintextBits(2)), 0x1 << 62);
        assert_eq!(encode(3, PlaintextBits(1)), 0x1 << 63);
    }

    #[test]
    fn decode_rounds_to_nearest() {
        let bits = PlaintextBits(1);

        assert_eq!(decode((0x1 << 62) - 1, bits), 0);
        assert_eq!(decode(0x1 << 62, bits), 1);
        assert_eq!(decode(0u64.wrapping_sub(0x1 << 60), bits), 0);
        assert_eq!(decode((0x1 << 63) + (0x1 << 61), bits), 1);
    }

    #[test]
    fn f64_conversion_is_signed() {
        assert_eq!(from_f64(0.25), 0x1 << 62);
        assert_eq!(from_f64(-0.25), 0u64.wrapping_sub(0x1 << 62));
        assert_eq!(from_f64(1.25), 0x1 << 62);
        assert_eq!(to_f64(0u64.wrapping_sub(0x1 << 62)), -0.25);
    }

    proptest! {
        #[test]
        fn noisy_decode_recovers_message(msg in 0u64..16, noise in -(1i64 << 58)..(1i64 << 58)) {
            let bits = PlaintextBits(4);
            let val = encode(msg, bits).wrapping_add(noise as u64);

            prop_assert_eq!(decode(val, bits), msg);
        }
    }
}
