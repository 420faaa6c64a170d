//! Fixed-point arithmetic primitives.
//!
//! Every operation names the fractional-bit count of its operands and of its
//! result explicitly; nothing is inferred. The requested result scale must be
//! reachable without a left shift: `out_frac <= a_frac + b_frac` for the
//! multiply family, `out_frac + b_frac >= a_frac` for the divide family.
//! Violating either is a caller error, not a checked condition.
//!
//! Rounding is to nearest, ties away from the shifted-off floor. Negative
//! values round on the negated magnitude rather than by shifting a raw
//! negative, so `-5 >> 1` rounds to `-3`, mirroring `5 >> 1 -> 3`.

#![allow(clippy::cast_lossless, clippy::cast_possible_truncation)]

/// Clamp a signed value to a symmetric absolute bound.
#[inline]
pub const fn clamp_abs(value: i32, bound: i32) -> i32 {
    if value > bound {
        bound
    } else if value < -bound {
        -bound
    } else {
        value
    }
}

/// Right shift toward negative infinity.
#[inline]
pub const fn shr_floor(value: i32, shift: u32) -> i32 {
    value >> shift
}

/// Right shift toward positive infinity.
#[inline]
pub const fn shr_ceil(value: i32, shift: u32) -> i32 {
    (-((-(value as i64)) >> shift)) as i32
}

/// Right shift to nearest, ties away from the floor.
#[inline]
pub const fn shr_round(value: i32, shift: u32) -> i32 {
    shr_round_i64(value as i64, shift) as i32
}

/// Unsigned right shift to nearest.
#[inline]
pub const fn ushr_round(value: u32, shift: u32) -> u32 {
    if shift == 0 {
        return value;
    }
    (((value as u64) + (1 << (shift - 1))) >> shift) as u32
}

/// Multiply two signed fixed-point values, truncating to `out_frac`
/// fractional bits.
#[inline]
pub const fn mul_q(a: i32, a_frac: u32, b: i32, b_frac: u32, out_frac: u32) -> i32 {
    (((a as i64) * (b as i64)) >> (a_frac + b_frac - out_frac)) as i32
}

/// Multiply two signed fixed-point values, rounding to `out_frac`
/// fractional bits.
#[inline]
pub const fn mul_q_round(a: i32, a_frac: u32, b: i32, b_frac: u32, out_frac: u32) -> i32 {
    shr_round_i64((a as i64) * (b as i64), a_frac + b_frac - out_frac) as i32
}

/// Multiply two unsigned fixed-point values, truncating to `out_frac`
/// fractional bits.
#[inline]
pub const fn umul_q(a: u32, a_frac: u32, b: u32, b_frac: u32, out_frac: u32) -> u32 {
    (((a as u64) * (b as u64)) >> (a_frac + b_frac - out_frac)) as u32
}

/// Multiply two unsigned fixed-point values, rounding to `out_frac`
/// fractional bits.
#[inline]
pub const fn umul_q_round(a: u32, a_frac: u32, b: u32, b_frac: u32, out_frac: u32) -> u32 {
    let shift = a_frac + b_frac - out_frac;
    let wide = (a as u64) * (b as u64);
    if shift == 0 {
        return wide as u32;
    }
    ((wide + (1 << (shift - 1))) >> shift) as u32
}

/// Divide two signed fixed-point values, truncating to `out_frac`
/// fractional bits.
#[inline]
pub const fn div_q(a: i32, a_frac: u32, b: i32, b_frac: u32, out_frac: u32) -> i32 {
    (((a as i64) << (out_frac + b_frac - a_frac)) / (b as i64)) as i32
}

/// Divide two signed fixed-point values, rounding the quotient to nearest.
#[inline]
pub const fn div_q_round(a: i32, a_frac: u32, b: i32, b_frac: u32, out_frac: u32) -> i32 {
    let num = (a as i64) << (out_frac + b_frac - a_frac);
    let den = b as i64;
    let quot = (num.abs() + den.abs() / 2) / den.abs();
    if (num < 0) != (den < 0) {
        (-quot) as i32
    } else {
        quot as i32
    }
}

/// Divide two unsigned fixed-point values, truncating to `out_frac`
/// fractional bits.
#[inline]
pub const fn udiv_q(a: u32, a_frac: u32, b: u32, b_frac: u32, out_frac: u32) -> u32 {
    (((a as u64) << (out_frac + b_frac - a_frac)) / (b as u64)) as u32
}

/// Divide two unsigned fixed-point values, rounding the quotient to nearest.
#[inline]
pub const fn udiv_q_round(a: u32, a_frac: u32, b: u32, b_frac: u32, out_frac: u32) -> u32 {
    let num = (a as u64) << (out_frac + b_frac - a_frac);
    let den = b as u64;
    ((num + den / 2) / den) as u32
}

/// Sign-aware round-to-nearest shift over the widened product domain.
#[inline]
pub(crate) const fn shr_round_i64(value: i64, shift: u32) -> i64 {
    if shift == 0 {
        return value;
    }
    let half = 1i64 << (shift - 1);
    if value < 0 {
        -((-value + half) >> shift)
    } else {
        (value + half) >> shift
    }
}
