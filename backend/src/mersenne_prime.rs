use crate::limit::ExponentLimit;

/// Trial division by every integer from 2 up to and including ⌊√n⌋.
///
/// The bound is checked as `i <= n / i` so the comparison stays exact for
/// every `u64`, without going through floating point.
pub fn is_prime(n: u64) -> bool {
    let mut i: u64 = 2;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    n > 1
}

/// 2^p − 1, or `None` once the value no longer fits in a `u64`.
pub fn mersenne_number(p: u32) -> Option<u64> {
    1u64.checked_shl(p).map(|power| power - 1)
}

/// Every `(p, 2^p − 1)` pair for `p` in `[2, limit]`, stopping at the first
/// exponent whose candidate is not representable.
fn candidates(limit: u32) -> impl Iterator<Item = (u32, u64)> {
    (2..=limit).map_while(|p| mersenne_number(p).map(|candidate| (p, candidate)))
}

/// All Mersenne primes 2^p − 1 with `p` in `[2, limit]`, ordered by exponent.
///
/// No range validation happens here: callers are expected to bound `limit`
/// (see [`crate::limit::ExponentLimit`]), since the cost of trial division
/// grows with 2^(p/2).
pub fn generate_mersenne_primes(limit: u32) -> Vec<u64> {
    candidates(limit)
        .filter(|&(_, candidate)| is_prime(candidate))
        .map(|(_, candidate)| candidate)
        .collect()
}

/// The exponents behind [`generate_mersenne_primes`], in the same order.
pub fn mersenne_exponents(limit: u32) -> Vec<u32> {
    candidates(limit)
        .filter(|&(_, candidate)| is_prime(candidate))
        .map(|(p, _)| p)
        .collect()
}

/// Lucas–Lehmer test for 2^p − 1.
///
/// Returns `None` when the candidate does not fit in a `u64`. The residue is
/// squared in `u128` so no intermediate product can overflow.
pub fn lucas_lehmer(p: u32) -> Option<bool> {
    mersenne_number(p).map(|m| lucas_lehmer_residue(p, m))
}

/// Lucas–Lehmer on an exponent already known to be in range.
pub fn is_mersenne_prime(exponent: ExponentLimit) -> bool {
    lucas_lehmer_residue(exponent.get(), exponent.candidate())
}

fn lucas_lehmer_residue(p: u32, m: u64) -> bool {
    if p == 2 {
        return true;
    }

    if !primes::is_prime(p.into()) {
        return false;
    }

    let m = u128::from(m);
    let mut s: u128 = 4;
    for _ in 2..p {
        s = (s * s + m - 2) % m;
    }

    s == 0
}
