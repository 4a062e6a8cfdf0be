use crate::modulus::Modulus;

const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Deterministic Miller-Rabin over 64-bit words.
pub fn is_prime(x: u64) -> bool {
    if x < 2 {
        return false;
    }
    for p in WITNESSES {
        if x % p == 0 {
            return x == p;
        }
    }

    let mut d: u64 = x - 1;
    let mut s: u32 = 0;
    while d & 1 == 0 {
        d >>= 1;
        s += 1;
    }

    let pow = |a: u64, mut e: u64| -> u64 {
        let mut base: u128 = a as u128;
        let mut res: u128 = 1;
        while e > 0 {
            if e & 1 == 1 {
                res = res * base % x as u128;
            }
            base = base * base % x as u128;
            e >>= 1;
        }
        res as u64
    };

    'witness: for a in WITNESSES {
        let mut y: u64 = pow(a, d);
        if y == 1 || y == x - 1 {
            continue;
        }
        for _ in 1..s {
            y = (y as u128 * y as u128 % x as u128) as u64;
            if y == x - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Smallest prime `p > 2^bits` with `p = 1 mod m`.
pub fn first_prime(bits: u32, m: u64) -> u64 {
    let r: u64 = 1 << bits;
    let mut p: u64 = r + (m - r % m) % m + 1;
    while !is_prime(p) {
        p += m;
    }
    p
}

/// Largest prime `< p` congruent to `p` mod `m`.
pub fn previous_prime(p: u64, m: u64) -> u64 {
    let mut q: u64 = p - m;
    while !is_prime(q) {
        q -= m;
    }
    q
}

/// Primitive `m`-th root of unity mod the prime `q`, for `m` a power of two dividing `q - 1`.
pub fn root_of_unity(m: u64, q: u64) -> u64 {
    #[cfg(debug_assertions)]
    {
        assert!(m.is_power_of_two(), "m must be a power of two but is {}", m);
        assert_eq!((q - 1) % m, 0, "m={} does not divide q-1={}", m, q - 1);
    }
    let modulus: Modulus = Modulus::new(q);
    let exp: u64 = (q - 1) / m;
    let mut g: u64 = 2;
    loop {
        let r: u64 = modulus.pow(g, exp);
        if modulus.pow(r, m >> 1) == q - 1 {
            return r;
        }
        g += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{first_prime, is_prime, previous_prime, root_of_unity};
    use crate::modulus::Modulus;

    #[test]
    fn miller_rabin() {
        let primes: [u64; 6] = [2, 3, 97, 12289, 65537, 0x1fffffffffe00001];
        primes.iter().for_each(|p| assert!(is_prime(*p), "{}", p));
        let composites: [u64; 6] = [0, 1, 561, 3215031751, 65535, 4294967297];
        composites.iter().for_each(|c| assert!(!is_prime(*c), "{}", c));
    }

    #[test]
    fn prime_search() {
        let m: u64 = 2048;
        let p: u64 = first_prime(27, m);
        assert!(p > 1 << 27);
        assert_eq!(p % m, 1);
        assert!(is_prime(p));
        let q: u64 = previous_prime(p, m);
        assert!(q < 1 << 27);
        assert_eq!(q % m, 1);
        assert!(is_prime(q));
        assert_eq!(first_prime(16, 2), 65537);
        let mut x: u64 = q + m;
        while x < p {
            assert!(!is_prime(x));
            x += m;
        }
    }

    #[test]
    fn roots() {
        let q: u64 = 12289;
        let psi: u64 = root_of_unity(512, q);
        let modulus: Modulus = Modulus::new(q);
        assert_eq!(modulus.pow(psi, 512), 1);
        assert_eq!(modulus.pow(psi, 256), q - 1);
    }
}
