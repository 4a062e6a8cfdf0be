use sampling::distributions::SecretDistribution;

/// Classical security targets of the homomorphic encryption standard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecurityLevel {
    Classic128,
    Classic192,
    Classic256,
}

const RING_DIMS: [usize; 6] = [1024, 2048, 4096, 8192, 16384, 32768];

// Largest log2(Q) per ring dimension of RING_DIMS.
const TERNARY_128: [u32; 6] = [27, 54, 109, 218, 438, 881];
const TERNARY_192: [u32; 6] = [19, 37, 75, 152, 305, 611];
const TERNARY_256: [u32; 6] = [14, 29, 58, 118, 237, 476];
const UNIFORM_128: [u32; 6] = [29, 56, 111, 220, 440, 883];
const UNIFORM_192: [u32; 6] = [21, 39, 77, 153, 305, 613];
const UNIFORM_256: [u32; 6] = [16, 31, 60, 120, 239, 478];

fn max_log_q(dist: SecretDistribution, level: SecurityLevel) -> &'static [u32; 6] {
    match (dist, level) {
        (SecretDistribution::UniformTernary, SecurityLevel::Classic128) => &TERNARY_128,
        (SecretDistribution::UniformTernary, SecurityLevel::Classic192) => &TERNARY_192,
        (SecretDistribution::UniformTernary, SecurityLevel::Classic256) => &TERNARY_256,
        (SecretDistribution::Gaussian, SecurityLevel::Classic128) => &UNIFORM_128,
        (SecretDistribution::Gaussian, SecurityLevel::Classic192) => &UNIFORM_192,
        (SecretDistribution::Gaussian, SecurityLevel::Classic256) => &UNIFORM_256,
    }
}

/// Smallest ring dimension reaching `level` for a modulus of `log_q` bits.
pub fn find_ring_dim(dist: SecretDistribution, level: SecurityLevel, log_q: u32) -> Option<usize> {
    RING_DIMS
        .iter()
        .zip(max_log_q(dist, level).iter())
        .find(|(_, max)| log_q <= **max)
        .map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::{SecurityLevel, find_ring_dim};
    use sampling::distributions::SecretDistribution;

    #[test]
    fn ring_dims() {
        let t: SecretDistribution = SecretDistribution::UniformTernary;
        assert_eq!(find_ring_dim(t, SecurityLevel::Classic128, 27), Some(1024));
        assert_eq!(find_ring_dim(t, SecurityLevel::Classic128, 28), Some(2048));
        assert_eq!(find_ring_dim(t, SecurityLevel::Classic128, 54), Some(2048));
        assert_eq!(find_ring_dim(t, SecurityLevel::Classic192, 54), Some(4096));
        assert_eq!(find_ring_dim(t, SecurityLevel::Classic256, 900), None);
        assert_eq!(
            find_ring_dim(SecretDistribution::Gaussian, SecurityLevel::Classic128, 29),
            Some(1024)
        );
    }
}
