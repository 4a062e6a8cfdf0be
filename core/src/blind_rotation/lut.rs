use backend::Module;

/// Accumulator test polynomial for inputs modulo `domain`.
///
/// Coefficient `j` holds `f(j / (2N / domain))`. Only inputs in `[0, domain/2)` are
/// tabulated; the upper half of the domain is read through the negacyclic wrap, so the
/// evaluated function is `f(x + domain/2) = -f(x)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookUpTable {
    pub(crate) data: Vec<u64>,
    pub(crate) domain: u64,
}

impl LookUpTable {
    /// `f` maps inputs in `[0, domain/2)` to values in `[0, Q)`.
    pub fn from_fn<F: Fn(u64) -> u64>(module: &Module, domain: u64, f: F) -> Self {
        let n: usize = module.n();
        #[cfg(debug_assertions)]
        {
            assert_eq!((2 * n as u64) % domain, 0, "domain={} must divide 2N={}", domain, 2 * n);
        }
        let factor: u64 = 2 * n as u64 / domain;
        let data: Vec<u64> = (0..n as u64).map(|j| f(j / factor) % module.q()).collect();
        Self { data, domain }
    }

    pub fn domain(&self) -> u64 {
        self.domain
    }

    pub fn data(&self) -> &[u64] {
        &self.data
    }
}
