use sampling::{distributions::DiscreteGaussian, source::Source};

use crate::modulus::Modulus;

pub trait FillUniform {
    /// Fills with uniform values in `[0, q)`.
    fn fill_uniform(&mut self, q: &Modulus, source: &mut Source);
}

pub trait AddNormal {
    /// Adds a rounded Gaussian of standard deviation `sigma`, truncated at six sigma.
    fn add_normal(&mut self, q: &Modulus, source: &mut Source, sigma: f64);
}

pub trait FillTernary {
    /// Fills with uniform ternary values mapped into `[0, q)`.
    fn fill_ternary(&mut self, q: &Modulus, source: &mut Source);
}

impl FillUniform for [u64] {
    fn fill_uniform(&mut self, q: &Modulus, source: &mut Source) {
        self.iter_mut().for_each(|x| *x = source.next_u64_mod(q.q()));
    }
}

impl AddNormal for [u64] {
    fn add_normal(&mut self, q: &Modulus, source: &mut Source, sigma: f64) {
        let dist: DiscreteGaussian = DiscreteGaussian::new(sigma);
        self.iter_mut()
            .for_each(|x| *x = q.add(*x, q.from_i64(dist.sample_i64(source))));
    }
}

impl FillTernary for [u64] {
    fn fill_ternary(&mut self, q: &Modulus, source: &mut Source) {
        self.iter_mut().for_each(|x| *x = q.from_i64(source.next_ternary()));
    }
}
