use std::{fmt, str::FromStr};

use sampling::distributions::SecretDistribution;

use crate::error::Error;

/// Named parameter sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamSet {
    Toy,
    Medium,
    Std128Lmkcdey,
    Std128Ap,
    Std128Apopt,
    Std128,
    Std128Opt,
    Std192,
    Std192Opt,
    Std256,
    Std256Opt,
    Std128Q,
    Std128QOpt,
    Std192Q,
    Std192QOpt,
    Std256Q,
    Std256QOpt,
    SignedModTest,
}

impl ParamSet {
    pub const ALL: [ParamSet; 18] = [
        ParamSet::Toy,
        ParamSet::Medium,
        ParamSet::Std128Lmkcdey,
        ParamSet::Std128Ap,
        ParamSet::Std128Apopt,
        ParamSet::Std128,
        ParamSet::Std128Opt,
        ParamSet::Std192,
        ParamSet::Std192Opt,
        ParamSet::Std256,
        ParamSet::Std256Opt,
        ParamSet::Std128Q,
        ParamSet::Std128QOpt,
        ParamSet::Std192Q,
        ParamSet::Std192QOpt,
        ParamSet::Std256Q,
        ParamSet::Std256QOpt,
        ParamSet::SignedModTest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParamSet::Toy => "TOY",
            ParamSet::Medium => "MEDIUM",
            ParamSet::Std128Lmkcdey => "STD128_LMKCDEY",
            ParamSet::Std128Ap => "STD128_AP",
            ParamSet::Std128Apopt => "STD128_APOPT",
            ParamSet::Std128 => "STD128",
            ParamSet::Std128Opt => "STD128_OPT",
            ParamSet::Std192 => "STD192",
            ParamSet::Std192Opt => "STD192_OPT",
            ParamSet::Std256 => "STD256",
            ParamSet::Std256Opt => "STD256_OPT",
            ParamSet::Std128Q => "STD128Q",
            ParamSet::Std128QOpt => "STD128Q_OPT",
            ParamSet::Std192Q => "STD192Q",
            ParamSet::Std192QOpt => "STD192Q_OPT",
            ParamSet::Std256Q => "STD256Q",
            ParamSet::Std256QOpt => "STD256Q_OPT",
            ParamSet::SignedModTest => "SIGNED_MOD_TEST",
        }
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamSet::ALL
            .iter()
            .find(|set| set.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::UnknownProfile(s.to_string()))
    }
}

/// One row of the catalogue.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NamedParams {
    pub bits: u32,
    pub cycl_order: u64,
    pub n: usize,
    pub q: u64,
    /// `None` reuses the ring modulus `Q` for key switching.
    pub q_ks: Option<u64>,
    pub base_ks: u64,
    pub base_g: u32,
    pub base_r: u32,
    pub key_dist: SecretDistribution,
}

const fn row(
    bits: u32,
    cycl_order: u64,
    n: usize,
    q: u64,
    q_ks: Option<u64>,
    base_ks: u64,
    base_g: u32,
    base_r: u32,
    key_dist: SecretDistribution,
) -> NamedParams {
    NamedParams {
        bits,
        cycl_order,
        n,
        q,
        q_ks,
        base_ks,
        base_g,
        base_r,
        key_dist,
    }
}

const TERNARY: SecretDistribution = SecretDistribution::UniformTernary;
const GAUSSIAN: SecretDistribution = SecretDistribution::Gaussian;

pub(crate) fn lookup(set: ParamSet) -> NamedParams {
    #[rustfmt::skip]
    let params: NamedParams = match set {
        //                                  bits | order | n   | q   | q_ks           | base_ks | base_g | base_r | dist
        ParamSet::Toy           => row(27, 1024,   64, 512,  None,          25,     1 << 9,  23, TERNARY),
        ParamSet::Medium        => row(28, 2048,  422, 1024, Some(1 << 14), 1 << 7, 1 << 10, 32, TERNARY),
        ParamSet::Std128Lmkcdey => row(28, 2048,  458, 1024, Some(1 << 14), 1 << 7, 1 << 10, 32, GAUSSIAN),
        ParamSet::Std128Ap      => row(27, 2048,  512, 1024, Some(1 << 14), 1 << 7, 1 << 9,  32, TERNARY),
        ParamSet::Std128Apopt   => row(27, 2048,  502, 1024, Some(1 << 14), 1 << 7, 1 << 9,  32, TERNARY),
        ParamSet::Std128        => row(27, 2048,  512, 1024, Some(1 << 14), 1 << 7, 1 << 7,  32, TERNARY),
        ParamSet::Std128Opt     => row(27, 2048,  502, 1024, Some(1 << 14), 1 << 7, 1 << 7,  32, TERNARY),
        ParamSet::Std192        => row(37, 4096, 1024, 1024, Some(1 << 19), 28,     1 << 13, 32, TERNARY),
        ParamSet::Std192Opt     => row(37, 4096,  805, 1024, Some(1 << 15), 32,     1 << 13, 32, TERNARY),
        ParamSet::Std256        => row(29, 4096, 1024, 2048, Some(1 << 14), 1 << 7, 1 << 8,  46, TERNARY),
        ParamSet::Std256Opt     => row(29, 4096,  990, 2048, Some(1 << 14), 1 << 7, 1 << 8,  46, TERNARY),
        ParamSet::Std128Q       => row(50, 4096, 1024, 1024, Some(1 << 25), 32,     1 << 25, 32, TERNARY),
        ParamSet::Std128QOpt    => row(50, 4096,  585, 1024, Some(1 << 15), 32,     1 << 25, 32, TERNARY),
        ParamSet::Std192Q       => row(35, 4096, 1024, 1024, Some(1 << 17), 64,     1 << 12, 32, TERNARY),
        ParamSet::Std192QOpt    => row(35, 4096,  875, 1024, Some(1 << 15), 32,     1 << 12, 32, TERNARY),
        ParamSet::Std256Q       => row(27, 4096, 2048, 2048, Some(1 << 16), 16,     1 << 7,  46, TERNARY),
        ParamSet::Std256QOpt    => row(27, 4096, 1225, 1024, Some(1 << 16), 16,     1 << 7,  32, TERNARY),
        ParamSet::SignedModTest => row(28, 2048,  512, 1024, None,          25,     1 << 7,  23, TERNARY),
    };
    params
}
