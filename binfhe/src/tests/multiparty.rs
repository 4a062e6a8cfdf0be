use std::sync::OnceLock;

use backend::prime::{first_prime, previous_prime};
use binfhe_core::{
    BlindRotationKeyCGGI, CommonReference, LWECiphertext, LWEPublicKey, LWESecret, LWESwitchingKey, RGSWCiphertext,
};

use super::init_tracing;
use crate::{BinFheContext, BinFheMethod, BinGate, CiphertextSize, CryptoParams, DecryptionShare, Error, LWEKeyPair};

const PARTIES: usize = 2;

struct Parties {
    ctx: BinFheContext,
    small: Vec<LWESecret>,
    large: Vec<LWESecret>,
    pk: LWEPublicKey,
}

fn params() -> CryptoParams {
    let big_q: u64 = previous_prime(first_prime(27, 1024), 1024);
    let mut params: CryptoParams = CryptoParams::explicit(32, 512, 1024, big_q, 3.19, 32, 1 << 5, 23, BinFheMethod::Ginx);
    params.num_parties = PARTIES;
    params
}

fn parties() -> &'static Parties {
    static FIXTURE: OnceLock<Parties> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        init_tracing();
        let mut ctx: BinFheContext = BinFheContext::with_seed(params(), [5u8; 32]).unwrap();
        let small: Vec<LWESecret> = (0..PARTIES).map(|_| ctx.key_gen()).collect();
        let large: Vec<LWESecret> = (0..PARTIES).map(|_| ctx.key_gen_large()).collect();

        let mut pk: Option<LWEPublicKey> = None;
        let mut ksk: Option<LWESwitchingKey> = None;
        (0..PARTIES).for_each(|j| {
            pk = Some(ctx.multiparty_pub_key_gen(&large[j], pk.as_ref()));
            ksk = Some(ctx.multiparty_key_switch_gen(&small[j], &large[j], ksk.as_ref()));
        });

        let acrs: CommonReference = ctx.generate_acrs();
        let shares: Vec<RGSWCiphertext> = (0..PARTIES)
            .map(|j| ctx.rgsw_encrypt(&acrs, &large[j], 0, j == 0))
            .collect();
        let rgsw_zero: RGSWCiphertext = shares[1..]
            .iter()
            .fold(shares[0].clone(), |acc, share| ctx.rgsw_eval_add(&acc, share));

        let mut brk: Option<BlindRotationKeyCGGI> = None;
        (0..PARTIES).for_each(|j| {
            brk = Some(
                ctx.multiparty_bt_key_gen(&small[j], &rgsw_zero, brk.as_ref())
                    .unwrap(),
            );
        });
        ctx.install_multiparty_key(brk.unwrap(), ksk.unwrap()).unwrap();

        Parties {
            ctx,
            small,
            large,
            pk: pk.unwrap(),
        }
    })
}

fn threshold_decrypt(fx: &Parties, ctx: &mut BinFheContext, ct: &LWECiphertext, p: u64) -> u64 {
    let mut shares: Vec<DecryptionShare> = vec![ctx.multiparty_decrypt_lead(&fx.small[0], ct).unwrap()];
    fx.small[1..]
        .iter()
        .for_each(|s_j| shares.push(ctx.multiparty_decrypt_main(s_j, ct).unwrap()));
    ctx.multiparty_decrypt_fusion(&shares, p).unwrap()
}

#[test]
fn rgsw_shares() {
    let fx: &Parties = parties();
    let mut ctx: BinFheContext = BinFheContext::with_seed(params(), [6u8; 32]).unwrap();
    let acrs: CommonReference = ctx.generate_acrs();
    let joint: LWESecret = LWESecret::sum(&fx.large).unwrap();

    let one_lead: RGSWCiphertext = ctx.rgsw_encrypt(&acrs, &fx.large[0], 1, true);
    let one_main: RGSWCiphertext = ctx.rgsw_encrypt(&acrs, &fx.large[1], 1, false);
    let one: RGSWCiphertext = ctx.rgsw_eval_add(&one_lead, &one_main);
    assert_eq!(ctx.rgsw_decrypt(&one, &joint), 1);

    let zero_lead: RGSWCiphertext = ctx.rgsw_encrypt(&acrs, &fx.large[0], 0, true);
    let zero_main: RGSWCiphertext = ctx.rgsw_encrypt(&acrs, &fx.large[1], 0, false);
    let zero: RGSWCiphertext = ctx.rgsw_eval_add(&zero_lead, &zero_main);
    assert_eq!(ctx.rgsw_decrypt(&zero, &joint), 0);
}

#[test]
fn threshold_gates() {
    let fx: &Parties = parties();
    let mut ctx: BinFheContext = BinFheContext::with_seed(params(), [7u8; 32]).unwrap();
    let joint_small: LWESecret = LWESecret::sum(&fx.small).unwrap();
    assert_eq!(fx.ctx.keys().active().unwrap().brk.blocks(), PARTIES);

    (0..4u64).for_each(|i| {
        let (a, b) = (i & 1, i >> 1);
        let large_a: LWECiphertext = ctx.encrypt_public(&fx.pk, a, CiphertextSize::Large, 4).unwrap();
        let large_b: LWECiphertext = ctx.encrypt_public(&fx.pk, b, CiphertextSize::Large, 4).unwrap();
        let ksk: &LWESwitchingKey = fx.ctx.keys().key_switching_key().unwrap();
        let ct_a: LWECiphertext = fx.ctx.switch_down(ksk, &large_a).unwrap();
        let ct_b: LWECiphertext = fx.ctx.switch_down(ksk, &large_b).unwrap();
        assert_eq!(threshold_decrypt(fx, &mut ctx, &ct_a, 4), a);

        let res: LWECiphertext = fx.ctx.eval_bin_gate(BinGate::Nand, &ct_a, &ct_b).unwrap();
        let fused: u64 = threshold_decrypt(fx, &mut ctx, &res, 4);
        assert_eq!(fused, 1 ^ (a & b));
        assert_eq!(fx.ctx.decrypt(&joint_small, &res, 4), Ok(fused));
    });
}

#[test]
fn fusion_requires_every_share() {
    let fx: &Parties = parties();
    let mut ctx: BinFheContext = BinFheContext::with_seed(params(), [8u8; 32]).unwrap();
    let ct: LWECiphertext = ctx.encrypt(&fx.small[0], 1, 4, None).unwrap();

    let lead: DecryptionShare = ctx.multiparty_decrypt_lead(&fx.small[0], &ct).unwrap();
    let main: DecryptionShare = ctx.multiparty_decrypt_main(&fx.small[1], &ct).unwrap();
    assert_eq!(
        ctx.multiparty_decrypt_fusion(&[lead], 4),
        Err(Error::IncompleteShares {
            expected: 2,
            received: 1,
            leads: 1
        })
    );
    assert_eq!(
        ctx.multiparty_decrypt_fusion(&[main, main], 4),
        Err(Error::IncompleteShares {
            expected: 2,
            received: 2,
            leads: 0
        })
    );
    assert_eq!(ctx.multiparty_decrypt_fusion(&[lead, main], 0), Err(Error::InvalidModulus(0)));
    assert!(ctx.multiparty_decrypt_fusion(&[lead, main], 4).is_ok());

    let partial: BlindRotationKeyCGGI = ctx
        .multiparty_bt_key_gen(&fx.small[0], &RGSWCiphertext::alloc(512, 6), None)
        .unwrap();
    let ksk: LWESwitchingKey = ctx.key_switch_gen(&fx.small[0], &fx.large[0]);
    assert_eq!(
        ctx.install_multiparty_key(partial, ksk),
        Err(Error::IncompleteShares {
            expected: 2,
            received: 1,
            leads: 1
        })
    );
}

#[test]
fn joint_key_pair() {
    let fx: &Parties = parties();
    let mut ctx: BinFheContext = BinFheContext::with_seed(params(), [9u8; 32]).unwrap();
    let pair: LWEKeyPair = ctx.multiparty_key_gen(&fx.large).unwrap();
    assert_eq!(pair.secret, LWESecret::sum(&fx.large).unwrap());
    let ct: LWECiphertext = ctx.encrypt_public(&pair.public, 3, CiphertextSize::Large, 4).unwrap();
    assert_eq!(ctx.decrypt(&pair.secret, &ct, 4), Ok(3));
    assert!(matches!(
        ctx.multiparty_key_gen(&[]),
        Err(Error::IncompleteShares { received: 0, .. })
    ));
}
