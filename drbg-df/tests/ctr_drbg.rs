//! `CTR_DRBG` known-answer tests.
//!
//! A minimal `CTR_DRBG` state machine is assembled from [`CtrDf`] so that the
//! derivation and generation stages can be checked against published
//! vectors end to end.

use aes::{Aes128, Aes256};
use drbg_df::{
    CtrDf, DerivationFunction,
    cipher::{BlockCipherEncrypt, KeyInit},
    counter,
};
use hex_literal::hex;

struct CtrDrbg<C> {
    df: CtrDf<C>,
    /// `Key || V`
    state: Vec<u8>,
    key_len: usize,
}

impl<C> CtrDrbg<C>
where
    C: BlockCipherEncrypt + KeyInit,
{
    fn instantiate(entropy: &[u8], nonce: &[u8], personalization: &[u8]) -> Self {
        let df = CtrDf::<C>::for_cipher().unwrap();
        let key_len = df.config().key_size_bits.unwrap() / 8;
        let seed_len = df.seed_len_bits() / 8;

        let seed_material = df
            .derive_bytes(&[entropy, nonce, personalization].concat())
            .unwrap();

        let mut drbg = Self {
            df,
            state: vec![0u8; seed_len],
            key_len,
        };
        drbg.update(&seed_material);
        drbg
    }

    /// `CTR_DRBG_Update`
    fn update(&mut self, provided_data: &[u8]) {
        let mut temp = self
            .df
            .generate_bytes(&self.state, self.df.seed_len_bits())
            .unwrap();
        for (t, d) in temp.iter_mut().zip(provided_data) {
            *t ^= d;
        }
        self.state = temp;
    }

    fn generate(&mut self, bits: usize, additional_input: &[u8]) -> Vec<u8> {
        let outlen = self.state.len() - self.key_len;
        let additional_input = if additional_input.is_empty() {
            vec![0u8; self.state.len()]
        } else {
            let derived = self.df.derive_bytes(additional_input).unwrap();
            self.update(&derived);
            derived
        };

        let out = self.df.generate_bytes(&self.state, bits).unwrap();

        // the generator leaves `V` untouched: advance it past the blocks used
        for _ in 0..(bits / 8).div_ceil(outlen) {
            counter::increment(&mut self.state[self.key_len..]);
        }

        self.update(&additional_input);
        out
    }
}

/// NIST CAVP `drbgvectors_no_reseed/CTR_DRBG.txt`:
/// [AES-128 use df], [PredictionResistance = False], COUNT = 0
#[test]
fn cavp_aes128_use_df() {
    let entropy = hex!("890eb067acf7382eff80b0c73bc872c6");
    let nonce = hex!("aad471ef3ef1d203");

    let mut drbg = CtrDrbg::<Aes128>::instantiate(&entropy, &nonce, &[]);
    drbg.generate(512, &[]);
    let returned_bits = drbg.generate(512, &[]);

    assert_eq!(
        returned_bits,
        hex!(
            "a5514ed7095f64f3d0d3a5760394ab42062f373a25072a6ea6bcfd8489e94af6"
            "cf18659fea22ed1ca0a9e33f718b115ee536b12809c31b72b08ddd8be1910fa3"
        )
    );
}

#[test]
fn instantiate_is_deterministic() {
    let entropy = [0x42u8; 32];
    let nonce = [0x24u8; 16];

    let mut a = CtrDrbg::<Aes256>::instantiate(&entropy, &nonce, b"personalization");
    let mut b = CtrDrbg::<Aes256>::instantiate(&entropy, &nonce, b"personalization");
    assert_eq!(a.state, b.state);
    assert_eq!(a.generate(256, b"additional"), b.generate(256, b"additional"));

    let mut c = CtrDrbg::<Aes256>::instantiate(&entropy, &nonce, b"Personalization");
    assert_ne!(a.state, c.state);
    assert_ne!(a.generate(256, &[]), c.generate(256, &[]));
}
