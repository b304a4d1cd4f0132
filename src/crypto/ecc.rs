use crate::common::key_pair::EncodedKeyPair;
use crate::common::limits::MAX_COORDINATE_SIZE;
use crate::crypto::curve::{CurveId, CurveParams};
use crate::crypto::Error;
use elliptic_curve::generic_array::typenum::Unsigned;
use elliptic_curve::group::{Curve as _, Group};
use elliptic_curve::sec1::{FromEncodedPoint, ModulusSize, Tag, ToEncodedPoint};
use elliptic_curve::{
    AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, ProjectivePoint, PublicKey,
    SecretKey,
};
use k256::Secp256k1;
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use rand_chacha::rand_core::{CryptoRng, RngCore};
use sm2::Sm2;
use zeroize::Zeroize;

/// Generate an elliptic curve key pair.
///
/// # Arguments
///
/// * `rng`: Random number generator to use for key generation.
pub fn gen_key_pair<R, C>(rng: &mut R) -> (PublicKey<C>, SecretKey<C>)
where
    R: CryptoRng + RngCore,
    C: CurveArithmetic,
{
    let private = SecretKey::<C>::random(rng);
    let public = private.public_key();
    (public, private)
}

/// Encode a freshly generated key pair. This is the only place where key material leaves the
/// curve library, both the one-shot and the context based generation end up here.
///
/// `public` has to be the point belonging to `private`, it is encoded as is. The private scalar
/// is written as a minimal-length big-endian integer without padding, the public point
/// uncompressed as `0x04 || X || Y`.
pub fn encode_key_pair<C>(
    private: &SecretKey<C>,
    public: &PublicKey<C>,
) -> Result<EncodedKeyPair, Error>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let coordinate_size = FieldBytesSize::<C>::USIZE;

    let public = public.to_encoded_point(false);
    if public.tag() != Tag::Uncompressed || public.len() != 1 + 2 * coordinate_size {
        log::warn!(
            "unexpected public key encoding ({} bytes, tag {:?})",
            public.len(),
            public.tag()
        );
        return Err(Error::GenerationFailure);
    }

    let mut scalar = private.to_bytes();
    let key_pair = match strip_leading_zeros(&scalar) {
        [] => Err(Error::GenerationFailure),
        minimal => EncodedKeyPair::try_new(minimal, public.as_bytes()),
    };
    scalar.as_mut_slice().zeroize();
    key_pair
}

/// Generate and encode one key pair on curve `C`.
pub fn generate_encoded<R, C>(rng: &mut R) -> Result<EncodedKeyPair, Error>
where
    R: CryptoRng + RngCore,
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let (public, private) = gen_key_pair::<R, C>(rng);
    encode_key_pair(&private, &public)
}

/// Generate and encode one key pair on the named curve.
pub fn generate_key_pair<R>(curve: CurveId, rng: &mut R) -> Result<EncodedKeyPair, Error>
where
    R: CryptoRng + RngCore,
{
    match curve {
        CurveId::NistP256 => generate_encoded::<R, NistP256>(rng),
        CurveId::NistP384 => generate_encoded::<R, NistP384>(rng),
        CurveId::NistP521 => generate_encoded::<R, NistP521>(rng),
        CurveId::Secp256k1 => generate_encoded::<R, Secp256k1>(rng),
        CurveId::Sm2 => generate_encoded::<R, Sm2>(rng),
    }
}

/// One-time check that the curve library agrees with the static parameters of a curve: the
/// generator point must encode to the expected uncompressed length.
pub fn check_curve(params: &CurveParams) -> Result<(), Error> {
    let encoded_len = match params.id {
        CurveId::NistP256 => generator_encoded_len::<NistP256>(),
        CurveId::NistP384 => generator_encoded_len::<NistP384>(),
        CurveId::NistP521 => generator_encoded_len::<NistP521>(),
        CurveId::Secp256k1 => generator_encoded_len::<Secp256k1>(),
        CurveId::Sm2 => generator_encoded_len::<Sm2>(),
    };
    if encoded_len != params.public_key_size() || params.coordinate_size > MAX_COORDINATE_SIZE {
        log::warn!(
            "curve {} encodes its generator with {} bytes, expected {}",
            params.name,
            encoded_len,
            params.public_key_size()
        );
        return Err(Error::InitializationFailure);
    }
    Ok(())
}

fn generator_encoded_len<C>() -> usize
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    ProjectivePoint::<C>::generator()
        .to_affine()
        .to_encoded_point(false)
        .len()
}

/// Verify that `public_key` is the uncompressed encoding of `private_key * G` on the named curve.
///
/// `private_key` is accepted in the unpadded form produced by [encode_key_pair] and has to lie in
/// `[1, order - 1]`.
pub fn check_key_pair(curve: CurveId, private_key: &[u8], public_key: &[u8]) -> Result<(), Error> {
    match curve {
        CurveId::NistP256 => check_key_pair_internal::<NistP256>(private_key, public_key),
        CurveId::NistP384 => check_key_pair_internal::<NistP384>(private_key, public_key),
        CurveId::NistP521 => check_key_pair_internal::<NistP521>(private_key, public_key),
        CurveId::Secp256k1 => check_key_pair_internal::<Secp256k1>(private_key, public_key),
        CurveId::Sm2 => check_key_pair_internal::<Sm2>(private_key, public_key),
    }
}

fn check_key_pair_internal<C>(private_key: &[u8], public_key: &[u8]) -> Result<(), Error>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let coordinate_size = FieldBytesSize::<C>::USIZE;
    if private_key.is_empty() || private_key.len() > coordinate_size {
        return Err(Error::InvalidPrivateKey);
    }
    if public_key.len() != 1 + 2 * coordinate_size
        || public_key[0] != u8::from(Tag::Uncompressed)
    {
        return Err(Error::InvalidPublicKey);
    }

    // Left-pad to the fixed scalar width expected by the curve library
    let mut padded = FieldBytes::<C>::default();
    padded[coordinate_size - private_key.len()..].copy_from_slice(private_key);
    let secret = SecretKey::<C>::from_bytes(&padded);
    padded.as_mut_slice().zeroize();
    let secret = secret.map_err(|_| Error::InvalidPrivateKey)?;

    let public = PublicKey::<C>::from_sec1_bytes(public_key).map_err(|_| Error::InvalidPublicKey)?;
    if secret.public_key() != public {
        return Err(Error::InvalidPublicKey);
    }
    Ok(())
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::rng::{test::TestEntropySource, Rng};
    use strum::IntoEnumIterator;

    // Coordinates of the P-256 base point
    const P256_GX: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
    const P256_GY: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";

    fn secret_from_u8<C: CurveArithmetic>(value: u8) -> SecretKey<C> {
        let mut bytes = FieldBytes::<C>::default();
        let last = bytes.len() - 1;
        bytes[last] = value;
        SecretKey::<C>::from_bytes(&bytes).expect("failed to create secret key")
    }

    fn encode_scalar<C>(value: u8) -> Result<EncodedKeyPair, Error>
    where
        C: CurveArithmetic,
        AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
        FieldBytesSize<C>: ModulusSize,
    {
        let private = secret_from_u8::<C>(value);
        encode_key_pair(&private, &private.public_key())
    }

    #[test]
    fn encode_scalar_one_is_not_padded() {
        let key_pair = encode_scalar::<NistP256>(1).expect("failed to encode");
        assert_eq!(key_pair.private_key(), &[0x01]);
        let mut expected = [0u8; 65];
        expected[0] = 0x04;
        hex::decode_to_slice(P256_GX, &mut expected[1..33]).expect("invalid hex");
        hex::decode_to_slice(P256_GY, &mut expected[33..]).expect("invalid hex");
        assert_eq!(key_pair.public_key(), &expected);
    }

    #[test]
    fn encode_short_scalar_on_every_curve() {
        let key_pair = encode_scalar::<NistP384>(0x80).expect("failed");
        assert_eq!(key_pair.private_key(), &[0x80]);
        assert_eq!(key_pair.public_key().len(), 97);
        let key_pair = encode_scalar::<NistP521>(2).expect("failed");
        assert_eq!(key_pair.private_key(), &[0x02]);
        assert_eq!(key_pair.public_key().len(), 133);
        let key_pair = encode_scalar::<Secp256k1>(3).expect("failed");
        assert_eq!(key_pair.private_key(), &[0x03]);
        let key_pair = encode_scalar::<Sm2>(4).expect("failed");
        assert_eq!(key_pair.private_key(), &[0x04]);
        assert_eq!(key_pair.public_key()[0], 0x04);
    }

    #[test]
    fn encoder_uses_the_given_point() {
        let private = secret_from_u8::<NistP256>(1);
        let other = secret_from_u8::<NistP256>(2).public_key();
        let key_pair = encode_key_pair(&private, &other).expect("failed to encode");
        assert_eq!(key_pair.private_key(), &[0x01]);
        assert_eq!(key_pair.public_key(), other.to_encoded_point(false).as_bytes());
    }

    #[test]
    fn generated_point_is_encoded() {
        let mut rng = Rng::new(TestEntropySource::default(), None);
        let mut replay = Rng::new(TestEntropySource::default(), None);
        let key_pair = generate_encoded::<_, NistP384>(&mut rng).expect("failed to generate");
        let (public, private) = gen_key_pair::<_, NistP384>(&mut replay);
        assert_eq!(key_pair.public_key(), public.to_encoded_point(false).as_bytes());
        assert_eq!(
            key_pair.private_key(),
            strip_leading_zeros(private.to_bytes().as_slice())
        );
    }

    #[test]
    fn generated_key_pairs_verify() {
        let mut rng = Rng::new(TestEntropySource::default(), None);
        for curve in CurveId::iter() {
            let params = curve.params();
            for _ in 0..4 {
                let key_pair = generate_key_pair(curve, &mut rng).expect("failed to generate");
                assert!(!key_pair.private_key().is_empty());
                assert!(key_pair.private_key().len() <= params.private_key_size());
                assert_ne!(key_pair.private_key()[0], 0);
                assert_eq!(key_pair.public_key().len(), params.public_key_size());
                assert_eq!(key_pair.public_key()[0], 0x04);
                assert_eq!(
                    check_key_pair(curve, key_pair.private_key(), key_pair.public_key()),
                    Ok(())
                );
            }
        }
    }

    #[test]
    fn check_curves() {
        for curve in CurveId::iter() {
            assert_eq!(check_curve(curve.params()), Ok(()));
        }
        let broken = CurveParams {
            coordinate_size: 31,
            ..*CurveId::NistP256.params()
        };
        assert_eq!(check_curve(&broken), Err(Error::InitializationFailure));
    }

    #[test]
    fn check_mismatched_key_pair() {
        let mut rng = Rng::new(TestEntropySource::default(), None);
        let first = generate_key_pair(CurveId::NistP256, &mut rng).expect("failed to generate");
        let second = generate_key_pair(CurveId::NistP256, &mut rng).expect("failed to generate");
        assert_eq!(
            check_key_pair(CurveId::NistP256, first.private_key(), second.public_key()),
            Err(Error::InvalidPublicKey)
        );
        assert_eq!(
            check_key_pair(CurveId::NistP384, first.private_key(), first.public_key()),
            Err(Error::InvalidPublicKey)
        );
    }

    #[test]
    fn check_rejects_out_of_range_scalars() {
        let key_pair = encode_scalar::<NistP256>(1).expect("failed to encode");
        assert_eq!(
            check_key_pair(CurveId::NistP256, &[0x00], key_pair.public_key()),
            Err(Error::InvalidPrivateKey)
        );
        assert_eq!(
            check_key_pair(CurveId::NistP256, &[], key_pair.public_key()),
            Err(Error::InvalidPrivateKey)
        );
        assert_eq!(
            check_key_pair(CurveId::NistP256, &[0xff; 32], key_pair.public_key()),
            Err(Error::InvalidPrivateKey)
        );
        assert_eq!(
            check_key_pair(CurveId::NistP256, &[0x01; 33], key_pair.public_key()),
            Err(Error::InvalidPrivateKey)
        );
    }

    #[test]
    fn strip_zeros() {
        assert_eq!(strip_leading_zeros(&[0, 0, 1, 0]), &[1, 0]);
        assert_eq!(strip_leading_zeros(&[7]), &[7]);
        assert_eq!(strip_leading_zeros(&[0, 0]), &[] as &[u8]);
    }
}
