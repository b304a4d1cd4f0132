use crate::crypto::Error;
use strum::{EnumIter, FromRepr};

/// Named curves known to the resolver.
///
/// The discriminants are the numeric curve identifiers (OpenSSL NIDs) passed in by callers.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, EnumIter, FromRepr)]
pub enum CurveId {
    /// NIST P-256, also known as prime256v1 or secp256r1.
    NistP256 = 415,
    /// NIST P-384, also known as secp384r1.
    NistP384 = 715,
    /// NIST P-521, also known as secp521r1.
    NistP521 = 716,
    /// The Koblitz curve used by Bitcoin.
    Secp256k1 = 714,
    /// SM2 recommended curve from GB/T 32918.
    Sm2 = 1172,
}

/// Static domain information about a curve that the encoder relies on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    pub id: CurveId,
    pub name: &'static str,
    /// Size of a field element (and of a fixed-width scalar) in bytes.
    pub coordinate_size: usize,
}

impl CurveParams {
    /// Upper bound of the encoded private key length. Actual keys may be shorter.
    pub const fn private_key_size(&self) -> usize {
        self.coordinate_size
    }

    /// Exact length of the uncompressed SEC1 public key encoding.
    pub const fn public_key_size(&self) -> usize {
        1 + 2 * self.coordinate_size
    }
}

static NIST_P256: CurveParams = CurveParams {
    id: CurveId::NistP256,
    name: "P-256",
    coordinate_size: 32,
};
static NIST_P384: CurveParams = CurveParams {
    id: CurveId::NistP384,
    name: "P-384",
    coordinate_size: 48,
};
static NIST_P521: CurveParams = CurveParams {
    id: CurveId::NistP521,
    name: "P-521",
    coordinate_size: 66,
};
static SECP256K1: CurveParams = CurveParams {
    id: CurveId::Secp256k1,
    name: "secp256k1",
    coordinate_size: 32,
};
static SM2: CurveParams = CurveParams {
    id: CurveId::Sm2,
    name: "SM2",
    coordinate_size: 32,
};

impl CurveId {
    pub const fn nid(self) -> i32 {
        self as i32
    }

    pub fn params(self) -> &'static CurveParams {
        match self {
            CurveId::NistP256 => &NIST_P256,
            CurveId::NistP384 => &NIST_P384,
            CurveId::NistP521 => &NIST_P521,
            CurveId::Secp256k1 => &SECP256K1,
            CurveId::Sm2 => &SM2,
        }
    }
}

impl TryFrom<i32> for CurveId {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        CurveId::from_repr(value).ok_or(Error::InvalidCurve(value))
    }
}

/// Look up the domain information for a numeric curve identifier.
pub fn resolve(curve_id: i32) -> Result<&'static CurveParams, Error> {
    Ok(CurveId::try_from(curve_id)?.params())
}
