//! Domain-separated stable hashing.
//!
//! State implementors satisfy [`crate::capability::Hashable`] by feeding a
//! canonical byte encoding of the logical state to [`stable_hash32`]. The
//! digest is SHA-256 over `domain || data`, truncated to its first four
//! bytes (big-endian), so the result is identical across processes,
//! platforms and compiler versions.

use sha2::{Digest, Sha256};

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`stable_hash32`] and [`digest_hex`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Logical state identity (closed-set bucketing).
    StateIdentity => b"LODESTAR::STATE_IDENTITY::V1\0",

    /// Chromosome identity (population deduplication).
    Chromosome => b"LODESTAR::CHROMOSOME::V1\0",

    /// Search report digests.
    Report => b"LODESTAR::SEARCH_REPORT::V1\0",
}

/// Stable 32-bit hash of `data` under `domain`.
#[must_use]
pub fn stable_hash32(domain: HashDomain, data: &[u8]) -> u32 {
    let digest = sha256(domain, data);
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Full SHA-256 digest of `domain || data`, lowercase hex.
#[must_use]
pub fn digest_hex(domain: HashDomain, data: &[u8]) -> String {
    hex::encode(sha256(domain, data))
}

fn sha256(domain: HashDomain, data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    hasher.finalize().into()
}
