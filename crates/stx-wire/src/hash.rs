use std::fmt;

use crate::cursor::ByteCursor;
use crate::error::WireError;

// ── Fixed-size byte newtypes ──────────────────────────────────────────
//
// Hashes, signatures and proofs on the wire are opaque byte strings of a
// fixed length. Each gets its own newtype so a 20-byte signer hash can't be
// passed where a 20-byte consensus hash is expected. The macro generates
// the cursor read plus hex Display/Debug.

macro_rules! fixed_bytes {
    (
        $(#[$meta:meta])*
        pub struct $name:ident([u8; $len:expr]);
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Encoded size on the wire.
            pub const ENCODED_SIZE: usize = $len;

            /// Read exactly [`Self::ENCODED_SIZE`] bytes from the cursor.
            ///
            /// # Errors
            ///
            /// [`WireError::CursorUnderflow`] if the cursor is too short.
            pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, WireError> {
                Ok(Self(cursor.read_array()?))
            }

            #[must_use]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            #[must_use]
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }
    };
}

fixed_bytes! {
    /// RIPEMD160(SHA256(x)): account and signer hashes.
    pub struct Hash160([u8; 20]);
}

fixed_bytes! {
    /// Burnchain consensus hash carried in every preamble.
    pub struct ConsensusHash([u8; 20]);
}

fixed_bytes! {
    /// Recoverable secp256k1 signature: 1-byte recovery id + 64-byte body.
    pub struct MessageSignature([u8; 65]);
}

fixed_bytes! {
    /// Serialized secp256k1 public key as carried in an auth field.
    pub struct PublicKeyBytes([u8; 33]);
}

fixed_bytes! {
    /// 32-byte hash (block hashes, merkle roots, state roots).
    pub struct Hash32([u8; 32]);
}

fixed_bytes! {
    /// VRF proof attached to an anchored block header.
    pub struct VrfProof([u8; 80]);
}
