use std::fmt;

use stx_wire::ByteCursor;

use crate::error::TypeError;

// ── Macro for wire-byte enum boilerplate ──────────────────────────────
//
// Every tag in the protocol is a single byte naming one variant of a
// closed set. The macro generates the enum plus its conversions: byte to
// variant (unknown bytes are an error, never a fallback variant), variant
// to byte, and variant to its name for diagnostics.

macro_rules! wire_enum {
  (
    $(#[$meta:meta])*
    pub enum $name:ident {
      $( $(#[$vmeta:meta])* $variant:ident = $wire:expr ),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    pub enum $name {
      $( $(#[$vmeta])* $variant ),+
    }

    impl $name {
      /// Every variant, in wire order.
      pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

      /// Encode this variant as a single wire byte.
      #[must_use]
      pub fn to_wire_byte(self) -> u8 {
        match self {
          $( Self::$variant => $wire ),+
        }
      }

      /// Decode a wire byte into this enum.
      ///
      /// # Errors
      ///
      /// [`TypeError::InvalidEnumValue`] if the byte doesn't match any
      /// known variant.
      pub fn from_wire_byte(value: u8) -> Result<Self, TypeError> {
        match value {
          $( $wire => Ok(Self::$variant), )+
          other => Err(TypeError::InvalidEnumValue {
            enum_name: stringify!($name),
            value: other,
          }),
        }
      }

      /// Read one tag byte from the cursor and decode it.
      ///
      /// # Errors
      ///
      /// [`TypeError::Wire`] if the cursor is exhausted, or
      /// [`TypeError::InvalidEnumValue`] for an unknown byte.
      pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
        Self::from_wire_byte(cursor.read_u8()?)
      }

      /// Human-readable variant name.
      #[must_use]
      pub fn name(self) -> &'static str {
        match self {
          $( Self::$variant => stringify!($variant) ),+
        }
      }

      /// Error for a recognized variant that has no decoder.
      #[must_use]
      pub fn not_implemented(self) -> TypeError {
        TypeError::NotImplemented {
          enum_name: stringify!($name),
          variant: self.name(),
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
      }
    }
  };
}

// ── StacksMessageTypeId ───────────────────────────────────────────────

wire_enum! {
  /// P2P message type tag, the first byte after the relayer vector.
  ///
  /// ```text
  /// ┌──────┬─────────────────┬──────┬─────────────────┐
  /// │ Wire │ Type            │ Wire │ Type            │
  /// ├──────┼─────────────────┼──────┼─────────────────┤
  /// │ 0    │ Handshake       │ 8    │ Blocks          │
  /// │ 1    │ HandshakeAccept │ 9    │ GetMicroblocks  │
  /// │ 2    │ HandshakeReject │ 10   │ Microblocks     │
  /// │ 3    │ GetNeighbors    │ 11   │ Transaction     │
  /// │ 4    │ Neighbors       │ 12   │ Nack            │
  /// │ 5    │ GetBlocksInv    │ 13   │ Ping            │
  /// │ 6    │ BlocksInv       │ 14   │ Pong            │
  /// │ 7    │ GetBlocks       │ 255  │ Reserved        │
  /// └──────┴─────────────────┴──────┴─────────────────┘
  /// ```
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum StacksMessageTypeId {
    Handshake = 0,
    HandshakeAccept = 1,
    HandshakeReject = 2,
    GetNeighbors = 3,
    Neighbors = 4,
    GetBlocksInv = 5,
    BlocksInv = 6,
    GetBlocks = 7,
    Blocks = 8,
    GetMicroblocks = 9,
    Microblocks = 10,
    Transaction = 11,
    Nack = 12,
    Ping = 13,
    Pong = 14,
    Reserved = 255,
  }
}

// ── Transaction header enums ──────────────────────────────────────────

wire_enum! {
  /// Network a transaction was built for.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum TransactionVersion {
    Mainnet = 0x00,
    Testnet = 0x80,
  }
}

wire_enum! {
  /// Whether a transaction carries one spending condition or two.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum TransactionAuthType {
    Standard = 0x04,
    /// Origin plus a sponsor who pays the fee.
    Sponsored = 0x05,
  }
}

wire_enum! {
  /// Where a transaction may be mined.
  ///
  /// Only the two values below are accepted; a third mode byte (0x03,
  /// "either") is rejected as an invalid value.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum TransactionAnchorMode {
    OnChainOnly = 0x01,
    OffChainOnly = 0x02,
  }
}

wire_enum! {
  /// How asset movements not covered by a post-condition are treated.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum PostConditionMode {
    Allow = 0x01,
    Deny = 0x02,
  }
}

// ── Authorization enums ───────────────────────────────────────────────

wire_enum! {
  /// Spending condition hash mode.
  ///
  /// ```text
  /// ┌──────┬────────┬────────────┐
  /// │ Wire │ Mode   │ Condition  │
  /// ├──────┼────────┼────────────┤
  /// │ 0x00 │ P2PKH  │ single-sig │
  /// │ 0x01 │ P2SH   │ multi-sig  │
  /// │ 0x02 │ P2WPKH │ single-sig │
  /// │ 0x03 │ P2WSH  │ multi-sig  │
  /// └──────┴────────┴────────────┘
  /// ```
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum HashMode {
    P2PKH = 0x00,
    P2SH = 0x01,
    P2WPKH = 0x02,
    P2WSH = 0x03,
  }
}

impl HashMode {
  /// `true` for the modes that carry a single signature.
  #[must_use]
  pub fn is_singlesig(self) -> bool {
    matches!(self, Self::P2PKH | Self::P2WPKH)
  }
}

wire_enum! {
  /// Public key serialization recorded alongside a single-sig signature.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum PublicKeyEncoding {
    Compressed = 0x00,
    Uncompressed = 0x01,
  }
}

wire_enum! {
  /// Multi-sig auth field tag. Decides both what follows (33-byte key or
  /// 65-byte signature) and how the key is encoded.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum AuthFieldType {
    PublicKeyCompressed = 0x00,
    PublicKeyUncompressed = 0x01,
    SignatureCompressed = 0x02,
    SignatureUncompressed = 0x03,
  }
}

// ── Post-condition enums ──────────────────────────────────────────────

wire_enum! {
  /// Asset class a post-condition constrains.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum AssetInfoId {
    Stx = 0x00,
    FungibleAsset = 0x01,
    NonfungibleAsset = 0x02,
  }
}

wire_enum! {
  /// Whose assets a post-condition talks about.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum PostConditionPrincipalId {
    Origin = 0x01,
    Standard = 0x02,
    Contract = 0x03,
  }
}

wire_enum! {
  /// Comparison applied to the amount of a fungible post-condition.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum FungibleConditionCode {
    SentEq = 0x01,
    SentGt = 0x02,
    SentGe = 0x03,
    SentLt = 0x04,
    SentLe = 0x05,
  }
}

// ── Payload enum ──────────────────────────────────────────────────────

wire_enum! {
  /// Transaction payload tag.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub enum TransactionPayloadId {
    TokenTransfer = 0x00,
    SmartContract = 0x01,
    ContractCall = 0x02,
    PoisonMicroblock = 0x03,
    Coinbase = 0x04,
  }
}
