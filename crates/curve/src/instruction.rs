//! Instruction data encoding
//!
//! Layout: 8-byte discriminator, then arguments in declared order.
//! Strings are a u32 little-endian length followed by raw UTF-8 (no
//! terminator, no padding); integers are u64 little-endian.

use crate::constants::discriminators;
use crate::error::{CurveError, DecodeError};
use crate::state::AccountReader;

/// Sequential little-endian writer for instruction data
#[derive(Debug, Default)]
pub struct InstructionWriter {
    data: Vec<u8>,
}

impl InstructionWriter {
    /// Start a payload with its discriminator
    pub fn new(discriminator: [u8; 8]) -> Self {
        let mut data = Vec::with_capacity(64);
        data.extend_from_slice(&discriminator);
        Self { data }
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Length-prefixed UTF-8
    pub fn write_string(&mut self, field: &'static str, value: &str) -> Result<&mut Self, CurveError> {
        let len = u32::try_from(value.len()).map_err(|_| CurveError::Encoding {
            field,
            len: value.len(),
            limit: u32::MAX as usize,
        })?;
        self.data.extend_from_slice(&len.to_le_bytes());
        self.data.extend_from_slice(value.as_bytes());
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

/// Caller-imposed string limits for token creation, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataLimits {
    pub name: usize,
    pub symbol: usize,
    pub uri: usize,
}

impl Default for MetadataLimits {
    fn default() -> Self {
        Self {
            name: 32,
            symbol: 10,
            uri: 200,
        }
    }
}

impl MetadataLimits {
    pub fn check(&self, name: &str, symbol: &str, uri: &str) -> Result<(), CurveError> {
        for (field, value, limit) in [
            ("name", name, self.name),
            ("symbol", symbol, self.symbol),
            ("uri", uri, self.uri),
        ] {
            if value.len() > limit {
                return Err(CurveError::Encoding {
                    field,
                    len: value.len(),
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// `create(name, symbol, uri)` instruction data
pub fn encode_create(name: &str, symbol: &str, uri: &str) -> Result<Vec<u8>, CurveError> {
    let mut writer = InstructionWriter::new(discriminators::CREATE);
    writer
        .write_string("name", name)?
        .write_string("symbol", symbol)?
        .write_string("uri", uri)?;
    Ok(writer.finish())
}

/// `create` with caller limits enforced first
pub fn encode_create_checked(
    name: &str,
    symbol: &str,
    uri: &str,
    limits: &MetadataLimits,
) -> Result<Vec<u8>, CurveError> {
    limits.check(name, symbol, uri)?;
    encode_create(name, symbol, uri)
}

/// `buy(amount, max_sol_cost)` instruction data, 24 bytes
pub fn encode_buy(amount: u64, max_sol_cost: u64) -> Vec<u8> {
    let mut writer = InstructionWriter::new(discriminators::BUY);
    writer.write_u64(amount).write_u64(max_sol_cost);
    writer.finish()
}

/// `sell(amount, min_sol_output)` instruction data, 24 bytes
pub fn encode_sell(amount: u64, min_sol_output: u64) -> Vec<u8> {
    let mut writer = InstructionWriter::new(discriminators::SELL);
    writer.write_u64(amount).write_u64(min_sol_output);
    writer.finish()
}

/// Typed form of the three launch program instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveInstruction {
    Create {
        name: String,
        symbol: String,
        uri: String,
    },
    Buy {
        amount: u64,
        max_sol_cost: u64,
    },
    Sell {
        amount: u64,
        min_sol_output: u64,
    },
}

impl CurveInstruction {
    pub fn encode(&self) -> Result<Vec<u8>, CurveError> {
        match self {
            Self::Create { name, symbol, uri } => encode_create(name, symbol, uri),
            Self::Buy {
                amount,
                max_sol_cost,
            } => Ok(encode_buy(*amount, *max_sol_cost)),
            Self::Sell {
                amount,
                min_sol_output,
            } => Ok(encode_sell(*amount, *min_sol_output)),
        }
    }

    /// Strict decode: unknown tags and trailing bytes are errors
    pub fn decode(data: &[u8]) -> Result<Self, CurveError> {
        let mut reader = AccountReader::new(data);
        let tag: [u8; 8] = reader.read_bytes()?;

        let ix = match tag {
            discriminators::CREATE => Self::Create {
                name: read_string(&mut reader)?,
                symbol: read_string(&mut reader)?,
                uri: read_string(&mut reader)?,
            },
            discriminators::BUY => Self::Buy {
                amount: reader.read_u64()?,
                max_sol_cost: reader.read_u64()?,
            },
            discriminators::SELL => Self::Sell {
                amount: reader.read_u64()?,
                min_sol_output: reader.read_u64()?,
            },
            other => return Err(DecodeError::UnknownDiscriminator(other).into()),
        };

        if reader.remaining() > 0 {
            return Err(DecodeError::TrailingBytes(reader.remaining()).into());
        }
        Ok(ix)
    }
}

fn read_string(reader: &mut AccountReader<'_>) -> Result<String, DecodeError> {
    let len = reader.read_u32()? as usize;
    let bytes = reader.take(len)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_buy_layout() {
        let data = encode_buy(500, 1000);
        assert_eq!(data.len(), 24);
        assert_eq!(&data[..8], &discriminators::BUY);
        assert_eq!(&data[8..16], &500u64.to_le_bytes());
        assert_eq!(&data[16..24], &1000u64.to_le_bytes());
    }

    #[test]
    fn test_encode_sell_layout() {
        let data = encode_sell(u64::MAX, 1);
        assert_eq!(data.len(), 24);
        assert_eq!(&data[..8], &[51, 230, 133, 164, 1, 127, 131, 173]);
        assert_eq!(&data[8..16], &[0xFF; 8]);
        assert_eq!(&data[16..24], &[1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_create_layout() {
        let data = encode_create("Doge", "DG", "ipfs://x").unwrap();

        let mut expected = vec![24, 30, 200, 40, 5, 28, 7, 119];
        expected.extend_from_slice(&[4, 0, 0, 0]);
        expected.extend_from_slice(b"Doge");
        expected.extend_from_slice(&[2, 0, 0, 0]);
        expected.extend_from_slice(b"DG");
        expected.extend_from_slice(&[8, 0, 0, 0]);
        expected.extend_from_slice(b"ipfs://x");
        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_create_utf8_length_is_bytes() {
        let data = encode_create("ñ", "", "").unwrap();
        // "ñ" is two bytes in UTF-8
        assert_eq!(&data[8..12], &[2, 0, 0, 0]);
        assert_eq!(data.len(), 8 + 4 + 2 + 4 + 4);
    }

    #[test]
    fn test_metadata_limits() {
        let limits = MetadataLimits::default();
        assert!(encode_create_checked("Name", "SYM", "uri", &limits).is_ok());

        let long_symbol = "A".repeat(11);
        assert_eq!(
            encode_create_checked("Name", &long_symbol, "uri", &limits),
            Err(CurveError::Encoding {
                field: "symbol",
                len: 11,
                limit: 10
            })
        );

        // The unchecked encoder has no opinion on length
        assert!(encode_create("Name", &long_symbol, "uri").is_ok());
    }

    #[test]
    fn test_decode_round_trip() {
        let ixs = [
            CurveInstruction::Create {
                name: "Token".into(),
                symbol: "TKN".into(),
                uri: "https://example.com/meta.json".into(),
            },
            CurveInstruction::Buy {
                amount: 34_612_903_225_806,
                max_sol_cost: 1_100_000_000,
            },
            CurveInstruction::Sell {
                amount: 1,
                min_sol_output: 0,
            },
        ];
        for ix in ixs {
            let data = ix.encode().unwrap();
            assert_eq!(CurveInstruction::decode(&data).unwrap(), ix);
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let mut data = encode_buy(1, 2);
        data.push(0);
        assert_eq!(
            CurveInstruction::decode(&data),
            Err(CurveError::Decode(DecodeError::TrailingBytes(1)))
        );

        let data = encode_buy(1, 2);
        assert!(CurveInstruction::decode(&data[..20]).is_err());

        let mut data = encode_buy(1, 2);
        data[0] = 0;
        assert!(matches!(
            CurveInstruction::decode(&data),
            Err(CurveError::Decode(DecodeError::UnknownDiscriminator(_)))
        ));

        // Length prefix pointing past the end
        let mut data = discriminators::CREATE.to_vec();
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(b"short");
        assert!(CurveInstruction::decode(&data).is_err());

        let mut data = discriminators::CREATE.to_vec();
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&[0xC3, 0x28]);
        assert_eq!(
            CurveInstruction::decode(&data),
            Err(CurveError::Decode(DecodeError::InvalidUtf8))
        );
    }
}
