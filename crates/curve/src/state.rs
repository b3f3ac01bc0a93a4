//! On-chain account layouts
//!
//! Both accounts carry an 8-byte discriminator followed by tightly packed
//! little-endian fields. The discriminator is skipped, not validated: owner and
//! program-id checks belong to whoever fetched the bytes.

use crate::error::{CurveError, DecodeError};
use solana_program::pubkey::Pubkey;

/// Length of the account discriminator prefix
pub const ACCOUNT_DISCRIMINATOR_LEN: usize = 8;

/// Bounds-checked sequential reader over account data
pub struct AccountReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Remaining bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Take the next `n` bytes and advance
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or(DecodeError::TooShort {
                offset: self.offset,
                needed: n,
                len: self.data.len(),
            })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    /// Read a fixed-size byte array and advance
    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Only `1` reads as true
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? == 1)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_pubkey(&mut self) -> Result<Pubkey, DecodeError> {
        Ok(Pubkey::new_from_array(self.read_bytes()?))
    }
}

/// Decoded bonding curve account snapshot
///
/// Produced fresh from every account read and never mutated by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReserveState {
    /// Virtual token liquidity used for pricing
    pub virtual_token_reserves: u64,

    /// Virtual SOL liquidity used for pricing (lamports)
    pub virtual_sol_reserves: u64,

    /// Tokens actually held by the curve
    pub real_token_reserves: u64,

    /// SOL actually collected by the curve (lamports)
    pub real_sol_reserves: u64,

    /// Total supply, fixed at creation
    pub token_total_supply: u64,

    /// True once the curve has graduated
    pub complete: bool,
}

impl ReserveState {
    /// Discriminator + 5 × u64 + bool
    pub const LEN: usize = ACCOUNT_DISCRIMINATOR_LEN + 5 * 8 + 1;

    /// Decode from raw account data
    ///
    /// Bytes past `LEN` are ignored so newer, longer account versions still decode.
    pub fn decode(data: &[u8]) -> Result<Self, CurveError> {
        if data.len() < Self::LEN {
            return Err(DecodeError::TooShort {
                offset: 0,
                needed: Self::LEN,
                len: data.len(),
            }
            .into());
        }

        let mut reader = AccountReader::new(data);
        reader.take(ACCOUNT_DISCRIMINATOR_LEN)?;

        Ok(Self {
            virtual_token_reserves: reader.read_u64()?,
            virtual_sol_reserves: reader.read_u64()?,
            real_token_reserves: reader.read_u64()?,
            real_sol_reserves: reader.read_u64()?,
            token_total_supply: reader.read_u64()?,
            complete: reader.read_bool()?,
        })
    }

    /// Serialize back into the account layout behind `discriminator`
    pub fn encode(&self, discriminator: [u8; 8]) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&discriminator);
        data.extend_from_slice(&self.virtual_token_reserves.to_le_bytes());
        data.extend_from_slice(&self.virtual_sol_reserves.to_le_bytes());
        data.extend_from_slice(&self.real_token_reserves.to_le_bytes());
        data.extend_from_slice(&self.real_sol_reserves.to_le_bytes());
        data.extend_from_slice(&self.token_total_supply.to_le_bytes());
        data.push(self.complete as u8);
        data
    }

    /// Reject trades against a graduated curve
    ///
    /// The quoting functions accept any snapshot; whoever turns a quote into a
    /// trade calls this first.
    pub fn ensure_tradable(&self) -> Result<(), CurveError> {
        if self.complete {
            return Err(CurveError::CurveComplete);
        }
        Ok(())
    }
}

/// Decoded protocol-wide "Global" account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalConfig {
    pub initialized: bool,
    pub authority: Pubkey,
    pub fee_recipient: Pubkey,
    pub initial_virtual_token_reserves: u64,
    pub initial_virtual_sol_reserves: u64,
    pub initial_real_token_reserves: u64,
    pub token_total_supply: u64,
    pub fee_basis_points: u64,
}

impl GlobalConfig {
    /// Discriminator + bool + 2 × pubkey + 5 × u64
    pub const LEN: usize = ACCOUNT_DISCRIMINATOR_LEN + 1 + 32 + 32 + 5 * 8;

    pub fn decode(data: &[u8]) -> Result<Self, CurveError> {
        if data.len() < Self::LEN {
            return Err(DecodeError::TooShort {
                offset: 0,
                needed: Self::LEN,
                len: data.len(),
            }
            .into());
        }

        let mut reader = AccountReader::new(data);
        reader.take(ACCOUNT_DISCRIMINATOR_LEN)?;

        Ok(Self {
            initialized: reader.read_bool()?,
            authority: reader.read_pubkey()?,
            fee_recipient: reader.read_pubkey()?,
            initial_virtual_token_reserves: reader.read_u64()?,
            initial_virtual_sol_reserves: reader.read_u64()?,
            initial_real_token_reserves: reader.read_u64()?,
            token_total_supply: reader.read_u64()?,
            fee_basis_points: reader.read_u64()?,
        })
    }

    /// Reserve state of a freshly created curve under this configuration
    pub fn initial_reserves(&self) -> ReserveState {
        ReserveState {
            virtual_token_reserves: self.initial_virtual_token_reserves,
            virtual_sol_reserves: self.initial_virtual_sol_reserves,
            real_token_reserves: self.initial_real_token_reserves,
            real_sol_reserves: 0,
            token_total_supply: self.token_total_supply,
            complete: false,
        }
    }
}
