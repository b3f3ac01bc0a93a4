//! Launchpad bonding curve engine
//!
//! Pure client-side core for the constant-product token launch program:
//! - Account codec for the on-chain bonding curve and global accounts
//! - Pricing (spot price, market cap, graduation progress, swap quotes)
//! - Slippage bounds in basis points
//! - Instruction encoding and account-role lists for create/buy/sell
//! - Program-derived address seeds
//!
//! Nothing in this crate performs I/O, logs, or keeps state between calls.

pub mod accounts;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod math;
pub mod pda;
pub mod slippage;
pub mod state;

pub use accounts::*;
pub use error::*;
pub use instruction::*;
pub use math::*;
pub use pda::*;
pub use slippage::*;
pub use state::*;
