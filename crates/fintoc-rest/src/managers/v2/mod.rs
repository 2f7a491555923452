//! Managers for the v2 (treasury) API surface

pub mod account_numbers;
pub mod account_verifications;
pub mod accounts;
pub mod entities;
pub mod movements;
pub mod simulate;
pub mod transfers;
