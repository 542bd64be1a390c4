#[macro_use]
#[cfg(test)]
extern crate hex_literal;

pub mod account;
pub mod hash;
pub mod io;
pub mod mac;
pub mod otp;
pub mod parse;
