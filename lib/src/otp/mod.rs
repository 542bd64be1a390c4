//! One-time passcode generation: HOTP (RFC 4226) and the TOTP counter
//! derivation (RFC 6238) layered on it.

mod hotp;
mod totp;


pub use self::hotp::HotpContext;
pub use self::totp::totp_counter;
