/// Derives the HOTP counter for a point in time (RFC 6238): the number of
/// whole periods elapsed since the epoch `time_initial`.
///
/// `time_period` must be nonzero; the key URI parser rejects a zero period
/// before an account can reach this point. A current time before the epoch
/// clamps to counter zero.
pub fn totp_counter(time_initial: u64, time_current: u64, time_period: u64) -> u64 {
  time_current.saturating_sub(time_initial) / time_period
}
