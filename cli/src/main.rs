use clap::Parser;
use log::{debug, warn};
use std::time::{SystemTime, UNIX_EPOCH};

use otp_less_lib::account::TotpParameters;
use otp_less_lib::parse::parse_key_uri;

mod cli;
mod error;

use crate::error::ExtResult;

fn unix_time() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .ok_or_exit("System clock is before the Unix epoch: ")
    .as_secs()
}

fn main() {
  let args = cli::Args::parse();

  let mut log_builder = env_logger::Builder::from_default_env();
  if args.debug {
    log_builder.filter(None, log::LevelFilter::Debug);
  } else {
    log_builder.filter(None, log::LevelFilter::Error);
  }
  log_builder.target(env_logger::Target::Stderr);
  log_builder.init();

  if !args.ignored.is_empty() {
    warn!("ignoring {} extra argument(s)", args.ignored.len());
  }

  let account = parse_key_uri(&args.uri).ok_or_exit("Invalid key URI: ");
  debug!(
    "parsed {} account \"{}\" using {}",
    account.algorithm(),
    account.account_name(),
    account.hash()
  );

  let totp = TotpParameters {
    time_initial: 0,
    time_current: args.time.unwrap_or_else(unix_time),
  };

  let passcode = account
    .generate_passcode(&totp, args.index)
    .ok_or_exit("Unable to generate passcode: ");

  println!("{:01$}", passcode, account.digits() as usize);
}
