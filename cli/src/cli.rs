use clap::Parser;

#[derive(Debug, Parser)]
#[command(
  name = "otp-less",
  about = "Generates one-time passcodes from otpauth:// key URIs",
  version
)]
pub struct Args {
  #[arg(help = "The otpauth:// key URI to generate a passcode for")]
  pub uri: String,

  #[arg(
    short,
    long,
    default_value_t = 0,
    allow_hyphen_values = true,
    help = "Signed passcode index relative to the current counter"
  )]
  pub index: i64,

  #[arg(short, long, help = "Unix timestamp to use instead of the system clock")]
  pub time: Option<u64>,

  #[arg(short, long, help = "Enable debug logs")]
  pub debug: bool,

  #[arg(hide = true, num_args = 0..)]
  pub ignored: Vec<String>,
}
