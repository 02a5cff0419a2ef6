use clap::{Arg, ArgMatches, Command};
use lazy_static::lazy_static;

lazy_static! {
  pub static ref CLAP_ARGS: ClapArgs = ClapArgs::new();
}

pub struct ClapArgs {
  args: ArgMatches,
}

impl ClapArgs {
  const DISPLAYNAME: &'static str = "displayname";
  const RUN_ONCE: &'static str = "once";

  pub fn new() -> Self {
    Self::from_matches(Self::command().get_matches())
  }

  fn from_matches(args: ArgMatches) -> Self {
    Self { args }
  }

  /// The display name to track, taking priority over the config file.
  pub fn displayname(&self) -> Option<&str> {
    self
      .args
      .get_one::<String>(Self::DISPLAYNAME)
      .map(String::as_str)
  }

  pub fn run_once_flag(&self) -> bool {
    self.args.get_flag(Self::RUN_ONCE)
  }

  fn command() -> Command {
    Command::new("DLive Following Tracker")
      .arg(
        Arg::new(Self::DISPLAYNAME)
          .short('d')
          .long("displayname")
          .action(clap::ArgAction::Set)
          .help("Stores the display name whose profile and following list get refreshed."),
      )
      .arg(
        Arg::new(Self::RUN_ONCE)
          .short('o')
          .long("once")
          .action(clap::ArgAction::SetTrue)
          .help("Runs a single refresh, prints the result, and exits."),
      )
  }
}

impl Default for ClapArgs {
  fn default() -> Self {
    Self::new()
  }
}
