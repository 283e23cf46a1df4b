use super::AccessOperation;
use clap::Parser;

/// command line tool computing travel-time accessibility to sport facilities
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct AccessApp {
    #[command(subcommand)]
    pub op: AccessOperation,
}
