//! Parcel Tally CLI
//!
//! Reads package commands from standard input and prints a report of the
//! weight per destination every interval.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- packages.txt
//! cargo run -- packages.txt fees.txt
//! cargo run -- --interval 10 --verbose packages.txt fees.txt
//! ```
//!
//! Each input line is `<weight> <postal code>`, for example `3.4 08801`. Type
//! `quit` to end the session. Reports go to stdout, diagnostics to stderr.
//!
//! # Exit Codes
//!
//! - 0: `quit` or end of input
//! - 1: Error (standard input failure, runtime could not be created)

use parcel_tally::{cli, logging, session};
use std::process;
use tracing::{error, info};

fn main() {
    let args = cli::parse_args();
    logging::init_logger(args.verbose);

    info!("Program started");
    let result = session::run_interactive(args.to_session_config());
    info!("Program finished");

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
