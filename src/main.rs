//! Checkout command line
//!
//! Prices a YAML order file and prints the receipt.

use std::{io, process::ExitCode};

use jiff::Zoned;
use tracing::error;

use checkout_engine::{
    checkout::CheckoutService, config::CheckoutConfig, fixtures::OrderFixture,
    logging::init_subscriber, receipt::Receipt,
};

/// Checkout entry point
pub fn main() -> ExitCode {
    let config = match CheckoutConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // clap renders help/version through the error path too
            _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("{err}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(order = %config.order.display(), "{err}");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &CheckoutConfig) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = OrderFixture::load(&config.order)?;

    let mut order = fixture.into_order(Zoned::now().date())?;

    if let Some(today) = config.today {
        order.today = today;
    }

    let result = CheckoutService::default().checkout(&order)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::new(&order, &result).write_to(&mut handle)?;

    Ok(())
}
