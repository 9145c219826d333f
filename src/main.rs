use std::env;
use std::io;
use std::process::ExitCode;

use sunpay_sim::csv::{read_actions, write_transactions};
use sunpay_sim::notice::LogNotifier;
use sunpay_sim::{Config, Simulator};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: sunpay-sim <actions.csv>");
        return ExitCode::FAILURE;
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let actions = match read_actions(path.clone()) {
        Ok(actions) => actions,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut simulator = Simulator::new(Config::from_env(), LogNotifier);
    let (action_sender, action_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in actions {
            match result {
                Ok(action) => {
                    if action_sender.send(action).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    simulator.run(ReceiverStream::new(action_receiver)).await;

    if let Err(e) = write_transactions(io::stdout().lock(), simulator.wallet().recent()) {
        error!("failed to write transactions: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
