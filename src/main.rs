//! siridb-prompt entry point.

use std::time::Duration;

use clap::Parser;

use siridb_prompt::cli::{
    init_logging, resolve_credentials, Args, TerminalCredentials, EXIT_FAILURE, EXIT_INTERRUPTED,
    EXIT_OK, INTERRUPTED_MESSAGE,
};
use siridb_prompt::client::Client;
use siridb_prompt::connection::{parse_server_list, ConnectionConfig, SERVER_LIST_HINT};
use siridb_prompt::prompt::{
    self, interrupt, LoopOutcome, PromptLoop, TerminalGuard, TerminalReader,
};
use siridb_prompt::{version, Error, HttpClient, Result};

const KEEPALIVE: Duration = Duration::from_secs(60);

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if args.version {
        println!("{}", version::banner());
        std::process::exit(EXIT_OK);
    }

    init_logging(args.log_level);

    let code = match run(args).await {
        Ok(outcome) => {
            if outcome == LoopOutcome::Interrupted {
                eprintln!("{}", INTERRUPTED_MESSAGE);
            }
            outcome.exit_code()
        }
        Err(Error::Interrupted) => {
            eprintln!("{}", INTERRUPTED_MESSAGE);
            EXIT_INTERRUPTED
        }
        Err(Error::Servers(e)) => {
            tracing::debug!(error = %e, "rejected server list");
            eprintln!("Invalid servers, expecting something like: {}", SERVER_LIST_HINT);
            EXIT_FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_FAILURE
        }
    };

    // Leaves the input thread behind if it is still blocked on a read; the
    // terminal mode was already restored when `run` returned.
    std::process::exit(code);
}

async fn run(args: Args) -> Result<LoopOutcome> {
    // Validate servers before asking anything
    let servers = parse_server_list(&args.servers)?;

    // Restored when `run` returns, even if the input thread is mid-read
    let _terminal = TerminalGuard::capture();

    let mut source = TerminalCredentials::new();
    let credentials = resolve_credentials(args.user, args.password, args.dbname, &mut source)?;

    let mut builder = ConnectionConfig::builder(
        credentials.database.as_str(),
        credentials.user.as_str(),
        credentials.password.as_str(),
    )
    .servers(servers)
    .sslmode(args.ssl_mode)
    .keepalive(KEEPALIVE);
    if let Some(ca_cert) = args.ca_cert {
        builder = builder.ca_cert_path(ca_cert);
    }
    let config = builder.build()?;
    tracing::debug!(?config, "connecting");

    // From here on CTRL+C is delivered to us instead of killing the process
    let (tx, mut interrupts) = interrupt::channel();
    let _signals = interrupt::forward_ctrl_c(tx);

    let client = tokio::select! {
        biased;
        Some(_) = interrupts.recv() => return Ok(LoopOutcome::Interrupted),
        client = HttpClient::connect(&config) => client?,
    };

    let history = (!args.no_history).then(prompt::input::default_history_path);
    let reader = TerminalReader::spawn(history)?;

    let mut repl = PromptLoop::new(client, reader, interrupts, std::io::stdout())
        .with_prompt(format!("{}> ", credentials.database));
    let outcome = repl.run().await?;

    if outcome != LoopOutcome::ForcedExit {
        let mut client = repl.into_client();
        if let Err(e) = client.close().await {
            tracing::debug!(error = %e, "close failed");
        }
    }
    Ok(outcome)
}
