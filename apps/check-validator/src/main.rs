#![warn(clippy::all)]

use std::process;

use anyhow::Result;
use clap::Parser;
use nodewatch::{CheckStatus, NodeRpc, Report, RpcClient, Severity, ValidatorCheck, finish, guard};
use tracing::debug;

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if cli.verbose { logger::init_verbose() } else { logger::init() }
    logger::log_panics();

    let report = guard(|| {
        run(&cli).unwrap_or_else(|err| Report {
            line: format!("{}: {err:#}", Severity::Unknown),
            severity: Severity::Unknown,
        })
    });

    println!("{}", report.line);
    process::exit(report.exit_code());
}

fn run(cli: &Cli) -> Result<Report> {
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => return Ok(finish(CheckStatus::new(), Err(err.into()))),
    };
    debug!("{config}");

    let check = match ValidatorCheck::from_config(&config) {
        Ok(check) => check,
        Err(err) => return Ok(finish(CheckStatus::new(), Err(err.into()))),
    };

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let mut status = CheckStatus::new();
    let result = runtime.block_on(async {
        let timeout = config.node.request_timeout();
        let node = RpcClient::new(&config.node.server, config.node.port, config.node.use_tls, timeout)?;
        let compare = match &config.validator.compare_to_uri {
            Some(uri) => Some(RpcClient::from_uri(uri, timeout)?),
            None => None,
        };

        check.run(&mut status, &node, compare.as_ref().map(|client| client as &dyn NodeRpc)).await
    });

    Ok(finish(status, result))
}
