#![warn(clippy::all)]

use std::process;

use anyhow::Result;
use clap::Parser;
use nodewatch::{CheckStatus, GithubReleases, ReleaseCheck, Report, RpcClient, Severity, finish, guard};
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

    let check = match ReleaseCheck::from_config(&config) {
        Ok(check) => check,
        Err(err) => return Ok(finish(CheckStatus::new(), Err(err.into()))),
    };

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let mut status = CheckStatus::new();
    let result = runtime.block_on(async {
        let timeout = config.node.request_timeout();
        let node = RpcClient::new(&config.node.server, config.node.port, config.node.use_tls, timeout)?;
        let releases = GithubReleases::new(config.release.url.clone(), timeout)?;
        check.run(&mut status, &node, &releases).await
    });

    Ok(finish(status, result))
}
