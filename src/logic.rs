use std::process::ExitCode;

use crate::cli::{self, Command, Target};
use crate::config::ServerList;
use crate::{resolve, ssh, utils};

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::builder().filter_level(level).init();
    log::debug!("Debug logging enabled");
}

/// One resolve-then-execute cycle against an already loaded config.
pub async fn deploy(list: &ServerList, target: &Target) -> anyhow::Result<String> {
    let env = resolve::resolve(list, &target.server, &target.env)?;
    log::debug!("Resolved {}:{} to {:?}", target.server, target.env, env);
    let output = ssh::execute(env).await?;
    Ok(output)
}

pub async fn run(cmd: Command) -> ExitCode {
    init_logger(cmd.verbose);

    println!("Deploy v{}", env!("CARGO_PKG_VERSION"));

    let Some(target) = cmd.target() else {
        cli::print_usage();
        return ExitCode::FAILURE;
    };

    let path = utils::config_path(cmd.config);
    let list = match ServerList::load(&path) {
        Ok(list) => list,
        Err(err) => {
            println!(
                "Could not load config: {:#} (tried with path {})",
                anyhow::Error::new(err),
                path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    println!("Initiating deployment of {}:{}", target.server, target.env);
    match deploy(&list, &target).await {
        Ok(output) => {
            println!("Deployment succeeded!");
            println!("Output:\n{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("deployment failed: {:?}", err);
            println!("Error while deploying: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
