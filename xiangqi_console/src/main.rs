#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod repl;
mod tui;

use std::time::Duration;

use anyhow::Context;
use clap::{Command, arg};
use xiangqi_dare::ai::AiStrategyKind;
use xiangqi_dare::force::Force;
use xiangqi_dare::rules::{EngineConfig, GameMode};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Xiangqi with dares")
        .version(clap::crate_version!())
        .about("Plays Xiangqi with dares and rewards in the terminal")
        .arg(
            arg!(--"config" <config_file> "Path to the configuration file: yaml-serialized EngineConfig.")
                .required(false),
        )
        .arg(
            arg!(--"mode" <mode> "Game mode")
                .value_parser(["pve", "local", "online"])
                .required(false),
        )
        .arg(
            arg!(--"ai" <strategy> "AI strategy")
                .value_parser(["random", "greedy"])
                .required(false),
        )
        .arg(
            arg!(--"ai-force" <force> "Side played by the AI")
                .value_parser(["red", "black"])
                .required(false),
        )
        .arg(
            arg!(--"ai-delay" <duration> "Pause before each AI move, e.g. \"1s 200ms\"")
                .required(false),
        )
        .arg(
            arg!(--"seed" <seed> "Random seed")
                .value_parser(clap::value_parser!(u64))
                .required(false),
        )
        .arg(arg!(--"ascii" "Use letters instead of pictograms"))
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => read_config_file(path)?,
        None => EngineConfig::pve(),
    };
    if let Some(mode) = matches.get_one::<String>("mode") {
        config.mode = parse_mode(mode)?;
    }
    if let Some(strategy) = matches.get_one::<String>("ai") {
        config.ai_strategy = strategy.parse::<AiStrategyKind>()?;
    }
    if let Some(force) = matches.get_one::<String>("ai-force") {
        config.ai_force = match force.as_str() {
            "red" => Force::Red,
            _ => Force::Black,
        };
    }
    if let Some(delay) = matches.get_one::<String>("ai-delay") {
        config.ai_delay = parse_delay(delay)?;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.rng_seed = Some(seed);
    }
    log::info!(
        "Starting {:?} game, AI: {} playing {:?} with {} delay",
        config.mode,
        config.ai_strategy,
        config.ai_force,
        humantime::format_duration(config.ai_delay)
    );
    repl::run(config, matches.get_flag("ascii"))
}

fn read_config_file(path: &str) -> anyhow::Result<EngineConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Reading config file {path}"))?;
    serde_yaml::from_str(&contents).with_context(|| format!("Parsing config file {path}"))
}

fn parse_mode(mode: &str) -> anyhow::Result<GameMode> {
    match mode {
        "pve" => Ok(GameMode::Pve),
        "local" => Ok(GameMode::Local),
        "online" => Ok(GameMode::OnlineReserved),
        _ => anyhow::bail!("Unknown game mode: {mode}"),
    }
}

fn parse_delay(delay: &str) -> anyhow::Result<Duration> {
    humantime::parse_duration(delay).with_context(|| format!("Invalid AI delay: {delay}"))
}
