#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that trains agents on grid world scenarios.

mod config;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridworld_core::Action;
use gridworld_rendering::{RenderingBackend, TextRenderer};
use gridworld_system_agents::{
    DistanceEncoder, Exploration, QLearningAgent, QLearningConfig, RandomPolicy, TabularEncoder,
};
use gridworld_system_episode::{run_episode, Episode, Policy, RewardLog, Transition};
use gridworld_system_reward::RewardFunction;
use gridworld_world::WorldState;
use tracing::{debug, info, Level};

use crate::config::ScenarioFile;

/// Command-line arguments for the grid world runner.
#[derive(Parser, Debug)]
#[command(name = "gridworld", about = "Train an agent on a grid world scenario")]
struct Args {
    /// TOML file with `[scenario]` and optional `[rewards]` tables.
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Built-in curriculum stage to run when no scenario file is given.
    #[arg(long, default_value = "target")]
    preset: String,

    /// Agent that chooses actions.
    #[arg(long, value_enum, default_value_t = AgentKind::QLearning)]
    agent: AgentKind,

    /// State encoding the q-learning agent keys its table on.
    #[arg(long, value_enum, default_value_t = Observation::Tabular)]
    observation: Observation,

    /// Number of episodes to play.
    #[arg(long, default_value_t = 1000)]
    episodes: usize,

    /// Actions after which an unfinished episode is truncated.
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,

    /// Seed for the agent's action sampling.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Weight of future value in q-learning updates.
    #[arg(long, default_value_t = 0.95)]
    discount: f64,

    /// Step size of q-learning updates.
    #[arg(long, default_value_t = 0.01)]
    learning_rate: f64,

    /// Fixed exploration probability.
    #[arg(long, default_value_t = 0.1, conflicts_with = "anneal_episodes")]
    epsilon: f64,

    /// Anneal exploration from 1 over this many episodes instead.
    #[arg(long)]
    anneal_episodes: Option<u32>,

    /// Episodes per reported reward average.
    #[arg(long, default_value_t = 100)]
    log_interval: usize,

    /// Print the initial and final grid of every episode.
    #[arg(long)]
    render: bool,

    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Agent selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    /// Uniformly random actions.
    Random,
    /// Tabular q-learning with epsilon-greedy exploration.
    QLearning,
}

/// State encoding used as the q-learning table key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Observation {
    /// Whole world states.
    Tabular,
    /// Seventeen distance features per state.
    Distance,
}

/// Concrete agent chosen for a run.
enum Agent {
    Random(RandomPolicy),
    Tabular(QLearningAgent<TabularEncoder>),
    Distance(QLearningAgent<DistanceEncoder<'static>>),
}

impl Agent {
    fn from_args(args: &Args) -> Self {
        let exploration = match args.anneal_episodes {
            Some(decay_episodes) => Exploration::Annealed { decay_episodes },
            None => Exploration::EpsilonGreedy {
                epsilon: args.epsilon,
            },
        };
        let config = QLearningConfig {
            discount: args.discount,
            learning_rate: args.learning_rate,
            exploration,
        };

        match (args.agent, args.observation) {
            (AgentKind::Random, _) => Self::Random(RandomPolicy::new(args.seed)),
            (AgentKind::QLearning, Observation::Tabular) => {
                Self::Tabular(QLearningAgent::new(TabularEncoder, config, args.seed))
            }
            (AgentKind::QLearning, Observation::Distance) => {
                Self::Distance(QLearningAgent::new(DistanceEncoder::shared(), config, args.seed))
            }
        }
    }

    fn table_len(&self) -> Option<usize> {
        match self {
            Self::Random(_) => None,
            Self::Tabular(agent) => Some(agent.table_len()),
            Self::Distance(agent) => Some(agent.table_len()),
        }
    }
}

impl Policy for Agent {
    fn act(&mut self, state: &WorldState) -> Action {
        match self {
            Self::Random(agent) => agent.act(state),
            Self::Tabular(agent) => agent.act(state),
            Self::Distance(agent) => agent.act(state),
        }
    }

    fn observe(&mut self, transition: &Transition) {
        match self {
            Self::Random(agent) => agent.observe(transition),
            Self::Tabular(agent) => agent.observe(transition),
            Self::Distance(agent) => agent.observe(transition),
        }
    }
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn load_scenario(args: &Args) -> Result<ScenarioFile> {
    match &args.scenario {
        Some(path) => ScenarioFile::load(path),
        None => ScenarioFile::preset(&args.preset),
    }
}

/// Entry point for the grid world command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(level_for(args.verbose))
        .with_target(false)
        .init();

    let file = load_scenario(&args)?;
    let initial = file
        .scenario
        .build()
        .context("scenario failed validation")?;
    debug!(rewards = ?file.rewards, "reward constants loaded");

    let mut episode =
        Episode::new(initial, RewardFunction::new(file.rewards)).with_max_steps(args.max_steps);
    let mut agent = Agent::from_args(&args);
    let mut renderer = TextRenderer::new(io::stdout());
    let mut log = RewardLog::new(args.log_interval);

    renderer.present(episode.reset(), Some("initial state"))?;

    let mut solved = 0_usize;
    for index in 0..args.episodes {
        if args.render {
            let caption = format!("episode {index} start");
            renderer.present(episode.reset(), Some(&caption))?;
        }

        let summary = run_episode(&mut episode, &mut agent)
            .with_context(|| format!("episode {index} stepped past its terminal state"))?;
        if summary.terminated && !episode.state().is_in_pit() {
            solved += 1;
        }
        debug!(
            episode = index,
            steps = summary.steps,
            total_reward = summary.total_reward,
            terminated = summary.terminated,
            truncated = summary.truncated,
            "episode complete"
        );

        if args.render {
            let caption = format!(
                "episode {index} end after {} steps, reward {}",
                summary.steps, summary.total_reward
            );
            renderer.present(episode.state(), Some(&caption))?;
        }

        if let Some(report) = log.record(&summary) {
            info!(
                episode = report.episode,
                average_reward = report.average_reward,
                "interval reward"
            );
            println!(
                "episode {} avg reward: {:.2}",
                report.episode, report.average_reward
            );
        }
    }

    if let Some(states) = agent.table_len() {
        info!(states, "learned table size");
    }
    println!("solved {solved} of {} episodes", args.episodes);
    Ok(())
}
