#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Episodic control loop that drives the world one action per tick.
//!
//! [`Episode`] owns the initial and current [`WorldState`], scores every
//! transition with a [`RewardFunction`] and reports termination. Agents plug
//! in through the [`Policy`] trait and [`run_episode`] plays a full episode.
//! [`RewardLog`] tracks returns across a training run.

use gridworld_core::{Action, TerminalStateError};
use gridworld_system_reward::RewardFunction;
use gridworld_world::{is_terminal, step, WorldState};
use tracing::{debug, warn};

/// Outcome of a single action applied through an [`Episode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State the action was applied to.
    pub previous: WorldState,
    /// Action chosen by the agent.
    pub action: Action,
    /// State produced by the action.
    pub state: WorldState,
    /// Reward assigned to the transition.
    pub reward: i32,
    /// Whether `state` ended the episode.
    pub terminated: bool,
    /// Whether the step cap was reached before termination.
    pub truncated: bool,
}

/// Mutable episode bookkeeping around the pure world functions.
#[derive(Clone, Debug)]
pub struct Episode {
    initial: WorldState,
    current: WorldState,
    reward: RewardFunction,
    max_steps: Option<usize>,
    steps: usize,
}

impl Episode {
    /// Creates an episode that starts from `initial`.
    #[must_use]
    pub fn new(initial: WorldState, reward: RewardFunction) -> Self {
        Self {
            current: initial.clone(),
            initial,
            reward,
            max_steps: None,
            steps: 0,
        }
    }

    /// Caps the number of actions after which an episode is truncated.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Restores the initial state and clears the step counter.
    pub fn reset(&mut self) -> &WorldState {
        self.current = self.initial.clone();
        self.steps = 0;
        debug!(player = %self.current.player(), "episode reset");
        &self.current
    }

    /// State the next action will be applied to.
    #[must_use]
    pub const fn state(&self) -> &WorldState {
        &self.current
    }

    /// Number of actions applied since the last reset.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Applies an action and advances the episode.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalStateError`] when the current state already ended the
    /// episode; call [`Episode::reset`] before issuing further actions.
    pub fn step(&mut self, action: Action) -> Result<Transition, TerminalStateError> {
        let next = step(&self.current, action)?;
        let previous = std::mem::replace(&mut self.current, next);
        self.steps += 1;

        let terminated = is_terminal(&self.current);
        let truncated = !terminated && self.max_steps.is_some_and(|max| self.steps >= max);
        if truncated {
            warn!(steps = self.steps, "episode truncated by step cap");
        }

        Ok(Transition {
            reward: self.reward.reward(&previous, &self.current),
            previous,
            action,
            state: self.current.clone(),
            terminated,
            truncated,
        })
    }
}

/// Decision-making agent that consumes world states.
pub trait Policy {
    /// Chooses the next action for `state`.
    fn act(&mut self, state: &WorldState) -> Action;

    /// Receives the outcome of the previously chosen action.
    fn observe(&mut self, _transition: &Transition) {}
}

/// Totals collected while playing one episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EpisodeSummary {
    /// Number of actions taken.
    pub steps: usize,
    /// Sum of all transition rewards.
    pub total_reward: i64,
    /// Whether the episode reached a terminal state.
    pub terminated: bool,
    /// Whether the step cap ended the episode first.
    pub truncated: bool,
}

/// Resets the episode and plays it to completion with `policy`.
///
/// Without a step cap the loop only ends when the policy reaches a terminal
/// state.
///
/// # Errors
///
/// Propagates [`TerminalStateError`] from [`Episode::step`]; this cannot occur
/// after a reset because scenarios never start in a terminal state.
pub fn run_episode<P>(
    episode: &mut Episode,
    policy: &mut P,
) -> Result<EpisodeSummary, TerminalStateError>
where
    P: Policy + ?Sized,
{
    let mut summary = EpisodeSummary::default();
    let mut state = episode.reset().clone();

    loop {
        let action = policy.act(&state);
        let transition = episode.step(action)?;
        policy.observe(&transition);

        summary.steps += 1;
        summary.total_reward += i64::from(transition.reward);
        if transition.terminated || transition.truncated {
            summary.terminated = transition.terminated;
            summary.truncated = transition.truncated;
            break;
        }
        state = transition.state;
    }

    debug!(
        steps = summary.steps,
        total_reward = summary.total_reward,
        terminated = summary.terminated,
        "episode finished"
    );
    Ok(summary)
}

/// Average return over the most recent window of episodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalReport {
    /// Zero-based index of the episode that closed the window.
    pub episode: usize,
    /// Mean total reward over the window.
    pub average_reward: f64,
}

/// Per-episode returns with an average reported every `interval` episodes.
///
/// Reports fall on episodes `0, interval, 2 * interval, ...` and cover the
/// last `interval` recorded returns, so the first report spans one episode.
#[derive(Clone, Debug)]
pub struct RewardLog {
    interval: usize,
    totals: Vec<i64>,
}

impl RewardLog {
    /// Creates a log reporting every `interval` episodes (at least one).
    #[must_use]
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            totals: Vec::new(),
        }
    }

    /// Returns recorded so far, oldest first.
    #[must_use]
    pub fn totals(&self) -> &[i64] {
        &self.totals
    }

    /// Records one episode and yields a report when a window closes.
    pub fn record(&mut self, summary: &EpisodeSummary) -> Option<IntervalReport> {
        let episode = self.totals.len();
        self.totals.push(summary.total_reward);
        if episode % self.interval != 0 {
            return None;
        }

        let window = &self.totals[self.totals.len().saturating_sub(self.interval)..];
        #[allow(clippy::cast_precision_loss)]
        let average_reward = window.iter().sum::<i64>() as f64 / window.len() as f64;
        Some(IntervalReport {
            episode,
            average_reward,
        })
    }
}
