use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use westward_game::{DefeatReason, JourneyStatus, JourneySummary, TrailConfig};

use crate::policy::Strategy;
use crate::setup::PartySetup;

/// One automated journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub strategy: String,
    pub seed: u64,
    pub iteration: usize,
    /// Seed actually handed to the engine: `seed + iteration`.
    pub journey_seed: u64,
    pub rng_draws: u64,
    pub summary: JourneySummary,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

/// Outcome rates for one strategy across every run it played.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyAggregate {
    pub strategy: String,
    pub runs: usize,
    pub victories: usize,
    pub perished: usize,
    pub winter: usize,
    pub abandoned: usize,
    pub victory_rate: f64,
    pub mean_score: f64,
    pub mean_days: f64,
    pub mean_survivors: f64,
    pub mean_miles: f64,
}

/// What `auto` should play.
#[derive(Debug, Clone)]
pub struct AutoPlan {
    pub strategies: Vec<Strategy>,
    pub seeds: Vec<u64>,
    pub iterations: usize,
    pub setup: PartySetup,
    pub config: TrailConfig,
}

impl AutoPlan {
    pub fn run(&self, verbose: bool) -> Result<Vec<RunRecord>> {
        let mut records =
            Vec::with_capacity(self.strategies.len() * self.seeds.len() * self.iterations);
        for &strategy in &self.strategies {
            for &seed in &self.seeds {
                for iteration in 0..self.iterations {
                    let record = self.run_single(strategy, seed, iteration)?;
                    if verbose {
                        println!(
                            "  {strategy:>8} seed {:<6} day {:>3}  {}",
                            record.journey_seed, record.summary.days_elapsed, record.summary.status
                        );
                    }
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    fn run_single(&self, strategy: Strategy, seed: u64, iteration: usize) -> Result<RunRecord> {
        let start_time = Instant::now();
        let journey_seed = seed.wrapping_add(u64::try_from(iteration).unwrap_or(u64::MAX));
        let (mut session, _receipt) = self.setup.start(&self.config, journey_seed)?;
        let mut policy = strategy.create_policy(journey_seed);
        let summary = session
            .run(policy.as_mut())
            .with_context(|| format!("{strategy} strategy failed on seed {journey_seed}"))?;
        log::info!(
            "{strategy} seed {journey_seed}: {} after {} days, score {}",
            summary.status,
            summary.days_elapsed,
            summary.score
        );
        Ok(RunRecord {
            strategy: strategy.as_str().to_string(),
            seed,
            iteration,
            journey_seed,
            rng_draws: session.rng().draws(),
            summary,
            duration: start_time.elapsed(),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Group run records by strategy, keeping first-seen order.
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_runs(records: &[RunRecord]) -> Vec<StrategyAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: BTreeMap<&str, Vec<&RunRecord>> = BTreeMap::new();
    for record in records {
        let key = record.strategy.as_str();
        if !grouped.contains_key(key) {
            order.push(key);
        }
        grouped.entry(key).or_default().push(record);
    }

    order
        .into_iter()
        .filter_map(|key| grouped.get(key).map(|runs| (key, runs)))
        .map(|(key, runs)| {
            let count = runs.len();
            let status_count = |wanted: JourneyStatus| {
                runs.iter()
                    .filter(|record| record.summary.status == wanted)
                    .count()
            };
            let victories = status_count(JourneyStatus::Victory);
            StrategyAggregate {
                strategy: key.to_string(),
                runs: count,
                victories,
                perished: status_count(JourneyStatus::Defeat(DefeatReason::Perished)),
                winter: status_count(JourneyStatus::Defeat(DefeatReason::Winter)),
                abandoned: status_count(JourneyStatus::Defeat(DefeatReason::Abandoned)),
                victory_rate: mean(victories as f64, count),
                mean_score: mean(
                    runs.iter().map(|r| f64::from(r.summary.score)).sum(),
                    count,
                ),
                mean_days: mean(
                    runs.iter().map(|r| f64::from(r.summary.days_elapsed)).sum(),
                    count,
                ),
                mean_survivors: mean(
                    runs.iter().map(|r| r.summary.survivors.len() as f64).sum(),
                    count,
                ),
                mean_miles: mean(
                    runs.iter()
                        .map(|r| f64::from(r.summary.miles_traveled))
                        .sum(),
                    count,
                ),
            }
        })
        .collect()
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(strategies: Vec<Strategy>, seeds: Vec<u64>, iterations: usize) -> AutoPlan {
        AutoPlan {
            strategies,
            seeds,
            iterations,
            setup: PartySetup::new("Lead", "Ada,Eli", "banker", "april").unwrap(),
            config: TrailConfig::default_config(),
        }
    }

    #[test]
    fn runs_every_strategy_seed_and_iteration() {
        let records = plan(vec![Strategy::Steady, Strategy::Random], vec![3, 40], 2)
            .run(false)
            .unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[1].journey_seed, 4);
        assert!(records.iter().all(|r| r.summary.status.is_terminal()));
        assert!(records.iter().all(|r| r.rng_draws > 0));

        let aggregates = aggregate_runs(&records);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].strategy, "steady");
        assert_eq!(aggregates[0].runs, 4);
        let outcomes = aggregates[0].victories
            + aggregates[0].perished
            + aggregates[0].winter
            + aggregates[0].abandoned;
        assert_eq!(outcomes, 4);
    }

    #[test]
    fn identical_plans_reproduce_identical_journeys() {
        let first = plan(vec![Strategy::Hustle], vec![77], 1).run(false).unwrap();
        let second = plan(vec![Strategy::Hustle], vec![77], 1).run(false).unwrap();
        assert_eq!(first[0].summary, second[0].summary);
        assert_eq!(first[0].rng_draws, second[0].rng_draws);
    }

    #[test]
    fn aggregating_nothing_is_empty() {
        assert!(aggregate_runs(&[]).is_empty());
    }
}
