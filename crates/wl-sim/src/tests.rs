//! Unit and whole-run tests for wl-sim.

use wl_region::RegistryParams;

use crate::{Model, ModelBuilder, ModelConfig, SelectionVolume};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Regions `R0..Rn` with the given monthly rates and equal shares.
fn params(rates: &[f64], initial: u64, additional: f64) -> RegistryParams {
    let n = rates.len();
    RegistryParams {
        codes:                          (0..n).map(|i| format!("R{i}")).collect(),
        transplant_rates:               rates.to_vec(),
        initial_queue_probabilities:    vec![1.0 / n as f64; n],
        additional_queue_probabilities: vec![1.0 / n as f64; n],
        initial_patients:               initial,
        additional_patients:            additional,
    }
}

/// A small but busy three-region model: deaths (from the long-waiting part
/// of the initial list), multiple listing and arrivals all happen within a
/// couple of years.
fn busy_model(seed: u64) -> Model {
    ModelBuilder::new(params(&[6.0, 3.0, 1.5], 150, 9.0))
        .seed(seed)
        .advantage_probability(0.4)
        .years(2)
        .build()
        .unwrap()
}

fn fixed_config(average_lifespan: f64, std_dev: f64, years: u32) -> ModelConfig {
    ModelConfig {
        advantage_probability: 0.0,
        average_lifespan,
        lifespan_std_dev: std_dev,
        years,
        ..ModelConfig::default()
    }
}

// ── ModelBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use wl_patient::Condition;

    use super::*;
    use crate::SimError;

    #[test]
    fn initial_list_is_populated() {
        let model = busy_model(1);
        assert_eq!(model.patients().len(), 150);
        assert_eq!(model.region_count(), 3);
        assert!(model.is_running());
        assert_eq!(model.tick().0, 0);
        assert_eq!(model.waiting(), 150);
        assert!(model.history().is_empty());
        for p in model.patients().iter() {
            assert_eq!(p.condition, Condition::Waiting);
        }
    }

    #[test]
    fn initial_waits_fall_in_brackets_and_lifespans_exceed_them() {
        let model = ModelBuilder::new(params(&[1.0], 500, 0.0))
            .config(fixed_config(98.0, 5.0, 1))
            .build()
            .unwrap();
        for p in model.patients().iter() {
            assert!(p.wait_time < 80);
            assert!(p.lifespan > p.wait_time as f64);
        }
    }

    #[test]
    fn advantage_probability_out_of_range() {
        for p in [-0.1, 1.5, f64::NAN] {
            let result = ModelBuilder::new(params(&[1.0], 10, 1.0))
                .advantage_probability(p)
                .build();
            assert!(matches!(result, Err(SimError::Config(_))), "p = {p}");
        }
    }

    #[test]
    fn non_positive_lifespan_rejected() {
        let result = ModelBuilder::new(params(&[1.0], 10, 1.0))
            .average_lifespan(0.0)
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn probability_length_mismatch_rejected() {
        let mut p = params(&[1.0, 2.0], 10, 1.0);
        p.initial_queue_probabilities.pop();
        let result = ModelBuilder::new(p).build();
        assert!(matches!(result, Err(SimError::Region(_))));
    }

    #[test]
    fn probabilities_not_summing_to_one_rejected() {
        let mut p = params(&[1.0, 2.0], 10, 1.0);
        p.additional_queue_probabilities = vec![0.5, 0.4];
        let result = ModelBuilder::new(p).build();
        assert!(matches!(result, Err(SimError::Region(_))));
    }

    #[test]
    fn zero_secondary_weights_are_a_sampling_error() {
        // Smart listing with every rate at zero leaves nothing to choose.
        let result = ModelBuilder::new(params(&[0.0, 0.0, 0.0], 20, 0.0))
            .advantage_probability(1.0)
            .smart_listing(true)
            .build();
        assert!(matches!(result, Err(SimError::Sampling(_))));
    }

    #[test]
    fn impossible_initial_lifespan_is_a_sampling_error() {
        // With no spread, a lifespan of half a month cannot exceed any
        // non-zero initial wait.
        let result = ModelBuilder::new(params(&[1.0], 50, 0.0))
            .config(fixed_config(0.5, 0.0, 1))
            .build();
        assert!(matches!(result, Err(SimError::Sampling(_))));
    }

    #[test]
    fn single_region_never_multiply_lists() {
        let model = ModelBuilder::new(params(&[1.0], 100, 0.0))
            .advantage_probability(1.0)
            .build()
            .unwrap();
        assert_eq!(model.alternate_listings(), 0);
        assert!(model.patients().iter().all(|p| !p.advantaged));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use wl_core::{PatientId, Tick};
    use wl_patient::Condition;

    use super::*;
    use crate::NoopObserver;

    fn forced_single_region() -> Model {
        ModelBuilder::new(params(&[2.0], 10, 0.0))
            .advantage_probability(0.0)
            .average_lifespan(1e9)
            .selection_volume(SelectionVolume::Expected)
            .build()
            .unwrap()
    }

    #[test]
    fn single_region_drains_two_per_month() {
        let mut model = forced_single_region();
        model.run(&mut NoopObserver).unwrap();

        assert!(!model.is_running());
        assert_eq!(model.tick(), Tick(5));
        assert_eq!(model.waiting(), 0);
        assert_eq!(model.transplants(), 10);
        assert_eq!(model.count(Condition::Transplanted), 8);
        assert_eq!(model.count(Condition::Selected), 2);
        assert_eq!(model.primary_center_transplants(), 10);
        assert_eq!(model.alternate_center_transplants(), 0);

        // One more month completes the last two transplants.
        model.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(model.count(Condition::Transplanted), 10);
    }

    #[test]
    fn selection_is_first_in_first_out() {
        let mut model = forced_single_region();
        model.step(&mut NoopObserver).unwrap();

        let conditions = model.patients().conditions();
        assert_eq!(&conditions[..2], &[Condition::Selected; 2]);
        assert!(conditions[2..].iter().all(|c| c.is_waiting()));
        assert_eq!(model.queue(wl_core::RegionId(0)).unwrap().cursor(), 2);

        model.step(&mut NoopObserver).unwrap();
        let store = model.patients();
        assert_eq!(store.condition(PatientId(0)), Condition::Transplanted);
        assert_eq!(store.condition(PatientId(2)), Condition::Selected);
        assert_eq!(store.condition(PatientId(4)), Condition::Waiting);
    }

    #[test]
    fn stops_after_horizon() {
        let mut model = ModelBuilder::new(params(&[0.0], 5, 0.0))
            .config(fixed_config(1e9, 5.0, 1))
            .build()
            .unwrap();
        model.run(&mut NoopObserver).unwrap();
        assert_eq!(model.tick(), Tick(13));
        assert_eq!(model.history().len(), 13);
        assert_eq!(model.waiting(), 5);
    }

    #[test]
    fn everyone_dies_without_transplants() {
        let mut model = ModelBuilder::new(params(&[0.0], 20, 0.0))
            .config(fixed_config(100.0, 0.0, 20))
            .build()
            .unwrap();
        model.run(&mut NoopObserver).unwrap();

        assert_eq!(model.deceased(), 20);
        assert_eq!(model.transplants(), 0);
        assert_eq!(model.primary_deaths_regional(), vec![20]);
        for p in model.patients().iter() {
            assert_eq!(p.wait_time, 100, "dies the month wait reaches lifespan");
        }
    }

    #[test]
    fn history_snapshots_every_month() {
        let mut model = busy_model(3);
        model.run_ticks(4, &mut NoopObserver).unwrap();
        assert_eq!(model.history().len(), 4);
        assert_eq!(model.history()[0].total(), 150);
        assert_eq!(model.history()[0].waiting + model.history()[0].deceased, 150);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = busy_model(11);
        let mut b = busy_model(11);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.summary(), b.summary());
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = busy_model(11);
        let mut b = busy_model(12);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_ne!(a.history(), b.history());
    }
}

// ── Whole-run properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use std::collections::HashSet;

    use wl_patient::Condition;

    use super::*;
    use crate::NoopObserver;

    const SEEDS: [u64; 4] = [0, 100, 200, 300];

    #[test]
    fn wait_and_condition_evolve_per_lifecycle() {
        for seed in SEEDS {
            let mut model = busy_model(seed);
            while model.is_running() {
                let before: Vec<(Condition, u32)> = model
                    .patients()
                    .iter()
                    .map(|p| (p.condition, p.wait_time))
                    .collect();

                model.step(&mut NoopObserver).unwrap();

                for (i, p) in model.patients().iter().enumerate() {
                    let Some(&(was, waited)) = before.get(i) else {
                        assert_eq!((p.condition, p.wait_time), (Condition::Waiting, 0));
                        continue;
                    };
                    assert!(
                        was == p.condition || was.can_become(p.condition),
                        "seed {seed}: {was} -> {}",
                        p.condition
                    );
                    let expected = if was.is_waiting() { waited + 1 } else { waited };
                    assert_eq!(p.wait_time, expected, "seed {seed}, patient {i}");
                }
            }
        }
    }

    #[test]
    fn advantaged_iff_multiply_listed() {
        for seed in SEEDS {
            let mut model = busy_model(seed);
            model.run(&mut NoopObserver).unwrap();
            for p in model.patients().iter() {
                assert_eq!(p.advantaged, p.regions.len() > 1);
                let distinct: HashSet<_> = p.regions.iter().collect();
                assert_eq!(distinct.len(), p.regions.len());
            }
        }
    }

    #[test]
    fn listing_counters_match_patients() {
        for seed in SEEDS {
            let mut model = busy_model(seed);
            model.run(&mut NoopObserver).unwrap();

            let mut primary = vec![0u64; 3];
            let mut alternate = vec![0u64; 3];
            for p in model.patients().iter() {
                primary[p.primary().index()] += 1;
                for r in &p.regions[1..] {
                    alternate[r.index()] += 1;
                }
            }
            assert_eq!(model.primary_listings_by_region(), primary.as_slice());
            assert_eq!(model.alternate_listings_by_region(), alternate.as_slice());
            assert_eq!(model.primary_listings(), model.patients().len() as u64);
        }
    }

    #[test]
    fn queues_mirror_region_lists() {
        for seed in SEEDS {
            let mut model = busy_model(seed);
            model.run(&mut NoopObserver).unwrap();

            for queue in model.queues() {
                for &id in queue.entries() {
                    assert!(model.patients().regions(id).contains(&queue.region()));
                }
            }
            for p in model.patients().iter() {
                for r in p.regions {
                    let queue = model.queue(*r).unwrap();
                    let hits = queue.entries().iter().filter(|&&e| e == p.id).count();
                    assert_eq!(hits, 1, "seed {seed}: {} on {r}", p.id);
                }
            }
        }
    }

    #[test]
    fn cursor_is_monotone_and_bounded() {
        for seed in SEEDS {
            let mut model = busy_model(seed);
            let mut last = vec![0usize; model.region_count()];
            while model.is_running() {
                model.step(&mut NoopObserver).unwrap();
                for (r, queue) in model.queues().iter().enumerate() {
                    assert!(queue.cursor() >= last[r]);
                    assert!(queue.cursor() <= queue.len());
                    last[r] = queue.cursor();

                    // Everything behind the cursor was resolved somewhere.
                    for &id in &queue.entries()[..queue.cursor()] {
                        assert!(!model.patients().condition(id).is_waiting());
                    }
                }
            }
        }
    }

    #[test]
    fn every_selection_is_tallied_once() {
        for seed in SEEDS {
            let mut model = busy_model(seed);
            model.run(&mut NoopObserver).unwrap();
            assert_eq!(
                model.primary_center_transplants() + model.alternate_center_transplants(),
                model.transplants()
            );
        }
    }
}

// ── Secondary listing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod listing_tests {
    use wl_core::{RegionId, SimRng};

    use super::*;
    use crate::{SimError, draw_secondary_regions, secondary_weights};

    #[test]
    fn smart_weights_are_rate_over_queue() {
        let w = secondary_weights(&[10.0, 1.0, 4.0], &[5, 5, 0], RegionId(2), true);
        assert_eq!(w, vec![10.0 / 6.0, 1.0 / 6.0, 0.0]);
    }

    #[test]
    fn uniform_weights_exclude_primary() {
        let w = secondary_weights(&[10.0, 1.0, 4.0], &[5, 5, 0], RegionId(0), false);
        assert_eq!(w, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn smart_listing_favours_high_rate_regions() {
        let w = secondary_weights(&[10.0, 1.0, 7.0], &[3, 3, 3], RegionId(2), true);
        let mut rng = SimRng::new(5);
        let trials = 20_000;
        let mut first_is_zero = 0;
        for _ in 0..trials {
            let picked = draw_secondary_regions(&mut rng, &w).unwrap();
            assert!(!picked.contains(&RegionId(2)));
            if picked[0] == RegionId(0) {
                first_is_zero += 1;
            }
        }
        let share = first_is_zero as f64 / trials as f64;
        assert!((0.89..0.93).contains(&share), "share {share}");
    }

    #[test]
    fn all_zero_weights_error() {
        let mut rng = SimRng::new(1);
        let result = draw_secondary_regions(&mut rng, &[0.0, 0.0, 0.0]);
        assert!(matches!(result, Err(SimError::Sampling(_))));
    }

    #[test]
    fn single_region_has_no_candidates() {
        let mut rng = SimRng::new(1);
        assert!(draw_secondary_regions(&mut rng, &[0.0]).unwrap().is_empty());
    }

    #[test]
    fn uniform_listing_counts_are_one_to_three() {
        let model = ModelBuilder::new(params(&[1.0; 4], 3_000, 0.0))
            .advantage_probability(1.0)
            .smart_listing(false)
            .seed(9)
            .build()
            .unwrap();

        let mut by_count = [0usize; 3];
        for p in model.patients().iter() {
            assert!((2..=4).contains(&p.regions.len()));
            by_count[p.regions.len() - 2] += 1;
        }
        for n in by_count {
            assert!((850..1150).contains(&n), "{by_count:?}");
        }
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use wl_patient::Condition;

    use super::*;
    use crate::{ConditionCounts, NoopObserver};

    #[test]
    fn empty_denominators_are_zero() {
        let model = ModelBuilder::new(params(&[0.0, 0.0], 6, 0.0))
            .advantage_probability(0.0)
            .build()
            .unwrap();
        assert_eq!(model.average_waiting(), 0.0);
        assert_eq!(model.average_waiting_advantaged(), 0.0);
        assert_eq!(model.deceased(), 0);
        assert_eq!(model.advantaged_deceased(), 0);
        assert_eq!(model.primary_waiting_rates(), vec![0.0, 0.0]);
        assert_eq!(model.primary_tx_regional(), vec![0, 0]);
    }

    #[test]
    fn averages_cover_selected_and_transplanted() {
        let mut model = ModelBuilder::new(params(&[3.0], 12, 0.0))
            .config(fixed_config(1e9, 5.0, 20))
            .selection_volume(SelectionVolume::Expected)
            .build()
            .unwrap();
        model.run_ticks(2, &mut NoopObserver).unwrap();

        let resolved: Vec<u32> = model
            .patients()
            .iter()
            .filter(|p| p.condition.has_transplant())
            .map(|p| p.wait_time)
            .collect();
        assert_eq!(resolved.len(), 6);
        let mean = resolved.iter().sum::<u32>() as f64 / 6.0;
        assert_eq!(model.average_waiting(), mean);
        assert_eq!(model.primary_waiting_rates(), vec![mean]);
        assert_eq!(model.average_waiting_advantaged(), 0.0);
    }

    #[test]
    fn regional_vectors_partition_patients() {
        let mut model = busy_model(21);
        model.run(&mut NoopObserver).unwrap();

        let wl: u64 = model.primary_wl_regional().iter().sum();
        let tx: u64 = model.primary_tx_regional().iter().sum();
        let dead: u64 = model.primary_deaths_regional().iter().sum();
        assert_eq!(wl, model.waiting());
        assert_eq!(tx, model.transplants());
        assert_eq!(dead, model.deceased());
        assert_eq!(wl + tx + dead, model.patients().len() as u64);
    }

    #[test]
    fn summary_matches_accessors() {
        let mut model = busy_model(8);
        model.run(&mut NoopObserver).unwrap();
        let s = model.summary();
        assert_eq!(s.regions, "ALL");
        assert_eq!(s.seed, 8);
        assert_eq!(s.transplants, model.transplants());
        assert_eq!(s.primary_transplants, model.primary_center_transplants());
        assert_eq!(s.count_deceased, model.deceased());
        assert_eq!(s.wait_rates.len(), 3);
        assert_eq!(s.months, model.tick().0);
    }

    #[test]
    fn condition_counts_of_store() {
        let model = busy_model(2);
        let counts = ConditionCounts::of(model.patients());
        assert_eq!(counts.waiting, model.count(Condition::Waiting));
        assert_eq!(counts.total(), model.patients().len() as u64);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use wl_core::Tick;

    use super::*;
    use crate::{SimObserver, TickReport};

    #[derive(Default)]
    struct Recorder {
        starts:   u64,
        ends:     Vec<Tick>,
        arrivals: u64,
        selected: u64,
        finished: Vec<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
            self.ends.push(tick);
            self.arrivals += report.arrivals;
            self.selected += report.selected;
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.finished.push(final_tick);
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let mut model = busy_model(4);
        let mut rec = Recorder::default();
        model.run(&mut rec).unwrap();

        assert_eq!(rec.starts, model.tick().0);
        assert_eq!(rec.ends.first(), Some(&Tick(0)));
        assert_eq!(rec.ends.last().map(|t| t.next()), Some(model.tick()));
        assert_eq!(rec.finished, vec![model.tick()]);
        assert_eq!(rec.arrivals + 150, model.patients().len() as u64);
        assert_eq!(rec.selected, model.transplants());
    }

    #[test]
    fn sim_end_fires_once() {
        let mut model = busy_model(4);
        let mut rec = Recorder::default();
        model.run(&mut rec).unwrap();
        model.run_ticks(3, &mut rec).unwrap();
        assert_eq!(rec.finished.len(), 1);
    }
}

// ── Batch harness ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use wl_region::{RegionSelector, RegistryRecord, RegistryTable};

    use super::*;
    use crate::{BatchPlan, NoopObserver, run_batch};

    fn table() -> RegistryTable {
        let record = |dsa: &str, transplants: f64, additions: f64, waiting_list: u64| {
            RegistryRecord {
                dsa: dsa.into(),
                transplants,
                additions,
                ignored_removals: additions / 4.0,
                waiting_list,
            }
        };
        RegistryTable::new(vec![
            record("AAOP", 36.0, 48.0, 60),
            record("BBOP", 12.0, 24.0, 40),
            record("CCOP", 24.0, 24.0, 20),
        ])
        .unwrap()
    }

    fn plan(seeds: Vec<u64>) -> BatchPlan {
        let config = ModelConfig {
            regions: "CCOP,AAOP".parse::<RegionSelector>().unwrap(),
            advantage_probability: 0.2,
            years: 2,
            ..ModelConfig::default()
        };
        BatchPlan::new(config, seeds)
    }

    #[test]
    fn default_seeds_step_by_hundred() {
        assert_eq!(BatchPlan::default_seeds(7, 3), vec![7, 107, 207]);
        assert!(BatchPlan::default_seeds(7, 0).is_empty());
    }

    #[test]
    fn one_summary_per_seed_in_order() {
        let plan = plan(vec![0, 100, 200]);
        let summaries = run_batch(&table(), &plan).unwrap();
        let seeds: Vec<u64> = summaries.iter().map(|s| s.seed).collect();
        assert_eq!(seeds, vec![0, 100, 200]);
        for s in &summaries {
            assert_eq!(s.regions, "CCOP,AAOP");
            assert_eq!(s.death_region.len(), 2);
        }
    }

    #[test]
    fn batch_matches_single_runs() {
        let plan = plan(vec![42, 142]);
        let summaries = run_batch(&table(), &plan).unwrap();
        for s in summaries {
            let mut model = ModelBuilder::from_provider(&table(), plan.config.clone())
                .unwrap()
                .seed(s.seed)
                .build()
                .unwrap();
            model.run(&mut NoopObserver).unwrap();
            assert_eq!(model.summary(), s);
        }
    }

    #[test]
    fn unknown_region_fails_batch() {
        let mut plan = plan(vec![1]);
        plan.config.regions = "ZZOP".parse().unwrap();
        assert!(run_batch(&table(), &plan).is_err());
    }
}
