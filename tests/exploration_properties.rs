// tests/exploration_properties.rs

mod common;

use common::{for_each_realisation, simulate};
use npsag::engine::ExplorationConfig;
use npsag::jobs::JobSet;
use npsag_test_utils::builders::{JobBuilder, JobSetBuilder};
use npsag_test_utils::explore;
use proptest::prelude::*;

/// Up to four independent jobs with small arrival and cost windows, so every
/// integer realisation can be enumerated.
fn job_set_strategy() -> impl Strategy<Value = JobSet<i64>> {
    let job = (0i64..6, 0i64..=2, 1i64..=3, 0i64..=2, 0i64..4);
    proptest::collection::vec(job, 1..=4).prop_map(|rows| {
        let mut builder = JobSetBuilder::new();
        for (i, (arr_min, arr_width, cost_min, cost_width, priority)) in
            rows.into_iter().enumerate()
        {
            builder = builder.with_job(
                JobBuilder::new(i as u32 + 1, 1)
                    .arrival(arr_min, arr_min + arr_width)
                    .cost(cost_min, cost_min + cost_width)
                    .deadline(1000)
                    .priority(priority),
            );
        }
        builder.build()
    })
}

/// Like [`job_set_strategy`], plus random precedence edges from earlier to
/// later jobs so the relation stays acyclic.
fn precedence_job_set_strategy() -> impl Strategy<Value = JobSet<i64>> {
    let job = (0i64..6, 0i64..=2, 1i64..=3, 0i64..=2, 0i64..4, 0u8..8);
    proptest::collection::vec(job, 2..=4).prop_map(|rows| {
        let mut builder = JobSetBuilder::new();
        for (i, (arr_min, arr_width, cost_min, cost_width, priority, preds)) in
            rows.into_iter().enumerate()
        {
            let mut job = JobBuilder::new(i as u32 + 1, 1)
                .arrival(arr_min, arr_min + arr_width)
                .cost(cost_min, cost_min + cost_width)
                .deadline(1000)
                .priority(priority);
            for p in 0..i {
                if preds & (1 << p) != 0 {
                    job = job.after(p as u32 + 1, 1);
                }
            }
            builder = builder.with_job(job);
        }
        builder.build()
    })
}

fn check_sound(jobs: JobSet<i64>, config: ExplorationConfig) -> Result<(), TestCaseError> {
    let (ctx, outcome) = explore(jobs.clone(), config);
    prop_assert!(outcome.abort.is_none());
    prop_assert_eq!(outcome.dead_ends, 0);

    let mut violation = None;
    for_each_realisation(&jobs, |releases, costs| {
        if violation.is_some() {
            return;
        }
        let finish = simulate(&jobs, releases, costs);
        for (j, job) in jobs.iter() {
            match ctx.response_times().get(&job.name) {
                Some(bounds) if bounds.contains_time(finish[j]) => {}
                recorded => {
                    violation = Some(format!(
                        "{} finished at {} (releases {:?}, costs {:?}) outside {:?}",
                        job.name, finish[j], releases, costs, recorded
                    ));
                }
            }
        }
    });

    prop_assert!(violation.is_none(), "{}", violation.unwrap_or_default());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_exploration_terminates_after_one_round_per_job(jobs in job_set_strategy()) {
        let n = jobs.len();
        let (ctx, outcome) = explore(jobs, ExplorationConfig::default());

        prop_assert_eq!(outcome.rounds, n);
        prop_assert!(outcome.abort.is_none());
        for id in ctx.frontier().unwrap() {
            let state = ctx.states().get(id).unwrap();
            prop_assert_eq!(state.scheduled.len(), n);
        }
    }

    #[test]
    fn test_response_times_cover_every_concrete_schedule(jobs in job_set_strategy()) {
        check_sound(jobs, ExplorationConfig::default())?;
    }

    #[test]
    fn test_por_response_times_cover_every_concrete_schedule(jobs in job_set_strategy()) {
        let config = ExplorationConfig { por: true, ..Default::default() };
        check_sound(jobs, config)?;
    }

    #[test]
    fn test_precedence_response_times_cover_every_concrete_schedule(
        jobs in precedence_job_set_strategy(),
    ) {
        check_sound(jobs, ExplorationConfig::default())?;
    }

    #[test]
    fn test_naive_precedence_response_times_cover_every_concrete_schedule(
        jobs in precedence_job_set_strategy(),
    ) {
        let config = ExplorationConfig { naive: true, ..Default::default() };
        check_sound(jobs, config)?;
    }

    #[test]
    fn test_naive_response_times_cover_every_concrete_schedule(jobs in job_set_strategy()) {
        let config = ExplorationConfig { naive: true, ..Default::default() };
        check_sound(jobs, config)?;
    }
}
