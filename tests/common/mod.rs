#![allow(dead_code)]

use npsag::engine::ExplorationContext;
use npsag::interval::Interval;
use npsag::jobs::{Job, JobSet};
use npsag_test_utils::builders::{JobBuilder, JobSetBuilder};

/// J1 (prio 1, cost 1) and J2 (prio 2, cost 2), both released at 0.
pub fn serial_pair() -> JobSet<i64> {
    JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).cost(1, 1).deadline(10).priority(1))
        .with_job(JobBuilder::new(2, 1).cost(2, 2).deadline(10).priority(2))
        .build()
}

/// J1 may arrive anywhere in [0,2]; J2 is certainly released at 0.
/// Both dispatch orders are possible and end with overlapping availability.
pub fn converging_pair() -> JobSet<i64> {
    JobSetBuilder::new()
        .with_job(
            JobBuilder::new(1, 1)
                .arrival(0, 2)
                .cost(2, 2)
                .deadline(20)
                .priority(1),
        )
        .with_job(JobBuilder::new(2, 1).cost(1, 1).deadline(20).priority(2))
        .build()
}

/// J1 cannot meet its deadline even when started immediately.
pub fn certain_miss() -> JobSet<i64> {
    JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).cost(5, 5).deadline(3).priority(1))
        .with_job(JobBuilder::new(2, 1).cost(1, 1).deadline(100).priority(2))
        .build()
}

pub fn iv(start: i64, end: i64) -> Interval<i64> {
    Interval::new(start, end)
}

/// Response time of `task,job` recorded by `ctx`.
pub fn response_of(ctx: &ExplorationContext<i64>, task: u32, job: u32) -> Option<Interval<i64>> {
    ctx.response_times().get(&Job::<i64>::name_for(task, job))
}

/// Work-conserving non-preemptive fixed-priority schedule of one concrete
/// realisation. A job is pending once released and all its predecessors have
/// finished. Returns the finish time of every job in arena order.
pub fn simulate(jobs: &JobSet<i64>, releases: &[i64], costs: &[i64]) -> Vec<i64> {
    let n = jobs.len();
    let predecessors: Vec<Vec<usize>> = (0..n)
        .map(|j| {
            jobs.get(j)
                .predecessors
                .iter()
                .filter_map(|name| jobs.index_of(name))
                .collect()
        })
        .collect();
    let mut finish = vec![0; n];
    let mut done = vec![false; n];
    let mut t = 0;

    for _ in 0..n {
        let ready: Vec<usize> = (0..n)
            .filter(|&j| !done[j] && predecessors[j].iter().all(|&p| done[p]))
            .collect();
        let next_release = ready
            .iter()
            .map(|&j| releases[j])
            .min()
            .expect("acyclic precedence leaves a ready job");
        // idle until something is released
        t = t.max(next_release);

        let job = ready
            .into_iter()
            .filter(|&j| releases[j] <= t)
            .reduce(|best, j| {
                if jobs.get(j).higher_priority_than(jobs.get(best)) {
                    j
                } else {
                    best
                }
            })
            .expect("a job is released at t");

        t += costs[job];
        finish[job] = t;
        done[job] = true;
    }
    finish
}

/// Call `f(releases, costs)` for every integer realisation of the arrival
/// and cost windows.
pub fn for_each_realisation(jobs: &JobSet<i64>, mut f: impl FnMut(&[i64], &[i64])) {
    let n = jobs.len();
    let windows: Vec<Interval<i64>> = (0..n)
        .map(|j| jobs.get(j).arrival)
        .chain((0..n).map(|j| jobs.get(j).cost))
        .collect();
    let mut values: Vec<i64> = windows.iter().map(|w| w.start).collect();

    loop {
        f(&values[..n], &values[n..]);

        // odometer increment
        let mut digit = 0;
        loop {
            if digit == values.len() {
                return;
            }
            if values[digit] < windows[digit].end {
                values[digit] += 1;
                break;
            }
            values[digit] = windows[digit].start;
            digit += 1;
        }
    }
}
