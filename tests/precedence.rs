// tests/precedence.rs

mod common;

use common::{iv, response_of};
use npsag::engine::{ExplorationConfig, ExplorationContext};
use npsag::errors::SagError;
use npsag::interval::Interval;
use npsag::jobs::JobOrder;
use npsag_test_utils::builders::{JobBuilder, JobSetBuilder};
use npsag_test_utils::explore;

#[test]
fn test_arrival_windows_propagate_transitively() {
    let mut jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).arrival(2, 4))
        .with_job(JobBuilder::new(2, 1).after(1, 1))
        .with_job(JobBuilder::new(3, 1).released_at(1).after(2, 1))
        .build();

    let order = jobs.preprocess().unwrap();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(jobs.get(1).arrival, Interval::new(2, 4));
    assert_eq!(jobs.get(2).arrival, Interval::new(2, 4));
    assert_eq!(jobs.successors_of(0), &[1]);
    assert_eq!(jobs.predecessors_of(2), &[1]);
}

#[test]
fn test_topological_order_keeps_roots_in_workload_order() {
    let mut jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).after(2, 1))
        .with_job(JobBuilder::new(2, 1))
        .with_job(JobBuilder::new(3, 1))
        .build();

    assert_eq!(jobs.preprocess().unwrap(), vec![1, 2, 0]);
}

#[test]
fn test_predecessor_must_finish_first() {
    // J2 outranks J1 but has to wait for it
    let jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).cost(2, 2).priority(5))
        .with_job(
            JobBuilder::new(2, 1)
                .arrival(0, 1)
                .cost(1, 1)
                .priority(0)
                .after(1, 1),
        )
        .build();
    let (ctx, outcome) = explore(jobs, ExplorationConfig::default());

    assert_eq!(response_of(&ctx, 1, 1), Some(iv(2, 2)));
    assert_eq!(response_of(&ctx, 2, 1), Some(iv(3, 3)));
    assert_eq!(outcome.states, 3);
    assert_eq!(ctx.topological_order(), &[0, 1]);
    assert!(outcome.is_schedulable());
}

#[test]
fn test_without_precedence_higher_priority_may_go_first() {
    let jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).cost(2, 2).priority(5))
        .with_job(JobBuilder::new(2, 1).arrival(0, 1).cost(1, 1).priority(0))
        .build();
    let (ctx, _) = explore(jobs, ExplorationConfig::default());

    assert_eq!(response_of(&ctx, 2, 1).map(|i| i.start), Some(1));
}

#[test]
fn test_missing_predecessor_is_reported() {
    let jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).after(9, 9))
        .build();

    match ExplorationContext::new(jobs, ExplorationConfig::default()) {
        Err(SagError::MissingPredecessor { job, predecessor }) => {
            assert_eq!(job, "J1,1");
            assert_eq!(predecessor, "J9,9");
        }
        Err(e) => panic!("Expected MissingPredecessor error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_precedence_cycle_is_rejected() {
    let jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).after(2, 1))
        .with_job(JobBuilder::new(2, 1).after(1, 1))
        .build();

    match ExplorationContext::new(jobs, ExplorationConfig::default()) {
        Err(SagError::PrecedenceCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("J1,1") || msg.contains("J2,1"));
        }
        Err(e) => panic!("Expected PrecedenceCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_self_dependency_is_rejected() {
    let mut jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).after(1, 1))
        .build();

    assert!(matches!(
        jobs.resolve_precedence(),
        Err(SagError::PrecedenceCycle(msg)) if msg.contains("cannot precede itself")
    ));
}

#[test]
fn test_add_predecessor_checks_both_ends() {
    let mut jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1))
        .build();

    assert!(matches!(
        jobs.add_predecessor("J7,1", "J1,1"),
        Err(SagError::UnknownJob(name)) if name == "J7,1"
    ));
    assert!(matches!(
        jobs.add_predecessor("J1,1", "J7,1"),
        Err(SagError::MissingPredecessor { .. })
    ));
}

#[test]
fn test_sorted_views() {
    let jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).arrival(3, 5).deadline(30).priority(2).cost(1, 4))
        .with_job(JobBuilder::new(2, 1).arrival(1, 6).deadline(10).priority(2).cost(2, 2))
        .with_job(JobBuilder::new(3, 1).arrival(1, 2).deadline(20).priority(1).cost(1, 1))
        .build();

    assert_eq!(jobs.sorted(JobOrder::EarliestArrival), vec![1, 2, 0]);
    assert_eq!(jobs.sorted(JobOrder::LatestArrival), vec![2, 0, 1]);
    assert_eq!(jobs.sorted(JobOrder::Deadline), vec![1, 2, 0]);
    // equal priority falls back to task id
    assert_eq!(jobs.sorted(JobOrder::Priority), vec![2, 0, 1]);
    assert_eq!(jobs.sorted(JobOrder::MaximalCost), vec![2, 1, 0]);
}

#[test]
fn test_context_caches_sorted_views() {
    let jobs = JobSetBuilder::new()
        .with_job(JobBuilder::new(1, 1).arrival(3, 5).deadline(30).priority(2))
        .with_job(JobBuilder::new(2, 1).arrival(1, 6).deadline(10).priority(2))
        .with_job(JobBuilder::new(3, 1).arrival(1, 2).deadline(20).priority(1))
        .build();
    let ctx = ExplorationContext::new(jobs, ExplorationConfig::default()).unwrap();

    assert_eq!(ctx.jobs_in_order(JobOrder::EarliestArrival), Some(&[1, 2, 0][..]));
    assert_eq!(ctx.jobs_in_order(JobOrder::LatestArrival), Some(&[2, 0, 1][..]));
    assert_eq!(ctx.jobs_in_order(JobOrder::Deadline), Some(&[1, 2, 0][..]));
    assert_eq!(ctx.jobs_in_order(JobOrder::Priority), Some(&[2, 0, 1][..]));
    assert_eq!(ctx.jobs_in_order(JobOrder::MaximalCost), None);
}
