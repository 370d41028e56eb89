use std::collections::{HashMap, HashSet};

use chrono::Utc;

use talentflow_backend::middleware::chaos::ChaosPolicy;
use talentflow_backend::models::{Job, JobStatus, Stage};
use talentflow_backend::services::seed_service::SeedService;
use talentflow_backend::store::Store;

async fn seeded_store() -> Store {
    let store = Store::open_in_memory().await.expect("open store");
    SeedService::new(store.clone(), ChaosPolicy::disabled())
        .run()
        .await
        .expect("seed");
    store
}

#[tokio::test]
async fn seeding_populates_all_tables() {
    let store = seeded_store().await;
    assert!(store.jobs().count().await.unwrap() > 0);
    assert!(store.candidates().count().await.unwrap() > 0);
    assert!(store.assessments().count().await.unwrap() > 0);
    assert!(store.timelines().count().await.unwrap() > 0);
    assert!(store.seed_complete().await.unwrap());
}

#[tokio::test]
async fn seeding_twice_is_a_no_op() {
    let store = seeded_store().await;
    let jobs = store.jobs().count().await.unwrap();
    let candidates = store.candidates().count().await.unwrap();
    let timelines = store.timelines().count().await.unwrap();
    let responses = store.responses().count().await.unwrap();

    SeedService::new(store.clone(), ChaosPolicy::disabled())
        .run()
        .await
        .expect("second seed run");

    assert_eq!(store.jobs().count().await.unwrap(), jobs);
    assert_eq!(store.candidates().count().await.unwrap(), candidates);
    assert_eq!(store.timelines().count().await.unwrap(), timelines);
    assert_eq!(store.responses().count().await.unwrap(), responses);
}

#[tokio::test]
async fn partial_state_without_marker_is_cleared_and_reseeded() {
    let store = Store::open_in_memory().await.expect("open store");
    let leftover = Job {
        id: "leftover".to_string(),
        title: "Ghost of an interrupted seed".to_string(),
        description: String::new(),
        status: JobStatus::Open,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    store.jobs().insert(&leftover).await.unwrap();

    SeedService::new(store.clone(), ChaosPolicy::disabled())
        .run()
        .await
        .expect("seed");

    assert!(store.jobs().get_by_id("leftover").await.unwrap().is_none());
    assert!(store.seed_complete().await.unwrap());
}

#[tokio::test]
async fn seeding_failure_leaves_no_marker() {
    let store = Store::open_in_memory().await.expect("open store");
    // Probability 1.0 fails the very first bulk step.
    let result = SeedService::new(store.clone(), ChaosPolicy::new(1.0, 0, 0, Some(7)))
        .run()
        .await;
    assert!(result.is_err());
    assert!(!store.seed_complete().await.unwrap());
    assert_eq!(store.jobs().count().await.unwrap(), 0);

    // The next run starts clean and succeeds.
    SeedService::new(store.clone(), ChaosPolicy::disabled())
        .run()
        .await
        .expect("recovery seed");
    assert!(store.seed_complete().await.unwrap());
}

#[tokio::test]
async fn seeded_timelines_reference_existing_jobs_and_candidates() {
    let store = seeded_store().await;
    let job_ids: HashSet<String> = store
        .jobs()
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|j| j.id)
        .collect();
    let candidate_ids: HashSet<String> = store
        .candidates()
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();

    for timeline in store.timelines().get_all().await.unwrap() {
        assert!(job_ids.contains(&timeline.job_id));
        assert!(candidate_ids.contains(&timeline.candidate_id));
    }
}

#[tokio::test]
async fn seeded_responses_reference_assessments_the_candidate_reached() {
    let store = seeded_store().await;
    let assessments: HashMap<String, String> = store
        .assessments()
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|a| (a.id, a.job_id))
        .collect();
    let timelines = store.timelines().get_all().await.unwrap();

    for response in store.responses().get_all().await.unwrap() {
        let job_id = assessments
            .get(&response.assessment_id)
            .expect("response references an existing assessment");
        let reached_assessment = timelines.iter().any(|t| {
            t.candidate_id == response.candidate_id
                && &t.job_id == job_id
                && t.stage == Stage::Assessment
        });
        assert!(
            reached_assessment,
            "response exists but candidate never reached the Assessment stage for that job"
        );
        assert!((65..=98).contains(&response.score));
    }
}

#[tokio::test]
async fn seeded_stages_form_a_strict_monotonic_prefix() {
    let store = seeded_store().await;
    let timelines = store.timelines().get_all().await.unwrap();

    let mut by_pair: HashMap<(String, String), Vec<_>> = HashMap::new();
    for t in timelines {
        by_pair
            .entry((t.candidate_id.clone(), t.job_id.clone()))
            .or_default()
            .push(t);
    }

    for (pair, mut entries) in by_pair {
        entries.sort_by_key(|t| t.timestamp);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(
                entry.stage,
                Stage::SEQUENCE[i],
                "stage sequence for {:?} has a gap or repeat",
                pair
            );
            if i > 0 {
                assert!(
                    entry.timestamp > entries[i - 1].timestamp,
                    "timestamps for {:?} are not strictly increasing",
                    pair
                );
            }
        }
    }
}
