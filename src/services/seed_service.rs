use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::chaos::ChaosPolicy;
use crate::models::{
    Answer, Assessment, Candidate, CandidateResponse, Job, JobStatus, Question, Stage, Timeline,
};
use crate::store::Store;

const JOB_COUNT: usize = 25;
const CANDIDATE_COUNT: usize = 50;

const JOB_TITLES: &[&str] = &[
    "Frontend Developer",
    "Backend Engineer",
    "Full Stack Developer",
    "Product Manager",
    "UX/UI Designer",
    "Data Scientist",
];

const JOB_BLURBS: &[&str] = &[
    "You will own features end to end, from design discussions to production rollout.",
    "We are a small team shipping weekly; pragmatism beats ceremony here.",
    "Expect close collaboration with hiring managers and plenty of autonomy.",
    "The role spans prototyping, delivery and keeping the lights on.",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carla", "Dmitri", "Elena", "Farid", "Grace", "Hiro", "Ingrid", "Jonas",
    "Khadija", "Liam", "Mina", "Noah", "Olga", "Pablo", "Quinn", "Rosa", "Samir", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Johnson", "Smith", "Garcia", "Ivanov", "Chen", "Okafor", "Silva", "Haddad", "Kowalski",
    "Nguyen", "Brown", "Larsen", "Moreau", "Petrov", "Sato", "Weber",
];

const CHOICE_QUESTIONS: &[(&str, &[&str])] = &[
    (
        "Which HTTP status code signals a missing resource?",
        &["301", "404", "500", "204"],
    ),
    (
        "Which data structure gives O(1) average lookup by key?",
        &["array", "hash map", "linked list", "binary heap"],
    ),
    (
        "What does the S in SOLID stand for?",
        &["Stateless", "Single responsibility", "Serializable", "Synchronized"],
    ),
];

const CODING_PROMPTS: &[&str] = &[
    "Implement a function to reverse a string.",
    "Write a function that returns the n-th Fibonacci number.",
    "Given a list of integers, return the indices of the two that sum to a target.",
];

/// One-shot generator of a consistent initial dataset. Runs as a saga:
/// bulk inserts in dependency order, a completion marker written only
/// after all five tables succeed. A prior partial seed (rows without the
/// marker) is cleared and redone from scratch.
pub struct SeedService {
    store: Store,
    chaos: ChaosPolicy,
}

struct Dataset {
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
    assessments: Vec<Assessment>,
    timelines: Vec<Timeline>,
    responses: Vec<CandidateResponse>,
}

impl SeedService {
    pub fn new(store: Store, chaos: ChaosPolicy) -> Self {
        Self { store, chaos }
    }

    pub async fn run(&self) -> Result<()> {
        if self.store.seed_complete().await? {
            info!("Seed marker present, skipping database seeding");
            return Ok(());
        }

        let prior = self.store.jobs().count().await?
            + self.store.candidates().count().await?
            + self.store.assessments().count().await?;
        if prior > 0 {
            info!(rows = prior, "Partial seed detected, clearing before reseed");
        }
        self.clear_all().await?;

        let data = generate_dataset();

        self.unstable_pause("jobs").await?;
        self.store.jobs().bulk_insert(&data.jobs).await?;

        self.unstable_pause("candidates").await?;
        self.store.candidates().bulk_insert(&data.candidates).await?;

        self.unstable_pause("assessments").await?;
        self.store
            .assessments()
            .bulk_insert(&data.assessments)
            .await?;

        self.unstable_pause("timelines").await?;
        self.store.timelines().bulk_insert(&data.timelines).await?;

        self.unstable_pause("responses").await?;
        self.store.responses().bulk_insert(&data.responses).await?;

        self.store.mark_seed_complete().await?;
        info!(
            jobs = data.jobs.len(),
            candidates = data.candidates.len(),
            assessments = data.assessments.len(),
            timelines = data.timelines.len(),
            responses = data.responses.len(),
            "Database seeded"
        );
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.store.clear_seed_marker().await?;
        self.store.responses().clear().await?;
        self.store.timelines().clear().await?;
        self.store.assessments().clear().await?;
        self.store.candidates().clear().await?;
        self.store.jobs().clear().await?;
        Ok(())
    }

    /// Transient-instability hook before each bulk step: a brief pause plus
    /// a small synthetic failure chance, both drawn from the injected
    /// policy. A disabled policy turns the whole thing off.
    async fn unstable_pause(&self, step: &str) -> Result<()> {
        let pause = self.chaos.latency();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        if self.chaos.should_fail() {
            return Err(Error::Seeding(format!(
                "synthetic failure before inserting {}",
                step
            )));
        }
        Ok(())
    }
}

fn generate_dataset() -> Dataset {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let jobs: Vec<Job> = (0..JOB_COUNT)
        .map(|i| {
            let title = *JOB_TITLES.choose(&mut rng).unwrap();
            let created_at = now - Duration::days(rng.gen_range(30..365));
            // Keep a handful of jobs guaranteed open so candidates always
            // have something to apply to.
            let status = if i < 5 {
                JobStatus::Open
            } else {
                *[JobStatus::Open, JobStatus::Closed, JobStatus::Paused]
                    .choose(&mut rng)
                    .unwrap()
            };
            Job {
                id: Uuid::new_v4().to_string(),
                title: title.to_string(),
                description: format!(
                    "{} position. {}",
                    title,
                    JOB_BLURBS.choose(&mut rng).unwrap()
                ),
                status,
                created_at,
                updated_at: now,
            }
        })
        .collect();

    let candidates: Vec<Candidate> = (0..CANDIDATE_COUNT)
        .map(|_| {
            let first = *FIRST_NAMES.choose(&mut rng).unwrap();
            let last = *LAST_NAMES.choose(&mut rng).unwrap();
            let id = Uuid::new_v4().to_string();
            Candidate {
                resume: Some(format!("https://cv.example.com/{}/resume.pdf", id)),
                id,
                name: format!("{} {}", first, last),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    rng.gen_range(1..100)
                ),
                phone: Some(format!("555-{:04}", rng.gen_range(0..10_000))),
                applied_date: now - Duration::days(rng.gen_range(0..60)),
            }
        })
        .collect();

    // Assessments only for a subset of open jobs, but always at least one.
    let mut assessments = Vec::new();
    for (k, job) in jobs
        .iter()
        .filter(|j| j.status == JobStatus::Open)
        .enumerate()
    {
        if k > 0 && !rng.gen_bool(0.7) {
            continue;
        }
        for n in 0..rng.gen_range(1..=2) {
            let (text, options) = *CHOICE_QUESTIONS.choose(&mut rng).unwrap();
            let mut questions = vec![Question::MultipleChoice {
                text: text.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
            }];
            questions.push(Question::CodingChallenge {
                text: CODING_PROMPTS.choose(&mut rng).unwrap().to_string(),
            });
            assessments.push(Assessment {
                id: Uuid::new_v4().to_string(),
                job_id: job.id.clone(),
                title: if n == 0 {
                    format!("{} Skill Test", job.title)
                } else {
                    format!("{} Skill Test {}", job.title, n + 1)
                },
                description: format!("Assessment for the {} position", job.title),
                questions,
                created_at: job.created_at,
            });
        }
    }

    // Walk each candidate through a prefix of the hiring stages for 1-2
    // jobs, timestamps strictly increasing by up to 7 days per step.
    let open_jobs: Vec<&Job> = jobs.iter().filter(|j| j.status == JobStatus::Open).collect();
    let mut timelines = Vec::new();
    let mut responses = Vec::new();
    for candidate in &candidates {
        let applied_count = rng.gen_range(1..=2usize);
        for job in open_jobs.choose_multiple(&mut rng, applied_count) {
            let max_stage = rng.gen_range(0..Stage::SEQUENCE.len());
            let mut timestamp = candidate.applied_date;
            for stage in Stage::SEQUENCE.iter().take(max_stage + 1) {
                timelines.push(Timeline {
                    id: Uuid::new_v4().to_string(),
                    job_id: job.id.clone(),
                    candidate_id: candidate.id.clone(),
                    stage: *stage,
                    notes: format!("{} passed {} stage", candidate.name, stage),
                    timestamp,
                });

                if *stage == Stage::Assessment {
                    if let Some(assessment) = assessments.iter().find(|a| a.job_id == job.id) {
                        responses.push(CandidateResponse {
                            id: Uuid::new_v4().to_string(),
                            candidate_id: candidate.id.clone(),
                            assessment_id: assessment.id.clone(),
                            answers: generate_answers(&mut rng, &assessment.questions),
                            submitted_at: timestamp + Duration::hours(rng.gen_range(1..48)),
                            score: rng.gen_range(65..=98),
                        });
                    }
                }

                timestamp = timestamp + Duration::minutes(rng.gen_range(60..7 * 24 * 60));
            }
        }
    }

    Dataset {
        jobs,
        candidates,
        assessments,
        timelines,
        responses,
    }
}

fn generate_answers(rng: &mut impl Rng, questions: &[Question]) -> Vec<Answer> {
    questions
        .iter()
        .map(|question| match question {
            Question::MultipleChoice { options, .. } => Answer::MultipleChoice {
                selected: options
                    .choose(&mut *rng)
                    .cloned()
                    .unwrap_or_else(|| "A".to_string()),
            },
            Question::CodingChallenge { .. } => Answer::CodingChallenge {
                source: "fn reverse(s: &str) -> String { s.chars().rev().collect() }".to_string(),
            },
        })
        .collect()
}
