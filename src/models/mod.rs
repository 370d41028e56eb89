pub mod assessment;
pub mod candidate;
pub mod job;
pub mod response;
pub mod timeline;

pub use assessment::{Assessment, Question};
pub use candidate::Candidate;
pub use job::{Job, JobStatus};
pub use response::{Answer, CandidateResponse};
pub use timeline::{Stage, Timeline};
