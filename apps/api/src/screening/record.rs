use serde::{Serialize, Serializer};

use crate::screening::fields::ProfileInfo;
use crate::screening::walker::RecordedAnswer;

/// Flat screening outcome: profile fields at the top level, then the
/// technology list and answers keyed `<tech>_q<n>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    #[serde(flatten)]
    pub info: ProfileInfo,
    pub techs: Vec<String>,
    #[serde(serialize_with = "serialize_answers")]
    pub answers: Vec<RecordedAnswer>,
}

impl CandidateRecord {
    pub fn build(info: &ProfileInfo, techs: &[String], answers: &[RecordedAnswer]) -> Self {
        Self {
            info: info.clone(),
            techs: techs.to_vec(),
            answers: answers.to_vec(),
        }
    }
}

fn serialize_answers<S: Serializer>(answers: &[RecordedAnswer], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(answers.iter().map(|a| (a.key(), &a.answer)))
}
