use serde::Serialize;

/// Per-technology cap on generated questions.
pub const MAX_QUESTIONS_PER_TECH: usize = 3;
/// Cap on generated questions across all technologies.
pub const TOTAL_QUESTION_CAP: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechQuestions {
    pub tech: String,
    pub questions: Vec<String>,
}

/// Generated screening questions, ordered by technology as the generator returned them.
///
/// Kept as a sequence rather than a hash map so iteration order is the
/// insertion order on every platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    entries: Vec<TechQuestions>,
}

impl QuestionSet {
    /// Adds a technology, or replaces its questions if it is already present.
    pub fn insert(&mut self, tech: impl Into<String>, questions: Vec<String>) {
        let tech = tech.into();
        match self.entries.iter_mut().find(|e| e.tech == tech) {
            Some(existing) => existing.questions = questions,
            None => self.entries.push(TechQuestions { tech, questions }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_questions(&self) -> usize {
        self.iter().map(|e| e.questions.len()).sum()
    }

    pub fn first_tech(&self) -> Option<&str> {
        self.entries.first().map(|e| e.tech.as_str())
    }

    /// Questions for `tech`; empty when the technology is absent.
    pub fn get(&self, tech: &str) -> &[String] {
        self.iter()
            .find(|e| e.tech == tech)
            .map(|e| e.questions.as_slice())
            .unwrap_or(&[])
    }

    /// The technology following `tech` in insertion order.
    pub fn next_tech_after(&self, tech: &str) -> Option<&str> {
        let position = self.entries.iter().position(|e| e.tech == tech)?;
        self.entries.get(position + 1).map(|e| e.tech.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TechQuestions> {
        self.entries.iter()
    }
}

impl<T: Into<String>> FromIterator<(T, Vec<String>)> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = (T, Vec<String>)>>(iter: I) -> Self {
        let mut set = QuestionSet::default();
        for (tech, questions) in iter {
            set.insert(tech, questions);
        }
        set
    }
}
