//! Question/answer loop: walks the generated questions one turn at a time.

use serde::Serialize;

use crate::screening::questions::QuestionSet;

/// Position in the question walk. `tech` is `None` when nothing was generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub tech: Option<String>,
    pub index: usize,
}

/// One recorded answer with an explicit back-reference to its question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedAnswer {
    pub tech: String,
    pub index: usize,
    pub answer: String,
}

impl RecordedAnswer {
    /// Flat identifier used in persisted records, e.g. `Python_q1`.
    pub fn key(&self) -> String {
        format!("{}_q{}", self.tech, self.index + 1)
    }
}

/// What the walker wants shown next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPrompt {
    Question(String),
    /// The generator produced no questions at all.
    NoQuestions,
    /// Every question has been asked.
    Exhausted,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionWalker {
    questions: QuestionSet,
    cursor: Cursor,
    answers: Vec<RecordedAnswer>,
}

impl QuestionWalker {
    pub fn new(questions: QuestionSet) -> Self {
        let cursor = Cursor {
            tech: questions.first_tech().map(str::to_string),
            index: 0,
        };
        Self {
            questions,
            cursor,
            answers: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn answers(&self) -> &[RecordedAnswer] {
        &self.answers
    }

    /// Moves the cursor past exhausted technologies and formats the question it lands on.
    pub fn present(&mut self) -> NextPrompt {
        loop {
            let Some(tech) = self.cursor.tech.as_deref() else {
                return NextPrompt::NoQuestions;
            };

            let questions = self.questions.get(tech);
            if let Some(question) = questions.get(self.cursor.index) {
                return NextPrompt::Question(format!(
                    "**{} – Q{}:** {}",
                    tech,
                    self.cursor.index + 1,
                    question
                ));
            }

            match self.questions.next_tech_after(tech) {
                Some(next) => {
                    self.cursor = Cursor {
                        tech: Some(next.to_string()),
                        index: 0,
                    };
                }
                None => return NextPrompt::Exhausted,
            }
        }
    }

    /// Stores the answer for the question under the cursor and advances the index.
    /// Does nothing when there is no current technology.
    pub fn record(&mut self, input: &str) {
        let Some(tech) = self.cursor.tech.clone() else {
            return;
        };
        self.answers.push(RecordedAnswer {
            tech,
            index: self.cursor.index,
            answer: input.trim().to_string(),
        });
        self.cursor.index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_set(entries: &[(&str, &[&str])]) -> QuestionSet {
        entries
            .iter()
            .map(|(tech, qs)| (*tech, qs.iter().map(|q| q.to_string()).collect::<Vec<String>>()))
            .collect()
    }

    #[test]
    fn test_empty_set_reports_no_questions() {
        let mut walker = QuestionWalker::new(QuestionSet::default());
        assert_eq!(walker.cursor().tech, None);
        assert_eq!(walker.present(), NextPrompt::NoQuestions);
    }

    #[test]
    fn test_walks_all_questions_in_order() {
        let mut walker = QuestionWalker::new(question_set(&[
            ("Python", &["q1", "q2", "q3"]),
            ("Go", &["q1", "q2"]),
        ]));

        let mut asked = Vec::new();
        while let NextPrompt::Question(text) = walker.present() {
            asked.push(text);
            walker.record("answer");
        }

        assert_eq!(
            asked,
            [
                "**Python – Q1:** q1",
                "**Python – Q2:** q2",
                "**Python – Q3:** q3",
                "**Go – Q1:** q1",
                "**Go – Q2:** q2",
            ]
        );
        assert_eq!(walker.present(), NextPrompt::Exhausted);

        let keys: Vec<_> = walker.answers().iter().map(RecordedAnswer::key).collect();
        assert_eq!(keys, ["Python_q1", "Python_q2", "Python_q3", "Go_q1", "Go_q2"]);
    }

    #[test]
    fn test_skips_technologies_without_questions() {
        let mut walker = QuestionWalker::new(question_set(&[
            ("Docker", &[]),
            ("Rust", &["What is a lifetime?"]),
            ("Kafka", &[]),
        ]));

        assert_eq!(
            walker.present(),
            NextPrompt::Question("**Rust – Q1:** What is a lifetime?".into())
        );
        assert_eq!(walker.cursor().tech.as_deref(), Some("Rust"));

        walker.record("Scopes for borrows");
        assert_eq!(walker.present(), NextPrompt::Exhausted);
    }

    #[test]
    fn test_present_is_stable_without_answer() {
        let mut walker = QuestionWalker::new(question_set(&[("Go", &["g1", "g2"])]));
        assert_eq!(walker.present(), walker.present());
        assert_eq!(walker.cursor().index, 0);
    }

    #[test]
    fn test_record_trims_answer() {
        let mut walker = QuestionWalker::new(question_set(&[("Go", &["g1"])]));
        walker.present();
        walker.record("  goroutines \n");
        assert_eq!(walker.answers()[0].answer, "goroutines");
        assert_eq!(walker.answers()[0].index, 0);
    }
}
