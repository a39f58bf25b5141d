// Level 2: sequential quiz. One question per round; the first answer locks
// the round whether it is right or wrong.

#[derive(Debug)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub correct: usize,
}

pub static QUESTIONS: [Question; 3] = [
    Question {
        prompt: "What's my favorite color?",
        options: &["Pink", "Blue", "Green", "Purple"],
        correct: 0,
    },
    Question {
        prompt: "What's my favorite food?",
        options: &["Sushi", "Pizza", "Ice Cream", "Rendang"],
        correct: 2,
    },
    Question {
        prompt: "Where did we first meet?",
        options: &["Cafe", "Campus", "Park", "Concert"],
        correct: 1,
    },
];

pub const POINTS_PER_ANSWER: u32 = 50;
/// Delay before the next question is shown after a correct answer.
pub const NEXT_QUESTION_MS: u32 = 1500;

#[derive(Debug, PartialEq, Eq)]
pub enum Answer {
    /// The round is already locked or the option does not exist.
    Ignored,
    Correct,
    Wrong,
}

pub struct QuizRound {
    question: &'static Question,
    locked: bool,
}

impl QuizRound {
    pub fn new(question: &'static Question) -> Self {
        Self {
            question,
            locked: false,
        }
    }

    pub fn question(&self) -> &'static Question {
        self.question
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn answer(&mut self, choice: usize) -> Answer {
        if self.locked || choice >= self.question.options.len() {
            return Answer::Ignored;
        }
        self.locked = true;
        if choice == self.question.correct {
            Answer::Correct
        } else {
            Answer::Wrong
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_locks_round() {
        let mut r = QuizRound::new(&QUESTIONS[1]);
        assert_eq!(r.answer(2), Answer::Correct);
        assert!(r.is_locked());
        assert_eq!(r.answer(2), Answer::Ignored);
    }

    #[test]
    fn wrong_answer_locks_every_other_option() {
        let mut r = QuizRound::new(&QUESTIONS[0]);
        assert_eq!(r.answer(3), Answer::Wrong);
        assert_eq!(r.answer(0), Answer::Ignored);
    }

    #[test]
    fn out_of_range_choice_does_not_lock() {
        let mut r = QuizRound::new(&QUESTIONS[2]);
        assert_eq!(r.answer(10), Answer::Ignored);
        assert!(!r.is_locked());
    }
}
