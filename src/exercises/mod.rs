//! Self-check exercises that accompany the consoles

pub mod chart;

/// Verdict for one item of an ordering exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    /// 1-based position as displayed
    pub position: usize,
    /// Step id shown at that position
    pub step: u32,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReport {
    pub items: Vec<OrderItem>,
}

impl OrderReport {
    pub fn all_correct(&self) -> bool {
        self.items.iter().all(|i| i.correct)
    }

    pub fn feedback(&self) -> &'static str {
        if self.all_correct() {
            "🎉 Perfect! That's the correct order!"
        } else {
            "❌ Not quite right. Try rearranging the steps!"
        }
    }
}

/// Grade a step ordering: the step at position `i` must carry id `i`
pub fn check_order(displayed: &[u32]) -> OrderReport {
    let items = displayed
        .iter()
        .enumerate()
        .map(|(i, step)| OrderItem {
            position: i + 1,
            step: *step,
            correct: *step as usize == i + 1,
        })
        .collect();
    OrderReport { items }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankVerdict {
    Correct,
    Wrong,
    /// Left empty; neither right nor wrong
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlanksReport {
    pub verdicts: Vec<BlankVerdict>,
}

impl BlanksReport {
    pub fn correct(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| **v == BlankVerdict::Correct)
            .count()
    }

    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    pub fn all_correct(&self) -> bool {
        self.correct() == self.total()
    }

    pub fn feedback(&self) -> String {
        if self.all_correct() {
            format!("🎉 All {} answers correct!", self.correct())
        } else {
            format!("{}/{} correct. Keep trying!", self.correct(), self.total())
        }
    }
}

/// Grade fill-in-the-blank answers against their expected values.
///
/// Answers are trimmed and compared case-insensitively. Missing answers count
/// as empty.
pub fn check_blanks<E, A>(expected: &[E], answers: &[A]) -> BlanksReport
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    let verdicts = expected
        .iter()
        .enumerate()
        .map(|(i, want)| {
            let given = answers.get(i).map(|a| a.as_ref().trim()).unwrap_or("");
            if given.is_empty() {
                BlankVerdict::Empty
            } else if given.to_lowercase() == want.as_ref().trim().to_lowercase() {
                BlankVerdict::Correct
            } else {
                BlankVerdict::Wrong
            }
        })
        .collect();
    BlanksReport { verdicts }
}

/// Verdict for one multiple-choice question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizVerdict {
    /// 1-based option picked
    pub chosen: usize,
    /// 1-based option that is right
    pub correct: usize,
}

impl QuizVerdict {
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct
    }

    /// Option to highlight after a wrong pick
    pub fn highlight(&self) -> Option<usize> {
        (!self.is_correct()).then_some(self.correct)
    }

    pub fn feedback(&self) -> &'static str {
        if self.is_correct() {
            "🎉 Correct! Great job!"
        } else {
            "❌ Not quite. See the correct answer highlighted above."
        }
    }
}

/// Grade a multiple-choice pick
pub fn check_answer(chosen: usize, correct: usize) -> QuizVerdict {
    QuizVerdict { chosen, correct }
}
