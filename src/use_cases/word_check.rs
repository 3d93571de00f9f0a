// Word-guess workflow: per-letter classification is computed here; whether
// the guess is a real word is delegated to the dictionary collaborator.

use crate::domain::errors::WordCheckError;
use crate::domain::ports::WordJudge;
use std::sync::Arc;
use tracing::error;

pub const WORD_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterState {
    Initial,
    Correct,
    Present,
    Absent,
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub exists: bool,
    pub solved: bool,
    pub correct: [LetterState; WORD_LEN],
    /// Revealed only once the guess solves the puzzle.
    pub word: Option<String>,
}

/// Exactly five ASCII lowercase letters; both guesses and the configured
/// solution must pass this before classification.
pub fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LEN && word.chars().all(|c| c.is_ascii_lowercase())
}

/// Standard two-pass classification: exact positions first, then presence
/// against the solution's remaining letter counts, so repeated guess letters
/// never over-report a single solution letter.
pub fn classify_guess(guess: &str, solution: &str) -> [LetterState; WORD_LEN] {
    let guess: Vec<char> = guess.chars().collect();
    let solution: Vec<char> = solution.chars().collect();
    debug_assert_eq!(guess.len(), WORD_LEN);
    debug_assert_eq!(solution.len(), WORD_LEN);

    let mut states = [LetterState::Absent; WORD_LEN];
    let mut remaining = [0u8; 26];

    for i in 0..WORD_LEN {
        if guess[i] == solution[i] {
            states[i] = LetterState::Correct;
        } else {
            remaining[(solution[i] as u8 - b'a') as usize] += 1;
        }
    }

    for i in 0..WORD_LEN {
        if states[i] == LetterState::Correct {
            continue;
        }
        let slot = &mut remaining[(guess[i] as u8 - b'a') as usize];
        if *slot > 0 {
            states[i] = LetterState::Present;
            *slot -= 1;
        }
    }

    states
}

pub struct CheckWord {
    judge: Arc<dyn WordJudge>,
    solution: String,
}

impl std::fmt::Debug for CheckWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckWord")
            .field("solution", &self.solution)
            .finish_non_exhaustive()
    }
}

impl CheckWord {
    /// The classifier indexes the solution positionally, so a malformed
    /// solution is rejected here rather than discovered per request.
    pub fn new(judge: Arc<dyn WordJudge>, solution: String) -> Result<Self, WordCheckError> {
        if !is_valid_word(&solution) {
            error!(%solution, "solution word is not five ascii letters");
            return Err(WordCheckError::InvalidSolution);
        }
        Ok(Self { judge, solution })
    }

    pub async fn execute(&self, guess: &str) -> Result<CheckOutcome, WordCheckError> {
        let guess = guess.trim().to_ascii_lowercase();
        if !is_valid_word(&guess) {
            return Err(WordCheckError::InvalidGuess);
        }

        let exists = self.judge.exists(&guess).await.map_err(|e| {
            error!(error = %e, "dictionary lookup failed");
            WordCheckError::DictionaryUnavailable
        })?;
        if !exists {
            return Ok(CheckOutcome {
                exists: false,
                solved: false,
                correct: [LetterState::Initial; WORD_LEN],
                word: None,
            });
        }

        let correct = classify_guess(&guess, &self.solution);
        let solved = correct.iter().all(|s| *s == LetterState::Correct);
        Ok(CheckOutcome {
            exists: true,
            solved,
            correct,
            word: solved.then(|| self.solution.clone()),
        })
    }
}
