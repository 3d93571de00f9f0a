// Domain-level errors for the server workflows.

#[derive(Debug, PartialEq, Eq)]
pub enum LeaderboardError {
    InvalidScore,
    StorageFailure,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShareError {
    InvalidShareType,
    MissingPostId,
    PublishFailure,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WordCheckError {
    InvalidGuess,
    InvalidSolution,
    DictionaryUnavailable,
}
