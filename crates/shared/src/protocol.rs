use serde::{Deserialize, Serialize};

use crate::{
    domain::{PuzzleDescriptor, Solution},
    error::PuzzleSourceError,
};

/// Body returned by the puzzle service: `{"question": "<image url>", "solution": 7}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleResponse {
    pub question: String,
    pub solution: Solution,
}

impl From<PuzzleResponse> for PuzzleDescriptor {
    fn from(value: PuzzleResponse) -> Self {
        Self {
            image_reference: value.question,
            solution: value.solution,
        }
    }
}

pub fn decode_puzzle(body: &[u8]) -> Result<PuzzleDescriptor, PuzzleSourceError> {
    serde_json::from_slice::<PuzzleResponse>(body)
        .map(PuzzleDescriptor::from)
        .map_err(|err| PuzzleSourceError::malformed(err.to_string()))
}
