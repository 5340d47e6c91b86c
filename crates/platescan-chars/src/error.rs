/// Errors returned by the character segmenter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("no character-shaped regions found")]
    NoCharacters,
}
