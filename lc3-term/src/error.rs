use thiserror::Error;

/// Failures that can occur loading an image or driving the terminal.
#[derive(Debug, Error)]
pub enum TermError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image has {word_count} words but only {capacity} fit in memory from its origin")]
    ImageTooLarge { word_count: usize, capacity: usize },
}
