use thiserror::Error;

/// Form-validation failures surfaced to the user as transient notices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a book title")]
    MissingTitle,

    #[error("Please enter the author's name")]
    MissingAuthor,

    #[error("Please select a genre")]
    MissingGenre,

    #[error("Image file too large. Please choose a file under 10MB.")]
    CoverTooLarge,

    #[error("Please enter your email")]
    MissingEmail,

    #[error("Please choose a username")]
    MissingUsername,
}
