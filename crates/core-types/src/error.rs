use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Please enter at least one ticker.")]
    EmptyTickerList,
}
