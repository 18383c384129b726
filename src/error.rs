use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("feed error: {0}")]
    Feed(String),

    #[error("template error: {0}")]
    Template(String),
}
