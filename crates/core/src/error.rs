#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Parse error: {0}")]
    Parse(String),
}
