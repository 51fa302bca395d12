use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("AUR RPC error: {0}")]
    Rpc(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("workflow not found for {repository}")]
    WorkflowNotFound { repository: String },

    #[error("dispatch rejected with status {status}")]
    Rejected { status: u16 },
}
