use thiserror::Error;

/// Failures while stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task {name} failed: {source}")]
    ActorTask {
        name: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}
