//! Side channel for failures that are handled locally but must still be
//! visible to operators.

use crate::shared::api_utils::api_url;
use crate::shared::error::RemoteError;
use contracts::shared::logger::CreateLogRequest;
use gloo_net::http::Request;

pub trait ErrorReporter {
    fn report(&self, category: &str, error: &RemoteError);
}

/// Logs to the browser console and posts a client log entry to the backend
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&self, category: &str, error: &RemoteError) {
        log::error!("{}: {}", category, error);

        let request = CreateLogRequest::client(category, error.to_string());
        leptos::task::spawn_local(async move {
            if let Err(e) = post_log(&request).await {
                log::warn!("failed to post client log: {}", e);
            }
        });
    }
}

async fn post_log(request: &CreateLogRequest) -> Result<(), RemoteError> {
    let response = Request::post(&api_url("/api/logs"))
        .json(request)
        .map_err(RemoteError::transport)?
        .send()
        .await
        .map_err(RemoteError::transport)?;

    if !response.ok() {
        return Err(RemoteError::Status {
            status: response.status(),
            message: response.status_text(),
        });
    }
    Ok(())
}
