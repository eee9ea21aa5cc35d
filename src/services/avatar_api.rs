//! Simulated avatar upload endpoint. The server-side copy is written by
//! the backend; the client only consumes success or failure.

use gloo_timers::future::TimeoutFuture;

const UPLOAD_LATENCY_MS: u32 = 1500;

/// Ship avatar bytes to the backend.
pub async fn upload_avatar(data: Vec<u8>) -> Result<(), String> {
    log::info!("Uploading avatar: {} bytes", data.len());
    TimeoutFuture::new(UPLOAD_LATENCY_MS).await;
    log::info!("Avatar upload acknowledged by server");
    Ok(())
}
