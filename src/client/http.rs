use std::time::Duration;

/// User-Agent sent with every API request.
pub const USER_AGENT: &str = concat!("mpusher-rs/", env!("CARGO_PKG_VERSION"));

/// Connect timeout applied regardless of the request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the pooled HTTP client used by [`MPusherClient`](super::MPusherClient).
///
/// # Features
/// - **Timeouts**: configurable request timeout, 10s connect timeout
/// - **Connection pooling**: idle connections are kept for 90s
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Compression**: gzip, deflate, brotli and zstd responses
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(USER_AGENT)
        .build()
}
