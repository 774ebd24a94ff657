//! Shared fetch-and-render protocol behind every resource-listing command.
//!
//! Retrieves a JSON array from the runtime's local HTTP endpoint and
//! hands the whole batch, in response order, to the rendering sink. The
//! one piece of judgment here is transport-error classification: a
//! connection-refused failure means the runtime process is not running,
//! which deserves an actionable message instead of a network trace.

use std::error::Error;
use std::io::Write;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CliError;
use crate::output::OutputFormat;
use crate::runtime::RuntimeContext;

/// Fetch a JSON array of `T` from `{http_endpoint}{path}` and render it.
///
/// The collection is assumed small enough to buffer fully; a decode
/// failure discards the entire batch. No retry, no timeout beyond the
/// transport default.
///
/// # Errors
///
/// Returns [`CliError::RuntimeUnavailable`] when the runtime refuses the
/// connection, [`CliError::Fetch`] for any other transport failure, and
/// [`CliError::Decode`] when the body is not a JSON array of `T`.
pub async fn fetch_and_render<T, W>(
    rtcontext: &RuntimeContext,
    path: &str,
    format: &OutputFormat,
    writer: &mut W,
) -> Result<(), CliError>
where
    T: DeserializeOwned + Serialize,
    W: Write,
{
    let url = format!("{}{path}", rtcontext.http_endpoint());
    debug!(%url, "fetching collection");

    let response = reqwest::get(&url)
        .await
        .map_err(|source| classify_transport(url.clone(), source))?;
    let body = response
        .bytes()
        .await
        .map_err(|source| classify_transport(url.clone(), source))?;

    let items: Vec<T> =
        serde_json::from_slice(&body).map_err(|source| CliError::Decode { url, source })?;

    format.write_collection(writer, &items)
}

fn classify_transport(url: String, source: reqwest::Error) -> CliError {
    if is_connection_refused(&source) {
        CliError::RuntimeUnavailable
    } else {
        CliError::Fetch { url, source }
    }
}

/// Prefer the structured cause over the rendered message: walk the error
/// chain for a connection-refused IO error, and only fall back to a
/// message-suffix match when the transport hides the cause.
fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut cause: Option<&(dyn Error + 'static)> = Some(err);
    while let Some(current) = cause {
        if let Some(io_err) = current.downcast_ref::<std::io::Error>() {
            if io_err.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        cause = current.source();
    }

    deepest_message(err).ends_with("connection refused")
}

fn deepest_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(current) = cause {
        message = current.to_string();
        cause = current.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use serde::Deserialize;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[derive(Debug, Serialize, Deserialize)]
    struct Item {
        name: String,
    }

    /// Serve one canned JSON response on an ephemeral port.
    async fn serve_json(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn five_elements_render_in_response_order() {
        let base = serve_json(
            r#"[{"name":"a"},{"name":"b"},{"name":"c"},{"name":"d"},{"name":"e"}]"#,
        )
        .await;
        let rtcontext = RuntimeContext::new(base);
        let format = OutputFormat::new(Format::Table);

        let mut buf = Vec::new();
        fetch_and_render::<Item, _>(&rtcontext, "/v1/datasets", &format, &mut buf)
            .await
            .expect("should fetch");

        let output = String::from_utf8(buf).expect("utf8");
        let positions: Vec<usize> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|n| output.find(&format!("\n{n}")).expect("row present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(output.contains("Total: 5 item(s)"));
    }

    #[tokio::test]
    async fn connection_refused_is_runtime_unavailable() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let rtcontext = RuntimeContext::new(format!("http://{addr}"));
        let format = OutputFormat::new(Format::Table);

        let mut buf = Vec::new();
        let err = fetch_and_render::<Item, _>(&rtcontext, "/v1/datasets", &format, &mut buf)
            .await
            .expect_err("nothing is listening");
        assert!(
            matches!(err, CliError::RuntimeUnavailable),
            "expected RuntimeUnavailable, got: {err}"
        );
    }

    #[tokio::test]
    async fn decode_failure_discards_the_batch() {
        let base = serve_json(r#"{"not":"an array"}"#).await;
        let rtcontext = RuntimeContext::new(base);
        let format = OutputFormat::new(Format::Table);

        let mut buf = Vec::new();
        let err = fetch_and_render::<Item, _>(&rtcontext, "/v1/datasets", &format, &mut buf)
            .await
            .expect_err("body is not an array");
        assert!(matches!(err, CliError::Decode { .. }));
        assert!(buf.is_empty(), "no partial delivery on decode failure");
    }

    #[tokio::test]
    async fn other_transport_failures_keep_the_url() {
        let rtcontext = RuntimeContext::new("http://nonexistent.invalid");
        let format = OutputFormat::new(Format::Table);

        let mut buf = Vec::new();
        let err = fetch_and_render::<Item, _>(&rtcontext, "/v1/datasets", &format, &mut buf)
            .await
            .expect_err("host does not resolve");
        match err {
            CliError::Fetch { url, .. } => {
                assert_eq!(url, "http://nonexistent.invalid/v1/datasets");
            }
            other => panic!("expected Fetch error, got: {other}"),
        }
    }
}
