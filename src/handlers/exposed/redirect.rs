use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header::ACCEPT, header::LOCATION},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::extractors::Query;

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub url: Option<String>,
}

fn redirect_page(url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Redirecting...</title></head>
<body style="font-family:sans-serif;text-align:center;padding:60px">
  <h2>Redirecting...</h2>
  <p>You are being redirected to:</p>
  <p><a href="{url}">{url}</a></p>
  <p style="color:#999;font-size:0.8em">If you are not redirected automatically, click the link above.</p>
  <script>setTimeout(function(){{ window.location = "{url}"; }}, 2000);</script>
</body>
</html>
"#
    )
}

/// Go wherever `url` says. Browsers get an interstitial page with the url
/// written into it as is; everything else gets a 302.
pub async fn redirect(headers: HeaderMap, Query(query): Query<RedirectQuery>) -> Result<Response> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "/".to_string());

    let wants_html = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));

    if wants_html {
        return Ok(Html(redirect_page(&url)).into_response());
    }

    let location =
        HeaderValue::from_str(&url).map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}
