//! Session-based scraping walkthrough.
//!
//! Creates a session, reuses it for a GET and two POSTs, then tears it
//! down. Requires `SCRAPPEY_API_KEY` in the environment.
//!
//! Run with: `cargo run --example scrape`

use scrappey::{RequestBody, RequestConfig, SessionOptions, client_from_env};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = client_from_env()?;

    // A session keeps the same browser tab (and its cookies and
    // fingerprint) open across calls.
    let created = client
        .create_session(SessionOptions::new().with_generated_session())
        .await?;
    println!("session: {}", created.session);

    let vendor = scrappey::VendorExtensions::new().with_session(&created.session);

    let mut page = client
        .get(RequestConfig::get("https://httpbin.rs/get").vendor(vendor.clone()))
        .await?;
    println!("GET {} {}", page.status, page.status_text);
    println!("verified: {}", page.meta.verified);
    println!("{}", page.text()?);

    // Form-encoded POST.
    let mut form = client
        .post(
            RequestConfig::post("https://httpbin.rs/post")
                .body(RequestBody::form([("test", "test"), ("test2", "test2")]))
                .vendor(vendor.clone()),
        )
        .await?;
    println!("POST(form) {}", form.status);
    println!("{}", form.text()?);

    // JSON POST; `expect_json` asks the vendor for extracted text and
    // parses it.
    let mut login = client
        .post(
            RequestConfig::post("https://httpbin.rs/post")
                .header("content-type", "application/json")
                .body(RequestBody::Json(json!({"email": "a@b.c", "password": "x"})))
                .expect_json()
                .vendor(vendor),
        )
        .await?;
    println!("POST(json) {}", login.status);
    println!("{}", login.json()?);

    client.destroy_session(&created.session).await?;
    println!("session destroyed");

    Ok(())
}
