//! Blocking search from a plain `main`.
//!
//! Run with: SERPSHOT_API_KEY=... cargo run --example sync_search -- "rust async"

use serpshot::{BlockingSerpShotClient, LocationCode, SearchOptions};

fn main() -> serpshot::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rust programming".to_string());

    let client = BlockingSerpShotClient::from_env()?;
    let opts = SearchOptions::new().num(5).location(LocationCode::US);

    let resp = client.search_one(&query, &opts)?;
    println!("{} ({} results, {}s)", resp.query, resp.total_results, resp.search_time);
    if let Some(organic) = resp.results.organic() {
        for r in organic {
            println!("{:>2}. {}\n    {}", r.position, r.title, r.link);
        }
    }

    let images = client.image_search_one(&query, &SearchOptions::new().num(3))?;
    if let Some(images) = images.results.images() {
        for img in images {
            println!("[img] {}x{} {}", img.width, img.height, img.link);
        }
    }

    println!("credits used: {}", resp.credits_used + images.credits_used);
    client.close();
    Ok(())
}
