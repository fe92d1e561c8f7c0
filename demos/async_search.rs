//! Async batch search plus a few concurrent single searches on one client.
//!
//! Run with: SERPSHOT_API_KEY=... cargo run --example async_search

use serpshot::{estimate_credits, SearchOptions, SearchType, SerpShotClient};

#[tokio::main]
async fn main() -> serpshot::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = SerpShotClient::from_env()?;
    let opts = SearchOptions::new().num(10).gl("us").hl("en");

    let queries = ["rust tokio", "rust serde", "rust reqwest"];
    println!(
        "estimated: ~{} credit(s)",
        estimate_credits(SearchType::Search, opts.num, Some(&opts.gl)) as usize * queries.len()
    );

    // one backend call for the whole batch
    let batch = client.search_batch(&queries, &opts).await?;
    for r in &batch {
        println!("{:<14} {:>3} results  {} credit(s)", r.query, r.results.len(), r.credits_used);
    }

    // independent calls share the client's connection pool
    let img_opts = SearchOptions::new().num(4);
    let (a, b) = tokio::join!(
        client.search_one("rust borrow checker", &opts),
        client.image_search_one("ferris crab", &img_opts),
    );
    let a = a?;
    println!("{}: {} results", a.query, a.results.len());
    println!("ferris crab: {} images", b?.results.len());

    client.close();
    Ok(())
}
