//! serpshot — SerpShot 搜索命令行工具
//!
//! Usage:
//!   serpshot search [OPTIONS] <query>...     Web search (one or more queries)
//!   serpshot image [OPTIONS] <query>...      Image search
//!   serpshot estimate [OPTIONS] <query>...   Advisory credit estimate (no network call)

use anyhow::{bail, Context};
use serpshot::{
    protocol::request, BlockingSerpShotClient, CreditEstimate, SearchOptions, SearchOutput,
    SearchQuery, SearchType,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "search" => cmd_search(SearchType::Search, &args[2..]),
        "image" => cmd_search(SearchType::Image, &args[2..]),
        "estimate" => cmd_estimate(&args[2..]),
        "version" | "--version" | "-V" => {
            println!("serpshot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(2);
    }
}

fn print_usage() {
    println!(
        r#"serpshot — SerpShot Google search from the command line

USAGE:
    serpshot <COMMAND> [OPTIONS] <query>...

COMMANDS:
    search      Web search; several queries are sent as one batch
    image       Image search
    estimate    Print the advisory credit estimate without searching
    version     Show version information
    help        Show this help message

OPTIONS:
    --num <N>           Results per query (1-100, default 10)
    --page <N>          Page number (default 1)
    --gl <CODE>         Country code (default us)
    --hl <LANG>         Interface language (default en)
    --lr <LANG>         Content language restriction (default en)
    --location <LOC>    Location code, e.g. US, GB

ENVIRONMENT:
    SERPSHOT_API_KEY        API key (required for search/image)
    SERPSHOT_BASE_URL       API base URL
    SERPSHOT_TIMEOUT_SECS   Per-attempt timeout
    SERPSHOT_MAX_RETRIES    Attempts per call
    RUST_LOG                Log filter, e.g. serpshot=debug"#
    );
}

/// Split `args` into options and the trailing query list.
fn parse_args(args: &[String]) -> anyhow::Result<(SearchOptions, Vec<String>)> {
    let mut opts = SearchOptions::default();
    let mut queries = Vec::new();
    let mut it = args.iter();

    while let Some(arg) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .cloned()
                .with_context(|| format!("{name} requires a value"))
        };
        match arg.as_str() {
            "--num" => opts.num = value("--num")?.parse().context("--num must be a number")?,
            "--page" => opts.page = value("--page")?.parse().context("--page must be a number")?,
            "--gl" => opts.gl = value("--gl")?,
            "--hl" => opts.hl = value("--hl")?,
            "--lr" => opts.lr = value("--lr")?,
            "--location" => opts = opts.location(value("--location")?),
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            q => queries.push(q.to_string()),
        }
    }

    if queries.is_empty() {
        bail!("at least one query is required");
    }
    Ok((opts, queries))
}

fn to_query(mut queries: Vec<String>) -> SearchQuery {
    if queries.len() == 1 {
        SearchQuery::Single(queries.remove(0))
    } else {
        SearchQuery::Batch(queries)
    }
}

fn cmd_search(kind: SearchType, args: &[String]) -> anyhow::Result<()> {
    let (opts, queries) = parse_args(args)?;
    let client = BlockingSerpShotClient::from_env()?;

    let query = to_query(queries);
    let output = match kind {
        SearchType::Search => client.search(query, &opts)?,
        SearchType::Image => client.image_search(query, &opts)?,
    };
    client.close();

    let credits = output.credits_used();
    let json = match &output {
        SearchOutput::Single(r) => serde_json::to_string_pretty(r)?,
        SearchOutput::Batch(rs) => serde_json::to_string_pretty(rs)?,
    };
    println!("{json}");
    eprintln!("credits used: {credits}");
    Ok(())
}

fn cmd_estimate(args: &[String]) -> anyhow::Result<()> {
    let (opts, queries) = parse_args(args)?;
    let req = request::build(&to_query(queries), SearchType::Search, &opts)?;
    let web = CreditEstimate::for_request(&req);
    let image = CreditEstimate::for_request(&request::build(
        &SearchQuery::Batch(req.queries.clone()),
        SearchType::Image,
        &opts,
    )?);
    println!("web search:   {} credit(s) ({} per query)", web.total, web.per_query);
    println!("image search: {} credit(s) ({} per query)", image.total, image.per_query);
    println!("(advisory only; the API reports actual usage in each response)");
    Ok(())
}
