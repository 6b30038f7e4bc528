mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use netflex::api::{respond, respond_unit, ApiResponse};
use netflex::assist::{self, GeminiClient};
use netflex::catalog;
use netflex::config::{LatencyProfile, Settings};
use netflex::error::ApiError;
use netflex::types::ContentItem;
use netflex::upload::MediaRef;
use netflex::Netflex;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(store) = cli.store { settings.store = store; }
    if let Some(url) = cli.database_url.clone() { settings.database_url = Some(url); }
    if let Some(dir) = cli.data_dir.clone() { settings.data_dir = Some(dir); }
    if cli.no_latency { settings.latency = LatencyProfile::none(); }

    let nf = Netflex::connect(&settings).await.context("opening catalog store")?;
    let json = cli.json;

    let ok = match cli.command {
        Commands::List(args) => emit(json, respond(nf.browse(&args.filter()).await), print_items),
        Commands::Get { id } => emit(json, respond(nf.get_by_id(&id).await), print_item),
        Commands::Create(args) => {
            let poster = match resolve_poster(&nf, &args.poster).await {
                Ok(p) => p,
                Err(e) => return finish(emit(json, respond::<ContentItem>(Err(e)), print_item)),
            };
            emit(json, respond(nf.create(args.into_new(poster)).await), print_item)
        }
        Commands::Update { id, mut fields } => {
            let poster = match fields.poster.take() {
                Some(p) => match resolve_poster(&nf, &p).await {
                    Ok(p) => Some(p),
                    Err(e) => return finish(emit(json, respond::<ContentItem>(Err(e)), print_item)),
                },
                None => None,
            };
            emit(json, respond(nf.update(&id, fields.into_patch(poster)).await), print_item)
        }
        Commands::Delete { id } => emit_done(json, respond_unit(nf.delete(&id).await), &format!("deleted {id}")),
        Commands::Login { username, password } => {
            emit(json, respond(nf.login(&username, &password).await), |s| println!("logged in as {}", s.username))
        }
        Commands::Logout => emit_done(json, respond_unit(nf.logout().await), "logged out"),
        Commands::Whoami => emit(json, respond(nf.current_session().await), |s| match s {
            Some(s) => println!("{}", s.username),
            None => println!("not logged in"),
        }),
        Commands::Upload { path } => emit(json, respond(nf.upload_file(&path).await), |uri| println!("{uri}")),
        Commands::Search { query } => emit(json, respond(nf.search(&query).await), print_items),
        Commands::Stats => emit(json, respond(nf.stats().await), |s| {
            println!("total {}  series {}  singles {}  popular {}", s.total, s.series, s.singles, s.popular);
            for (c, n) in &s.by_country { println!("  {c:<12} {n}"); }
            for (g, n) in &s.by_genre { println!("  {g:<12} {n}"); }
        }),
        Commands::Releases { limit } => emit(json, respond(nf.new_releases(limit).await), print_items),
        Commands::Synopsis { title, genre } => {
            let res = match GeminiClient::from_settings(&settings.assist) {
                Ok(client) => assist::draft_description(&client, &title, Some(genre)).await,
                Err(e) => Err(ApiError::Assistant(e.to_string())),
            };
            emit(json, respond(res), |t| println!("{t}"))
        }
        Commands::Recommend { question, watched } => {
            let res = recommend(&nf, &settings, &question, &watched).await;
            emit(json, respond(res), |t| println!("{t}"))
        }
    };
    finish(ok)
}

fn finish(ok: bool) -> Result<()> {
    if !ok { std::process::exit(1); }
    Ok(())
}

async fn recommend(nf: &Netflex, settings: &Settings, question: &str, watched: &[String]) -> Result<String, ApiError> {
    let client = GeminiClient::from_settings(&settings.assist).map_err(|e| ApiError::Assistant(e.to_string()))?;
    let items = nf.list_all().await?;
    let mut history = catalog::WatchHistory::new();
    for id in watched.iter().rev() {
        if let Some(m) = items.iter().find(|m| &m.id == id) { history.record(m); }
    }
    assist::recommend(&client, &items, history.items(), question).await
}

/// A poster argument naming an existing local file is uploaded inline; anything else is kept as a URL.
async fn resolve_poster(nf: &Netflex, poster: &str) -> Result<String, ApiError> {
    if !poster.is_empty() && Path::new(poster).is_file() {
        return nf.upload_file(Path::new(poster)).await;
    }
    Ok(poster.to_string())
}

fn emit<T: Serialize>(json: bool, resp: ApiResponse<T>, show: impl FnOnce(&T)) -> bool {
    if json { return print_json(&resp); }
    match (&resp.data, resp.success) {
        (Some(d), true) => show(d),
        (None, true) => println!("ok"),
        (_, false) => print_failure(&resp),
    }
    resp.success
}

/// For operations that succeed without a payload.
fn emit_done(json: bool, resp: ApiResponse<()>, done: &str) -> bool {
    if json { return print_json(&resp); }
    match done_message(&resp, done) {
        Ok(line) => println!("{line}"),
        Err(msg) => eprintln!("error: {msg}"),
    }
    resp.success
}

fn done_message<'a>(resp: &'a ApiResponse<()>, done: &'a str) -> Result<&'a str, &'a str> {
    if resp.success { Ok(done) } else { Err(resp.message.as_deref().unwrap_or(netflex::api::GENERIC_FAILURE)) }
}

fn print_json<T: Serialize>(resp: &ApiResponse<T>) -> bool {
    match serde_json::to_string_pretty(resp) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("error: {e}"),
    }
    resp.success
}

fn print_failure<T>(resp: &ApiResponse<T>) {
    eprintln!("error: {}", resp.message.as_deref().unwrap_or(netflex::api::GENERIC_FAILURE));
}

fn print_items(items: &Vec<ContentItem>) {
    for m in items {
        println!("{:<38} {:<24} {:<7} {:<8} {:<12} {}{}", m.id, m.title, m.content_type, m.country, m.genre, m.year, if m.is_popular { " *" } else { "" });
    }
}

fn print_item(m: &ContentItem) {
    println!("id:          {}", m.id);
    println!("title:       {}", m.title);
    println!("type:        {}", m.content_type);
    println!("country:     {}", m.country);
    println!("genre:       {}", m.genre);
    println!("year:        {}", m.year);
    println!("popular:     {}", m.is_popular);
    println!("created:     {}", m.created_at);
    println!("description: {}", m.description);
    println!("poster:      {}", media_label(&m.poster_path));
    println!("video:       {}", media_label(&m.video_path));
}

fn media_label(path: &str) -> String {
    MediaRef::classify(path).label().map(|l| short(&l)).unwrap_or_else(|| short(path))
}

// Cut on characters, not bytes; paths may hold non-ASCII text.
fn short(path: &str) -> String {
    if path.chars().count() <= 80 { return path.to_string(); }
    let head: String = path.chars().take(60).collect();
    format!("{head}... ({} bytes)", path.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cuts_on_char_boundaries() {
        let mixed = format!("https://x/a{}", "中".repeat(25));
        assert_eq!(short(&mixed), mixed);

        let long = format!("https://x/a{}", "中".repeat(90));
        let cut = short(&long);
        assert!(cut.starts_with("https://x/a中中"));
        assert!(cut.ends_with(&format!("... ({} bytes)", long.len())));
        assert_eq!(cut.chars().take_while(|c| *c != '.').count(), 60);

        assert_eq!(short("plain"), "plain");
    }

    #[test]
    fn payloadless_success_prints_its_own_line() {
        assert_eq!(done_message(&ApiResponse::done(), "logged out"), Ok("logged out"));
        let failed = respond_unit(Err(ApiError::Storage(anyhow::anyhow!("disk gone"))));
        assert_eq!(done_message(&failed, "deleted 3"), Err(netflex::api::GENERIC_FAILURE));
    }

    #[test]
    fn inline_media_is_summarized() {
        let uri = netflex::upload::encode_data_uri(&[1; 4096], "image/jpeg");
        assert_eq!(media_label(&uri), "inline image/jpeg, 4096 bytes");
        assert_eq!(media_label("not a url"), "not a url");
    }
}
