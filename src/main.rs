use chrono::Utc;
use clap::Parser;
use mindmate::application::init::init;
use mindmate::application::{list_emotions, ConfigService, LogMoodService, MoodEntry, TrendAnalyzer};
use mindmate::cli::{format_emotion_list, format_response, format_trend_table, Cli, Commands};
use mindmate::domain::day_bucket::require_timestamp;
use mindmate::domain::interpret::inline_tags;
use mindmate::domain::{craft_response, KeywordInterpreter};
use mindmate::error::{MindmateError, Result};
use mindmate::infrastructure::config::validate_window;
use mindmate::infrastructure::logging::init_logging;
use mindmate::infrastructure::{Config, FileStore, RateLimitedInterpreter, RateLimiter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            init(&path, &Config::default())?;
            println!("Initialized mindmate journal at {}", path.display());
            Ok(())
        }
        Commands::Log {
            text,
            tags,
            score,
            user,
            at,
            json,
        } => {
            let mut store = FileStore::discover()?;
            let config = store.load_config()?;

            let text = text.unwrap_or_default();
            let mut all_tags: Vec<String> = tags.iter().map(|t| t.trim().to_lowercase()).collect();
            all_tags.extend(inline_tags(&text));
            all_tags.retain(|t| !t.is_empty());
            if all_tags.is_empty() && text.trim().is_empty() {
                return Err(MindmateError::Config(
                    "Nothing to log: provide entry text or at least one --tag".to_string(),
                ));
            }

            let timestamp = match at {
                Some(raw) => require_timestamp(&raw)?,
                None => Utc::now(),
            };

            let limiter =
                RateLimiter::persistent(config.effective_rate_per_min(), store.state_dir());
            let interpreter = RateLimitedInterpreter::with_limiter(KeywordInterpreter, limiter);
            let outcome = LogMoodService::new(&mut store, &interpreter).execute(MoodEntry {
                id: None,
                user_id: user.unwrap_or_else(|| config.user_id.clone()),
                timestamp: timestamp.to_rfc3339(),
                score,
                tags: all_tags.clone(),
                text,
            })?;

            let report = TrendAnalyzer::from_config(&config).analyze(Some(&mut store))?;
            let response = craft_response(&outcome.response_context(&all_tags));

            if json {
                let body = serde_json::json!({
                    "journal_id": outcome.journal_id,
                    "created_emotions": outcome.created_emotions,
                    "message": response.message,
                    "suggestions": response.suggestions,
                    "trends": report.current,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", format_response(&outcome, &response));
            }
            Ok(())
        }
        Commands::Trends {
            window,
            compare,
            json,
        } => {
            let mut store = FileStore::discover()?;
            let config = store.load_config()?;

            let window_days = validate_window(window.unwrap_or(config.window_days))?;
            let compare_days = validate_window(compare.unwrap_or(config.compare_days))?;
            let report = TrendAnalyzer::new(window_days, compare_days).analyze(Some(&mut store))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", format_trend_table(&report).trim_end());
            }
            Ok(())
        }
        Commands::Emotions => {
            let store = FileStore::discover()?;
            println!("{}", format_emotion_list(&list_emotions(&store)).trim_end());
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let store = FileStore::discover()?;
            let service = ConfigService::new(store);

            if list {
                let config = service.list()?;
                println!("window_days = {}", config.window_days);
                println!("compare_days = {}", config.compare_days);
                println!("rate_per_min = {}", config.rate_per_min);
                println!("user_id = {}", config.user_id);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: mindmate config [--list | <key> [<value>]]");
                println!("Valid keys: window_days, compare_days, rate_per_min, user_id");
                Ok(())
            }
        }
    }
}
