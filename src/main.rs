//! Tutorly CLI
//!
//! Command-line front end for the learning assistant:
//! - Ask a one-off question
//! - Recognize video links
//! - Render the emotion-aware tutoring prompt
//! - Chat interactively with save/load/export/import
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tutorly::assistant::{
    quick_reply, Emotion, Intent, QuickIntent, QUICK_REPLY_DELAY, VIDEO_QUICK_PROMPTS,
};
use tutorly::capabilities::FsDocumentStore;
use tutorly::chat::{ChatError, ChatManager, ChatMessage, Sender};
use tutorly::config::{generate_default_config, Config, LoggingConfig};
use tutorly::video::{recognize, Platform, VideoContext};

#[derive(Parser)]
#[command(name = "tutorly")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Learning assistant with video link support")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/tutorly/config.toml or ./tutorly.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the assistant a single question
    Ask {
        /// Question text
        text: Vec<String>,
        /// Treat this video link as loaded
        #[arg(short, long)]
        video: Option<String>,
    },

    /// Ask the quick assistant
    Quick {
        /// Question text
        text: Vec<String>,
    },

    /// Check whether text contains a YouTube or Vimeo link
    Recognize {
        /// Text or URL to inspect
        text: String,
    },

    /// Render the emotion-aware tutoring prompt
    Prompt {
        /// Emotion detected from the voice
        #[arg(long, default_value = "neutral")]
        voice: String,
        /// Emotion detected from the face
        #[arg(long, default_value = "neutral")]
        face: String,
        /// Student context (overrides config)
        #[arg(long)]
        context: Option<String>,
        /// Student interests (overrides config)
        #[arg(long)]
        likes: Option<String>,
    },

    /// Start an interactive chat
    Chat {
        /// Import a previous export before starting
        #[arg(short, long)]
        import: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);
    tracing::debug!("Tutorly v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Ask { text, video } => {
            let text = text.join(" ");
            let context = match video.as_deref() {
                Some(url) => Some(
                    VideoContext::from_url(url)
                        .ok_or_else(|| ChatError::UnrecognizedVideo(url.to_string()))?,
                ),
                None => None,
            };

            let intent = Intent::classify(&text, context.is_some());
            let reply = config.responses.respond(intent);

            if cli.format == "json" {
                let out = serde_json::json!({
                    "intent": intent,
                    "reply": reply,
                    "video": context,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                if let Some(video) = context.as_ref().filter(|_| intent.requires_video()) {
                    println!("[{}] {}", video.platform.label(), video.embed_url());
                }
                println!("{}", reply);
            }
        }

        Commands::Quick { text } => {
            let text = text.join(" ");
            if cli.format == "json" {
                let out = serde_json::json!({
                    "intent": QuickIntent::classify(&text),
                    "reply": quick_reply(&text),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("...");
                tokio::time::sleep(QUICK_REPLY_DELAY).await;
                println!("{}", quick_reply(&text));
            }
        }

        Commands::Recognize { text } => match recognize(&text) {
            Some(found) => {
                let embed = found.platform.embed_url(&found.video_id);
                if cli.format == "json" {
                    let out = serde_json::json!({
                        "matched": true,
                        "platform": found.platform,
                        "videoId": found.video_id,
                        "embedUrl": embed,
                        "title": found.platform.display_title(),
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                } else {
                    println!("{:<10} {}", "Platform", found.platform.label());
                    println!("{:<10} {}", "Video ID", found.video_id);
                    println!("{:<10} {}", "Embed", embed);
                    println!("{:<10} {}", "Title", found.platform.display_title());
                }
            }
            None => {
                if cli.format == "json" {
                    println!("{}", serde_json::json!({ "matched": false }));
                } else {
                    let names: Vec<_> = Platform::all().iter().map(|p| p.label()).collect();
                    println!("Not a {} link", names.join(" or "));
                }
                std::process::exit(1);
            }
        },

        Commands::Prompt {
            voice,
            face,
            context,
            likes,
        } => {
            let mut profile = config.profile.clone().with_emotions(
                voice.parse::<Emotion>()?,
                face.parse::<Emotion>()?,
            );
            if context.is_some() {
                profile.context = context;
            }
            if likes.is_some() {
                profile.likes = likes;
            }

            let state = profile.state();
            if cli.format == "json" {
                let out = serde_json::json!({
                    "state": state.describe(),
                    "focus": state.focus(),
                    "prompt": profile.system_prompt(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", profile.system_prompt());
            }
        }

        Commands::Chat { import } => {
            run_chat(&config, import).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tutorly={}", logging.level)));

    // stdout carries chat output; logs go to stderr
    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_chat(config: &Config, import: Option<PathBuf>) -> anyhow::Result<()> {
    let mut chat = ChatManager::from_config(config);
    let store = FsDocumentStore::new(config.export.path());

    if let Some(path) = import {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let summary = chat.import_json(&text)?;
        println!(
            "Imported {} sessions, {} messages",
            summary.sessions.unwrap_or(0),
            summary.messages.unwrap_or(0)
        );
    }

    for message in chat.messages() {
        print_message(message);
    }
    println!("(type /help for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "/exit" => break,

            "/help" => print_help(),

            "/new" => {
                chat.new_chat();
                for message in chat.messages() {
                    print_message(message);
                }
            }

            "/save" => match chat.save_session() {
                Some(session) => println!("Saved \"{}\"", session.name),
                None => println!("Nothing to save yet"),
            },

            "/sessions" => {
                if chat.sessions().is_empty() {
                    println!("No saved chats yet");
                }
                for (i, session) in chat.sessions().iter().enumerate() {
                    let marker = if chat.current_session_id() == Some(session.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{}{:>3}  {:<20} {:>4} messages  {}",
                        marker,
                        i + 1,
                        session.name,
                        session.len(),
                        session.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }

            "/load" => {
                let id = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| chat.sessions().get(i))
                    .map(|s| s.id.clone());

                match id {
                    Some(id) => {
                        chat.load_session(&id)?;
                        for message in chat.messages() {
                            print_message(message);
                        }
                    }
                    None => println!("Usage: /load <number from /sessions>"),
                }
            }

            "/video" => match chat
                .load_video(arg)
                .map(|video| format!("[{}] {}", video.platform.label(), video.embed_url()))
            {
                Ok(header) => {
                    println!("{}", header);
                    if let Some(message) = chat.messages().last() {
                        print_message(message);
                    }
                    for (label, prompt) in VIDEO_QUICK_PROMPTS {
                        println!("  {:<10} {}", label, prompt);
                    }
                }
                Err(ChatError::EmptyInput) => println!("Usage: /video <url>"),
                Err(e) => println!("{}", e),
            },

            "/mood" => {
                let mut labels = arg.split_whitespace();
                match labels.next() {
                    Some(voice) => {
                        let voice = Emotion::from_label(voice);
                        let face = labels.next().map(Emotion::from_label).unwrap_or_default();
                        chat.set_emotions(voice, face);
                        println!("{}", chat.profile().state().describe());
                    }
                    None => println!("Usage: /mood <voice> [face]"),
                }
            }

            "/prompt" => println!("{}", chat.system_prompt()),

            "/history" => match chat.history() {
                Some(history) if !history.is_empty() => {
                    for message in history.messages() {
                        print_message(message);
                    }
                }
                _ => println!("No recent history"),
            },

            "/export" => match chat.export_to(&store).await {
                Ok(location) => println!("Exported to {}", location),
                Err(e) => println!("Export failed: {}", e),
            },

            "/import" => {
                if arg.is_empty() {
                    println!("Usage: /import <path>");
                    continue;
                }
                let source = store.clone().with_source(arg);
                match chat.import_from(&source).await {
                    Ok(summary) => {
                        println!(
                            "Imported {} sessions, {} messages",
                            summary.sessions.unwrap_or(0),
                            summary.messages.unwrap_or(0)
                        );
                    }
                    Err(e) => println!("{}", e),
                }
            }

            _ if command.starts_with('/') => {
                println!("Unknown command {}. Type /help", command);
            }

            _ => {
                println!("...");
                match chat.send_message(line).await {
                    Ok(reply) => print_message(&reply),
                    Err(e) => println!("{}", e),
                }
            }
        }
    }

    Ok(())
}

fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "assistant",
    };
    println!(
        "[{}] {}: {}",
        message.created_at.with_timezone(&chrono::Local).format("%H:%M:%S"),
        who,
        message.text
    );
}

fn print_help() {
    println!("Commands:");
    println!("  /video <url>   Load a YouTube or Vimeo video");
    println!("  /save          Save the current chat");
    println!("  /sessions      List saved chats");
    println!("  /load <n>      Load a saved chat");
    println!("  /new           Start a new chat");
    println!("  /mood <v> [f]  Set voice and face emotions");
    println!("  /prompt        Show the tutoring prompt");
    println!("  /history       Show the recent-message window");
    println!("  /export        Export all chats to JSON");
    println!("  /import <path> Import chats from JSON");
    println!("  /quit          Exit");
}
