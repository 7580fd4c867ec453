//! Chatterbox CLI
//!
//! Command-line client for the Chatterbox HTTP API: open a session, chat,
//! fetch or clear the transcript, and save spoken replies to disk.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use serde::Deserialize;

/// Chatterbox CLI
#[derive(Parser)]
#[command(name = "chatterbox-cli")]
#[command(author, version, about = "Chatterbox voice chat CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, default_value = "http://localhost:3000", env = "CHATTERBOX_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server readiness
    Status,

    /// Open a new chat session
    Open,

    /// Close a session
    Close {
        /// Session to close
        #[arg(short, long, env = "CHATTERBOX_SESSION")]
        session: String,
    },

    /// Send a chat message and print the reply
    Chat {
        /// Message to send
        message: String,

        /// Session to chat in (opened automatically when omitted)
        #[arg(short, long, env = "CHATTERBOX_SESSION")]
        session: Option<String>,

        /// Write the spoken reply (MP3) to this path
        #[arg(long)]
        audio_out: Option<PathBuf>,
    },

    /// Print the session transcript
    Transcript {
        /// Session to inspect
        #[arg(short, long, env = "CHATTERBOX_SESSION")]
        session: String,
    },

    /// Clear the session transcript
    Clear {
        /// Session to clear
        #[arg(short, long, env = "CHATTERBOX_SESSION")]
        session: String,
    },
}

#[derive(Debug, Deserialize)]
struct ReadinessResponse {
    ready: bool,
    generation: GenerationStatus,
}

#[derive(Debug, Deserialize)]
struct GenerationStatus {
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    session_id: String,
    reply: AssistantReply,
}

#[derive(Debug, Deserialize)]
struct AssistantReply {
    content: String,
    audio: Option<String>,
    model: Option<String>,
    latency_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    turns: Vec<TranscriptTurn>,
}

#[derive(Debug, Deserialize)]
struct TranscriptTurn {
    role: String,
    content: String,
    audio: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Status => {
            let response = client.get(format!("{base}/ready")).send().await?;
            let status = response.status();
            let readiness: ReadinessResponse =
                response.json().await.context("unexpected /ready body")?;

            println!(
                "ready: {} (HTTP {status}), model: {}",
                readiness.ready,
                readiness.generation.model.as_deref().unwrap_or("-")
            );
        },

        Commands::Open => {
            let session = open_session(&client, &base).await?;
            println!("{session}");
        },

        Commands::Close { session } => {
            let response = client
                .delete(format!("{base}/v1/sessions/{session}"))
                .send()
                .await?;
            anyhow::ensure!(
                response.status().is_success(),
                "close failed: HTTP {}",
                response.status()
            );
            println!("closed {session}");
        },

        Commands::Chat {
            message,
            session,
            audio_out,
        } => {
            let session = match session {
                Some(session) => session,
                None => {
                    let session = open_session(&client, &base).await?;
                    println!("(session {session})");
                    session
                },
            };

            let response = client
                .post(format!("{base}/v1/sessions/{session}/chat"))
                .json(&serde_json::json!({ "message": message }))
                .send()
                .await?;
            anyhow::ensure!(
                response.status().is_success(),
                "chat failed: HTTP {}",
                response.status()
            );

            let chat: ChatResponse = response.json().await.context("unexpected chat body")?;
            print_reply(&chat);

            if let Some(path) = audio_out {
                let Some(encoded) = chat.reply.audio else {
                    anyhow::bail!("reply carried no audio");
                };
                let bytes = STANDARD
                    .decode(encoded)
                    .context("reply audio is not valid base64")?;
                tokio::fs::write(&path, bytes).await?;
                println!("wrote {}", path.display());
            }
        },

        Commands::Transcript { session } => {
            let response = client
                .get(format!("{base}/v1/sessions/{session}/transcript"))
                .send()
                .await?;
            anyhow::ensure!(
                response.status().is_success(),
                "transcript failed: HTTP {}",
                response.status()
            );

            let transcript: TranscriptResponse =
                response.json().await.context("unexpected transcript body")?;
            for turn in transcript.turns {
                println!("{}", format_turn(&turn));
            }
        },

        Commands::Clear { session } => {
            let response = client
                .delete(format!("{base}/v1/sessions/{session}/transcript"))
                .send()
                .await?;
            anyhow::ensure!(
                response.status().is_success(),
                "clear failed: HTTP {}",
                response.status()
            );
            println!("cleared {session}");
        },
    }

    Ok(())
}

async fn open_session(client: &reqwest::Client, base: &str) -> anyhow::Result<String> {
    let response = client.post(format!("{base}/v1/sessions")).send().await?;
    anyhow::ensure!(
        response.status().is_success(),
        "open failed: HTTP {}",
        response.status()
    );
    let session: SessionResponse = response.json().await.context("unexpected session body")?;
    Ok(session.session_id)
}

fn print_reply(chat: &ChatResponse) {
    println!("{}", chat.reply.content);
    println!(
        "  [{} | {} ms | audio: {} | session {}]",
        chat.reply.model.as_deref().unwrap_or("-"),
        chat.reply
            .latency_ms
            .map_or_else(|| "-".to_string(), |ms| ms.to_string()),
        if chat.reply.audio.is_some() { "yes" } else { "no" },
        chat.session_id
    );
}

fn format_turn(turn: &TranscriptTurn) -> String {
    let speaker = match turn.role.as_str() {
        "user" => "you",
        "assistant" => "bot",
        other => other,
    };
    let audio = if turn.audio.is_some() { " 🔊" } else { "" };
    format!("{speaker}: {}{audio}", turn.content)
}
