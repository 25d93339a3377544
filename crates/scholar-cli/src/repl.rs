//! Interactive chat loop over stdin.

use std::io::Write;

use scholar_client::session::HistoryLoad;
use scholar_client::types::{ChatMessage, Role};
use scholar_client::{ChatSession, SendOutcome};
use scholar_common::{sanitize_input, ScholarError};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{print_suggestions, Context};

const PROMPT: &str = "you> ";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Clear,
    History,
    Message(String),
    Nothing,
}

fn classify(line: &str) -> Input {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/clear" => Input::Clear,
        "/history" => Input::History,
        "" => Input::Nothing,
        text => Input::Message(sanitize_input(text)),
    }
}

fn transcript_line(message: &ChatMessage) -> String {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!("{who}> {}", message.content)
}

pub async fn run(ctx: &Context, session: Option<String>, history: bool) -> Result<(), ScholarError> {
    let mut chat = ctx.chat_session(session);
    eprintln!("session {} (type /quit to leave)", chat.session_id());

    if history {
        load_history(&mut chat).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match classify(&line) {
            Input::Quit => break,
            Input::Nothing => {}
            Input::Clear => {
                chat.clear();
                eprintln!("history cleared");
            }
            Input::History => load_history(&mut chat).await,
            Input::Message(text) => match chat.send_message(&text).await {
                SendOutcome::Ignored => {}
                SendOutcome::Replied => {
                    if let Some(reply) = chat.last_message() {
                        println!("{}", transcript_line(reply));
                    }
                    print_suggestions(chat.suggestions());
                }
                SendOutcome::Failed(_) => {
                    if let Some(reply) = chat.last_message() {
                        println!("{}", transcript_line(reply));
                    }
                    if let Some(error) = chat.error() {
                        eprintln!("error: {error}");
                    }
                }
            },
        }
    }

    Ok(())
}

async fn load_history(chat: &mut ChatSession) {
    match chat.load_history().await {
        HistoryLoad::Skipped => eprintln!("sign in to load chat history"),
        HistoryLoad::Failed(error) => eprintln!("could not load history: {error}"),
        HistoryLoad::Loaded(count) => {
            for entry in chat.entries() {
                println!("{}", transcript_line(&entry.message));
            }
            eprintln!("{count} messages loaded");
        }
    }
}
