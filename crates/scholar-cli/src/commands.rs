//! Command dispatch. Each command is a thin call into a service plus output.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use scholar_client::types::{
    Application, Scholarship, ScholarshipSearchParams, SignInRequest, SignUpRequest, User,
};
use scholar_client::{
    ApiClient, ApplicationService, AuthService, ChatService, ChatSession, Envelope,
    ScholarshipService, SendOutcome,
};
use scholar_common::{is_valid_email, sanitize_input, ScholarError, SessionId};
use scholar_config::ScholarConfig;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::{ApplicationCommand, Command, ScholarshipCommand};
use crate::repl;

pub struct Context {
    pub api: ApiClient,
    pub config: ScholarConfig,
    pub json: bool,
}

impl Context {
    pub fn chat_session(&self, session: Option<String>) -> ChatSession {
        let backend = Arc::new(ChatService::new(self.api.clone()));
        let mut chat = ChatSession::new(backend).with_history_limit(self.config.chat.history_limit);
        if let Some(id) = session {
            chat = chat.with_session_id(SessionId::from_existing(id));
        }
        if let Some(user) = self.api.credentials().current_user() {
            chat = chat.with_user_id(user.id);
        }
        chat
    }

    fn signed_in_user(&self) -> Result<User, ScholarError> {
        self.api
            .credentials()
            .current_user()
            .ok_or_else(|| ScholarError::Other("not signed in; run `scholar signin` first".into()))
    }

    fn emit<T: Serialize>(&self, data: &T, summary: impl FnOnce(&T)) -> Result<(), ScholarError> {
        if self.json {
            let out = serde_json::to_string_pretty(data)
                .map_err(|e| ScholarError::Other(format!("failed to encode output: {e}")))?;
            println!("{out}");
        } else {
            summary(data);
        }
        Ok(())
    }
}

/// Unwrap an envelope for the CLI, turning its failure into an error.
fn settle<T>(envelope: Envelope<T>) -> Result<T, ScholarError> {
    envelope
        .into_result()
        .map_err(|e| ScholarError::Other(e.to_string()))
}

pub async fn run(command: Command, ctx: &Context) -> Result<(), ScholarError> {
    match command {
        Command::Health => {
            let status = settle(ctx.api.health().await)?;
            ctx.emit(&status, |_| println!("backend reachable at {}", ctx.api.config().base_url))
        }
        Command::Ask { message, session } => ask(ctx, &message, session).await,
        Command::Chat { session, history } => repl::run(ctx, session, history).await,
        Command::Signup {
            email,
            name,
            password,
        } => {
            let email = checked_email(&email)?;
            let password = password_or_prompt(password).await?;
            let request = SignUpRequest {
                email,
                password,
                name: name.map(|n| sanitize_input(&n)).filter(|n| !n.is_empty()),
            };
            let auth = settle(AuthService::new(ctx.api.clone()).sign_up(&request).await)?;
            ctx.emit(&auth.user, print_user)
        }
        Command::Signin { email, password } => {
            let email = checked_email(&email)?;
            let password = password_or_prompt(password).await?;
            let request = SignInRequest { email, password };
            let auth = settle(AuthService::new(ctx.api.clone()).sign_in(&request).await)?;
            ctx.emit(&auth.user, print_user)
        }
        Command::Signout => {
            let response = AuthService::new(ctx.api.clone()).sign_out().await;
            if !response.is_success() {
                info!(error = response.error_message(), "backend sign-out failed, local credentials cleared");
            }
            println!("signed out");
            Ok(())
        }
        Command::Whoami => match AuthService::new(ctx.api.clone()).current_user() {
            Some(user) => ctx.emit(&user, print_user),
            None => {
                println!("not signed in");
                Ok(())
            }
        },
        Command::Scholarships { command } => scholarships(ctx, command).await,
        Command::Applications { command } => applications(ctx, command).await,
    }
}

async fn ask(ctx: &Context, message: &str, session: Option<String>) -> Result<(), ScholarError> {
    let mut chat = ctx.chat_session(session);
    let outcome = chat.send_message(&sanitize_input(message)).await;

    match outcome {
        SendOutcome::Ignored => Err(ScholarError::Other("message is empty".into())),
        SendOutcome::Replied => {
            let entries = chat.entries();
            ctx.emit(&entries.last().map(|e| &e.message), |reply| {
                if let Some(reply) = reply {
                    println!("{}", reply.content);
                }
                print_suggestions(chat.suggestions());
                eprintln!("session: {}", chat.session_id());
            })
        }
        SendOutcome::Failed(error) => Err(ScholarError::Other(error.to_string())),
    }
}

async fn scholarships(ctx: &Context, command: ScholarshipCommand) -> Result<(), ScholarError> {
    let service = ScholarshipService::new(ctx.api.clone());
    match command {
        ScholarshipCommand::List { page, page_size } => {
            let result = settle(service.all(page, page_size).await)?;
            ctx.emit(&result, |r| {
                print_scholarships(&r.scholarships);
                println!("page {} ({} total)", r.page, r.total);
            })
        }
        ScholarshipCommand::Search {
            keywords,
            category,
            min_amount,
            max_amount,
            deadline,
            page,
            page_size,
        } => {
            let params = ScholarshipSearchParams {
                category,
                min_amount,
                max_amount,
                deadline,
                keywords: keywords.map(|k| sanitize_input(&k)).filter(|k| !k.is_empty()),
            };
            let result = settle(service.search(&params, page, page_size).await)?;
            ctx.emit(&result, |r| {
                print_scholarships(&r.scholarships);
                println!("page {} ({} total)", r.page, r.total);
            })
        }
        ScholarshipCommand::Show { id } => {
            let scholarship = settle(service.by_id(&id).await)?;
            ctx.emit(&scholarship, |s| {
                print_scholarships(std::slice::from_ref(s));
                if let Some(description) = &s.description {
                    println!("\n{description}");
                }
                for line in &s.eligibility {
                    println!("  eligibility: {line}");
                }
                for line in &s.requirements {
                    println!("  requires: {line}");
                }
                if let Some(url) = &s.application_url {
                    println!("  apply: {url}");
                }
            })
        }
        ScholarshipCommand::Bookmarks => {
            let user = ctx.signed_in_user()?;
            let bookmarked = settle(service.bookmarked(&user.id).await)?;
            ctx.emit(&bookmarked, |list| print_scholarships(list))
        }
    }
}

async fn applications(ctx: &Context, command: ApplicationCommand) -> Result<(), ScholarError> {
    let service = ApplicationService::new(ctx.api.clone());
    let user = ctx.signed_in_user()?;
    let list = match command {
        ApplicationCommand::List { status: Some(status) } => {
            service.by_status(&user.id, status).await
        }
        ApplicationCommand::List { status: None } => service.for_user(&user.id).await,
        ApplicationCommand::Deadlines { days } => service.upcoming_deadlines(&user.id, days).await,
    };
    let list = settle(list)?;
    ctx.emit(&list, |apps| print_applications(apps))
}

fn checked_email(raw: &str) -> Result<String, ScholarError> {
    let email = raw.trim().to_string();
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(ScholarError::Other(format!("{email:?} is not a valid email address")))
    }
}

async fn password_or_prompt(password: Option<String>) -> Result<String, ScholarError> {
    let password = match password {
        Some(password) => password,
        None => {
            eprint!("Password: ");
            std::io::stderr().flush()?;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            lines.next_line().await?.unwrap_or_default()
        }
    };
    if password.is_empty() {
        return Err(ScholarError::Other("password must not be empty".into()));
    }
    Ok(password)
}

fn print_user(user: &User) {
    match &user.name {
        Some(name) => println!("{name} <{}>", user.email),
        None => println!("{}", user.email),
    }
    println!("id: {}", user.id);
}

pub(crate) fn print_suggestions(suggestions: &[String]) {
    for suggestion in suggestions {
        println!("  > {suggestion}");
    }
}

fn print_scholarships(list: &[Scholarship]) {
    if list.is_empty() {
        println!("no scholarships found");
        return;
    }
    let now = Utc::now();
    for s in list {
        let status = s
            .deadline_status(now)
            .map(|d| format!(" [{}]", d.as_str()))
            .unwrap_or_default();
        let mark = if s.is_bookmarked { "*" } else { " " };
        println!(
            "{mark} {}  {}  {}  due {}{status}  ({})",
            s.id, s.name, s.award, s.deadline, s.category
        );
    }
}

fn print_applications(list: &[Application]) {
    if list.is_empty() {
        println!("no applications");
        return;
    }
    for app in list {
        println!(
            "{}  {}  {}  due {}",
            app.id,
            app.scholarship_name,
            app.status,
            app.deadline.format("%Y-%m-%d")
        );
    }
}
