//! Terminal renderer for an interview session.

use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use tokio::io::{AsyncBufReadExt, BufReader};

use interviewbot_core::{
    InterviewController, InterviewSession, Preferences, Role, SessionEvent, Summary, Topic, View,
    ViewMessage, FORM_HEADING, SUMMARY_HEADING,
};
use interviewbot_llm::TurnRole;

const QUIT_COMMAND: &str = "/quit";

pub async fn run(controller: &InterviewController) -> Result<()> {
    let mut session = InterviewSession::new();

    let view = controller.render(&session);
    println!("{}", "Interview Bot".bold());
    println!();
    for line in &view.intro {
        println!("{}", line);
    }
    println!();
    print_summary(&view.summary);
    println!();
    println!("{}", FORM_HEADING.bold());
    let preferences = prompt_preferences(controller)?;

    let view = controller
        .handle(&mut session, SessionEvent::SubmitPreferences(preferences))
        .await?;
    print_briefing(&view);

    let begin = Confirm::new()
        .with_prompt("Begin Interview?")
        .default(true)
        .interact()?;
    if !begin {
        return Ok(());
    }

    let mut printed = 0;
    let view = with_thinking(controller.handle(&mut session, SessionEvent::BeginInterview)).await?;
    printed = print_new_messages(&view, printed);

    println!(
        "{}",
        format!("Type your answer and press Enter. {} ends the interview.", QUIT_COMMAND).dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".bright_green());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        let input = line.trim();
        if input == QUIT_COMMAND {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match with_thinking(controller.handle(&mut session, SessionEvent::UserMessage(line))).await
        {
            Ok(view) => printed = print_new_messages(&view, printed),
            Err(e) => eprintln!("{} {} (send it again to retry)", "error:".red().bold(), e),
        }
    }

    println!();
    println!("{}", "Interview ended.".dimmed());
    Ok(())
}

fn prompt_preferences(controller: &InterviewController) -> Result<Preferences> {
    let personas = controller.personas().all();

    let user_name: String = Input::new()
        .with_prompt("Enter your name:")
        .allow_empty(true)
        .interact_text()?;

    let labels: Vec<String> = personas.iter().map(|p| p.option_label()).collect();
    let interviewer = Select::new()
        .with_prompt("Choose your interviewer")
        .items(&labels)
        .default(0)
        .interact()?;

    let role = Select::new()
        .with_prompt("Choose your role:")
        .items(&Role::ALL.map(|r| r.as_str()))
        .default(0)
        .interact()?;

    let topic = Select::new()
        .with_prompt("Choose your topic:")
        .items(&Topic::ALL.map(|t| t.as_str()))
        .default(0)
        .interact()?;

    Ok(Preferences::new(
        user_name.trim(),
        personas[interviewer].id,
        Role::ALL[role],
        Topic::ALL[topic],
    ))
}

/// Show a "Thinking..." line while the completion call is in flight
async fn with_thinking<F, T>(future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    eprint!("{}", "Thinking...".dimmed());
    let _ = std::io::stderr().flush();
    let output = future.await;
    eprint!("\r{}\r", " ".repeat("Thinking...".len()));
    output
}

fn print_summary(summary: &Summary) {
    println!("{}", SUMMARY_HEADING.bold());
    match summary {
        Summary::Pending { note } => println!("  {}", note.dimmed()),
        Summary::Submitted {
            interviewee,
            interviewer,
            role,
            topic,
        } => {
            println!("  {:<12} {}", "Interviewee:".dimmed(), interviewee);
            println!("  {:<12} {}", "Interviewer:".dimmed(), interviewer);
            println!("  {:<12} {}", "Role:".dimmed(), role);
            println!("  {:<12} {}", "Topic:".dimmed(), topic);
        }
    }
}

fn print_briefing(view: &View) {
    println!();
    if let Some(greeting) = &view.greeting {
        println!("{}", greeting.bold());
    }
    for line in &view.briefing {
        println!("  {} {}", "-".dimmed(), line);
    }
    println!();
    print_summary(&view.summary);
    println!();
}

/// Print messages past `printed` and return the new count.
///
/// Views never reorder earlier messages, so printing the tail is equivalent to
/// redrawing the whole list.
fn print_new_messages(view: &View, printed: usize) -> usize {
    for message in view.messages.iter().skip(printed) {
        print_message(message);
    }
    view.messages.len()
}

fn print_message(message: &ViewMessage) {
    let author = match message.role {
        TurnRole::User => message.author.bright_blue().bold(),
        TurnRole::Assistant => message.author.bright_magenta().bold(),
    };
    println!("{}: {}", author, message.content);
    println!();
}
