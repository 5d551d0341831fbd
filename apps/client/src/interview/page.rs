//! Interview pages: start a session, conduct it turn by turn, render results.

use colored::Colorize;
use uuid::Uuid;

use crate::errors::ClientError;
use crate::interview::{
    self,
    models::{score_band, Analysis, ScoreBand, StartForm, STATUS_COMPLETED},
    InterviewExchange, FALLBACK,
};
use crate::protocol::{Author, Conversation, Refusal};
use crate::state::AppContext;
use crate::ui;

pub async fn run_start(context: &AppContext, form: StartForm) -> Result<(), ClientError> {
    let started = interview::start(&context.api, context.organization_id, &form).await?;
    ui::success_line(&format!(
        "Interview {} started for {} ({})",
        started.interview_id, form.candidate_name, form.position
    ));
    ui::meta_line(&format!(
        "question {} of {}",
        started.question_number, started.total_questions
    ));
    ui::remote_line("interviewer", &started.ai_message);

    let mut exchange = InterviewExchange::new(context.api.clone(), started.interview_id);
    exchange.question_number = started.question_number;
    exchange.total_questions = started.total_questions;
    let mut conversation = Conversation::seeded(exchange, FALLBACK, started.ai_message);

    drive_loop(&mut conversation).await?;
    if conversation.is_complete() {
        offer_analysis(context, started.interview_id).await?;
    }
    Ok(())
}

pub async fn run_conduct(context: &AppContext, interview_id: Uuid) -> Result<(), ClientError> {
    let details = interview::load(&context.api, interview_id).await?;
    let turns = interview::to_turns(&details.transcripts);
    let complete = details.interview.status == STATUS_COMPLETED;

    ui::banner(
        &format!(
            "Interview with {} — {}",
            details.interview.candidate_name, details.interview.position
        ),
        "answer each question; /quit exits without finishing",
    );
    for turn in &turns {
        match turn.author {
            Author::Remote => ui::remote_line("interviewer", &turn.text),
            Author::Local => println!("{} {}", "you:".bold(), turn.text),
        }
    }

    let mut exchange = InterviewExchange::new(context.api.clone(), interview_id);
    exchange.question_number = question_number_from(&turns);
    let mut conversation = Conversation::resume(exchange, FALLBACK, turns, complete);

    if !conversation.is_complete() {
        drive_loop(&mut conversation).await?;
    }

    if conversation.is_complete() {
        offer_analysis(context, interview_id).await?;
    }
    Ok(())
}

/// The reply loop. Exits when the server signals completion or the
/// candidate bails.
async fn drive_loop(
    conversation: &mut Conversation<InterviewExchange>,
) -> Result<(), ClientError> {
    let mut editor = ui::editor()?;
    loop {
        let Some(line) = ui::read_line(&mut editor, "answer> ") else {
            return Ok(());
        };
        if matches!(line.trim(), "/quit" | "/exit") {
            return Ok(());
        }

        match conversation.submit(&line).await {
            Err(Refusal::EmptyInput) => continue,
            Err(Refusal::Completed) => break,
            Err(Refusal::ReplyPending) => continue,
            Ok(_) => {
                if let Some(turn) = conversation.last_remote() {
                    ui::remote_line("interviewer", &turn.text);
                }
                let exchange = conversation.exchange();
                ui::meta_line(&format!(
                    "question {} of {}",
                    exchange.question_number, exchange.total_questions
                ));
                if conversation.is_complete() {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Once complete, the only remaining action is the one-shot analysis.
async fn offer_analysis(context: &AppContext, interview_id: Uuid) -> Result<(), ClientError> {
    ui::success_line("Interview complete.");
    let mut editor = ui::editor()?;
    if !ui::confirm(&mut editor, "Run the AI analysis now?") {
        ui::meta_line(&format!(
            "run `lightning interview results {interview_id}` later to see the analysis"
        ));
        return Ok(());
    }
    let analysis = interview::analyze(&context.api, interview_id).await?;
    render_analysis(&analysis);
    Ok(())
}

pub async fn run_results(context: &AppContext, interview_id: Uuid) -> Result<(), ClientError> {
    let details = interview::load(&context.api, interview_id).await?;
    ui::banner(
        &format!(
            "Results — {} ({})",
            details.interview.candidate_name, details.interview.position
        ),
        "",
    );
    match details.analysis {
        Some(analysis) => render_analysis(&analysis),
        None => println!("Analysis not found — the interview may not be analyzed yet."),
    }
    Ok(())
}

pub async fn run_list(context: &AppContext) -> Result<(), ClientError> {
    let interviews = interview::list(&context.api, context.organization_id).await?;
    let mut table = ui::table(&["Id", "Candidate", "Position", "Status"]);
    for row in &interviews {
        table.add_row(vec![
            row.id.to_string(),
            row.candidate_name.clone(),
            row.position.clone(),
            row.status.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn render_analysis(analysis: &Analysis) {
    ui::section("Scores");
    for (label, score) in [
        ("Overall", analysis.overall_score),
        ("Technical", analysis.technical_score),
        ("Communication", analysis.communication_score),
        ("Cultural fit", analysis.cultural_fit_score),
    ] {
        println!("  {label:<14} {}", colored_score(score));
    }

    println!(
        "\n  Recommendation: {}",
        analysis.recommendation.label().bold()
    );

    if !analysis.strengths.is_empty() {
        ui::section("Strengths");
        for item in &analysis.strengths {
            println!("  + {item}");
        }
    }
    if !analysis.weaknesses.is_empty() {
        ui::section("Weaknesses");
        for item in &analysis.weaknesses {
            println!("  - {item}");
        }
    }
    if let Some(insights) = &analysis.key_insights {
        ui::section("Key insights");
        println!("  {insights}");
    }
    if let Some(detail) = &analysis.detailed_analysis {
        ui::section("Detailed analysis");
        println!("  {detail}");
    }
}

fn colored_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.0}/100");
    match score_band(score) {
        ScoreBand::Strong => text.green(),
        ScoreBand::Good => text.bright_green(),
        ScoreBand::Mixed => text.yellow(),
        ScoreBand::Weak => text.red(),
    }
}

/// Picks up the progress counter from an existing transcript: one question
/// per remote turn, starting at 1.
fn question_number_from(turns: &[crate::protocol::Turn]) -> u32 {
    let asked = turns
        .iter()
        .filter(|turn| turn.author == Author::Remote)
        .count() as u32;
    asked.max(1)
}
