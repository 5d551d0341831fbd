//! Interactive assistant page.

use crate::chat::{self, ChatExchange, FALLBACK, GREETING};
use crate::errors::ClientError;
use crate::protocol::{Conversation, Outcome, Refusal};
use crate::state::AppContext;
use crate::ui;

pub async fn run(context: &AppContext) -> Result<(), ClientError> {
    let exchange = ChatExchange::new(context.api.clone(), context.organization_id);
    let mut conversation = Conversation::seeded(exchange, FALLBACK, GREETING);
    let mut editor = ui::editor()?;

    ui::banner(
        "Lightning Assistant",
        "type a message; /quit leaves the conversation",
    );
    ui::remote_line("assistant", GREETING);

    loop {
        let Some(line) = ui::read_line(&mut editor, "you> ") else {
            break;
        };
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        match conversation.submit(&line).await {
            Err(Refusal::EmptyInput) => continue,
            // The REPL is sequential, so the other refusals cannot trigger.
            Err(_) => continue,
            Ok(outcome) => {
                if let Some(turn) = conversation.last_remote() {
                    ui::remote_line("assistant", &turn.text);
                }
                if outcome == Outcome::Replied {
                    let exchange = conversation.exchange();
                    if let Some(intent) = &exchange.last_intent {
                        let confidence = intent
                            .confidence
                            .map(|c| format!(" · {}", ui::percent(c)))
                            .unwrap_or_default();
                        ui::meta_line(&format!(
                            "[{} · {}{}]",
                            intent.module, intent.action, confidence
                        ));
                    }
                    if let Some(action) = &exchange.last_action {
                        ui::meta_line(&format!("action taken: {action}"));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Renders `GET /api/ai/capabilities`.
pub async fn show_capabilities(context: &AppContext) -> Result<(), ClientError> {
    let capabilities = chat::capabilities(&context.api).await?;

    ui::banner("Assistant capabilities", "");
    let mut table = ui::table(&["Module", "Capabilities"]);
    for (module, items) in &capabilities.capabilities {
        table.add_row(vec![module.clone(), items.join("\n")]);
    }
    println!("{table}");

    if !capabilities.examples.is_empty() {
        ui::section("Try");
        for example in &capabilities.examples {
            println!("  · {example}");
        }
    }
    Ok(())
}

/// One-shot ask without entering the REPL.
pub async fn run_oneshot(context: &AppContext, message: &str) -> Result<(), ClientError> {
    let reply = chat::ask(&context.api, message).await?;
    ui::remote_line("assistant", &reply);
    Ok(())
}
