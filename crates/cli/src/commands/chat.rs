//! `hygienebot chat`: Interactive or single-message chat in the terminal.

use std::io::Write;
use std::sync::Arc;

use hygienebot_config::AppConfig;
use hygienebot_core::{ConversationStore, InMemoryConversationStore, PatternTable, Responder};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let responder = Responder::new(Arc::new(PatternTable::builtin()?));

    if let Some(msg) = message {
        // Single message mode
        println!("{}", responder.generate_reply(&msg));
        return Ok(());
    }

    // Interactive mode
    let store = InMemoryConversationStore::new();
    let user_id = config.bot.default_user_id.clone();

    println!();
    println!("  {}: Interactive Mode", config.bot.name);
    println!();
    println!("  Ask about handwashing, diet, sleep, stress and more.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if is_exit(input) {
            break;
        }
        if !input.is_empty() {
            let reply = take_turn(&responder, &store, &user_id, input).await;
            println!("  Bot > {reply}");
            println!();
        }
        prompt()?;
    }

    let turns = store
        .get_transcript(&user_id)
        .await
        .map(|t| t.len() / 2)
        .unwrap_or(0);
    println!();
    println!("  Goodbye! ({turns} questions answered)");
    println!();

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Answer one line and record it in the local transcript.
async fn take_turn(
    responder: &Responder,
    store: &dyn ConversationStore,
    user_id: &str,
    input: &str,
) -> String {
    let reply = responder.generate_reply(input);
    let transcript = store.append_turn(user_id, input, &reply).await;
    debug!(messages = transcript.len(), "Local turn recorded");
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use hygienebot_core::Role;

    #[test]
    fn exit_words_are_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("QUIT"));
        // "bye" is a topic, not a command
        assert!(!is_exit("bye"));
    }

    #[tokio::test]
    async fn turns_accumulate_in_local_store() {
        let responder = Responder::new(Arc::new(PatternTable::builtin().unwrap()));
        let store = InMemoryConversationStore::new();

        let first = take_turn(&responder, &store, "me", "how do I brush?").await;
        take_turn(&responder, &store, "me", "goodbye").await;

        let transcript = store.get_transcript("me").await.unwrap();
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[0].content, "how do I brush?");
        assert_eq!(transcript[1].role, Role::Bot);
        assert_eq!(transcript[1].content, first);
        assert!(
            responder
                .table()
                .topic("oral")
                .unwrap()
                .candidates()
                .contains(&first)
        );
    }
}
