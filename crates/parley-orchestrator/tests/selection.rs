//! End-to-end speaker selection against scripted completion clients.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_agent::{CompletionResponse, LlmMessage, MessageRole};
use parley_memory::{BufferedMemory, LocalMemory};
use parley_orchestrator::{
    compose_prompt, mentioned_agents, select_speaker, Agent, AgentMetadata, ChatCompletionClient,
    ChatMemory, ChatMessage, Roster, SelectionError, SpeakerSelector,
};

/// Replays queued answers in order and keeps every prompt it was sent.
struct ReplayClient {
    answers: Mutex<Vec<String>>,
    prompts: Mutex<Vec<Vec<LlmMessage>>>,
}

impl ReplayClient {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().rev().map(|a| a.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<Vec<LlmMessage>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletionClient for ReplayClient {
    async fn create(&self, messages: Vec<LlmMessage>) -> parley_agent::Result<CompletionResponse> {
        self.prompts.lock().unwrap().push(messages);
        let answer = self.answers.lock().unwrap().pop().ok_or_else(|| {
            parley_agent::AgentError::ModelInvocation("no scripted answer left".into())
        })?;
        Ok(CompletionResponse::text(answer))
    }
}

fn alice_and_bob() -> Roster {
    Roster::from_metadata([
        AgentMetadata::new("Alice", "Opens the discussion"),
        AgentMetadata::new("Bob", "Responds to Alice"),
    ])
    .unwrap()
}

#[tokio::test]
async fn test_round_trip_through_composer_and_selector() {
    let roster = alice_and_bob();
    let history = vec![ChatMessage::text("Alice", "Hello")];

    let prompt = compose_prompt(roster.agents(), &history).unwrap();
    assert!(prompt.contains("Alice: Hello"));
    assert!(prompt.contains("Alice"));
    assert!(prompt.contains("Bob"));

    let memory = BufferedMemory::from_messages(history);
    let client = ReplayClient::new(&["Bob"]);

    let speaker = select_speaker(&memory, &client, roster.agents()).await.unwrap();
    assert_eq!(speaker.name(), "Bob");

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].len(), 1);
    assert_eq!(prompts[0][0].role, MessageRole::System);
    assert_eq!(prompts[0][0].content, prompt);
}

#[tokio::test]
async fn test_ambiguous_selection_names_both_agents() {
    let roster = alice_and_bob();
    let memory = BufferedMemory::new();
    let client = ReplayClient::new(&["Alice and Bob should both continue"]);

    let err = select_speaker(&memory, &client, roster.agents())
        .await
        .err().unwrap();

    assert!(err.is_recoverable());
    let message = err.to_string();
    assert!(message.contains("Alice"), "{}", message);
    assert!(message.contains("Bob"), "{}", message);
}

#[tokio::test]
async fn test_multi_turn_conversation() {
    let memory: Arc<dyn ChatMemory> = Arc::new(BufferedMemory::new());
    let client = Arc::new(ReplayClient::new(&["Bob", "Alice, please.", "Bob"]));
    let selector = SpeakerSelector::new(Arc::clone(&memory), client.clone());
    let roster = alice_and_bob();

    selector
        .record(ChatMessage::text("Alice", "What's for lunch?"))
        .await
        .unwrap();

    let mut order = Vec::new();
    for turn in 0..3 {
        let speaker = selector.select_from(&roster).await.unwrap();
        order.push(speaker.name().to_string());
        selector
            .record(ChatMessage::text(speaker.name(), format!("turn {}", turn)))
            .await
            .unwrap();
    }

    assert_eq!(order, vec!["Bob", "Alice", "Bob"]);

    // Each prompt sees the history as it stood at that turn
    let prompts = client.prompts();
    assert!(prompts[0][0].content.contains("Alice: What's for lunch?"));
    assert!(!prompts[0][0].content.contains("Bob: turn 0"));
    assert!(prompts[2][0].content.contains("Alice: turn 1"));
}

#[tokio::test]
async fn test_selection_reads_persisted_history() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let memory = LocalMemory::new(temp_dir.path().to_path_buf()).await.unwrap();
    memory
        .add_message(ChatMessage::text("Alice", "Bob, your thoughts?"))
        .await
        .unwrap();

    let client = ReplayClient::new(&["Bob"]);
    let roster = alice_and_bob();

    let speaker = select_speaker(&memory, &client, roster.agents()).await.unwrap();
    assert_eq!(speaker.name(), "Bob");
    assert!(client.prompts()[0][0]
        .content
        .contains("Alice: Bob, your thoughts?"));
}

#[tokio::test]
async fn test_completion_failure_propagates() {
    let memory = BufferedMemory::new();
    let client = ReplayClient::new(&[]);
    let roster = alice_and_bob();

    let err = select_speaker(&memory, &client, roster.agents())
        .await
        .err().unwrap();
    assert!(matches!(err, SelectionError::Completion(_)));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_markdown_escaped_answer() {
    let roster = Roster::from_metadata([
        AgentMetadata::new("Story_writer", "Drafts the story"),
        AgentMetadata::new("Critic", "Reviews drafts"),
    ])
    .unwrap();
    let memory = BufferedMemory::new();
    let client = ReplayClient::new(&[r"**Story\_writer**"]);

    let speaker = select_speaker(&memory, &client, roster.agents()).await.unwrap();
    assert_eq!(speaker.name(), "Story_writer");
}

#[test]
fn test_exactly_one_mention_per_roster_member() {
    let roster = Roster::from_metadata([
        AgentMetadata::new("Planner", ""),
        AgentMetadata::new("Code_reviewer", ""),
        AgentMetadata::new("QA", ""),
    ])
    .unwrap();

    for agent in roster.agents() {
        for text in [
            agent.name().to_string(),
            agent.name().replace('_', " "),
            agent.name().replace('_', r"\_"),
        ] {
            let sentence = format!("Next up: {}!", text);
            let mentions = mentioned_agents(&sentence, roster.agents()).unwrap();
            assert_eq!(mentions.len(), 1, "{}", sentence);
            assert_eq!(mentions.get(agent.name()), Some(&1), "{}", sentence);
        }
    }
}
