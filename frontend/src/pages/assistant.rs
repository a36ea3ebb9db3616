use chrono::Utc;
use leptos::*;
use shared::{CreateTaskRequest, EventPriority, EventStatus, TaskStats};

use crate::api::{ApiClient, EventStore};
use crate::utils::format_relative_date;
use crate::utils::speech;

/// Commands the assistant understands. Everything else gets a shrug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantCommand {
    AddTask(String),
    Search(String),
    Stats,
    Help,
    Unknown,
}

/// Maps free-form input onto a command. Matching is case-insensitive and
/// keyed on leading verbs, so "Add task buy milk" and "find report" both
/// work without any structure.
pub fn interpret(input: &str) -> AssistantCommand {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    for prefix in ["add task", "create task", "new task", "add a task", "remind me to"] {
        if let Some(name) = payload_after(trimmed, &lower, prefix) {
            return AssistantCommand::AddTask(name.to_string());
        }
    }

    for prefix in ["search for", "search", "find", "look for"] {
        if let Some(query) = payload_after(trimmed, &lower, prefix) {
            return AssistantCommand::Search(query.to_string());
        }
    }

    if lower.contains("stats") || lower.contains("progress") || lower.contains("how am i doing") {
        return AssistantCommand::Stats;
    }

    if lower == "help" || lower.contains("what can you do") {
        return AssistantCommand::Help;
    }

    AssistantCommand::Unknown
}

/// The text following a leading verb, in its original casing. Returns None
/// when the verb does not lead the input, nothing follows it, or lowering
/// shifted byte offsets (non-ASCII input ahead of the verb).
fn payload_after<'a>(original: &'a str, lower: &str, prefix: &str) -> Option<&'a str> {
    let rest = lower.strip_prefix(prefix)?;
    let idx = original.len().checked_sub(rest.len())?;
    if !original.is_char_boundary(idx) {
        return None;
    }
    let payload = original[idx..].trim();
    (!payload.is_empty()).then_some(payload)
}

fn stats_reply(stats: &TaskStats) -> String {
    format!(
        "You have {} tasks: {} in progress and {} completed. That's a completion rate of {:.0}%.",
        stats.total_tasks,
        stats.in_progress_tasks,
        stats.completed_tasks,
        stats.completion_rate * 100.0
    )
}

const HELP_REPLY: &str = "I can add tasks (\"add task buy milk\"), search them \
(\"find report\"), or summarize your progress (\"show my stats\").";

const UNKNOWN_REPLY: &str = "Sorry, I didn't catch that. Say \"help\" to see what I understand.";

#[derive(Clone)]
struct ChatMessage {
    from_user: bool,
    text: String,
    time: String,
}

impl ChatMessage {
    fn now(from_user: bool, text: String) -> Self {
        Self {
            from_user,
            text,
            time: Utc::now().format("%H:%M").to_string(),
        }
    }
}

#[component]
pub fn AssistantPage() -> impl IntoView {
    let store = expect_context::<EventStore>();

    let messages = create_rw_signal(vec![ChatMessage::now(
        false,
        "Hello! I'm JARVIS. Say \"help\" to see what I can do.".to_string(),
    )]);
    let input = create_rw_signal(String::new());
    let busy = create_rw_signal(false);
    let voice_enabled = create_rw_signal(true);

    let push_reply = move |text: String| {
        if voice_enabled.get_untracked() {
            speech::speak(&text);
        }
        messages.update(|m| m.push(ChatMessage::now(false, text)));
    };

    let submit_store = store.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let text = input.get().trim().to_string();
        if text.is_empty() || busy.get() {
            return;
        }
        input.set(String::new());
        messages.update(|m| m.push(ChatMessage::now(true, text.clone())));

        let store = submit_store.clone();
        busy.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match interpret(&text) {
                AssistantCommand::AddTask(name) => {
                    let priority = EventPriority::default().to_backend();
                    let request = CreateTaskRequest {
                        name: name.clone(),
                        description: None,
                        category: None,
                        tags: Vec::new(),
                        deadline: None,
                        scheduled_time: None,
                        estimated_duration: None,
                        priority,
                        urgency: priority,
                        status: EventStatus::default().to_backend(),
                        completion_percentage: 0,
                        location: None,
                    };
                    match store.create(request).await {
                        Ok(event) => push_reply(format!(
                            "Added \"{}\" for {}.",
                            event.title,
                            format_relative_date(event.date)
                        )),
                        Err(failure) => push_reply(format!("I couldn't add that: {}", failure)),
                    }
                }
                AssistantCommand::Search(query) => match ApiClient::search_tasks(&query).await {
                    Ok(tasks) if tasks.is_empty() => {
                        push_reply(format!("No tasks matching \"{}\".", query));
                    }
                    Ok(tasks) => {
                        let names: Vec<String> =
                            tasks.iter().take(3).map(|t| t.name.clone()).collect();
                        push_reply(format!(
                            "Found {} matching task(s): {}.",
                            tasks.len(),
                            names.join(", ")
                        ));
                    }
                    Err(failure) => push_reply(format!("Search failed: {}", failure)),
                },
                AssistantCommand::Stats => match store.stats().await {
                    Ok(stats) => push_reply(stats_reply(&stats)),
                    Err(failure) => push_reply(format!("I couldn't get your stats: {}", failure)),
                },
                AssistantCommand::Help => push_reply(HELP_REPLY.to_string()),
                AssistantCommand::Unknown => push_reply(UNKNOWN_REPLY.to_string()),
            }
            busy.set(false);
        });
    };

    let on_toggle_voice = move |_| {
        let enabled = !voice_enabled.get();
        voice_enabled.set(enabled);
        if !enabled {
            speech::stop();
        }
    };

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Assistant"</h1>
            <button class="btn btn-outline" on:click=on_toggle_voice>
                {move || if voice_enabled.get() { "Voice: on" } else { "Voice: off" }}
            </button>
        </div>

        <div class="card chat-panel">
            <div class="chat-messages">
                {move || messages.get().into_iter().map(|message| {
                    let class = if message.from_user {
                        "chat-message chat-user"
                    } else {
                        "chat-message chat-assistant"
                    };
                    view! {
                        <div class=class>
                            <span class="chat-text">{message.text}</span>
                            <span class="chat-time">{message.time}</span>
                        </div>
                    }
                }).collect_view()}
            </div>

            <form class="chat-input-row" on:submit=on_submit>
                <input
                    type="text"
                    class="form-input"
                    placeholder="Ask me to add or find tasks..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    "Send"
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_add_task_variants() {
        assert_eq!(
            interpret("add task Buy milk"),
            AssistantCommand::AddTask("Buy milk".to_string())
        );
        assert_eq!(
            interpret("Create task water the plants"),
            AssistantCommand::AddTask("water the plants".to_string())
        );
        assert_eq!(
            interpret("remind me to call mom"),
            AssistantCommand::AddTask("call mom".to_string())
        );
    }

    #[test]
    fn test_interpret_preserves_original_casing() {
        assert_eq!(
            interpret("ADD TASK Write Report"),
            AssistantCommand::AddTask("Write Report".to_string())
        );
    }

    #[test]
    fn test_interpret_search() {
        assert_eq!(
            interpret("find report"),
            AssistantCommand::Search("report".to_string())
        );
        assert_eq!(
            interpret("search for groceries"),
            AssistantCommand::Search("groceries".to_string())
        );
    }

    #[test]
    fn test_interpret_stats_and_help() {
        assert_eq!(interpret("show my stats"), AssistantCommand::Stats);
        assert_eq!(interpret("how am I doing?"), AssistantCommand::Stats);
        assert_eq!(interpret("help"), AssistantCommand::Help);
        assert_eq!(interpret("What can you do?"), AssistantCommand::Help);
    }

    #[test]
    fn test_interpret_unknown_and_empty_payloads() {
        assert_eq!(interpret("sing me a song"), AssistantCommand::Unknown);
        assert_eq!(interpret("add task"), AssistantCommand::Unknown);
        assert_eq!(interpret("find "), AssistantCommand::Unknown);
        assert_eq!(interpret(""), AssistantCommand::Unknown);
    }

    #[test]
    fn test_stats_reply_wording() {
        let stats = TaskStats {
            total_tasks: 4,
            in_progress_tasks: 1,
            completed_tasks: 2,
            completion_rate: 0.5,
            ..Default::default()
        };
        let reply = stats_reply(&stats);
        assert!(reply.contains("4 tasks"));
        assert!(reply.contains("50%"));
    }
}
