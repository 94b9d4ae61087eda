//! Keyword brain implementation - rule-based extraction without a model.
//!
//! Used when no API key is configured. It splits a brain dump on line breaks,
//! commas, semicolons and the connectives "and"/"e", then guesses category,
//! priority and recurrence from keywords. It never proposes a due date.

use brain_core::{async_trait, Brain, BrainError, BrainRequest, BrainResponse, RequestKind};
use serde_json::{json, Value};

const WORK_WORDS: &[&str] = &[
    "client", "meeting", "supplier", "office", "report", "email", "invoice", "boss",
    "cliente", "reuniao", "reunião", "fornecedor", "escritorio", "escritório", "relatorio",
];
const HEALTH_WORDS: &[&str] = &[
    "gym", "doctor", "dentist", "medicine", "therapy", "run", "workout",
    "academia", "medico", "médico", "remedio", "remédio", "terapia",
];
const STUDY_WORDS: &[&str] = &[
    "study", "college", "course", "class", "read", "book", "learn", "exam",
    "estudar", "faculdade", "curso", "aula", "ler", "livro", "prova",
];
const HOME_WORDS: &[&str] = &[
    "groceries", "clean", "wash", "laundry", "rent", "fix", "dishes", "buy",
    "mercado", "limpar", "lavar", "aluguel", "consertar", "comprar",
];
const URGENT_WORDS: &[&str] = &[
    "pay", "deliver", "urgent", "asap", "deadline", "pagar", "entregar", "urgente",
];
const LOW_WORDS: &[&str] = &["maybe", "someday", "think about", "talvez", "pensar"];

/// Rule-based extraction brain.
#[derive(Debug, Clone, Default)]
pub struct KeywordBrain;

impl KeywordBrain {
    pub fn new() -> Self {
        Self
    }

    fn extract(&self, dump: &str) -> Value {
        let tasks: Vec<Value> = split_dump(dump)
            .into_iter()
            .map(|fragment| {
                let lower = fragment.to_lowercase();
                json!({
                    "title": capitalize(&fragment),
                    "category": category_for(&lower),
                    "estimated_time": 15,
                    "priority": priority_for(&lower),
                    "due_date": Value::Null,
                    "recurrence_type": recurrence_for(&lower),
                    "recurrence_interval": recurrence_for(&lower).map(|_| 1),
                })
            })
            .collect();
        json!({ "tasks": tasks })
    }

    fn suggest(&self, title: &str) -> Value {
        let title = title.trim();
        let lower = title.to_lowercase();
        let category = category_for(&lower);
        let steps = [
            (format!("List what you need for {}", title), 5, "medium"),
            (format!("Do the first 15 minutes of {}", title), 15, "high"),
            (format!("Review and wrap up {}", title), 10, "low"),
        ];
        let suggestions: Vec<Value> = steps
            .into_iter()
            .map(|(step, minutes, priority)| {
                json!({
                    "title": step,
                    "category": category,
                    "estimated_time": minutes,
                    "priority": priority,
                })
            })
            .collect();
        json!({ "suggestions": suggestions })
    }
}

#[async_trait]
impl Brain for KeywordBrain {
    async fn process(&self, request: BrainRequest) -> Result<BrainResponse, BrainError> {
        let body = match request.kind {
            RequestKind::ExtractTasks => self.extract(&request.text),
            RequestKind::SuggestSubtasks => self.suggest(&request.text),
        };
        Ok(BrainResponse {
            text: body.to_string(),
            model: Some("keyword".to_string()),
        })
    }

    fn name(&self) -> &str {
        "KeywordBrain"
    }
}

/// Split a brain dump into trimmed, non-empty fragments.
fn split_dump(dump: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    for part in dump.split(['\n', ',', ';']) {
        let mut current: Vec<&str> = Vec::new();
        for word in part.split_whitespace() {
            let lower = word.to_lowercase();
            if lower == "and" || lower == "e" {
                if !current.is_empty() {
                    fragments.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            fragments.push(current.join(" "));
        }
    }
    fragments
        .into_iter()
        .map(|f| f.trim_end_matches('.').trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

fn has_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| {
        if word.contains(' ') {
            text.contains(word)
        } else {
            text.split(|c: char| !c.is_alphanumeric())
                .any(|token| token == *word)
        }
    })
}

fn category_for(lower: &str) -> &'static str {
    if has_any(lower, WORK_WORDS) {
        "Work"
    } else if has_any(lower, HEALTH_WORDS) {
        "Health"
    } else if has_any(lower, STUDY_WORDS) {
        "Study"
    } else if has_any(lower, HOME_WORDS) {
        "Home"
    } else {
        "Personal"
    }
}

fn priority_for(lower: &str) -> &'static str {
    if has_any(lower, URGENT_WORDS) {
        "high"
    } else if has_any(lower, LOW_WORDS) {
        "low"
    } else {
        "medium"
    }
}

fn recurrence_for(lower: &str) -> Option<&'static str> {
    if lower.contains("every day") || lower.contains("daily") || lower.contains("todo dia") {
        Some("daily")
    } else if lower.contains("every week") || lower.contains("weekly") || lower.contains("toda semana") {
        Some("weekly")
    } else if lower.contains("every month") || lower.contains("monthly") || lower.contains("todo mes") {
        Some("monthly")
    } else if lower.contains("every year") || lower.contains("yearly") || lower.contains("todo ano") {
        Some("yearly")
    } else {
        None
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
