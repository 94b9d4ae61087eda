//! Predefined task bundles ("stacks") a user can apply in one action.

use scheduler::{Category, DraftTask, Priority};
use serde::Serialize;

/// One canned task inside a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackTask {
    pub title: &'static str,
    pub category: Category,
    pub estimated_time: u32,
    pub priority: Priority,
}

/// A named bundle of canned tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stack {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tasks: &'static [StackTask],
}

impl Stack {
    /// The stack's tasks as undated drafts.
    pub fn drafts(&self) -> Vec<DraftTask> {
        self.tasks
            .iter()
            .map(|task| DraftTask {
                title: task.title.to_string(),
                category: task.category,
                estimated_time: task.estimated_time,
                priority: task.priority,
                inferred_due_date: None,
                inferred_recurrence: None,
            })
            .collect()
    }
}

const fn task(
    title: &'static str,
    category: Category,
    estimated_time: u32,
    priority: Priority,
) -> StackTask {
    StackTask {
        title,
        category,
        estimated_time,
        priority,
    }
}

/// Every predefined stack.
pub const STACKS: &[Stack] = &[
    Stack {
        id: "morning-start",
        title: "Morning Start",
        description: "Wake your brain up and set the stage.",
        tasks: &[
            task("Drink 500ml of water", Category::Health, 2, Priority::High),
            task("Make the bed", Category::Home, 5, Priority::Medium),
            task("Plan the 3 wins of the day", Category::Personal, 5, Priority::High),
        ],
    },
    Stack {
        id: "focus-mode",
        title: "Focus Mode",
        description: "A block of intense deep work.",
        tasks: &[
            task("Put the phone in another room", Category::Work, 2, Priority::High),
            task("Pick the one priority task", Category::Work, 5, Priority::High),
            task("Run a 50-minute block", Category::Work, 50, Priority::High),
        ],
    },
    Stack {
        id: "wind-down",
        title: "Wind Down",
        description: "Switch the system off to sleep well.",
        tasks: &[
            task("Prepare tomorrow's clothes and bag", Category::Home, 10, Priority::Medium),
            task("Sleep hygiene (no screens)", Category::Health, 30, Priority::High),
        ],
    },
];

/// Look up a stack by id.
pub fn find_stack(id: &str) -> Option<&'static Stack> {
    STACKS.iter().find(|stack| stack.id == id)
}
