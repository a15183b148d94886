pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod toggle;

use colored::Colorize;
use serde::Serialize;
use todoboard::api::{ApiConfig, HttpTaskService};
use todoboard::board::PageWindow;
use todoboard::models::{Section, Task};
use todoboard::{Error, Result};

/// The HTTP service every command talks to.
pub fn service(config: &ApiConfig) -> HttpTaskService {
    HttpTaskService::new(config.clone())
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let j = serde_json::to_string_pretty(value).map_err(Error::Json)?;
    println!("{j}");
    Ok(())
}

/// Format a section as a colored label.
pub fn format_section(section: Section) -> String {
    match section {
        Section::Todo => "todo".green().to_string(),
        Section::Done => "done".bright_black().to_string(),
    }
}

fn checkbox(task: &Task) -> String {
    if task.is_completed {
        "[x]".bright_black().to_string()
    } else {
        "[ ]".to_string()
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let cut: String = name.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        name.to_string()
    }
}

/// One line per task: checkbox, id, name.
pub fn print_task_line(task: &Task) {
    let name = truncate(&task.name, 60);
    let name = if task.is_completed {
        name.strikethrough().bright_black().to_string()
    } else {
        name
    };
    println!("  {} {:>6}  {}", checkbox(task), task.id, name);
}

/// Print one section page with a heading and a pager footer.
pub fn print_window(window: &PageWindow<'_>) {
    let heading = match window.section {
        Section::Todo => "TO DO".green().bold(),
        Section::Done => "DONE".bright_black().bold(),
    };
    println!("{heading} ({})", window.total_items);

    if window.is_empty() {
        let hint = match window.section {
            Section::Todo if window.total_items == 0 => "Nothing to do. Add a new task!",
            Section::Done if window.total_items == 0 => {
                "Nothing done yet. Check off a task to see it here."
            }
            _ => "No items on this page.",
        };
        println!("  {}", hint.bright_black());
    } else {
        for task in &window.tasks {
            print_task_line(task);
        }
    }

    if window.total_pages > 1 {
        let prev = if window.can_prev { "<" } else { " " };
        let next = if window.can_next { ">" } else { " " };
        println!(
            "  {prev} page {} / {} {next}",
            window.page, window.total_pages
        );
    }
}

/// Full detail block for one task.
pub fn print_task_detail(task: &Task) {
    println!("ID:       {}", task.id);
    println!("Name:     {}", task.name);
    println!("Status:   {}", format_section(task.section()));
    println!("Memo:     {}", task.memo_text());
    if let Some(ref url) = task.image_url {
        println!("Image:    {url}");
    }
}
