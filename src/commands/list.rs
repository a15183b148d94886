use serde::Serialize;
use todoboard::Result;
use todoboard::api::ApiConfig;
use todoboard::board::{Board, PageWindow, Pagination};
use todoboard::models::Section;
use todoboard::notify::StderrNotifier;

use super::{print_json, print_window, service};

/// Which page(s) to show.
pub enum Pages {
    PerSection { todo: usize, done: usize },
    Unified(usize),
}

#[derive(Serialize)]
struct Sections<'a> {
    todo: PageWindow<'a>,
    done: PageWindow<'a>,
}

pub async fn run(config: &ApiConfig, pages: Pages, page_size: usize, json: bool) -> Result<()> {
    let pagination = match pages {
        Pages::PerSection { .. } => Pagination::PerSection,
        Pages::Unified(_) => Pagination::Unified,
    };
    let mut board = Board::new(service(config), StderrNotifier)
        .with_pagination(pagination)
        .with_page_size(page_size);
    board.load().await?;

    match pages {
        Pages::PerSection { todo, done } => {
            board.go_to_page(Section::Todo, todo);
            board.go_to_page(Section::Done, done);
        }
        Pages::Unified(page) => {
            board.go_to_page(Section::Todo, page);
        }
    }

    let sections = Sections {
        todo: board.window(Section::Todo),
        done: board.window(Section::Done),
    };

    if json {
        return print_json(&sections);
    }

    print_window(&sections.todo);
    println!();
    print_window(&sections.done);
    Ok(())
}
