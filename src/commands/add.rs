use todoboard::Result;
use todoboard::api::ApiConfig;
use todoboard::board::Board;
use todoboard::notify::StderrNotifier;

use super::{print_json, service};

pub async fn run(config: &ApiConfig, name: &str, json: bool) -> Result<()> {
    let mut board = Board::new(service(config), StderrNotifier);
    let task = board.add(name).await?;

    if json {
        print_json(&task)
    } else {
        println!("Added task {}: {}", task.id, task.name);
        Ok(())
    }
}
