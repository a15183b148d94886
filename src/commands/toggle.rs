use todoboard::Result;
use todoboard::api::ApiConfig;
use todoboard::detail::ItemDetail;
use todoboard::notify::StderrNotifier;

use super::{format_section, print_json, service};

pub async fn run(config: &ApiConfig, id: u64, json: bool) -> Result<()> {
    let mut detail = ItemDetail::open(service(config), StderrNotifier, id).await?;
    let task = detail.toggle().await?;

    if json {
        print_json(task)
    } else {
        println!("Task {} is now {}", task.id, format_section(task.section()));
        Ok(())
    }
}
