use todoboard::Result;
use todoboard::api::ApiConfig;
use todoboard::detail::ItemDetail;
use todoboard::notify::StderrNotifier;

use super::{print_json, print_task_detail, service};

pub async fn run(config: &ApiConfig, id: u64, json: bool) -> Result<()> {
    let detail = ItemDetail::open(service(config), StderrNotifier, id).await?;
    if json {
        return print_json(detail.task());
    }
    print_task_detail(detail.task());
    Ok(())
}
