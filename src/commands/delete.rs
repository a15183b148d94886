use serde_json::json;
use todoboard::Result;
use todoboard::api::ApiConfig;
use todoboard::detail::ItemDetail;
use todoboard::notify::StderrNotifier;

use super::{print_json, service};

pub async fn run(config: &ApiConfig, id: u64, json: bool) -> Result<()> {
    let mut detail = ItemDetail::open(service(config), StderrNotifier, id).await?;
    detail.delete().await?;

    if json {
        print_json(&json!({ "deleted": id }))
    } else {
        println!("Deleted task {id}");
        Ok(())
    }
}
