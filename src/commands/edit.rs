use std::path::Path;

use todoboard::api::ApiConfig;
use todoboard::detail::ItemDetail;
use todoboard::notify::StderrNotifier;
use todoboard::{Error, Result};

use super::{print_json, service};

pub async fn run(
    config: &ApiConfig,
    id: u64,
    name: Option<&str>,
    memo: Option<&str>,
    image: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut detail = ItemDetail::open(service(config), StderrNotifier, id).await?;

    if let Some(name) = name {
        detail.set_name(name);
    }
    if let Some(memo) = memo {
        detail.set_memo(memo);
    }
    if let Some(path) = image {
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            context: format!("failed to read {}", path.display()),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        detail.attach_image(&file_name, bytes).await?;
    }

    if !detail.is_dirty() {
        if json {
            return print_json(detail.task());
        }
        println!("Nothing to update for task {id}");
        return Ok(());
    }

    detail.save().await?;

    if json {
        print_json(detail.task())
    } else {
        println!("Updated task {id}");
        Ok(())
    }
}
