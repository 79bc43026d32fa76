use carelead_contact::{ContactStore, FileStore, ListQuery};

/// Print one page of the local contact store as JSON
pub async fn list(
    config: carelead::Config,
    page: usize,
    page_size: usize,
    status: Option<String>,
) -> anyhow::Result<()> {
    let store = FileStore::new(&config.storage.data_dir);
    let query = ListQuery::new(page, page_size, status);

    let page = carelead_contact::list(&store, &query).await?;

    if store.is_degraded() {
        tracing::warn!(
            path = %store.path().display(),
            "contact store file could not be read"
        );
    }

    tracing::info!(
        total = page.total,
        page = page.page,
        page_size = page.page_size,
        storage = store.mode(),
        "listing contact submissions"
    );

    println!("{}", serde_json::to_string_pretty(&page)?);

    Ok(())
}
