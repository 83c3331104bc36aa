use tabled::Table;

use crate::{history::ContextKind, info, management::HistoryManager, utils, warning};

pub async fn history(kind: Option<ContextKind>, search: Option<String>, limit: Option<usize>) {
    let history_mgr = match HistoryManager::load().await {
        Ok(mgr) => mgr,
        Err(e) => {
            warning!("Failed to load context history. Err: {}", e);
            return;
        }
    };

    if history_mgr.history().is_empty() {
        info!("No context history yet. Run sporlctx update.");
        return;
    }

    let rows = utils::history_table_rows(history_mgr.history(), kind, search.as_deref(), limit);
    if rows.is_empty() {
        info!("No context matches.");
        return;
    }

    println!("{}", Table::new(rows));
}
