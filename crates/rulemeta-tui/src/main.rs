use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use rulemeta_core::api::{HttpRulesClient, RulesApi};
use rulemeta_core::models::RuleModel;
use rulemeta_core::tracing_setup::init_tracing;
use rulemeta_tui::cli::Args;
use rulemeta_tui::meta::{AppContext, RuleMetaView};
use rulemeta_tui::runtime::run_app;
use rulemeta_tui::ui::{self, App, TagPickerWidget};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    let args = Args::parse();
    let config = args.resolve_config()?;

    let client = HttpRulesClient::new(&config).context("Failed to build HTTP client")?;
    let rule = client
        .show_rule(&args.rule_key)
        .await
        .with_context(|| format!("Failed to load rule {}", args.rule_key))?;
    tracing::info!(rule_key = %rule.key, base_url = client.base_url(), "Loaded rule");

    let context = AppContext::new(config.normalized_base_url(), config.can_write);
    let mut view = RuleMetaView::new(RuleModel::new(rule), context, TagPickerWidget::new());
    view.on_render();
    let mut app = App::new(view);

    ui::terminal::install_panic_hook();
    let mut terminal = ui::init_terminal()?;
    let api: Arc<dyn RulesApi> = Arc::new(client);
    let result = run_app(&mut terminal, &mut app, api).await;

    app.meta.on_destroy();
    ui::restore_terminal()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Exited with error");
    }
    result
}
