use crate::context::CliContext;
use crate::output;
use std::path::PathBuf;
use taskdeck_cards::{CardView, HtmlFileSurface};

pub fn handle(ctx: &CliContext, out: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(path) = out.or_else(|| ctx.config.card_html.clone()) else {
        output::output_error("No output path: pass --out or set card_html in the config");
    };

    let doc = ctx.store.document();
    let groups = doc.len();
    let mut view = CardView::new(HtmlFileSurface::new(&path));
    view.refresh(doc)?;

    output::output_success(serde_json::json!({
        "path": path.display().to_string(),
        "groups": groups,
    }));
    Ok(())
}
