use crate::bridge::OutboundCall;
use crate::diff::{plan_update, UpdatePlan};
use crate::render::{render_content, render_document, render_group};
use crate::surface::RenderSurface;
use taskdeck_core::TaskdeckResult;
use taskdeck_domain::DisplayDocument;

/// Keeps a rendering surface in step with the display document.
///
/// The first render writes a full page. Later updates patch only the cards
/// that changed so the page keeps its expand state and scroll position.
pub struct CardView<S: RenderSurface> {
    surface: S,
    shown: Option<DisplayDocument>,
}

impl<S: RenderSurface> CardView<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            shown: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The document the surface currently shows.
    pub fn shown(&self) -> Option<&DisplayDocument> {
        self.shown.as_ref()
    }

    /// Rewrite the whole page.
    pub fn refresh(&mut self, doc: DisplayDocument) -> TaskdeckResult<()> {
        self.surface.set_html(&render_document(&doc))?;
        tracing::debug!("Card view rendered {} group(s)", doc.len());
        self.shown = Some(doc);
        Ok(())
    }

    /// Bring the page up to `doc`, patching where the surface allows it.
    pub fn sync(&mut self, doc: DisplayDocument) -> TaskdeckResult<UpdatePlan> {
        let plan = match &self.shown {
            Some(old) => plan_update(old, &doc),
            None => UpdatePlan::ReplaceContent,
        };

        if self.shown.is_none() || !self.surface.supports_scripts() {
            if plan != UpdatePlan::Unchanged {
                self.refresh(doc)?;
            }
            return Ok(plan);
        }

        match &plan {
            UpdatePlan::Unchanged => {}
            UpdatePlan::PatchGroups(names) => {
                for name in names {
                    if let Some(group) = doc.group(name) {
                        self.call(OutboundCall::PatchGroup {
                            subject: name.clone(),
                            html: render_group(name, group),
                        })?;
                    }
                }
            }
            UpdatePlan::ReplaceContent => {
                self.call(OutboundCall::ReplaceContent {
                    html: render_content(&doc),
                })?;
            }
        }
        self.shown = Some(doc);
        Ok(plan)
    }

    pub fn expand_all(&mut self) -> TaskdeckResult<()> {
        self.call(OutboundCall::ExpandAllTasks)
    }

    pub fn collapse_all(&mut self) -> TaskdeckResult<()> {
        self.call(OutboundCall::CollapseAllTasks)
    }

    fn call(&mut self, call: OutboundCall) -> TaskdeckResult<()> {
        if !self.surface.supports_scripts() {
            tracing::debug!("Surface cannot run scripts, skipping {:?}", call);
            return Ok(());
        }
        self.surface.run_script(&call.to_script())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MockRenderSurface;
    use mockall::Sequence;
    use taskdeck_domain::{group, Task};

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("English", "Study", "Vocabulary", 1),
            Task::new("Gym", "Life", "Legs", 1),
        ]
    }

    fn scripting_surface() -> MockRenderSurface {
        let mut surface = MockRenderSurface::new();
        surface.expect_supports_scripts().return_const(true);
        surface
    }

    #[test]
    fn test_first_sync_renders_full_page() {
        let mut surface = scripting_surface();
        surface
            .expect_set_html()
            .withf(|html| html.contains("<!DOCTYPE html>") && html.contains("Vocabulary"))
            .times(1)
            .returning(|_| Ok(()));
        surface.expect_run_script().never();

        let mut view = CardView::new(surface);
        let plan = view.sync(group(&tasks())).unwrap();
        assert_eq!(plan, UpdatePlan::ReplaceContent);
        assert!(view.shown().is_some());
    }

    #[test]
    fn test_later_changes_patch_one_card() {
        let mut surface = scripting_surface();
        let mut seq = Sequence::new();
        surface
            .expect_set_html()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        surface
            .expect_run_script()
            .withf(|script| script.starts_with(r#"patchGroup("Gym", "#) && script.contains("completed"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut view = CardView::new(surface);
        view.sync(group(&tasks())).unwrap();

        let mut changed = tasks();
        changed[1].completed = true;
        let plan = view.sync(group(&changed)).unwrap();
        assert_eq!(plan, UpdatePlan::PatchGroups(vec!["Gym".to_string()]));

        assert_eq!(view.sync(group(&changed)).unwrap(), UpdatePlan::Unchanged);
    }

    #[test]
    fn test_removed_group_replaces_content() {
        let mut surface = scripting_surface();
        surface.expect_set_html().times(1).returning(|_| Ok(()));
        surface
            .expect_run_script()
            .withf(|script| script.starts_with("replaceContent(") && !script.contains("Vocabulary"))
            .times(1)
            .returning(|_| Ok(()));

        let mut view = CardView::new(surface);
        view.sync(group(&tasks())).unwrap();
        let mut fewer = tasks();
        fewer.remove(0);
        view.sync(group(&fewer)).unwrap();
    }

    #[test]
    fn test_expand_and_collapse_calls() {
        let mut surface = scripting_surface();
        let mut seq = Sequence::new();
        surface
            .expect_run_script()
            .withf(|script| script == "expandAllTasks();")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        surface
            .expect_run_script()
            .withf(|script| script == "collapseAllTasks();")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut view = CardView::new(surface);
        view.expand_all().unwrap();
        view.collapse_all().unwrap();
    }

    #[test]
    fn test_scriptless_surface_gets_full_pages() {
        let mut surface = MockRenderSurface::new();
        surface.expect_supports_scripts().return_const(false);
        surface.expect_set_html().times(2).returning(|_| Ok(()));
        surface.expect_run_script().never();

        let mut view = CardView::new(surface);
        view.sync(group(&tasks())).unwrap();
        view.sync(group(&tasks())).unwrap();
        let mut changed = tasks();
        changed[0].completed = true;
        view.sync(group(&changed)).unwrap();
        view.expand_all().unwrap();
    }
}
