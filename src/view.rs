//! Analysis view state.
//!
//! [`AnalysisView`] holds one loaded network together with the views derived
//! from it and decides which one is on screen. Loads are tracked by ticket so
//! that only the most recently started load can land.

use crate::graph::{
    component_of, components, filter_by_ion, filter_to_prototype_components, Component, Graph,
    IonFilter, LoadError,
};

/// Handle for an in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What the presentation layer should show
#[derive(Debug, Clone, Copy)]
pub enum DisplayState<'a> {
    /// No graph yet
    Pending,
    /// The last load failed
    Failed(&'a LoadError),
    /// A graph is loaded but the current view has no nodes
    Empty,
    /// Graph to render
    Ready(&'a Graph),
}

#[derive(Debug)]
struct Loaded {
    original: Graph,
    components: Vec<Component>,
    prototype_view: Graph,
    ion_view: Option<(IonFilter, Graph)>,
}

#[derive(Debug)]
enum LoadState {
    Pending,
    Failed(LoadError),
    Loaded(Loaded),
}

/// Loaded network plus its derived views
#[derive(Debug)]
pub struct AnalysisView {
    latest: u64,
    state: LoadState,
    hide_endogenous: bool,
}

impl Default for AnalysisView {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisView {
    /// Empty view; endogenous subgraphs are hidden by default
    pub fn new() -> Self {
        Self {
            latest: 0,
            state: LoadState::Pending,
            hide_endogenous: true,
        }
    }

    /// Start a load, superseding any load still in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest += 1;
        self.state = LoadState::Pending;
        LoadTicket(self.latest)
    }

    /// Deliver the result of a load.
    ///
    /// Returns `false` and discards the result when a newer load has been
    /// started since `ticket` was issued, or when `ticket` already landed.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Graph, LoadError>) -> bool {
        if ticket.0 != self.latest {
            log::debug!(
                "Discarding superseded load {} (latest is {})",
                ticket.0,
                self.latest
            );
            return false;
        }
        if !matches!(self.state, LoadState::Pending) {
            log::debug!("Discarding repeated result for load {}", ticket.0);
            return false;
        }

        self.state = match result {
            Ok(original) => {
                let components = components(&original);
                let prototype_view = filter_to_prototype_components(&original, &components);
                log::debug!(
                    "View ready: {} components, {} of {} nodes in prototype view",
                    components.len(),
                    prototype_view.node_count(),
                    original.node_count()
                );
                LoadState::Loaded(Loaded {
                    original,
                    components,
                    prototype_view,
                    ion_view: None,
                })
            }
            Err(e) => {
                log::warn!("Load failed: {}", e);
                LoadState::Failed(e)
            }
        };
        true
    }

    /// Whether components without a prototype are hidden
    pub fn hide_endogenous(&self) -> bool {
        self.hide_endogenous
    }

    /// Choose between the full graph and the prototype view.
    ///
    /// Toggling replaces whatever is displayed, including an ion-filtered view.
    pub fn set_hide_endogenous(&mut self, hide: bool) {
        self.hide_endogenous = hide;
        if let LoadState::Loaded(loaded) = &mut self.state {
            loaded.ion_view = None;
        }
    }

    /// Show the nodes of the original graph that carry the given fragment ion.
    ///
    /// Has no effect until a graph is loaded.
    pub fn apply_ion_filter(&mut self, filter: IonFilter) {
        if let LoadState::Loaded(loaded) = &mut self.state {
            let view = filter_by_ion(&loaded.original, &filter);
            loaded.ion_view = Some((filter, view));
        }
    }

    /// Return to the graph selected by the endogenous toggle
    pub fn clear_ion_filter(&mut self) {
        if let LoadState::Loaded(loaded) = &mut self.state {
            loaded.ion_view = None;
        }
    }

    /// Active ion filter, if any
    pub fn ion_filter(&self) -> Option<&IonFilter> {
        self.loaded()
            .and_then(|l| l.ion_view.as_ref())
            .map(|(filter, _)| filter)
    }

    /// The validated graph as loaded
    pub fn original(&self) -> Option<&Graph> {
        self.loaded().map(|l| &l.original)
    }

    /// Connected components of the original graph
    pub fn components(&self) -> &[Component] {
        self.loaded().map(|l| l.components.as_slice()).unwrap_or(&[])
    }

    /// Component of the original graph containing `id`
    pub fn component_of(&self, id: &str) -> Option<&Component> {
        component_of(self.components(), id)
    }

    /// Graph currently on screen, if one is loaded
    pub fn displayed(&self) -> Option<&Graph> {
        let loaded = self.loaded()?;
        Some(match &loaded.ion_view {
            Some((_, view)) => view,
            None if self.hide_endogenous => &loaded.prototype_view,
            None => &loaded.original,
        })
    }

    /// Current display state
    pub fn display(&self) -> DisplayState<'_> {
        match &self.state {
            LoadState::Pending => DisplayState::Pending,
            LoadState::Failed(e) => DisplayState::Failed(e),
            LoadState::Loaded(_) => match self.displayed() {
                Some(graph) if !graph.is_empty() => DisplayState::Ready(graph),
                _ => DisplayState::Empty,
            },
        }
    }

    fn loaded(&self) -> Option<&Loaded> {
        match &self.state {
            LoadState::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load;

    const NODES: &str = "id,mz,rt,isPrototype,msmsSpectrum\n\
                         1,100,1,true,\"[[50,10]]\"\n\
                         2,118,1.5,false,\"[[60,5]]\"\n\
                         3,200,3,false,\"[[50,90],[20,1]]\"\n";
    const EDGES: &str = "id1,id2,mzDiff,rtDiff\n1,2,18,0.5\n";

    fn loaded_view() -> AnalysisView {
        let mut view = AnalysisView::new();
        let ticket = view.begin_load();
        assert!(view.finish_load(ticket, load(NODES, EDGES)));
        view
    }

    fn displayed_ids(view: &AnalysisView) -> Vec<&str> {
        match view.display() {
            DisplayState::Ready(graph) => graph.nodes().iter().map(|n| n.id.as_str()).collect(),
            other => panic!("expected a graph, got {:?}", other),
        }
    }

    #[test]
    fn test_pending_until_loaded() {
        let mut view = AnalysisView::default();
        assert!(matches!(view.display(), DisplayState::Pending));
        assert!(view.hide_endogenous());

        view.begin_load();
        assert!(matches!(view.display(), DisplayState::Pending));
        assert!(view.original().is_none());
        assert!(view.components().is_empty());
    }

    #[test]
    fn test_prototype_view_by_default() {
        let view = loaded_view();
        assert_eq!(displayed_ids(&view), vec!["1", "2"]);
        assert_eq!(view.components().len(), 2);
    }

    #[test]
    fn test_toggle_shows_full_graph() {
        let mut view = loaded_view();
        view.set_hide_endogenous(false);
        assert_eq!(displayed_ids(&view), vec!["1", "2", "3"]);
        view.set_hide_endogenous(true);
        assert_eq!(displayed_ids(&view), vec!["1", "2"]);
    }

    #[test]
    fn test_ion_filter_uses_original_graph() {
        let mut view = loaded_view();
        view.apply_ion_filter(IonFilter::new(50.0));

        // Node 3 is hidden by the prototype view but carries the ion
        assert_eq!(displayed_ids(&view), vec!["1", "3"]);
        assert_eq!(view.ion_filter().map(|f| f.mz), Some(50.0));

        view.clear_ion_filter();
        assert_eq!(displayed_ids(&view), vec!["1", "2"]);
        assert!(view.ion_filter().is_none());
    }

    #[test]
    fn test_ion_filter_without_matches_is_empty() {
        let mut view = loaded_view();
        view.apply_ion_filter(IonFilter::new(999.0));
        assert!(matches!(view.display(), DisplayState::Empty));
    }

    #[test]
    fn test_toggle_drops_ion_filter() {
        let mut view = loaded_view();
        view.apply_ion_filter(IonFilter::new(999.0));
        view.set_hide_endogenous(false);
        assert!(view.ion_filter().is_none());
        assert_eq!(displayed_ids(&view).len(), 3);
    }

    #[test]
    fn test_ion_filter_before_load_is_ignored() {
        let mut view = AnalysisView::new();
        view.apply_ion_filter(IonFilter::new(50.0));
        assert!(view.ion_filter().is_none());
        assert!(matches!(view.display(), DisplayState::Pending));
    }

    #[test]
    fn test_no_prototypes_is_empty_not_pending() {
        let mut view = AnalysisView::new();
        let ticket = view.begin_load();
        view.finish_load(ticket, load("id,mz,rt\n1,100,1\n", "id1,id2,mzDiff,rtDiff\n1,1,0,0\n"));
        assert!(matches!(view.display(), DisplayState::Empty));
    }

    #[test]
    fn test_failed_load() {
        let mut view = AnalysisView::new();
        let ticket = view.begin_load();
        view.finish_load(ticket, load("id,mz\n1,100\n", EDGES));
        assert!(matches!(
            view.display(),
            DisplayState::Failed(LoadError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut view = AnalysisView::new();
        let first = view.begin_load();
        let second = view.begin_load();

        assert!(view.finish_load(second, load(NODES, EDGES)));
        assert!(!view.finish_load(first, load("id,mz\n1,100\n", EDGES)));
        assert_eq!(displayed_ids(&view), vec!["1", "2"]);
    }

    #[test]
    fn test_stale_result_does_not_replace_pending() {
        let mut view = loaded_view();
        let stale = LoadTicket(view.latest);
        view.begin_load();
        assert!(!view.finish_load(stale, load(NODES, EDGES)));
        assert!(matches!(view.display(), DisplayState::Pending));
    }

    #[test]
    fn test_ticket_retired_once_landed() {
        let mut view = AnalysisView::new();
        let ticket = view.begin_load();
        assert!(view.finish_load(ticket, load(NODES, EDGES)));
        view.apply_ion_filter(IonFilter::new(50.0));

        assert!(!view.finish_load(ticket, load("id,mz\n1,100\n", EDGES)));
        assert_eq!(view.ion_filter().map(|f| f.mz), Some(50.0));
        assert_eq!(displayed_ids(&view), vec!["1", "3"]);
    }

    #[test]
    fn test_component_of() {
        let view = loaded_view();
        assert_eq!(
            view.component_of("2").map(|c| c.as_slice()),
            Some(&["1".to_string(), "2".to_string()][..])
        );
        assert!(view.component_of("42").is_none());
    }
}
