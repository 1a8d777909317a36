use ratatui::widgets::ListState;

use crate::fetch::{self, FetchMsg, FetchSender};
use crate::record::Record;
use crate::toast::ToastManager;
use crate::view_model::ViewModel;

/// Whether keystrokes go to the search box or to navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
}

/// Case-insensitive search over `records`; blank `search` keeps everything.
pub fn filter<'a, R: Record>(records: &'a [R], search: &str) -> Vec<&'a R> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.matches(&needle)).collect()
}

pub struct App<R: Record> {
    pub view_model: ViewModel<R>,
    /// Same slot the view-model raises toasts on.
    pub toasts: ToastManager,
    fetch_tx: FetchSender<R>,
    /// Current search text, as typed.
    pub search: String,
    pub mode: Mode,
    /// Selection within the *filtered* list.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl<R: Record> App<R> {
    pub fn new(view_model: ViewModel<R>, toasts: ToastManager, fetch_tx: FetchSender<R>) -> Self {
        Self {
            view_model,
            toasts,
            fetch_tx,
            search: String::new(),
            mode: Mode::Browse,
            list_state: ListState::default(),
            quit: false,
        }
    }

    // -- fetching ------------------------------------------------------------

    /// Start a fetch in the background.  The result arrives via [`apply`](Self::apply).
    pub fn refresh(&mut self) {
        let ticket = self.view_model.begin_refresh();
        tracing::info!(?ticket, "refresh requested");
        fetch::spawn(self.view_model.requirement(), ticket, self.fetch_tx.clone());
    }

    pub fn apply(&mut self, msg: FetchMsg<R>) {
        if self.view_model.complete_refresh(msg.ticket, msg.result) {
            self.clamp_selection();
        }
    }

    /// Records matching the search text, in fetch order.
    pub fn filtered(&self) -> Vec<&R> {
        filter(&self.view_model.state().records, &self.search)
    }

    pub fn dismiss_toast(&self) {
        if self.toasts.is_visible() {
            tracing::debug!("toast dismissed");
            self.toasts.dismiss();
        }
    }

    // -- search --------------------------------------------------------------

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn leave_search(&mut self) {
        self.mode = Mode::Browse;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.reset_selection();
    }

    pub fn pop_search_char(&mut self) {
        if self.search.pop().is_some() {
            self.reset_selection();
        }
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        let selected = if self.filtered().is_empty() { None } else { Some(0) };
        self.list_state.select(selected);
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.filtered().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.filtered().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}
