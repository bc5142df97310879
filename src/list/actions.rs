//! Row Actions
//!
//! Caller-injected per-row actions. The list renders them opaquely, in the
//! order they were added, and passes the row's record plus a host context
//! (`gpui::App` in the desktop view) to the handler.

use std::rc::Rc;

type Handler<R, C> = Rc<dyn Fn(&R, &mut C) + 'static>;

/// One action button on a row
pub struct RowAction<R, C> {
    /// Stable id, used as the element id
    pub id: &'static str,
    pub label: String,
    handler: Handler<R, C>,
}

impl<R, C> Clone for RowAction<R, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<R, C> RowAction<R, C> {
    pub fn invoke(&self, record: &R, cx: &mut C) {
        (self.handler)(record, cx);
    }
}

/// Ordered set of row actions
pub struct RowActions<R, C> {
    actions: Vec<RowAction<R, C>>,
}

impl<R, C> Default for RowActions<R, C> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<R, C> Clone for RowActions<R, C> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
        }
    }
}

impl<R, C> RowActions<R, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action
    pub fn add(
        mut self,
        id: &'static str,
        label: impl Into<String>,
        handler: impl Fn(&R, &mut C) + 'static,
    ) -> Self {
        self.actions.push(RowAction {
            id,
            label: label.into(),
            handler: Rc::new(handler),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowAction<R, C>> {
        self.actions.iter()
    }

    pub fn find(&self, id: &str) -> Option<&RowAction<R, C>> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// Record-level callbacks of a list
pub struct ListCallbacks<R, C> {
    pub on_record_click: Option<Handler<R, C>>,
    pub on_record_select: Option<Rc<dyn Fn(&str, bool, &mut C) + 'static>>,
}

impl<R, C> Default for ListCallbacks<R, C> {
    fn default() -> Self {
        Self {
            on_record_click: None,
            on_record_select: None,
        }
    }
}

impl<R, C> Clone for ListCallbacks<R, C> {
    fn clone(&self) -> Self {
        Self {
            on_record_click: self.on_record_click.clone(),
            on_record_select: self.on_record_select.clone(),
        }
    }
}

impl<R, C> ListCallbacks<R, C> {
    pub fn on_record_click(mut self, f: impl Fn(&R, &mut C) + 'static) -> Self {
        self.on_record_click = Some(Rc::new(f));
        self
    }

    pub fn on_record_select(mut self, f: impl Fn(&str, bool, &mut C) + 'static) -> Self {
        self.on_record_select = Some(Rc::new(f));
        self
    }

    pub fn click(&self, record: &R, cx: &mut C) {
        if let Some(f) = &self.on_record_click {
            f(record, cx);
        }
    }

    pub fn select(&self, id: &str, selected: bool, cx: &mut C) {
        if let Some(f) = &self.on_record_select {
            f(id, selected, cx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::Player;

    #[test]
    fn test_actions_run_in_order_with_context() {
        let actions: RowActions<Player, Vec<String>> = RowActions::new()
            .add("view", "View", |p: &Player, log: &mut Vec<String>| {
                log.push(format!("view {}", p.id));
            })
            .add("star", "Star", |p: &Player, log: &mut Vec<String>| {
                log.push(format!("star {}", p.id));
            });

        let player = Player {
            id: "p7".to_string(),
            ..Default::default()
        };
        let mut log = Vec::new();
        for action in actions.iter() {
            action.invoke(&player, &mut log);
        }
        assert_eq!(log, vec!["view p7", "star p7"]);
        assert_eq!(actions.find("star").map(|a| a.label.as_str()), Some("Star"));
        assert!(actions.find("delete").is_none());
    }

    #[test]
    fn test_callbacks_are_optional() {
        let callbacks: ListCallbacks<Player, Vec<String>> = ListCallbacks::default()
            .on_record_select(|id, selected, log: &mut Vec<String>| {
                log.push(format!("{id}:{selected}"));
            });
        let mut log = Vec::new();
        callbacks.click(&Player::default(), &mut log);
        callbacks.select("p1", true, &mut log);
        assert_eq!(log, vec!["p1:true"]);
    }
}
