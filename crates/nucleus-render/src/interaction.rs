//! Hover / lock state of the orbital visualization.
//!
//! `Locked` blocks hover changes until the locked industry is clicked again (or another
//! industry is clicked). Company clicks never touch the state: they request navigation and stop
//! the click from reaching the enclosing industry node.

use crate::{Error, Result};
use nucleus_core::{DataProvider, Navigator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "industry", rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering(String),
    Locked(String),
}

impl InteractionState {
    pub fn active_industry(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) | Self::Locked(id) => Some(id),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    pub fn pointer_enter(&mut self, industry_id: &str) {
        if self.is_locked() {
            return;
        }
        *self = Self::Hovering(industry_id.to_string());
    }

    pub fn pointer_leave(&mut self) {
        if let Self::Hovering(_) = self {
            *self = Self::Idle;
        }
    }

    pub fn click_industry(&mut self, industry_id: &str) {
        *self = match self {
            Self::Locked(id) if id == industry_id => Self::Idle,
            _ => Self::Locked(industry_id.to_string()),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Enter,
    Leave,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Industry(String),
    Company(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitalEvent {
    pub kind: EventKind,
    pub target: Target,
}

impl OrbitalEvent {
    pub fn enter(industry_id: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Enter,
            target: Target::Industry(industry_id.into()),
        }
    }

    pub fn leave(industry_id: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Leave,
            target: Target::Industry(industry_id.into()),
        }
    }

    pub fn click(industry_id: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Click,
            target: Target::Industry(industry_id.into()),
        }
    }

    pub fn click_company(slug: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Click,
            target: Target::Company(slug.into()),
        }
    }

    /// Parses a comma-separated event script:
    /// `enter:<industry>`, `leave[:<industry>]`, `click:<industry>`, `company:<slug>`.
    pub fn parse_sequence(text: &str) -> Result<Vec<Self>> {
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse)
            .collect()
    }

    pub fn parse(token: &str) -> Result<Self> {
        let (verb, arg) = match token.split_once(':') {
            Some((v, a)) => (v.trim(), a.trim()),
            None => (token.trim(), ""),
        };
        let invalid = |message: &str| Error::InvalidEvent {
            token: token.to_string(),
            message: message.to_string(),
        };
        match verb {
            "leave" => Ok(Self::leave(arg)),
            "enter" | "click" | "company" if arg.is_empty() => Err(invalid("missing target id")),
            "enter" => Ok(Self::enter(arg)),
            "click" => Ok(Self::click(arg)),
            "company" => Ok(Self::click_company(arg)),
            _ => Err(invalid("expected enter, leave, click or company")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Owns the interaction state for one visualization instance and routes pointer events to it.
pub struct OrbitalController<'a, P: ?Sized, N: ?Sized> {
    state: InteractionState,
    provider: &'a P,
    navigator: &'a N,
}

impl<'a, P, N> OrbitalController<'a, P, N>
where
    P: DataProvider + ?Sized,
    N: Navigator + ?Sized,
{
    pub fn new(provider: &'a P, navigator: &'a N) -> Self {
        Self {
            state: InteractionState::Idle,
            provider,
            navigator,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn into_state(self) -> InteractionState {
        self.state
    }

    /// Clicks run innermost-first: a company node, then its owning industry node. Enter/leave do
    /// not bubble.
    pub fn dispatch(&mut self, event: &OrbitalEvent) -> Propagation {
        let before = self.state.clone();
        let outcome = match (&event.kind, &event.target) {
            (EventKind::Enter, Target::Industry(id)) => {
                self.state.pointer_enter(id);
                Propagation::Continue
            }
            (EventKind::Leave, Target::Industry(_)) => {
                self.state.pointer_leave();
                Propagation::Continue
            }
            (EventKind::Enter | EventKind::Leave, Target::Company(_)) => Propagation::Continue,
            (EventKind::Click, target) => self.bubble_click(target),
        };
        if before != self.state {
            tracing::debug!(from = ?before, to = ?self.state, "orbital state transition");
        }
        outcome
    }

    pub fn dispatch_all<'e>(&mut self, events: impl IntoIterator<Item = &'e OrbitalEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    fn bubble_click(&mut self, target: &Target) -> Propagation {
        for node in self.click_path(target) {
            if self.on_click(&node) == Propagation::Stop {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }

    fn click_path(&self, target: &Target) -> Vec<Target> {
        match target {
            Target::Industry(_) => vec![target.clone()],
            Target::Company(slug) => {
                let mut path = vec![target.clone()];
                if let Some(company) = self.provider.company_by_slug(slug) {
                    path.push(Target::Industry(company.industry_id.clone()));
                }
                path
            }
        }
    }

    fn on_click(&mut self, node: &Target) -> Propagation {
        match node {
            Target::Company(slug) => {
                self.navigator.navigate_to_company(slug);
                Propagation::Stop
            }
            Target::Industry(id) => {
                self.state.click_industry(id);
                Propagation::Continue
            }
        }
    }
}
