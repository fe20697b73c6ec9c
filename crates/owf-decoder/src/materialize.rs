use log::warn;
use owf_types::{Document, Namespace};

use crate::visitor::{Entity, Visit, Visitor};

/// Visitor that builds the whole [`Document`] in memory.
///
/// Entities arrive in wire order with containers before their children,
/// so each one is appended to the most recent open parent:
///
/// ```text
///   Channel    → document.channels
///   Namespace  → last channel's namespaces
///   Signal     → last namespace's signals
///   Event      → last namespace's events
///   Alarm      → last namespace's alarms
/// ```
///
/// It never rejects. If the decode fails partway, the caller drops the
/// materializer and with it the partial tree.
#[derive(Debug, Default)]
pub struct Materializer {
    document: Document,
}

impl Materializer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    fn current_namespace(&mut self) -> Option<&mut Namespace> {
        self.document
            .channels
            .last_mut()
            .and_then(|c| c.namespaces.last_mut())
    }
}

impl Visitor for Materializer {
    fn visit(&mut self, entity: Entity) -> Visit {
        let kind = entity.kind();
        let placed = match entity {
            Entity::Channel(channel) => {
                self.document.channels.push(channel);
                true
            }
            Entity::Namespace(ns) => match self.document.channels.last_mut() {
                Some(channel) => {
                    channel.namespaces.push(ns);
                    true
                }
                None => false,
            },
            Entity::Signal(signal) => self
                .current_namespace()
                .map(|ns| ns.signals.push(signal))
                .is_some(),
            Entity::Event(event) => self
                .current_namespace()
                .map(|ns| ns.events.push(event))
                .is_some(),
            Entity::Alarm(alarm) => self
                .current_namespace()
                .map(|ns| ns.alarms.push(alarm))
                .is_some(),
        };
        if !placed {
            warn!("{kind} arrived with no open parent, dropped");
        }
        Visit::Accept
    }
}
