use owf_types::{Alarm, Channel, EntityKind, Event, Namespace, Signal};

/// A fully decoded entity, handed to the [`Visitor`] by value.
///
/// Container entities arrive as soon as their own header fields are
/// decoded, before any of their children:
///
/// ```text
///   Channel      ← id only, `namespaces` is empty
///   Namespace    ← id, t0, dt; no signals/events/alarms yet
///   Signal       ← complete
///   Event        ← complete
///   Alarm        ← complete
/// ```
///
/// The visitor owns the entity from then on. Dropping it is how a
/// streaming consumer releases it.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Channel(Channel),
    Namespace(Namespace),
    Signal(Signal),
    Event(Event),
    Alarm(Alarm),
}

impl Entity {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Channel(_) => EntityKind::Channel,
            Self::Namespace(_) => EntityKind::Namespace,
            Self::Signal(_) => EntityKind::Signal,
            Self::Event(_) => EntityKind::Event,
            Self::Alarm(_) => EntityKind::Alarm,
        }
    }
}

/// The visitor's verdict on an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visit {
    /// Keep decoding normally.
    #[default]
    Accept,

    /// Skip the rest of this entity's segment.
    ///
    /// For a Channel or Namespace the remaining bytes (its children) are
    /// drained unread and decoding resumes at the next sibling. For a
    /// Signal, Event or Alarm only that one item is dropped.
    Reject,
}

impl Visit {
    #[must_use]
    pub fn is_reject(self) -> bool {
        self == Self::Reject
    }
}

/// Caller-supplied hook invoked once per decoded entity, in wire order.
///
/// Any `FnMut(Entity) -> Visit` closure is a visitor:
///
/// ```rust
/// use owf_decoder::{Entity, OwfDecoder, Visit};
///
/// let mut names = Vec::new();
/// let mut visitor = |entity: Entity| {
///   if let Entity::Channel(c) = &entity {
///     names.push(c.id.to_string_lossy());
///   }
///   Visit::Accept
/// };
///
/// // "OWF1" + an empty top-level segment.
/// let bytes = [b'O', b'W', b'F', b'1', 0, 0, 0, 0];
/// OwfDecoder::new().visit_bytes(&bytes, &mut visitor).unwrap();
/// assert!(names.is_empty());
/// ```
pub trait Visitor {
    fn visit(&mut self, entity: Entity) -> Visit;
}

impl<F: FnMut(Entity) -> Visit> Visitor for F {
    fn visit(&mut self, entity: Entity) -> Visit {
        self(entity)
    }
}

/// Visitor that accepts and drops everything.
///
/// Decoding with it validates the whole document without keeping any
/// of it, which is what the decoder does when no visitor is installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl Visitor for AcceptAll {
    fn visit(&mut self, _entity: Entity) -> Visit {
        Visit::Accept
    }
}
