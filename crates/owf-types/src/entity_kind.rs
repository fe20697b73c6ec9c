use std::fmt;

/// The five kinds of entity the decoder dispatches, in nesting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Channel,
    Namespace,
    Signal,
    Event,
    Alarm,
}

impl EntityKind {
    /// Stable lowercase name, used in logs and CLI output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Namespace => "namespace",
            Self::Signal => "signal",
            Self::Event => "event",
            Self::Alarm => "alarm",
        }
    }

    /// Nesting depth below the document: channels are 0, leaves are 2.
    #[must_use]
    pub fn depth(self) -> usize {
        match self {
            Self::Channel => 0,
            Self::Namespace => 1,
            Self::Signal | Self::Event | Self::Alarm => 2,
        }
    }

    /// Whether rejecting this kind discards a whole subtree.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Channel | Self::Namespace)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
