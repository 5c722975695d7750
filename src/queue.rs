//! The unit moved through the engine's queue.
//!
//! An item is either a text entry or a command. Commands carry client
//! mutations so they take effect exactly between the entries pushed before
//! and after them.

use crate::client::ClientState;
use crate::level::Level;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Kind of a queue item, with its annex byte.
///
/// The annex only means something together with the kind (a level for text,
/// a command id for commands), so the two are stored as one enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemKind {
    /// Raises a panic in the dispatcher; exercises its fault boundary.
    #[cfg_attr(not(test), allow(dead_code))]
    Forbidden,
    Text(Level),
    /// Raw command id, validated by the dispatcher.
    Command(u8),
    /// Kind byte the dispatcher does not understand.
    #[cfg_attr(not(test), allow(dead_code))]
    Unrecognized(u8),
}

impl ItemKind {
    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::Forbidden => 0,
            Self::Text(_) => 1,
            Self::Command(_) => 2,
            Self::Unrecognized(code) => code,
        }
    }

    pub(crate) const fn annex(self) -> u8 {
        match self {
            Self::Text(level) => level.as_u8(),
            Self::Command(id) => id,
            Self::Forbidden | Self::Unrecognized(_) => 0,
        }
    }
}

/// Command ids. Client commands occupy a contiguous range so validation is a
/// bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum CommandId {
    Dummy = 0,
    ClientDummy = 1,
    ClientSetLevel = 2,
    ClientSetName = 3,
    PingFallback = 4,
}

impl CommandId {
    const CLIENT_MIN: u8 = Self::ClientDummy as u8;
    const CLIENT_MAX: u8 = Self::ClientSetName as u8;

    pub(crate) const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Dummy),
            1 => Some(Self::ClientDummy),
            2 => Some(Self::ClientSetLevel),
            3 => Some(Self::ClientSetName),
            4 => Some(Self::PingFallback),
            _ => None,
        }
    }

    pub(crate) const fn is_client_command(raw: u8) -> bool {
        raw >= Self::CLIENT_MIN && raw <= Self::CLIENT_MAX
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Dummy => "dummy",
            Self::ClientDummy => "client_dummy",
            Self::ClientSetLevel => "set_level",
            Self::ClientSetName => "set_name",
            Self::PingFallback => "ping_fallback",
        }
    }
}

impl From<CommandId> for u8 {
    fn from(id: CommandId) -> Self {
        id as Self
    }
}

pub(crate) struct QueueItem {
    /// Set by the push primitive right before the item enters the queue.
    pub(crate) pushed: Option<DateTime<Local>>,
    /// `None` for engine-internal items.
    pub(crate) client: Option<Arc<ClientState>>,
    pub(crate) data: Vec<u8>,
    pub(crate) kind: ItemKind,
}

impl QueueItem {
    pub(crate) const fn text(client: Option<Arc<ClientState>>, level: Level, data: Vec<u8>) -> Self {
        Self {
            pushed: None,
            client,
            data,
            kind: ItemKind::Text(level),
        }
    }

    pub(crate) fn command(client: Option<Arc<ClientState>>, id: impl Into<u8>, data: Vec<u8>) -> Self {
        Self {
            pushed: None,
            client,
            data,
            kind: ItemKind::Command(id.into()),
        }
    }

    /// One-line description for diagnostics.
    pub(crate) fn describe(&self) -> String {
        format!(
            "type={} annex={} data=`{}`",
            self.kind.code(),
            self.kind.annex(),
            String::from_utf8_lossy(&self.data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_command_range() {
        assert!(!CommandId::is_client_command(CommandId::Dummy.into()));
        assert!(CommandId::is_client_command(CommandId::ClientDummy.into()));
        assert!(CommandId::is_client_command(CommandId::ClientSetLevel.into()));
        assert!(CommandId::is_client_command(CommandId::ClientSetName.into()));
        assert!(!CommandId::is_client_command(CommandId::PingFallback.into()));
        assert!(!CommandId::is_client_command(200));
    }

    #[test]
    fn command_ids_decode() {
        for raw in 0..=4 {
            assert_eq!(CommandId::from_raw(raw).map(u8::from), Some(raw));
        }
        assert_eq!(CommandId::from_raw(5), None);
    }

    #[test]
    fn annex_follows_kind() {
        assert_eq!(ItemKind::Text(Level::Warn).annex(), 4);
        assert_eq!(ItemKind::Command(3).annex(), 3);
        assert_eq!(ItemKind::Forbidden.annex(), 0);
        assert_eq!(ItemKind::Unrecognized(9).code(), 9);
    }

    #[test]
    fn describe_shows_kind_annex_and_data() {
        let item = QueueItem::text(None, Level::Info, b"hello".to_vec());
        assert_eq!(item.describe(), "type=1 annex=3 data=`hello`");
        assert!(item.pushed.is_none());
    }
}
