//! Room admission policies.
//!
//! The relay's wire protocol lets any connection name any room. Which joins
//! are admitted is decided here, so a deployment can tighten it without
//! touching the relay core.

use super::{Principal, RoomId};

/// Decides whether a connection may join a room.
pub trait JoinPolicy: Send + Sync {
    fn admits(&self, principal: &Principal, room: &RoomId) -> bool;
}

/// Admits every join. Matches the deployed protocol.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenJoinPolicy;

impl JoinPolicy for OpenJoinPolicy {
    fn admits(&self, _principal: &Principal, _room: &RoomId) -> bool {
        true
    }
}

/// Admits only the room derived from the principal's team.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeamJoinPolicy;

impl JoinPolicy for TeamJoinPolicy {
    fn admits(&self, principal: &Principal, room: &RoomId) -> bool {
        principal
            .team_id
            .as_deref()
            .and_then(|team| RoomId::for_team(team).ok())
            .is_some_and(|own| &own == room)
    }
}
