//! Recording host shared by the bridge integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use oomph::prelude::*;

pub const GAME_PORT: u16 = 19132;

#[derive(Debug, Default)]
pub struct MockHost {
    pub online: Vec<PlayerId>,
    pub staff: HashSet<PlayerId>,
    pub sent: Vec<(PlayerId, String)>,
    pub pings: Vec<(PlayerId, i64)>,
    pub xuids: Vec<(PlayerId, Xuid)>,
}

impl MockHost {
    pub fn join_staff(&mut self, id: u64) -> PlayerId {
        let p = PlayerId(id);
        self.online.push(p);
        self.staff.insert(p);
        p
    }

    pub fn join_regular(&mut self, id: u64) -> PlayerId {
        let p = PlayerId(id);
        self.online.push(p);
        p
    }

    pub fn messages_for(&self, player: PlayerId) -> Vec<&str> {
        self.sent
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl AlertAudience for MockHost {
    fn online_players(&self) -> Vec<PlayerId> {
        self.online.clone()
    }

    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        permission == ALERT_PERMISSION && self.staff.contains(&player)
    }

    fn send_message(&mut self, player: PlayerId, message: &str) {
        self.sent.push((player, message.to_string()));
    }
}

impl Host for MockHost {
    fn update_ping(&mut self, player: PlayerId, ping_ms: i64) {
        self.pings.push((player, ping_ms));
    }

    fn assign_xuid(&mut self, player: PlayerId, xuid: &Xuid) {
        self.xuids.push((player, xuid.clone()));
    }
}

pub fn endpoint(ip: &str) -> Endpoint {
    Endpoint(format!("{ip}:{GAME_PORT}").parse().unwrap())
}

pub fn auth_message(xuid: &str) -> ScriptMessage {
    ScriptMessage::new(MessageKind::AUTHENTICATION_ID, format!(r#"{{"xuid":"{xuid}"}}"#))
}

pub fn latency_message(raknet: f64) -> ScriptMessage {
    ScriptMessage::new(MessageKind::LATENCY_REPORT_ID, format!(r#"{{"raknet":{raknet}}}"#))
}

pub fn flag_message(
    player: &str,
    check_main: &str,
    check_sub: &str,
    violations: f64,
) -> ScriptMessage {
    ScriptMessage::new(
        MessageKind::FLAGGED_ID,
        format!(
            r#"{{"player":"{player}","check_main":"{check_main}","check_sub":"{check_sub}","violations":{violations}}}"#
        ),
    )
}

pub fn identity(username: &str) -> LoginIdentity {
    LoginIdentity {
        username: username.to_string(),
        xuid: None,
    }
}
