// src/defs.rs
// Shared constants for the relay server and the game client.

/// Route the game client posts its outcome to
pub const NOTIFY_ROUTE: &str = "/api/line-notify";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USERS_FILE: &str = "conf/users.json";
pub const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";

pub const SERVER_CONF_PATH: &str = "conf/server.conf";
pub const CLIENT_CONF_PATH: &str = "conf/client.conf";

/// Message sent when the player misses the stop. Losing forfeits the score,
/// so the text always reports zero.
pub const LOSS_TEMPLATE: &str = "ゲームオーバー！\n残念ながら、福工大前で降りることができませんでした。\nスコア: 0点\n\nもう一度チャレンジしてみましょう！";

// Success text is built around the score: PREFIX + score + SUFFIX
pub const SUCCESS_TEMPLATE_PREFIX: &str = "おめでとうございます！\n福工大前で無事に降りることができました！\nスコア: ";
pub const SUCCESS_TEMPLATE_SUFFIX: &str = "点";

// Client-facing error bodies
pub const ERR_USER_NOT_FOUND: &str = "user not found";
pub const ERR_MESSAGING_ID_MISSING: &str = "messaging identifier missing";
pub const ERR_NOTIFICATION_FAILED: &str = "notification failed";
pub const ERR_INVALID_REQUEST: &str = "invalid request";
