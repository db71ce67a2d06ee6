pub const CIVICMINTER_FRAMES: [&str; 3] = [
    r#"
  ___ _____   _____ ___ __  __ ___ _  _ _____ ___ ___
 / __|_ _\ \ / /_ _/ __|  \/  |_ _| \| |_   _| __| _ \
| (__ | | \ V / | | (__| |\/| || || .` | | | | _||   /
 \___|___| \_/ |___\___|_|  |_|___|_|\_| |_| |___|_|_\
"#,
    r#"
  ___ _____   _____ ___ __  __ ___ _  _ _____ ___ ___
 / __|_ _\ \ / /_ _/ __|  \/  |_ _| \| |_   _| __| _ \
| (__ | | \ V / | | (__| |\/| || || .` | | | | _||   /
 \___|___| \_/ |___\___|_|  |_|___|_|\_| |_| |___|_|_\
 ░▒▓█ generate ▓▒░                     ░▒▓ mint █▓▒░
"#,
    r#"
  ___ _____   _____ ___ __  __ ___ _  _ _____ ___ ___
 / __|_ _\ \ / /_ _/ __|  \/  |_ _| \| |_   _| __| _ \
| (__ | | \ V / | | (__| |\/| || || .` | | | | _||   /
 \___|___| \_/ |___\___|_|  |_|___|_|\_| |_| |___|_|_\
 ▒▓█░ generate ░█▓▒                     ▒▓█ mint ░█▓▒
"#,
];

pub const CANVAS_IDLE_FRAMES: [&str; 3] = [
    r#"
╭──────────────╮
│ ·          · │
│     ╱╲       │
│    ╱  ╲  ◠   │
│ ·╱    ╲    · │
╰──────────────╯
"#,
    r#"
╭──────────────╮
│  ·        ·  │
│     ╱╲    ◠  │
│    ╱  ╲      │
│  ╱    ╲   ·  │
╰──────────────╯
"#,
    r#"
╭──────────────╮
│   ·      ·   │
│     ╱╲  ◠    │
│    ╱  ╲      │
│ ╱·    ╲  ·   │
╰──────────────╯
"#,
];

pub const CANVAS_BUSY_FRAMES: [&str; 3] = [
    r#"
╭──────────────╮
│▓▒░          ░│
│▒░          ░▒│
│░          ░▒▓│
│          ░▒▓▒│
╰──────────────╯
"#,
    r#"
╭──────────────╮
│▒▓▒░        ░▒│
│▓▒░        ░▒▓│
│▒░        ░▒▓▒│
│░        ░▒▓▒░│
╰──────────────╯
"#,
    r#"
╭──────────────╮
│░▒▓▒░      ░▒▓│
│▒▓▒░      ░▒▓▒│
│▓▒░      ░▒▓▒░│
│▒░      ░▒▓▒░ │
╰──────────────╯
"#,
];

pub struct UiConstants;

impl UiConstants {
    pub const BUILD_ON_HEDERA: &'static str = "Build on Hedera";
    pub const NETWORK_PROGRESS: &'static str = "[■■■■■□□□□□]";
    pub const WALLET_PROGRESS: &'static str = "[■■■■■■■□□□]";
}
