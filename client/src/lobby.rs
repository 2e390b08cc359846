use greenfelt_protocol::AVATAR_COUNT;

/// Steps the registration carousel forward, wrapping back to 1.
pub fn next_avatar(current: u8) -> u8 {
    if current >= AVATAR_COUNT {
        1
    } else {
        current + 1
    }
}

/// Steps the carousel backward, wrapping up to the last avatar.
pub fn previous_avatar(current: u8) -> u8 {
    if current <= 1 {
        AVATAR_COUNT
    } else {
        current - 1
    }
}

/// Asset path for an avatar number, as served by the static tree.
pub fn avatar_asset(avatar: u8) -> String {
    format!("/static/img/avatars/avatar_{}.png", avatar)
}
