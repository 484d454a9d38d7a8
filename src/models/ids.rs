use chrono::{DateTime, Duration, Utc};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random fragment at the start of every record id
const RANDOM_FRAGMENT_LEN: usize = 9;

/// Generate a record id: random base-36 fragment followed by the current
/// time in milliseconds, also base-36. Collisions are not checked.
pub fn generate_id() -> String {
    let random = to_base36(uuid::Uuid::new_v4().as_u128());
    let random: String = random.chars().take(RANDOM_FRAGMENT_LEN).collect();
    let millis = Utc::now().timestamp_millis().max(0) as u128;

    format!("{}{}", random, to_base36(millis))
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    String::from_utf8(digits).unwrap_or_default()
}

/// Timestamp for a mutation that must land strictly after `previous`
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    let floor = previous + Duration::milliseconds(1);
    if now > previous {
        now
    } else {
        floor
    }
}
