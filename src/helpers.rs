use chrono::NaiveDateTime;

/// Current UTC timestamp, naive because that is what the schema stores.
pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
