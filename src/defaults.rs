pub const DEFAULT_SERVICE_MINUTES: f64 = 5.0;
pub const DEFAULT_AVG_SPEED_KMH: f64 = 30.0;

pub fn default_statuses() -> Vec<String> {
    vec!["pending".to_string()]
}
