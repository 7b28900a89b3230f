use uuid::Uuid;

pub const STORAGE_PREFIX: &str = "meetheart_";
pub const USERS_KEY: &str = "meetheart_users";
pub const CONVERSATIONS_KEY: &str = "meetheart_conversations";
pub const MESSAGES_KEY: &str = "meetheart_messages";
pub const PASSWORDS_KEY: &str = "meetheart_passwords";
pub const CURRENT_USER_KEY: &str = "meetheart_current_user";

pub const STORAGE_FILE_NAME: &str = "storage.json";

pub const DEMO_EMAIL: &str = "demo@meetheart.com";
pub const DEMO_PASSWORD: &str = "demo123456";
pub const DEMO_USER_ID: Uuid = Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0123);

pub struct Env {
    pub data_dir: Option<String>,
    pub simulated_latency_ms: u64,
    pub reset_store: bool,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        // unset or empty keeps everything in memory
        let data_dir = std::env::var("DATA_DIR").ok().filter(|dir| !dir.trim().is_empty());

        let simulated_latency_ms = std::env::var("SIMULATED_LATENCY_MS")
            .unwrap_or_else(|_| "500".to_string())
            .parse::<u64>()
            .expect("SIMULATED_LATENCY_MS must be a valid u64 integer");
        let reset_store = std::env::var("RESET_STORE")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env { data_dir, simulated_latency_ms, reset_store, frontend_url, ip, port }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
