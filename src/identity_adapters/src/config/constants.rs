pub mod env {
    pub const CONFIG_DIR_ENV_VAR: &str = "IDENTITY_CONFIG_DIR";
    pub const ENV_PREFIX: &str = "IDENTITY";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const SESSION_COOKIE_NAME: &str = "identity_session";
pub const SESSION_TTL_SECONDS: u64 = 60 * 60 * 24;
pub const VERIFICATION_TOKEN_TTL_SECONDS: u64 = 60 * 60 * 48;
pub const VERIFICATION_QUEUE_CAPACITY: usize = 1024;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const VERIFICATION_LINK_BASE_URL: &str = "http://localhost:3000";

    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@identity.local";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub mod email_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
