// Fundamental route constants
pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/home";
pub const RETURN_URL_PARAM: &str = "returnUrl";
pub const INACTIVITY_PARAM: &str = "reason";
pub const INACTIVITY_REASON: &str = "inactivity";

// Durable storage keys mirrored by the session store
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const CURRENT_USER_KEY: &str = "current_user";

// Backend authentication endpoints, relative to the API base URL
pub const LOGIN_ENDPOINT: &str = "users/login";
pub const LOGOUT_ENDPOINT: &str = "users/logout";

// Outbound paths that never receive a credential header
pub const AUTH_EXEMPT_PATHS: [&str; 2] = ["/users/login", "/users/logout"];

// Inactivity and storage defaults
pub const DEFAULT_INACTIVITY_SECS: u64 = 900;
pub const DEFAULT_STORAGE_PATH: &str = ".opsgate/session.json";
