//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Scholar client configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# base_url = "https://veeru707-scholarship-backend.hf.space"
# timeout_ms = 30000     # 100-300000

# Replaces the default header set when present.
# [api.headers]
# "Content-Type" = "application/json"

[api.endpoints]
# chat = "/query"
# chat_history = "/api/chat/history"
# health = "/health"
# scholarships = "/api/scholarships"
# scholarship_search = "/api/scholarships/search"
# scholarship_details = "/api/scholarships/:id"
# bookmark_scholarship = "/api/scholarships/bookmark"
# auth_signup = "/api/auth/signup"
# auth_signin = "/api/auth/signin"
# auth_signout = "/api/auth/signout"
# user_profile = "/api/user/profile"
# applications = "/api/applications"
# application_status = "/api/applications/:id"

[retry]
# max_attempts = 3       # 1-10
# base_delay_ms = 1000   # 0-60000, attempt n waits n * base_delay_ms

[chat]
# history_limit = 50     # 1-500

[storage]
# directory = "/path/to/data"   # default: OS data dir + /scholar

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
