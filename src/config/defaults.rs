use super::constants::*;

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn listen_addr() -> String {
    LISTEN_ADDR.to_string()
}

pub(crate) fn endpoint_path() -> String {
    ENDPOINT_PATH.to_string()
}

pub(crate) fn client_endpoint() -> String {
    CLIENT_ENDPOINT.to_string()
}

pub(crate) fn client_timeout_secs() -> Option<u64> {
    Some(CLIENT_TIMEOUT_SECS)
}

pub(crate) fn success_message() -> String {
    SUCCESS_MESSAGE.to_string()
}

pub(crate) fn failure_prefix() -> String {
    FAILURE_PREFIX.to_string()
}

pub(crate) fn not_post_message() -> String {
    NOT_POST_MESSAGE.to_string()
}

pub(crate) fn network_error_message() -> String {
    NETWORK_ERROR_MESSAGE.to_string()
}

pub(crate) fn in_progress_message() -> String {
    IN_PROGRESS_MESSAGE.to_string()
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn storage_path() -> String {
    STORAGE_PATH.to_string()
}
